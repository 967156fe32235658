//! A list head behind a spin lock.
//!
//! [`LockedList`] is the shape used for queues shared between threads: producers
//! append entries at the back, consumers take them from the front in FIFO order,
//! and a whole pass over the list (e.g. draining every pending entry) runs inside
//! a single critical section.

use core::{pin::Pin, ptr::NonNull};

use crossbeam_utils::CachePadded;
use spin::Mutex;

use super::{head::ListHead, raw, traits::HasLink};

/// An intrusive list whose every operation runs under a spin lock.
pub struct LockedList<T: HasLink> {
    inner: CachePadded<Mutex<ListHead<T>>>,
}

// The lock serializes every access to the links, and entries are only handed out
// as pointers.
unsafe impl<T: HasLink + Send> Send for LockedList<T> {}
unsafe impl<T: HasLink + Send> Sync for LockedList<T> {}

impl<T: HasLink> LockedList<T> {
    /// Creates a new, empty locked list.
    pub const fn new() -> Self {
        Self {
            inner: CachePadded::new(Mutex::new(ListHead::new())),
        }
    }

    /// Runs `f` on the list with the lock held for the whole call.
    ///
    /// This is the way to run a pass that spans several operations, e.g. scanning
    /// the list and removing some of its entries.
    pub fn with_locked<R>(self: Pin<&Self>, f: impl FnOnce(Pin<&ListHead<T>>) -> R) -> R {
        let guard = self.get_ref().inner.lock();
        // The head never leaves the mutex, which is pinned along with `self`.
        let head = unsafe { Pin::new_unchecked(&*guard) };
        f(head)
    }

    /// Appends `entry` at the back of the list.
    ///
    /// # Safety
    ///
    /// `entry` must point to a live `T` that is not in any list, and that stays at
    /// the same address until it is taken out of this list.
    pub unsafe fn push_back(self: Pin<&Self>, entry: NonNull<T>) {
        self.with_locked(|head| unsafe { head.push_back(entry) });
    }

    /// Takes the entry at the front of the list, or `None` if it is empty.
    pub fn pop_front(self: Pin<&Self>) -> Option<NonNull<T>> {
        self.with_locked(|head| head.pop_front())
    }

    /// Returns `true` if the list has no entries.
    pub fn is_empty(self: Pin<&Self>) -> bool {
        self.with_locked(|head| head.is_empty())
    }

    /// Counts the entries of the list.
    pub fn len(self: Pin<&Self>) -> usize {
        self.with_locked(|head| head.count_nodes())
    }

    /// Removes every entry, front to back, handing each one to `f` once it is out
    /// of the list. Returns the number of entries removed.
    ///
    /// `f` runs with the lock held and must not touch this list.
    pub fn drain(self: Pin<&Self>, mut f: impl FnMut(NonNull<T>)) -> usize {
        let drained = self.with_locked(|head| {
            let mut drained = 0;
            for entry in unsafe { head.iter_safe() } {
                unsafe { raw::del_init(T::link_of(entry)) };
                f(entry);
                drained += 1;
            }
            drained
        });
        log::trace!(target: "halo_collections::locked", "drained {} entries", drained);
        drained
    }

    /// Removes the entries for which `pred` returns `true`, keeping the order of the
    /// others. Returns the number of entries removed.
    ///
    /// `pred` runs with the lock held and must not touch this list.
    pub fn remove_if(self: Pin<&Self>, mut pred: impl FnMut(NonNull<T>) -> bool) -> usize {
        let removed = self.with_locked(|head| {
            let mut removed = 0;
            for entry in unsafe { head.iter_safe() } {
                if pred(entry) {
                    unsafe { raw::del_init(T::link_of(entry)) };
                    removed += 1;
                }
            }
            removed
        });
        log::trace!(target: "halo_collections::locked", "removed {} entries", removed);
        removed
    }
}

impl<T: HasLink> Default for LockedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

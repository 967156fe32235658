use core::{cell::Cell, fmt, marker::PhantomPinned, ptr::NonNull};

const POISONED: &str = "list link used after `del` or before `init`";

/// A link in an intrusive circular doubly linked list.
///
/// This struct should be embedded in the struct that you want to store in the list,
/// or used on its own as the sentinel of a list. Both pointers are kept in [`Cell`]s
/// so that relinking only ever needs shared references to the links involved.
///
/// A link is in one of three states:
///
/// - *unset*: both pointers are `None`. This is the state after [`ListLink::new`]
///   and after [`raw::del`](super::raw::del).
/// - *self-pointing*: both pointers refer to the link itself. An empty list head,
///   or a detached entry that is safe to query.
/// - *linked*: a member of exactly one ring.
pub struct ListLink {
    next: Cell<Option<NonNull<ListLink>>>,
    prev: Cell<Option<NonNull<ListLink>>>,
    _pin: PhantomPinned,
}

impl ListLink {
    /// Creates a new, unset link.
    pub const fn new() -> Self {
        Self {
            next: Cell::new(None),
            prev: Cell::new(None),
            _pin: PhantomPinned,
        }
    }

    /// Get the next pointer of the link
    #[inline]
    pub fn next(&self) -> Option<NonNull<ListLink>> {
        self.next.get()
    }

    /// Get the previous pointer of the link
    #[inline]
    pub fn prev(&self) -> Option<NonNull<ListLink>> {
        self.prev.get()
    }

    /// Returns `true` if the link has neighbours other than itself.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.next
            .get()
            .is_some_and(|next| next != NonNull::from(self))
    }

    /// Returns `true` if both pointers are `None`, either because the link was
    /// never initialized or because it was removed with `del`.
    #[inline]
    pub fn is_unset(&self) -> bool {
        self.next.get().is_none() && self.prev.get().is_none()
    }

    #[inline]
    pub(crate) fn next_ptr(&self) -> NonNull<ListLink> {
        self.next.get().expect(POISONED)
    }

    #[inline]
    pub(crate) fn prev_ptr(&self) -> NonNull<ListLink> {
        self.prev.get().expect(POISONED)
    }

    #[inline]
    pub(crate) fn set_next(&self, next: NonNull<ListLink>) {
        self.next.set(Some(next));
    }

    #[inline]
    pub(crate) fn set_prev(&self, prev: NonNull<ListLink>) {
        self.prev.set(Some(prev));
    }

    #[inline]
    pub(crate) fn poison(&self) {
        self.next.set(None);
        self.prev.set(None);
    }
}

impl Default for ListLink {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ListLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListLink")
            .field("self", &(self as *const Self))
            .field("next", &self.next.get())
            .field("prev", &self.prev.get())
            .finish()
    }
}

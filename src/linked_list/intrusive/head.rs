use core::{fmt, marker::PhantomData, pin::Pin, ptr::NonNull};

use super::{
    iter::{Direction, Iter, IterSafe, RawIter, RawIterSafe},
    link::ListLink,
    raw,
    traits::HasLink,
};

/// The head of an intrusive circular list of `T`s.
///
/// The head owns nothing but its sentinel link. Entries stay where their owner put
/// them, and the list only rewires the [`ListLink`] embedded in each of them.
///
/// A head must be pinned before use, since the entries of a list point back at its
/// sentinel. It is initialized on first use, so `pin!(ListHead::new())` is ready
/// to go:
///
/// ```
/// use core::{pin::pin, ptr::NonNull};
/// use halo_collections::Linked;
/// use halo_collections::linked_list::intrusive::{head::ListHead, link::ListLink};
///
/// #[derive(Linked)]
/// struct Timer {
///     link: ListLink,
///     deadline: u64,
/// }
///
/// let early = Timer { link: ListLink::new(), deadline: 10 };
/// let late = Timer { link: ListLink::new(), deadline: 20 };
///
/// let timers = pin!(ListHead::<Timer>::new());
/// let timers = timers.into_ref();
/// unsafe {
///     timers.push_back(NonNull::from(&late));
///     timers.push_front(NonNull::from(&early));
/// }
///
/// let first = timers.first_entry_or_none().unwrap();
/// assert_eq!(unsafe { first.as_ref() }.deadline, 10);
/// assert!(timers.is_first(&early));
/// assert!(timers.is_last(&late));
/// ```
pub struct ListHead<T: HasLink> {
    link: ListLink,
    _marker: PhantomData<*const T>,
}

impl<T: HasLink> ListHead<T> {
    /// Creates a new, empty list head.
    pub const fn new() -> Self {
        Self {
            link: ListLink::new(),
            _marker: PhantomData,
        }
    }

    /// Get a pointer to the sentinel, initializing it if this is its first use.
    #[inline]
    pub fn sentinel(self: Pin<&Self>) -> NonNull<ListLink> {
        let head = NonNull::from(&self.get_ref().link);
        if self.link.is_unset() {
            unsafe { raw::init(head) };
        }
        head
    }

    #[inline]
    fn sentinel_ref(self: Pin<&Self>) -> &ListLink {
        let _ = self.sentinel();
        &self.get_ref().link
    }

    /// Resets the head to an empty list.
    ///
    /// Entries that were still linked are not updated and keep pointing at the
    /// head, so this is only sound on a head that is empty or whose entries are
    /// all going to be discarded without touching their links.
    ///
    /// # Safety
    ///
    /// No entry may use its link again without reinitializing it first.
    #[inline]
    pub unsafe fn init(self: Pin<&Self>) {
        unsafe { raw::init(NonNull::from(&self.get_ref().link)) };
    }

    /// Returns `true` if the list has no entries.
    #[inline]
    pub fn is_empty(self: Pin<&Self>) -> bool {
        raw::empty(self.sentinel_ref())
    }

    /// Returns `true` if the list has exactly one entry.
    #[inline]
    pub fn is_singular(self: Pin<&Self>) -> bool {
        raw::is_singular(self.sentinel_ref())
    }

    /// Counts the entries by walking the list.
    pub fn count_nodes(self: Pin<&Self>) -> usize {
        unsafe { raw::count_nodes(self.sentinel()) }
    }

    /// Returns `true` if `entry` is the first entry of this list.
    #[inline]
    pub fn is_first(self: Pin<&Self>, entry: &T) -> bool {
        raw::is_first(entry.link(), self.sentinel_ref())
    }

    /// Returns `true` if `entry` is the last entry of this list.
    #[inline]
    pub fn is_last(self: Pin<&Self>, entry: &T) -> bool {
        raw::is_last(entry.link(), self.sentinel_ref())
    }

    /// Returns `true` if `pos` is the sentinel of this list rather than an entry.
    ///
    /// This is the end-of-pass test when walking the list by hand.
    #[inline]
    pub fn entry_is_head(self: Pin<&Self>, pos: NonNull<ListLink>) -> bool {
        raw::is_head(pos, self.sentinel())
    }

    /// Inserts `entry` at the front of the list.
    ///
    /// # Safety
    ///
    /// `entry` must point to a live `T` that is not in any list, and that stays at
    /// the same address until it is removed from this list.
    #[inline]
    pub unsafe fn push_front(self: Pin<&Self>, entry: NonNull<T>) {
        let link = T::link_of(entry);
        debug_assert!(!unsafe { link.as_ref() }.is_linked(), "entry is already in a list");
        unsafe { raw::add(link, self.sentinel()) };
    }

    /// Inserts `entry` at the back of the list.
    ///
    /// # Safety
    ///
    /// Same as [`ListHead::push_front`].
    #[inline]
    pub unsafe fn push_back(self: Pin<&Self>, entry: NonNull<T>) {
        let link = T::link_of(entry);
        debug_assert!(!unsafe { link.as_ref() }.is_linked(), "entry is already in a list");
        unsafe { raw::add_tail(link, self.sentinel()) };
    }

    /// Removes the first entry and returns it, or `None` if the list is empty.
    ///
    /// The removed entry is left self-pointing.
    pub fn pop_front(self: Pin<&Self>) -> Option<NonNull<T>> {
        self.first_entry_or_none().inspect(|entry| unsafe {
            raw::del_init(T::link_of(*entry));
        })
    }

    /// Removes the last entry and returns it, or `None` if the list is empty.
    pub fn pop_back(self: Pin<&Self>) -> Option<NonNull<T>> {
        self.last_entry_or_none().inspect(|entry| unsafe {
            raw::del_init(T::link_of(*entry));
        })
    }

    /// Removes `entry` from this list, leaving it self-pointing.
    ///
    /// # Safety
    ///
    /// `entry` must be a member of this list.
    #[inline]
    pub unsafe fn remove(self: Pin<&Self>, entry: NonNull<T>) {
        unsafe { raw::del_init(T::link_of(entry)) };
    }

    /// Puts `new` in place of `old`, leaving `old` self-pointing.
    ///
    /// # Safety
    ///
    /// `old` must be a member of this list. `new` must satisfy the requirements of
    /// [`ListHead::push_front`].
    #[inline]
    pub unsafe fn replace(self: Pin<&Self>, old: NonNull<T>, new: NonNull<T>) {
        unsafe { raw::replace_init(T::link_of(old), T::link_of(new)) };
    }

    /// Exchanges the positions of two entries.
    ///
    /// `b` may be in this list or in another list of `T`s.
    ///
    /// # Safety
    ///
    /// `a` must be a member of this list, `b` a member of some list.
    #[inline]
    pub unsafe fn swap(self: Pin<&Self>, a: NonNull<T>, b: NonNull<T>) {
        unsafe { raw::swap(T::link_of(a), T::link_of(b)) };
    }

    /// Moves `entry` from whichever list it is in to the front of this one.
    ///
    /// # Safety
    ///
    /// `entry` must be a member of a list of `T`s.
    #[inline]
    pub unsafe fn move_to_front(self: Pin<&Self>, entry: NonNull<T>) {
        unsafe { raw::move_to(T::link_of(entry), self.sentinel()) };
    }

    /// Moves `entry` from whichever list it is in to the back of this one.
    ///
    /// # Safety
    ///
    /// `entry` must be a member of a list of `T`s.
    #[inline]
    pub unsafe fn move_to_back(self: Pin<&Self>, entry: NonNull<T>) {
        unsafe { raw::move_tail(T::link_of(entry), self.sentinel()) };
    }

    /// Moves the range `[first, last]` to the back of this list, keeping its order.
    ///
    /// # Safety
    ///
    /// `first` and `last` must be members of the same list, `first` at or before
    /// `last`. The range must not contain this list's head.
    #[inline]
    pub unsafe fn bulk_move_tail(self: Pin<&Self>, first: NonNull<T>, last: NonNull<T>) {
        unsafe { raw::bulk_move_tail(self.sentinel(), T::link_of(first), T::link_of(last)) };
    }

    /// Moves the first entry to the back of the list.
    #[inline]
    pub fn rotate_left(self: Pin<&Self>) {
        unsafe { raw::rotate_left(self.sentinel()) };
    }

    /// Rotates the list so that `entry` becomes the first entry.
    ///
    /// # Safety
    ///
    /// `entry` must be a member of this list.
    #[inline]
    pub unsafe fn rotate_to_front(self: Pin<&Self>, entry: NonNull<T>) {
        unsafe { raw::rotate_to_front(T::link_of(entry), self.sentinel()) };
    }

    /// Moves all entries of `other` to the front of this list, keeping their order.
    /// `other` is left empty. Splicing a list into itself does nothing.
    #[inline]
    pub fn splice_front(self: Pin<&Self>, other: Pin<&ListHead<T>>) {
        let (source, dest) = (other.sentinel(), self.sentinel());
        if source != dest {
            unsafe { raw::splice_init(source, dest) };
        }
    }

    /// Moves all entries of `other` to the back of this list, keeping their order.
    /// `other` is left empty. Splicing a list into itself does nothing.
    #[inline]
    pub fn splice_back(self: Pin<&Self>, other: Pin<&ListHead<T>>) {
        let (source, dest) = (other.sentinel(), self.sentinel());
        if source != dest {
            unsafe { raw::splice_tail_init(source, dest) };
        }
    }

    /// Moves the entries of this list up to and including `entry` into `dest`.
    ///
    /// `None` stands for the head itself, which leaves `dest` empty.
    ///
    /// # Safety
    ///
    /// `entry` must be a member of this list and `dest` must be empty.
    #[inline]
    pub unsafe fn cut_position(self: Pin<&Self>, dest: Pin<&ListHead<T>>, entry: Option<NonNull<T>>) {
        let head = self.sentinel();
        let entry = entry.map_or(head, T::link_of);
        debug_assert!(dest.is_empty(), "cutting into a non-empty list");
        unsafe { raw::cut_position(dest.sentinel(), head, entry) };
    }

    /// Moves the entries of this list before `entry` into `dest`.
    ///
    /// `None` stands for the head itself, which moves every entry.
    ///
    /// # Safety
    ///
    /// Same as [`ListHead::cut_position`].
    #[inline]
    pub unsafe fn cut_before(self: Pin<&Self>, dest: Pin<&ListHead<T>>, entry: Option<NonNull<T>>) {
        let head = self.sentinel();
        let entry = entry.map_or(head, T::link_of);
        debug_assert!(dest.is_empty(), "cutting into a non-empty list");
        unsafe { raw::cut_before(dest.sentinel(), head, entry) };
    }

    /// Get the first entry.
    ///
    /// # Safety
    ///
    /// The list must not be empty.
    #[inline]
    pub unsafe fn first_entry(self: Pin<&Self>) -> NonNull<T> {
        debug_assert!(!self.is_empty(), "first entry of an empty list");
        unsafe { T::from_link(self.sentinel_ref().next_ptr()) }
    }

    /// Get the last entry.
    ///
    /// # Safety
    ///
    /// The list must not be empty.
    #[inline]
    pub unsafe fn last_entry(self: Pin<&Self>) -> NonNull<T> {
        debug_assert!(!self.is_empty(), "last entry of an empty list");
        unsafe { T::from_link(self.sentinel_ref().prev_ptr()) }
    }

    /// Get the first entry, or `None` if the list is empty.
    #[inline]
    pub fn first_entry_or_none(self: Pin<&Self>) -> Option<NonNull<T>> {
        let head = self.sentinel();
        let first = self.link.next_ptr();
        (first != head).then(|| unsafe { T::from_link(first) })
    }

    /// Get the last entry, or `None` if the list is empty.
    #[inline]
    pub fn last_entry_or_none(self: Pin<&Self>) -> Option<NonNull<T>> {
        let head = self.sentinel();
        let last = self.link.prev_ptr();
        (last != head).then(|| unsafe { T::from_link(last) })
    }

    /// Get the entry after `pos`, or `None` if `pos` is the last one.
    ///
    /// # Safety
    ///
    /// `pos` must be a member of this list.
    #[inline]
    pub unsafe fn next_entry(self: Pin<&Self>, pos: NonNull<T>) -> Option<NonNull<T>> {
        let next = unsafe { T::link_of(pos).as_ref() }.next_ptr();
        (!self.entry_is_head(next)).then(|| unsafe { T::from_link(next) })
    }

    /// Get the entry before `pos`, or `None` if `pos` is the first one.
    ///
    /// # Safety
    ///
    /// `pos` must be a member of this list.
    #[inline]
    pub unsafe fn prev_entry(self: Pin<&Self>, pos: NonNull<T>) -> Option<NonNull<T>> {
        let prev = unsafe { T::link_of(pos).as_ref() }.prev_ptr();
        (!self.entry_is_head(prev)).then(|| unsafe { T::from_link(prev) })
    }

    /// Get the entry after `pos`, wrapping around to the first entry.
    ///
    /// # Safety
    ///
    /// `pos` must be a member of this list.
    #[inline]
    pub unsafe fn next_entry_circular(self: Pin<&Self>, pos: NonNull<T>) -> NonNull<T> {
        unsafe {
            self.next_entry(pos)
                .unwrap_or_else(|| self.first_entry())
        }
    }

    /// Get the entry before `pos`, wrapping around to the last entry.
    ///
    /// # Safety
    ///
    /// `pos` must be a member of this list.
    #[inline]
    pub unsafe fn prev_entry_circular(self: Pin<&Self>, pos: NonNull<T>) -> NonNull<T> {
        unsafe {
            self.prev_entry(pos)
                .unwrap_or_else(|| self.last_entry())
        }
    }

    /// Get an iterator over the entries, first to last.
    ///
    /// # Safety
    ///
    /// The list must not be modified while iterating.
    #[inline]
    pub unsafe fn iter<'a>(self: Pin<&'a Self>) -> Iter<'a, T> {
        unsafe { Iter::new(RawIter::forward(self.sentinel())) }
    }

    /// Get an iterator over the entries, last to first.
    ///
    /// # Safety
    ///
    /// The list must not be modified while iterating.
    #[inline]
    pub unsafe fn iter_rev<'a>(self: Pin<&'a Self>) -> Iter<'a, T> {
        unsafe { Iter::new(RawIter::backward(self.sentinel())) }
    }

    /// Get an iterator that resumes a pass in `direction` strictly after `pos`.
    /// `None` starts from the head, giving a full pass.
    ///
    /// # Safety
    ///
    /// `pos` must be a member of this list, and the list must not be modified while
    /// iterating.
    #[inline]
    pub unsafe fn iter_continue<'a>(
        self: Pin<&'a Self>,
        pos: Option<NonNull<T>>,
        direction: Direction,
    ) -> Iter<'a, T> {
        let head = self.sentinel();
        let pos = pos.map_or(head, T::link_of);
        unsafe { Iter::new(RawIter::continue_from(head, pos, direction)) }
    }

    /// Get an iterator that resumes a pass in `direction` at `pos` itself.
    ///
    /// # Safety
    ///
    /// `pos` must be a member of this list, and the list must not be modified while
    /// iterating.
    #[inline]
    pub unsafe fn iter_from<'a>(self: Pin<&'a Self>, pos: NonNull<T>, direction: Direction) -> Iter<'a, T> {
        unsafe { Iter::new(RawIter::from(self.sentinel(), T::link_of(pos), direction)) }
    }

    /// Get an iterator over the entries, first to last, that lets the caller remove
    /// each entry right after it is yielded.
    ///
    /// # Safety
    ///
    /// Between two calls to `next`, the list may only be changed by removing or
    /// moving the entry yielded last.
    #[inline]
    pub unsafe fn iter_safe<'a>(self: Pin<&'a Self>) -> IterSafe<'a, T> {
        unsafe { IterSafe::new(RawIterSafe::forward(self.sentinel())) }
    }

    /// Same as [`ListHead::iter_safe`], last to first.
    ///
    /// # Safety
    ///
    /// See [`ListHead::iter_safe`].
    #[inline]
    pub unsafe fn iter_safe_rev<'a>(self: Pin<&'a Self>) -> IterSafe<'a, T> {
        unsafe { IterSafe::new(RawIterSafe::backward(self.sentinel())) }
    }

    /// Removal-safe version of [`ListHead::iter_continue`].
    ///
    /// # Safety
    ///
    /// `pos` must be a member of this list. See [`ListHead::iter_safe`].
    #[inline]
    pub unsafe fn iter_safe_continue<'a>(
        self: Pin<&'a Self>,
        pos: Option<NonNull<T>>,
        direction: Direction,
    ) -> IterSafe<'a, T> {
        let head = self.sentinel();
        let pos = pos.map_or(head, T::link_of);
        unsafe { IterSafe::new(RawIterSafe::continue_from(head, pos, direction)) }
    }

    /// Removal-safe version of [`ListHead::iter_from`].
    ///
    /// # Safety
    ///
    /// `pos` must be a member of this list. See [`ListHead::iter_safe`].
    #[inline]
    pub unsafe fn iter_safe_from<'a>(
        self: Pin<&'a Self>,
        pos: NonNull<T>,
        direction: Direction,
    ) -> IterSafe<'a, T> {
        unsafe { IterSafe::new(RawIterSafe::from(self.sentinel(), T::link_of(pos), direction)) }
    }

    /// Walks the list and checks that it is well formed, returning the number of
    /// entries.
    #[cfg(feature = "validate")]
    pub fn check(self: Pin<&Self>) -> Result<usize, super::validate::ListError> {
        unsafe { super::validate::check(self.sentinel()) }
    }
}

impl<T: HasLink> Default for ListHead<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HasLink> Drop for ListHead<T> {
    fn drop(&mut self) {
        if self.link.is_unset() || raw::empty(&self.link) {
            return;
        }
        log::warn!(target: "halo_collections::list", "dropping a list head that still has entries");
        // Close the ring over the remaining entries so none of them points at freed memory.
        unsafe { raw::del(NonNull::from(&self.link)) };
    }
}

impl<T: HasLink> fmt::Debug for ListHead<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListHead").field("link", &self.link).finish()
    }
}

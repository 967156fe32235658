use core::{iter::FusedIterator, marker::PhantomData, ptr::NonNull};

use super::{head::ListHead, link::ListLink, traits::HasLink};

/// The direction of a pass over a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Follow `next` pointers, from the first entry to the last.
    Forward,
    /// Follow `prev` pointers, from the last entry to the first.
    Backward,
}

impl Direction {
    #[inline]
    fn step(self, link: NonNull<ListLink>) -> NonNull<ListLink> {
        let link = unsafe { link.as_ref() };
        match self {
            Direction::Forward => link.next_ptr(),
            Direction::Backward => link.prev_ptr(),
        }
    }
}

/// An iterator over the links of a list.
///
/// The pass ends when the cursor gets back to the list head. Inserting or removing
/// the current link or its neighbours while the iterator is alive is undefined
/// behaviour; use [`RawIterSafe`] to remove entries during a pass.
#[derive(Debug, Clone)]
pub struct RawIter {
    head: NonNull<ListLink>,
    current: NonNull<ListLink>,
    direction: Direction,
}

impl RawIter {
    /// Creates an iterator that starts *at* `start` and walks in `direction`.
    ///
    /// # Safety
    ///
    /// `head` must be the initialized head of a well formed list, `start` must be
    /// `head` or one of its entries, and the list must not be modified while the
    /// iterator is alive.
    #[inline]
    pub unsafe fn from(head: NonNull<ListLink>, start: NonNull<ListLink>, direction: Direction) -> Self {
        Self {
            head,
            current: start,
            direction,
        }
    }

    /// Creates an iterator over all entries, first to last.
    ///
    /// # Safety
    ///
    /// See [`RawIter::from`].
    #[inline]
    pub unsafe fn forward(head: NonNull<ListLink>) -> Self {
        unsafe { Self::continue_from(head, head, Direction::Forward) }
    }

    /// Creates an iterator over all entries, last to first.
    ///
    /// # Safety
    ///
    /// See [`RawIter::from`].
    #[inline]
    pub unsafe fn backward(head: NonNull<ListLink>) -> Self {
        unsafe { Self::continue_from(head, head, Direction::Backward) }
    }

    /// Creates an iterator that starts strictly after (or before, walking backwards)
    /// `pos`. Passing the head itself gives a full pass.
    ///
    /// # Safety
    ///
    /// See [`RawIter::from`].
    #[inline]
    pub unsafe fn continue_from(head: NonNull<ListLink>, pos: NonNull<ListLink>, direction: Direction) -> Self {
        unsafe { Self::from(head, direction.step(pos), direction) }
    }

    /// The position the next call to `next` would yield, or the head if the
    /// pass is over.
    #[inline]
    pub fn position(&self) -> NonNull<ListLink> {
        self.current
    }
}

impl Iterator for RawIter {
    type Item = NonNull<ListLink>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == self.head {
            return None;
        }
        let current = self.current;
        self.current = self.direction.step(current);
        Some(current)
    }
}

impl FusedIterator for RawIter {}

/// An iterator over the links of a list, safe against removal of the link it
/// just yielded.
///
/// The neighbour of every yielded link is captured before the link is handed out,
/// so the caller may `del` or move that link before asking for the next one.
#[derive(Debug)]
pub struct RawIterSafe {
    head: NonNull<ListLink>,
    pos: NonNull<ListLink>,
    last: Option<NonNull<ListLink>>,
    direction: Direction,
}

impl RawIterSafe {
    /// Creates a removal-safe iterator that starts *at* `start`.
    ///
    /// # Safety
    ///
    /// `head` must be the initialized head of a well formed list and `start` must
    /// be `head` or one of its entries. Between two calls to `next`, the list may
    /// only be changed by removing or moving the link returned last.
    #[inline]
    pub unsafe fn from(head: NonNull<ListLink>, start: NonNull<ListLink>, direction: Direction) -> Self {
        Self {
            head,
            pos: start,
            last: None,
            direction,
        }
    }

    /// Creates a removal-safe iterator over all entries, first to last.
    ///
    /// # Safety
    ///
    /// See [`RawIterSafe::from`].
    #[inline]
    pub unsafe fn forward(head: NonNull<ListLink>) -> Self {
        unsafe { Self::continue_from(head, head, Direction::Forward) }
    }

    /// Creates a removal-safe iterator over all entries, last to first.
    ///
    /// # Safety
    ///
    /// See [`RawIterSafe::from`].
    #[inline]
    pub unsafe fn backward(head: NonNull<ListLink>) -> Self {
        unsafe { Self::continue_from(head, head, Direction::Backward) }
    }

    /// Creates a removal-safe iterator that starts strictly after (or before)
    /// `pos`.
    ///
    /// # Safety
    ///
    /// See [`RawIterSafe::from`].
    #[inline]
    pub unsafe fn continue_from(head: NonNull<ListLink>, pos: NonNull<ListLink>, direction: Direction) -> Self {
        unsafe { Self::from(head, direction.step(pos), direction) }
    }

    /// Recaptures the neighbour of the link yielded last.
    ///
    /// The captured neighbour goes stale if the body of the pass removes it, e.g.
    /// after dropping and retaking a lock. As long as the link yielded last is still
    /// in the list, calling this before the next `next` resumes the pass right
    /// after it.
    ///
    /// # Safety
    ///
    /// The link yielded last must still be a member of the list.
    #[inline]
    pub unsafe fn reset_next(&mut self) {
        if let Some(last) = self.last {
            self.pos = self.direction.step(last);
        }
    }
}

impl Iterator for RawIterSafe {
    type Item = NonNull<ListLink>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos == self.head {
            self.last = None;
            return None;
        }
        let current = self.pos;
        self.pos = self.direction.step(current);
        self.last = Some(current);
        Some(current)
    }
}

impl FusedIterator for RawIterSafe {}

/// An iterator over the entries of a [`ListHead`].
pub struct Iter<'a, T: HasLink> {
    raw: RawIter,
    _list: PhantomData<&'a ListHead<T>>,
}

impl<'a, T: HasLink> Iter<'a, T> {
    pub(crate) fn new(raw: RawIter) -> Self {
        Self {
            raw,
            _list: PhantomData,
        }
    }
}

impl<'a, T: HasLink> Iterator for Iter<'a, T> {
    type Item = NonNull<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw
            .next()
            .map(|link| unsafe { T::from_link(link) })
    }
}

impl<'a, T: HasLink> FusedIterator for Iter<'a, T> {}

/// An iterator over the entries of a [`ListHead`], safe against removal of the
/// entry it just yielded.
pub struct IterSafe<'a, T: HasLink> {
    raw: RawIterSafe,
    _list: PhantomData<&'a ListHead<T>>,
}

impl<'a, T: HasLink> IterSafe<'a, T> {
    pub(crate) fn new(raw: RawIterSafe) -> Self {
        Self {
            raw,
            _list: PhantomData,
        }
    }

    /// See [`RawIterSafe::reset_next`].
    ///
    /// # Safety
    ///
    /// The entry yielded last must still be a member of the list.
    #[inline]
    pub unsafe fn reset_next(&mut self) {
        unsafe { self.raw.reset_next() }
    }
}

impl<'a, T: HasLink> Iterator for IterSafe<'a, T> {
    type Item = NonNull<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.raw
            .next()
            .map(|link| unsafe { T::from_link(link) })
    }
}

impl<'a, T: HasLink> FusedIterator for IterSafe<'a, T> {}

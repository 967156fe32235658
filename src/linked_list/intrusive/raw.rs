//! Raw operations on circular lists of [`ListLink`]s.
//!
//! Every function here works on bare link pointers: a list is identified by its
//! sentinel link (the *head*), and an entry by the link embedded in it. These are
//! the building blocks of [`ListHead`](super::head::ListHead), and can be used
//! directly when a typed head is not convenient, e.g. a head embedded in a
//! larger record.
//!
//! # Safety
//!
//! Unless stated otherwise, all pointers passed to these functions must point to
//! live links that stay at the same address for as long as they are linked, and
//! the lists involved must be well formed. None of the preconditions are
//! checked in release builds.

use core::ptr::NonNull;

use super::{iter::RawIter, link::ListLink};

#[inline(always)]
unsafe fn link<'a>(ptr: NonNull<ListLink>) -> &'a ListLink {
    unsafe { ptr.as_ref() }
}

/// Initializes a link to point to itself.
///
/// If the link is a list head, the result is an empty list.
///
/// # Safety
///
/// `list` must point to a live link. Any ring it was part of is not updated.
#[inline]
pub unsafe fn init(list: NonNull<ListLink>) {
    let list_ref = unsafe { link(list) };
    list_ref.set_next(list);
    list_ref.set_prev(list);
}

/// Inserts `new` between two known consecutive links.
#[inline]
unsafe fn insert_between(new: NonNull<ListLink>, prev: NonNull<ListLink>, next: NonNull<ListLink>) {
    unsafe {
        link(next).set_prev(new);
        link(new).set_next(next);
        link(new).set_prev(prev);
        link(prev).set_next(new);
    }
}

/// Inserts `new` right after `head`.
///
/// This is good for implementing stacks.
///
/// # Safety
///
/// `new` must not be a member of any list; its current pointers are ignored.
/// `head` must be initialized.
#[inline]
pub unsafe fn add(new: NonNull<ListLink>, head: NonNull<ListLink>) {
    unsafe {
        insert_between(new, head, link(head).next_ptr());
    }
}

/// Inserts `new` right before `head`.
///
/// This is useful for implementing queues.
///
/// # Safety
///
/// Same as [`add`].
#[inline]
pub unsafe fn add_tail(new: NonNull<ListLink>, head: NonNull<ListLink>) {
    unsafe {
        insert_between(new, link(head).prev_ptr(), head);
    }
}

/// Makes `prev` and `next` point to each other.
#[inline]
unsafe fn unlink_between(prev: NonNull<ListLink>, next: NonNull<ListLink>) {
    unsafe {
        link(next).set_prev(prev);
        link(prev).set_next(next);
    }
}

/// Takes `entry` out of its ring without touching its own pointers.
#[inline]
unsafe fn unlink(entry: NonNull<ListLink>) {
    unsafe {
        let entry_ref = link(entry);
        unlink_between(entry_ref.prev_ptr(), entry_ref.next_ptr());
    }
}

/// Removes `entry` from its list.
///
/// The pointers of `entry` are left unset afterwards: the link is neither a list
/// member nor an empty list, and any use of it other than [`init`] or an insertion
/// panics.
///
/// # Safety
///
/// `entry` must be a member of a well formed list.
#[inline]
pub unsafe fn del(entry: NonNull<ListLink>) {
    unsafe {
        unlink(entry);
        link(entry).poison();
    }
}

/// Removes `entry` from its list and reinitializes it.
///
/// # Safety
///
/// `entry` must be a member of a well formed list, or self-pointing.
#[inline]
pub unsafe fn del_init(entry: NonNull<ListLink>) {
    unsafe {
        unlink(entry);
        init(entry);
    }
}

/// Replaces `old` by `new`. `old` keeps its stale pointers.
///
/// If `old` was an empty list head, `new` becomes the head of an empty list.
///
/// # Safety
///
/// `old` must be initialized and `new` must not be a member of any list.
#[inline]
pub unsafe fn replace(old: NonNull<ListLink>, new: NonNull<ListLink>) {
    unsafe {
        let old_ref = link(old);
        let new_ref = link(new);
        let next = old_ref.next_ptr();
        new_ref.set_next(next);
        link(next).set_prev(new);
        let prev = old_ref.prev_ptr();
        new_ref.set_prev(prev);
        link(prev).set_next(new);
    }
}

/// Replaces `old` by `new` and reinitializes `old`.
///
/// # Safety
///
/// Same as [`replace`].
#[inline]
pub unsafe fn replace_init(old: NonNull<ListLink>, new: NonNull<ListLink>) {
    unsafe {
        replace(old, new);
        init(old);
    }
}

/// Exchanges the positions of `entry1` and `entry2`.
///
/// The entries may be in the same list, adjacent or not, or in two different lists.
///
/// # Safety
///
/// Both entries must be members of well formed lists.
#[inline]
pub unsafe fn swap(entry1: NonNull<ListLink>, entry2: NonNull<ListLink>) {
    if entry1 == entry2 {
        return;
    }
    unsafe {
        let mut pos = link(entry2).prev_ptr();

        del(entry2);
        replace(entry1, entry2);
        if pos == entry1 {
            pos = entry2;
        }
        add(entry1, pos);
    }
}

/// Deletes `list` from its current list and adds it right after `head`.
///
/// # Safety
///
/// `list` must be a member of a well formed list and `head` must be initialized.
#[inline]
pub unsafe fn move_to(list: NonNull<ListLink>, head: NonNull<ListLink>) {
    unsafe {
        unlink(list);
        insert_between(list, head, link(head).next_ptr());
    }
}

/// Deletes `list` from its current list and adds it right before `head`.
///
/// # Safety
///
/// Same as [`move_to`].
#[inline]
pub unsafe fn move_tail(list: NonNull<ListLink>, head: NonNull<ListLink>) {
    unsafe {
        unlink(list);
        insert_between(list, link(head).prev_ptr(), head);
    }
}

/// Moves the closed range `[first, last]` right before `head`.
///
/// All three links may belong to the same list or `head` may be another list.
///
/// # Safety
///
/// `first` and `last` must be members of the same list, with `first` reachable
/// from `last` walking backwards without crossing the list head. `head` must not
/// lie inside the range.
#[inline]
pub unsafe fn bulk_move_tail(
    head: NonNull<ListLink>,
    first: NonNull<ListLink>,
    last: NonNull<ListLink>,
) {
    unsafe {
        let (head_ref, first_ref, last_ref) = (link(head), link(first), link(last));
        let before = first_ref.prev_ptr();
        let after = last_ref.next_ptr();
        link(before).set_next(after);
        link(after).set_prev(before);

        let tail = head_ref.prev_ptr();
        link(tail).set_next(first);
        first_ref.set_prev(tail);

        last_ref.set_next(head);
        head_ref.set_prev(last);
    }
}

/// Tests whether `list` is the first entry of the list headed by `head`.
#[inline]
pub fn is_first(list: &ListLink, head: &ListLink) -> bool {
    list.prev() == Some(NonNull::from(head))
}

/// Tests whether `list` is the last entry of the list headed by `head`.
#[inline]
pub fn is_last(list: &ListLink, head: &ListLink) -> bool {
    list.next() == Some(NonNull::from(head))
}

/// Tests whether `list` is the list head `head`.
#[inline]
pub fn is_head(list: NonNull<ListLink>, head: NonNull<ListLink>) -> bool {
    list == head
}

/// Tests whether the list headed by `head` is empty.
#[inline]
pub fn empty(head: &ListLink) -> bool {
    head.next() == Some(NonNull::from(head))
}

/// Tests whether the list headed by `head` has exactly one entry.
#[inline]
pub fn is_singular(head: &ListLink) -> bool {
    !empty(head) && head.next() == head.prev()
}

/// Moves the first entry of the list to its tail.
///
/// # Safety
///
/// `head` must be the initialized head of a well formed list.
#[inline]
pub unsafe fn rotate_left(head: NonNull<ListLink>) {
    unsafe {
        let head_ref = link(head);
        if !empty(head_ref) {
            move_tail(head_ref.next_ptr(), head);
        }
    }
}

/// Rotates the list so that `list` becomes its first entry.
///
/// # Safety
///
/// `list` must be a member of the list headed by `head`.
#[inline]
pub unsafe fn rotate_to_front(list: NonNull<ListLink>, head: NonNull<ListLink>) {
    // Moving the head right before `list` makes `list` the entry after the head.
    unsafe { move_tail(head, list) }
}

unsafe fn cut_position_unchecked(
    list: NonNull<ListLink>,
    head: NonNull<ListLink>,
    entry: NonNull<ListLink>,
) {
    unsafe {
        let (list_ref, head_ref, entry_ref) = (link(list), link(head), link(entry));
        let new_first = entry_ref.next_ptr();
        let first = head_ref.next_ptr();
        list_ref.set_next(first);
        link(first).set_prev(list);
        list_ref.set_prev(entry);
        entry_ref.set_next(list);
        head_ref.set_next(new_first);
        link(new_first).set_prev(head);
    }
}

/// Cuts the list headed by `head` in two.
///
/// All entries from the first one up to and including `entry` are moved to `list`,
/// which is overwritten. If `entry` is `head` itself, `list` is initialized as an
/// empty list and `head` is left untouched.
///
/// # Safety
///
/// `entry` must be `head` or a member of the list headed by `head`. `list` must be
/// an unused link or an empty list: whatever it held is lost.
#[inline]
pub unsafe fn cut_position(list: NonNull<ListLink>, head: NonNull<ListLink>, entry: NonNull<ListLink>) {
    unsafe {
        let head_ref = link(head);
        if empty(head_ref) {
            return;
        }
        if is_singular(head_ref) && !is_head(entry, head) && entry != head_ref.next_ptr() {
            return;
        }
        if is_head(entry, head) {
            init(list);
        } else {
            cut_position_unchecked(list, head, entry);
        }
    }
}

/// Cuts the list headed by `head` right before `entry`.
///
/// All entries before `entry`, excluding `entry` itself, are moved to `list`, which
/// is overwritten. If `entry` is the first entry, `list` becomes an empty list. If
/// `entry` is `head`, the whole list is moved.
///
/// # Safety
///
/// Same as [`cut_position`].
#[inline]
pub unsafe fn cut_before(list: NonNull<ListLink>, head: NonNull<ListLink>, entry: NonNull<ListLink>) {
    unsafe {
        let (list_ref, head_ref, entry_ref) = (link(list), link(head), link(entry));
        if head_ref.next_ptr() == entry {
            init(list);
            return;
        }
        let first = head_ref.next_ptr();
        list_ref.set_next(first);
        link(first).set_prev(list);
        let last = entry_ref.prev_ptr();
        list_ref.set_prev(last);
        link(last).set_next(list);
        head_ref.set_next(entry);
        entry_ref.set_prev(head);
    }
}

unsafe fn splice_between(list: NonNull<ListLink>, prev: NonNull<ListLink>, next: NonNull<ListLink>) {
    unsafe {
        let list_ref = link(list);
        let first = list_ref.next_ptr();
        let last = list_ref.prev_ptr();

        link(first).set_prev(prev);
        link(prev).set_next(first);

        link(last).set_next(next);
        link(next).set_prev(last);
    }
}

/// Joins the entries of `list` right after `head`, keeping their order.
///
/// Does nothing if `list` is empty. Otherwise `list` keeps stale pointers into the
/// entries and must be reinitialized before it is used as a list again.
///
/// # Safety
///
/// Both `list` and `head` must be initialized heads of well formed lists, and must
/// be different lists.
#[inline]
pub unsafe fn splice(list: NonNull<ListLink>, head: NonNull<ListLink>) {
    unsafe {
        if !empty(link(list)) {
            splice_between(list, head, link(head).next_ptr());
        }
    }
}

/// Joins the entries of `list` right before `head`, keeping their order.
///
/// # Safety
///
/// Same as [`splice`].
#[inline]
pub unsafe fn splice_tail(list: NonNull<ListLink>, head: NonNull<ListLink>) {
    unsafe {
        if !empty(link(list)) {
            splice_between(list, link(head).prev_ptr(), head);
        }
    }
}

/// Same as [`splice`], and leaves `list` as a valid empty list.
///
/// # Safety
///
/// Same as [`splice`].
#[inline]
pub unsafe fn splice_init(list: NonNull<ListLink>, head: NonNull<ListLink>) {
    unsafe {
        if !empty(link(list)) {
            splice_between(list, head, link(head).next_ptr());
            init(list);
        }
    }
}

/// Same as [`splice_tail`], and leaves `list` as a valid empty list.
///
/// # Safety
///
/// Same as [`splice`].
#[inline]
pub unsafe fn splice_tail_init(list: NonNull<ListLink>, head: NonNull<ListLink>) {
    unsafe {
        if !empty(link(list)) {
            splice_between(list, link(head).prev_ptr(), head);
            init(list);
        }
    }
}

/// Counts the entries of a list by walking it.
///
/// # Safety
///
/// `head` must be the initialized head of a well formed list.
pub unsafe fn count_nodes(head: NonNull<ListLink>) -> usize {
    unsafe { RawIter::forward(head).count() }
}

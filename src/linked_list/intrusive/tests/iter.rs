extern crate std;

use std::{vec, vec::Vec};

use core::pin::pin;

use crate::linked_list::intrusive::{
    head::ListHead,
    iter::{Direction, RawIter, RawIterSafe},
    raw,
    traits::HasLink,
};

use super::{Item, assert_well_formed, fill, items, link, ptr, value_of, values, values_rev};

fn collect(iter: impl Iterator<Item = core::ptr::NonNull<Item>>) -> Vec<i32> {
    iter.map(|item| unsafe { item.as_ref() }.value).collect()
}

#[test]
fn test_iter_empty() {
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();

    assert_eq!(unsafe { head.iter() }.count(), 0);
    assert_eq!(unsafe { head.iter_rev() }.count(), 0);
    assert_eq!(unsafe { head.iter_safe() }.count(), 0);
    assert_eq!(unsafe { head.iter_safe_rev() }.count(), 0);
}

#[test]
fn test_iter_forward_and_backward() {
    let entries = items(4);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    assert_eq!(values(head), vec![0, 1, 2, 3]);
    assert_eq!(values_rev(head), vec![3, 2, 1, 0]);
}

#[test]
fn test_iter_is_fused() {
    let entries = items(1);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    let mut iter = unsafe { head.iter() };
    assert!(iter.next().is_some());
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn test_iter_continue() {
    let entries = items(5);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    let after = unsafe { head.iter_continue(Some(ptr(&entries[1])), Direction::Forward) };
    assert_eq!(collect(after), vec![2, 3, 4]);

    let before = unsafe { head.iter_continue(Some(ptr(&entries[3])), Direction::Backward) };
    assert_eq!(collect(before), vec![2, 1, 0]);

    let last = unsafe { head.iter_continue(Some(ptr(&entries[4])), Direction::Forward) };
    assert_eq!(collect(last), Vec::<i32>::new());

    let full = unsafe { head.iter_continue(None, Direction::Forward) };
    assert_eq!(collect(full), vec![0, 1, 2, 3, 4]);

    let full_rev = unsafe { head.iter_continue(None, Direction::Backward) };
    assert_eq!(collect(full_rev), vec![4, 3, 2, 1, 0]);
}

#[test]
fn test_iter_from() {
    let entries = items(5);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    let forward = unsafe { head.iter_from(ptr(&entries[2]), Direction::Forward) };
    assert_eq!(collect(forward), vec![2, 3, 4]);

    let backward = unsafe { head.iter_from(ptr(&entries[2]), Direction::Backward) };
    assert_eq!(collect(backward), vec![2, 1, 0]);
}

#[test]
fn test_raw_iter_position() {
    let entries = items(2);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    let sentinel = head.sentinel();
    let mut iter = unsafe { RawIter::forward(sentinel) };
    assert_eq!(iter.position(), link(&entries[0]));
    assert_eq!(iter.next().map(value_of), Some(0));
    assert_eq!(iter.position(), link(&entries[1]));
    assert_eq!(iter.next().map(value_of), Some(1));
    assert_eq!(iter.position(), sentinel);
    assert!(iter.next().is_none());
}

#[test]
fn test_raw_iter_resume_from_clone() {
    let entries = items(4);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    let mut iter = unsafe { RawIter::forward(head.sentinel()) };
    iter.next();
    let resumed = iter.clone();

    assert_eq!(iter.map(value_of).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(resumed.map(value_of).collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_iter_safe_removes_everything() {
    for len in [0, 1, 2, 7] {
        let entries = items(len);
        let head = pin!(ListHead::<Item>::new());
        let head = head.into_ref();
        fill(head, &entries);

        let mut seen = Vec::new();
        for entry in unsafe { head.iter_safe() } {
            seen.push(unsafe { entry.as_ref() }.value);
            unsafe { head.remove(entry) };
        }

        assert_eq!(seen, (0..len).collect::<Vec<_>>());
        assert!(head.is_empty());
        assert!(entries.iter().all(|item| !item.link.is_linked()));
    }
}

#[test]
fn test_iter_safe_rev_with_del() {
    let entries = items(4);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    let mut seen = Vec::new();
    for entry in unsafe { head.iter_safe_rev() } {
        seen.push(unsafe { entry.as_ref() }.value);
        unsafe { raw::del(Item::link_of(entry)) };
    }

    assert_eq!(seen, vec![3, 2, 1, 0]);
    assert!(head.is_empty());
    assert!(entries.iter().all(|item| item.link.is_unset()));
}

#[test]
fn test_iter_safe_moves_entries_elsewhere() {
    let entries = items(6);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    let odd = pin!(ListHead::<Item>::new());
    let odd = odd.into_ref();
    fill(head, &entries);

    for entry in unsafe { head.iter_safe() } {
        if unsafe { entry.as_ref() }.value % 2 == 1 {
            unsafe { odd.move_to_back(entry) };
        }
    }

    assert_eq!(values(head), vec![0, 2, 4]);
    assert_eq!(values(odd), vec![1, 3, 5]);
    assert_eq!(assert_well_formed(head), 3);
    assert_eq!(assert_well_formed(odd), 3);
}

#[test]
fn test_iter_safe_continue_and_from() {
    let entries = items(6);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    // Drop everything after entry 3.
    for entry in unsafe { head.iter_safe_continue(Some(ptr(&entries[3])), Direction::Forward) } {
        unsafe { head.remove(entry) };
    }
    assert_eq!(values(head), vec![0, 1, 2, 3]);

    // Then everything from entry 1 backwards.
    for entry in unsafe { head.iter_safe_from(ptr(&entries[1]), Direction::Backward) } {
        unsafe { head.remove(entry) };
    }
    assert_eq!(values(head), vec![2, 3]);

    let rest = unsafe { head.iter_safe_continue(None, Direction::Backward) };
    assert_eq!(collect(rest), vec![3, 2]);
    assert_eq!(assert_well_formed(head), 2);
}

#[test]
fn test_iter_safe_reset_next_after_neighbour_removed() {
    let entries = items(5);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    let mut seen = Vec::new();
    let mut iter = unsafe { head.iter_safe() };
    while let Some(entry) = iter.next() {
        let value = unsafe { entry.as_ref() }.value;
        seen.push(value);
        if value == 1 {
            // Removing the captured neighbour makes the iterator stale.
            unsafe {
                head.remove(ptr(&entries[2]));
                iter.reset_next();
            }
        }
    }

    assert_eq!(seen, vec![0, 1, 3, 4]);
    assert_eq!(values(head), vec![0, 1, 3, 4]);
}

#[test]
fn test_raw_iter_safe_reset_next_before_first_next_is_noop() {
    let entries = items(2);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    let mut iter = unsafe { RawIterSafe::forward(head.sentinel()) };
    unsafe { iter.reset_next() };
    assert_eq!(iter.map(value_of).collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn test_next_and_prev_entry() {
    let entries = items(3);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    unsafe {
        assert_eq!(head.next_entry(ptr(&entries[0])), Some(ptr(&entries[1])));
        assert_eq!(head.next_entry(ptr(&entries[2])), None);
        assert_eq!(head.prev_entry(ptr(&entries[2])), Some(ptr(&entries[1])));
        assert_eq!(head.prev_entry(ptr(&entries[0])), None);
    }
}

#[test]
fn test_next_and_prev_entry_circular() {
    let entries = items(3);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    unsafe {
        assert_eq!(head.next_entry_circular(ptr(&entries[1])), ptr(&entries[2]));
        assert_eq!(head.next_entry_circular(ptr(&entries[2])), ptr(&entries[0]));
        assert_eq!(head.prev_entry_circular(ptr(&entries[0])), ptr(&entries[2]));
        assert_eq!(head.prev_entry_circular(ptr(&entries[1])), ptr(&entries[0]));
    }
}

#[test]
fn test_circular_on_singular_list_returns_self() {
    let entries = items(1);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    unsafe {
        assert_eq!(head.next_entry_circular(ptr(&entries[0])), ptr(&entries[0]));
        assert_eq!(head.prev_entry_circular(ptr(&entries[0])), ptr(&entries[0]));
    }
}

#[test]
fn test_first_and_last_entry() {
    let entries = items(3);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();

    assert_eq!(head.first_entry_or_none(), None);
    assert_eq!(head.last_entry_or_none(), None);

    fill(head, &entries);

    assert_eq!(head.first_entry_or_none(), Some(ptr(&entries[0])));
    assert_eq!(head.last_entry_or_none(), Some(ptr(&entries[2])));
    unsafe {
        assert_eq!(head.first_entry(), ptr(&entries[0]));
        assert_eq!(head.last_entry(), ptr(&entries[2]));
    }
}

#[test]
fn test_entry_is_head_ends_manual_walk() {
    let entries = items(3);
    let head = pin!(ListHead::<Item>::new());
    let head = head.into_ref();
    fill(head, &entries);

    let mut seen = Vec::new();
    let mut pos = unsafe { head.sentinel().as_ref() }.next().unwrap();
    while !head.entry_is_head(pos) {
        seen.push(value_of(pos));
        pos = unsafe { pos.as_ref() }.next().unwrap();
    }

    assert_eq!(seen, vec![0, 1, 2]);
    assert!(!head.entry_is_head(link(&entries[0])));
}

extern crate std;

use std::vec::Vec;

use core::{pin::Pin, ptr::NonNull};

use crate::Linked;

use super::{head::ListHead, link::ListLink, traits::HasLink};

mod derive;
mod iter;

/// The entry type used across the tests. The link is not the first field, so
/// every recovery goes through a non-zero offset.
#[derive(Debug, Linked)]
#[linked(crate_path = "crate")]
#[repr(C)]
pub(super) struct Item {
    pub(super) value: i32,
    link: ListLink,
}

impl Item {
    pub(super) fn new(value: i32) -> Self {
        Self {
            value,
            link: ListLink::new(),
        }
    }
}

pub(super) fn items(count: i32) -> Vec<Item> {
    (0..count).map(Item::new).collect()
}

pub(super) fn ptr(item: &Item) -> NonNull<Item> {
    NonNull::from(item)
}

pub(super) fn link(item: &Item) -> NonNull<ListLink> {
    Item::link_of(NonNull::from(item))
}

pub(super) fn value_of(link: NonNull<ListLink>) -> i32 {
    unsafe { Item::from_link(link).as_ref().value }
}

pub(super) fn values(head: Pin<&ListHead<Item>>) -> Vec<i32> {
    unsafe { head.iter().map(|item| item.as_ref().value).collect() }
}

pub(super) fn values_rev(head: Pin<&ListHead<Item>>) -> Vec<i32> {
    unsafe { head.iter_rev().map(|item| item.as_ref().value).collect() }
}

/// Checks the cycle invariant and that every way of counting agrees.
pub(super) fn assert_well_formed(head: Pin<&ListHead<Item>>) -> usize {
    let count = head.count_nodes();
    #[cfg(feature = "validate")]
    assert_eq!(head.check(), Ok(count));
    assert_eq!(values(head).len(), count);
    assert_eq!(values_rev(head).len(), count);
    count
}

/// Links `items` at the back of `head`, in order.
pub(super) fn fill(head: Pin<&ListHead<Item>>, items: &[Item]) {
    for item in items {
        unsafe { head.push_back(ptr(item)) };
    }
}

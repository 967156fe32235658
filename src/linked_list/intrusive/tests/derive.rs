extern crate std;

use std::{vec, vec::Vec};

use core::{mem::offset_of, pin::pin, ptr::NonNull};

use crate::{
    Linked,
    linked_list::intrusive::{head::ListHead, link::ListLink, traits::HasLink},
};

#[derive(Linked)]
#[linked(crate_path = "crate")]
struct Pair(u64, ListLink);

#[derive(Linked)]
#[linked(crate_path = "crate")]
struct Wrapper<T> {
    value: T,
    link: ListLink,
}

/// An entry that can sit on two lists at once.
#[derive(Linked)]
#[linked(crate_path = "crate")]
struct Task {
    id: u32,
    ready: ListLink,
    #[list_link]
    all: ListLink,
}

#[test]
fn test_named_field_offset() {
    assert_eq!(super::Item::LINK_OFFSET, offset_of!(super::Item, link));
    assert_ne!(super::Item::LINK_OFFSET, 0);
}

#[test]
fn test_link_of_computes_address_without_reading() {
    let entry = NonNull::<super::Item>::dangling();
    let link = super::Item::link_of(entry);

    assert_eq!(link.addr().get(), entry.addr().get() + super::Item::LINK_OFFSET);
    assert_eq!(unsafe { super::Item::from_link(link) }, entry);
}

#[test]
fn test_tuple_struct() {
    assert_eq!(Pair::LINK_OFFSET, offset_of!(Pair, 1));

    let entries = [Pair(1, ListLink::new()), Pair(2, ListLink::new())];
    let head = pin!(ListHead::<Pair>::new());
    let head = head.into_ref();
    for pair in &entries {
        unsafe { head.push_back(NonNull::from(pair)) };
    }

    let values: Vec<u64> = unsafe { head.iter().map(|pair| pair.as_ref().0).collect() };
    assert_eq!(values, vec![1, 2]);
    assert_eq!(unsafe { Pair::from_link(Pair::link_of(NonNull::from(&entries[1]))) }, NonNull::from(&entries[1]));
}

#[test]
fn test_generic_struct() {
    assert_eq!(Wrapper::<u8>::LINK_OFFSET, offset_of!(Wrapper<u8>, link));
    assert_eq!(Wrapper::<[u64; 4]>::LINK_OFFSET, offset_of!(Wrapper<[u64; 4]>, link));

    let entries = [
        Wrapper { value: "a", link: ListLink::new() },
        Wrapper { value: "b", link: ListLink::new() },
    ];
    let head = pin!(ListHead::<Wrapper<&str>>::new());
    let head = head.into_ref();
    for entry in &entries {
        unsafe { head.push_front(NonNull::from(entry)) };
    }

    let values: Vec<&str> = unsafe { head.iter().map(|entry| entry.as_ref().value).collect() };
    assert_eq!(values, vec!["b", "a"]);
}

#[test]
fn test_marked_field_is_used() {
    assert_eq!(Task::LINK_OFFSET, offset_of!(Task, all));

    let tasks = [
        Task { id: 1, ready: ListLink::new(), all: ListLink::new() },
        Task { id: 2, ready: ListLink::new(), all: ListLink::new() },
    ];
    let head = pin!(ListHead::<Task>::new());
    let head = head.into_ref();
    for task in &tasks {
        unsafe { head.push_back(NonNull::from(task)) };
    }

    assert!(tasks.iter().all(|task| task.all.is_linked() && task.ready.is_unset()));
    let ids: Vec<u32> = unsafe { head.iter().map(|task| task.as_ref().id).collect() };
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_link_round_trip_through_container_of() {
    let task = Task {
        id: 9,
        ready: ListLink::new(),
        all: ListLink::new(),
    };
    let link = Task::link_of(NonNull::from(&task));

    let recovered = unsafe { crate::container_of!(link, Task, all) };
    assert_eq!(recovered, NonNull::from(&task));
    assert_eq!(unsafe { Task::from_link(link) }, recovered);
    assert_eq!(unsafe { recovered.as_ref() }.id, 9);
}

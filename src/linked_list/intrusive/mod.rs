//! # Intrusive Circular Linked List
//!
//! This module provides an implementation of an intrusive, circular, doubly linked
//! list with a sentinel head.
//!
//! ## Core Components
//!
//! - [`link::ListLink`]: the two-pointer link embedded in every entry, also used as the list sentinel.
//! - [`raw`]: the list operations on bare link pointers (insert, delete, replace, swap, splice, cut, rotate...).
//! - [`traits::HasLink`]: recovers an entry from its embedded link (container-of).
//! - [`head::ListHead`]: a typed, pinned list head over entries implementing `HasLink`.
//! - [`iter`]: forward, backward, resumable and removal-safe passes over a list.
//! - [`locked::LockedList`]: a list head behind a spin lock, for queues shared between threads.
//! - [`validate`]: structural checks used by tests and debugging code.
//!
//! ## Safety
//!
//! This implementation uses `unsafe` code extensively to manage raw pointers.
//! The user of this module is responsible for upholding several invariants:
//!
//! - Entries must stay at the same address, and stay alive, while they are in a list.
//! - A link must not be in two lists at the same time.
//! - When iterating, the list must not be modified, except for removing the entry
//!   just yielded by a removal-safe iterator.
//! - `HasLink::LINK_OFFSET` must be the real offset of the link inside the entry.
//!
//! None of this is checked at runtime beyond a few `debug_assert!`s, so every
//! operation stays O(1).

pub mod traits;
pub mod link;
pub mod raw;
pub mod head;
pub mod iter;
#[cfg(feature = "locked")]
pub mod locked;
#[cfg(feature = "validate")]
pub mod validate;

#[cfg(test)]
mod tests;

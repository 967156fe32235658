//! An intrusive linked list implementation.
//!
//! In an intrusive linked list, the links are stored directly in the data structure
//! that is being linked. This means that the data structure must have a field that
//! is a `ListLink`. This is in contrast to a non-intrusive linked list, where the
//! nodes are allocated separately from the data they carry.
//!
//! The list is circular: a sentinel link, the head, closes the ring, so an empty
//! list is a head pointing to itself and no operation ever has to special-case the
//! first or last entry.
//!
//! # Examples
//!
//! ```
//! use core::{pin::pin, ptr::NonNull};
//! use halo_collections::Linked;
//! use halo_collections::linked_list::intrusive::{head::ListHead, link::ListLink};
//!
//! #[derive(Linked)]
//! struct Job {
//!     link: ListLink,
//!     id: u32,
//! }
//!
//! let jobs = [
//!     Job { link: ListLink::new(), id: 1 },
//!     Job { link: ListLink::new(), id: 2 },
//!     Job { link: ListLink::new(), id: 3 },
//! ];
//!
//! let queue = pin!(ListHead::<Job>::new());
//! let queue = queue.into_ref();
//!
//! for job in &jobs {
//!     // `jobs` outlives `queue` and never moves.
//!     unsafe { queue.push_back(NonNull::from(job)) };
//! }
//! assert_eq!(queue.count_nodes(), 3);
//!
//! let mut ids = vec![];
//! while let Some(job) = queue.pop_front() {
//!     ids.push(unsafe { job.as_ref() }.id);
//! }
//! assert_eq!(ids, vec![1, 2, 3]);
//! assert!(queue.is_empty());
//! ```
pub mod intrusive;

//! Structural checks for circular lists.
//!
//! [`check`] walks a list once in each direction and reports the first place where
//! the ring is not well formed. It is meant for tests and debugging sessions, not
//! for hot paths: it is linear in the list length and hashes every link it visits.

use core::{fmt, ptr::NonNull};

use hashbrown::HashSet;

use super::link::ListLink;

/// A defect found while walking a list.
///
/// `position` counts links from the head, the head being position 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// A link has unset pointers, typically because it was removed with `del`
    /// while still referenced by its neighbours.
    PoisonedLink { position: usize },
    /// `link.next.prev` does not point back at `link`.
    BrokenBackLink { position: usize },
    /// `link.prev.next` does not point back at `link`.
    BrokenForwardLink { position: usize },
    /// Walking forward reaches a link twice without returning to the head.
    ForeignCycle { position: usize },
    /// Walking backward visits a different number of links than walking forward.
    CountMismatch { forward: usize, backward: usize },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::PoisonedLink { position } => {
                write!(f, "link at position {position} has unset pointers")
            }
            ListError::BrokenBackLink { position } => {
                write!(f, "next.prev of link at position {position} does not point back to it")
            }
            ListError::BrokenForwardLink { position } => {
                write!(f, "prev.next of link at position {position} does not point back to it")
            }
            ListError::ForeignCycle { position } => {
                write!(f, "link at position {position} is part of a cycle that skips the head")
            }
            ListError::CountMismatch { forward, backward } => {
                write!(f, "forward walk saw {forward} entries, backward walk saw {backward}")
            }
        }
    }
}

impl core::error::Error for ListError {}

/// Checks that the list headed by `head` is a well formed ring and returns its
/// number of entries.
///
/// # Safety
///
/// Every link reachable from `head` through `next` or `prev` pointers must be live.
pub unsafe fn check(head: NonNull<ListLink>) -> Result<usize, ListError> {
    let result = unsafe { walk(head) };
    if let Err(err) = &result {
        log::debug!(target: "halo_collections::validate", "malformed list at {:p}: {}", head, err);
    }
    result
}

unsafe fn walk(head: NonNull<ListLink>) -> Result<usize, ListError> {
    let mut visited: HashSet<NonNull<ListLink>> = HashSet::new();
    let mut current = head;
    let mut forward = 0;

    loop {
        let position = forward;
        let link = unsafe { current.as_ref() };
        let next = link.next().ok_or(ListError::PoisonedLink { position })?;
        let prev = link.prev().ok_or(ListError::PoisonedLink { position })?;
        if next != head && unsafe { next.as_ref() }.is_unset() {
            return Err(ListError::PoisonedLink { position: position + 1 });
        }

        if unsafe { next.as_ref() }.prev() != Some(current) {
            return Err(ListError::BrokenBackLink { position });
        }
        if unsafe { prev.as_ref() }.next() != Some(current) {
            return Err(ListError::BrokenForwardLink { position });
        }
        if next == head {
            break;
        }
        if !visited.insert(next) {
            return Err(ListError::ForeignCycle { position: position + 1 });
        }
        current = next;
        forward += 1;
    }

    // Bounded by the forward count.
    let mut backward = 0;
    let mut current = unsafe { head.as_ref() }.prev_ptr();
    while current != head {
        if backward > forward {
            break;
        }
        backward += 1;
        current = unsafe { current.as_ref() }.prev_ptr();
    }
    if backward != forward {
        return Err(ListError::CountMismatch { forward, backward });
    }

    Ok(forward)
}

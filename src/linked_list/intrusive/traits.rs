use core::ptr::NonNull;

use super::link::ListLink;

/// A type that embeds a [`ListLink`] and can be recovered from it.
///
/// This is usually implemented with `#[derive(Linked)]`, which computes
/// [`HasLink::LINK_OFFSET`] with [`core::mem::offset_of!`].
///
/// # Safety
///
/// `LINK_OFFSET` must be the byte offset of a `ListLink` field inside `Self`.
/// Every pointer to an entry recovered through [`HasLink::from_link`] relies on it.
pub unsafe trait HasLink: Sized {
    /// The byte offset of the embedded link from the start of `Self`.
    const LINK_OFFSET: usize;

    /// Get a pointer to the link embedded in the entry behind `this`.
    ///
    /// The returned pointer keeps the provenance of `this`, so it can be turned
    /// back into an entry pointer with [`HasLink::from_link`]. Nothing is read
    /// through `this`, which may dangle.
    #[inline]
    fn link_of(this: NonNull<Self>) -> NonNull<ListLink> {
        let link = this.as_ptr().wrapping_byte_add(Self::LINK_OFFSET).cast::<ListLink>();
        NonNull::new(link).expect("entry pointer wraps around the address space")
    }

    /// Recover the entry that embeds `link`.
    ///
    /// # Safety
    ///
    /// `link` must point to the link field of a live `Self`, and must have been
    /// derived from a pointer to the whole entry (e.g. with [`HasLink::link_of`]).
    #[inline]
    unsafe fn from_link(link: NonNull<ListLink>) -> NonNull<Self> {
        unsafe { NonNull::new_unchecked(link.as_ptr().byte_sub(Self::LINK_OFFSET).cast()) }
    }

    /// Get the link embedded in the entry.
    #[inline]
    fn link(&self) -> &ListLink {
        unsafe { Self::link_of(NonNull::from(self)).as_ref() }
    }
}

/// Recovers a pointer to the struct that embeds a field, from a pointer to that field.
///
/// `container_of!(ptr, Type, field)` takes a `NonNull` to `field` and evaluates to a
/// `NonNull<Type>`. It must be used inside an `unsafe` block: the pointer is assumed
/// to really point into a live `Type`, at the offset of `field`.
///
/// ```
/// use core::ptr::NonNull;
/// use halo_collections::container_of;
/// use halo_collections::linked_list::intrusive::link::ListLink;
///
/// struct Request {
///     id: u64,
///     link: ListLink,
/// }
///
/// let request = Request { id: 7, link: ListLink::new() };
/// let base = NonNull::from(&request);
/// let link = unsafe { base.byte_add(core::mem::offset_of!(Request, link)) }.cast::<ListLink>();
///
/// let recovered = unsafe { container_of!(link, Request, link) };
/// assert_eq!(recovered, base);
/// assert_eq!(unsafe { recovered.as_ref() }.id, 7);
/// ```
#[macro_export]
macro_rules! container_of {
    ($ptr:expr, $type:ty, $field:tt) => {
        ::core::ptr::NonNull::<$type>::new_unchecked(
            ($ptr)
                .as_ptr()
                .byte_sub(::core::mem::offset_of!($type, $field))
                .cast::<$type>(),
        )
    };
}

#![no_std]

pub mod linked_list;

pub use halo_collections_derive::Linked;

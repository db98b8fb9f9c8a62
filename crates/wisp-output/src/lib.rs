//! Hierarchical output container and file codec for Wisp.
//!
//! A [`Group`] is an ordered tree of attributes, fixed-length float
//! datasets, and child groups, the attribute+dataset layout event
//! serialization targets. The binary codec streams a group tree to any
//! `Write` sink and reads it back for round-trip verification.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod group;

pub use codec::{read_container, write_container};
pub use error::ContainerError;
pub use group::{Attr, Group};

/// File magic for the container format.
pub const MAGIC: &[u8; 4] = b"WISP";

/// Current container format version.
pub const FORMAT_VERSION: u16 = 1;

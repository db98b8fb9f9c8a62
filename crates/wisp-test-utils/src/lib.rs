//! Test fixtures and mock types for Wisp development.
//!
//! Provides canned detector models, cross-section collections with
//! known channels, and an in-memory model loader, so generation and
//! serialization tests can run without resource files or real physics.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    charged_current_collection, fixed_signature_collection, miniboone_model,
    secondary_decay_collection, single_sector_model, FixedCrossSection, InMemoryLoader,
};

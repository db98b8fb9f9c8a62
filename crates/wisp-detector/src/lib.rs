//! Detector geometry and material model for Wisp event generation.
//!
//! A [`DetectorModel`] is an ordered list of named sectors, each pairing a
//! placement volume with a material, plus a registry of materials
//! addressable by sequential index. The model is built once during
//! configuration and immutable afterwards.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod model;
pub mod resources;
pub mod targets;

pub use error::DetectorError;
pub use geometry::Geometry;
pub use model::{DetectorModel, Material, MaterialRegistry, Sector};
pub use resources::{DetectorModelLoader, ResourcePaths};
pub use targets::{enumerate_targets, TargetInventory};

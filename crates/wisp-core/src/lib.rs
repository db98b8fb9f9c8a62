//! Core types for the Wisp event generation framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental data model shared across the Wisp workspace: particle
//! species, interaction records and event trees, four-vector kinematics,
//! and the seeded random stream.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod particle;
pub mod random;
pub mod record;

pub use particle::{Nuclide, ParticleType};
pub use random::RandomStream;
pub use record::{Event, FourMomentum, InteractionRecord, InteractionSignature, Vector3};

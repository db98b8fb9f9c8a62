//! Process descriptors, distributions, and cross sections for Wisp.
//!
//! An injection process describes how events are sampled; a physical
//! process describes how they are weighted. Both pair a primary particle
//! type with an ordered list of named distributions and, after
//! resolution, a cross-section collection.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cross_section;
pub mod defaults;
pub mod distribution;
pub mod process;

pub use cross_section::{CrossSection, CrossSectionCollection};
pub use defaults::{
    Monoenergetic, PowerLawSpectrum, PrimaryNeutrinoHelicity, SecondaryPosition, TargetAtRest,
    UniformVolumePosition,
};
pub use distribution::{DistributionError, InjectionDistribution, PhysicalDistribution};
pub use process::{InjectionProcess, PhysicalProcess, SecondaryProcessConfig};

//! Wisp: an event generation framework for neutrino-experiment simulation.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Wisp sub-crates. For most users, adding `wisp` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use wisp::prelude::*;
//! use wisp::detector::{DetectorModel, Geometry, Material, MaterialRegistry, Sector};
//! use wisp::process::{Monoenergetic, UniformVolumePosition};
//!
//! // A one-sector argon sphere.
//! let mut registry = MaterialRegistry::new();
//! registry.register(Material {
//!     name: "argon".into(),
//!     target_types: vec![ParticleType::Nucleus(Nuclide::new("Ar", 40))],
//! });
//! let volume = Geometry::Sphere { center: Vector3::default(), radius: 10.0 };
//! let model = DetectorModel::new(
//!     vec![Sector { name: "world".into(), geometry: volume.clone(), material_index: 0 }],
//!     registry,
//! ).unwrap();
//!
//! // A minimal cross section: NuMu on Ar40, fully absorbed.
//! struct Absorption;
//! impl CrossSection for Absorption {
//!     fn possible_signatures(&self) -> Vec<InteractionSignature> {
//!         let mut sig = InteractionSignature::probe(ParticleType::NuMu);
//!         sig.target_type = ParticleType::Nucleus(Nuclide::new("Ar", 40));
//!         vec![sig]
//!     }
//!     fn total_cross_section(&self, _record: &InteractionRecord) -> f64 { 1.0 }
//! }
//!
//! let mut controller = Controller::with_model(2, "lab", 42, model);
//! controller.set_progress_sink(Box::new(wisp::controller::Silent));
//! let mut injection: indexmap::IndexMap<String, Box<dyn InjectionDistribution>> =
//!     indexmap::IndexMap::new();
//! injection.insert("energy".into(), Box::new(Monoenergetic::along_z(1.0)));
//! injection.insert("position".into(), Box::new(UniformVolumePosition::new(volume)));
//! controller.set_processes(ParticleType::NuMu, injection, indexmap::IndexMap::new(), vec![]);
//! controller.set_cross_sections(
//!     Arc::new(CrossSectionCollection::new(ParticleType::NuMu, vec![Arc::new(Absorption)])),
//!     vec![],
//! ).unwrap();
//! controller.initialize().unwrap();
//! let events = controller.generate_events(None).unwrap();
//! assert_eq!(events.len(), 2);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `wisp-core` | Particle types, records, events, random stream |
//! | [`detector`] | `wisp-detector` | Detector model, geometry, resource paths |
//! | [`process`] | `wisp-process` | Distributions, cross sections, processes |
//! | [`engine`] | `wisp-engine` | Injection and weighting engines |
//! | [`output`] | `wisp-output` | Hierarchical container and file codec |
//! | [`controller`] | `wisp-controller` | The orchestration controller |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Particle types, interaction records, events, and the random stream
/// (`wisp-core`).
pub use wisp_core as types;

/// Detector model, placement geometry, target enumeration, and resource
/// path resolution (`wisp-detector`).
pub use wisp_detector as detector;

/// Distribution traits, stock distributions, cross sections, and
/// process descriptors (`wisp-process`).
pub use wisp_process as process;

/// Injection and weighting engine contracts plus the reference
/// implementations (`wisp-engine`).
pub use wisp_engine as engine;

/// Hierarchical output container and its binary codec (`wisp-output`).
pub use wisp_output as output;

/// The orchestration controller (`wisp-controller`).
///
/// [`controller::Controller`] drives the full pipeline: process
/// configuration, cross-section resolution, generation, serialization.
pub use wisp_controller as controller;

/// Common imports for typical Wisp usage.
///
/// ```rust
/// use wisp::prelude::*;
/// ```
pub mod prelude {
    // Core data model
    pub use wisp_core::{
        Event, FourMomentum, InteractionRecord, InteractionSignature, Nuclide, ParticleType,
        RandomStream, Vector3,
    };

    // Detector model and loading seam
    pub use wisp_detector::{
        enumerate_targets, DetectorModel, DetectorModelLoader, Geometry, ResourcePaths,
    };

    // Processes and cross sections
    pub use wisp_process::{
        CrossSection, CrossSectionCollection, InjectionDistribution, InjectionProcess,
        PhysicalDistribution, PhysicalProcess, SecondaryProcessConfig,
    };

    // Engines
    pub use wisp_engine::{Injector, Weighter};

    // Output container
    pub use wisp_output::{Attr, Group};

    // The controller
    pub use wisp_controller::{ConfigError, Controller};
}

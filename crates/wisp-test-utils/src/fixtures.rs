//! Reusable fixtures for generation and serialization tests.

use std::sync::Arc;

use smallvec::SmallVec;
use wisp_core::{
    InteractionRecord, InteractionSignature, Nuclide, ParticleType, Vector3,
};
use wisp_detector::{
    DetectorError, DetectorModel, DetectorModelLoader, Geometry, Material, MaterialRegistry,
    ResourcePaths, Sector,
};
use wisp_process::{CrossSection, CrossSectionCollection};

/// A cross section with a fixed list of channel signatures and a
/// constant magnitude.
pub struct FixedCrossSection {
    pub signatures: Vec<InteractionSignature>,
    pub magnitude: f64,
}

impl CrossSection for FixedCrossSection {
    fn possible_signatures(&self) -> Vec<InteractionSignature> {
        self.signatures.clone()
    }

    fn total_cross_section(&self, _record: &InteractionRecord) -> f64 {
        self.magnitude
    }
}

fn signature(
    primary: ParticleType,
    target: ParticleType,
    secondaries: &[ParticleType],
) -> InteractionSignature {
    InteractionSignature {
        primary_type: primary,
        target_type: target,
        secondary_types: SmallVec::from_slice(secondaries),
    }
}

/// A collection for `primary` with one arbitrary fixed channel.
pub fn fixed_signature_collection(
    primary: ParticleType,
    sig: InteractionSignature,
) -> CrossSectionCollection {
    CrossSectionCollection::new(
        primary,
        vec![Arc::new(FixedCrossSection {
            signatures: vec![sig],
            magnitude: 1.0,
        })],
    )
}

/// A charged-current-like collection: `primary` on Ar40 producing the
/// matching charged lepton plus hadrons.
pub fn charged_current_collection(primary: ParticleType) -> CrossSectionCollection {
    let lepton = match primary {
        ParticleType::NuE => ParticleType::EMinus,
        ParticleType::NuEBar => ParticleType::EPlus,
        ParticleType::NuMu => ParticleType::MuMinus,
        ParticleType::NuMuBar => ParticleType::MuPlus,
        ParticleType::NuTau => ParticleType::TauMinus,
        ParticleType::NuTauBar => ParticleType::TauPlus,
        other => other,
    };
    let argon = ParticleType::Nucleus(Nuclide::new("Ar", 40));
    fixed_signature_collection(
        primary,
        signature(primary, argon, &[lepton, ParticleType::Hadrons]),
    )
}

/// A decay-like collection for a charged secondary: no target, leptonic
/// final state that no further process covers.
pub fn secondary_decay_collection(primary: ParticleType) -> CrossSectionCollection {
    fixed_signature_collection(
        primary,
        signature(
            primary,
            ParticleType::Unknown,
            &[ParticleType::EMinus, ParticleType::NuEBar, ParticleType::NuMu],
        ),
    )
}

/// A single spherical argon sector named `world`.
pub fn single_sector_model() -> DetectorModel {
    let mut registry = MaterialRegistry::new();
    registry.register(Material {
        name: "argon".into(),
        target_types: vec![
            ParticleType::Nucleus(Nuclide::new("Ar", 40)),
            ParticleType::EMinus,
        ],
    });
    DetectorModel::new(
        vec![Sector {
            name: "world".into(),
            geometry: Geometry::Sphere {
                center: Vector3::default(),
                radius: 1000.0,
            },
            material_index: 0,
        }],
        registry,
    )
    .expect("fixture model is valid")
}

/// A two-sector model shaped like the MiniBooNE layout: an outer hull
/// and an inner `fid_vol` sphere the fiducial table points at.
pub fn miniboone_model() -> DetectorModel {
    let mut registry = MaterialRegistry::new();
    registry.register(Material {
        name: "mineral_oil".into(),
        target_types: vec![
            ParticleType::Nucleus(Nuclide::new("C", 12)),
            ParticleType::Nucleus(Nuclide::HYDROGEN),
        ],
    });
    DetectorModel::new(
        vec![
            Sector {
                name: "hull".into(),
                geometry: Geometry::Sphere {
                    center: Vector3::default(),
                    radius: 6.1,
                },
                material_index: 0,
            },
            Sector {
                name: "fid_vol".into(),
                geometry: Geometry::Sphere {
                    center: Vector3::default(),
                    radius: 5.0,
                },
                material_index: 0,
            },
        ],
        registry,
    )
    .expect("fixture model is valid")
}

/// Loader serving a prebuilt model regardless of the requested paths.
pub struct InMemoryLoader {
    model: DetectorModel,
}

impl InMemoryLoader {
    pub fn new(model: DetectorModel) -> Self {
        Self { model }
    }
}

impl DetectorModelLoader for InMemoryLoader {
    fn load(&self, _paths: &ResourcePaths) -> Result<DetectorModel, DetectorError> {
        Ok(self.model.clone())
    }
}

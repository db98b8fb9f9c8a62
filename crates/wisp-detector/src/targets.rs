//! Enumeration of target species present in a detector model.

use indexmap::IndexSet;
use wisp_core::ParticleType;

use crate::model::DetectorModel;

/// Distinct target species and nuclide short names in a model.
///
/// Both lists are deduplicated in first-seen order. The nuclide list
/// covers only nuclear targets, with the bare proton reported as `H1`.
/// Advisory information for matching cross-section data files to a
/// model; nothing in the generation pipeline consumes it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TargetInventory {
    /// Every distinct target species, first-seen order.
    pub targets: Vec<ParticleType>,
    /// Short names of the nuclear targets, first-seen order.
    pub nuclide_names: Vec<String>,
}

/// Walk the material registry by increasing index and collect the
/// target inventory. Read-only.
pub fn enumerate_targets(model: &DetectorModel) -> TargetInventory {
    let mut targets = IndexSet::new();
    let mut nuclide_names = IndexSet::new();

    let registry = model.materials();
    let mut index = 0;
    while registry.has_material(index) {
        for target in registry.material_targets(index) {
            targets.insert(*target);
            if let Some(nuclide) = target.nuclide() {
                nuclide_names.insert(nuclide.short_name());
            }
        }
        index += 1;
    }

    TargetInventory {
        targets: targets.into_iter().collect(),
        nuclide_names: nuclide_names.into_iter().collect(),
    }
}

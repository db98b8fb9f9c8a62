//! The reference weighting engine.

use std::sync::Arc;

use wisp_core::Event;
use wisp_detector::DetectorModel;
use wisp_process::PhysicalProcess;

/// The weighting engine contract.
///
/// Computes a physical weight for a finished event. Weighting never
/// resamples or mutates the event.
pub trait Weighter {
    /// The physical weight of `event`.
    fn event_weight(&self, event: &Event) -> f64;
}

/// Reference tree weighter.
///
/// Each interaction is weighted by the matching physical process: the
/// first record by the primary process, chained records by the
/// secondary process covering their primary type. The event weight is
/// the product of every distribution density over the tree. Records
/// with no covering process contribute a factor of one.
pub struct TreeWeighter {
    model: Arc<DetectorModel>,
    primary: PhysicalProcess,
    secondaries: Vec<PhysicalProcess>,
}

impl TreeWeighter {
    /// Wire a weighter from configured physical processes.
    pub fn new(
        model: Arc<DetectorModel>,
        primary: PhysicalProcess,
        secondaries: Vec<PhysicalProcess>,
    ) -> Self {
        Self {
            model,
            primary,
            secondaries,
        }
    }

    fn process_for(&self, index: usize, event: &Event) -> Option<&PhysicalProcess> {
        if index == 0 {
            return Some(&self.primary);
        }
        let primary_type = event.tree[index].signature.primary_type;
        self.secondaries
            .iter()
            .find(|p| p.primary_type() == primary_type)
    }
}

impl Weighter for TreeWeighter {
    fn event_weight(&self, event: &Event) -> f64 {
        let mut weight = 1.0;
        for (index, record) in event.tree.iter().enumerate() {
            let Some(process) = self.process_for(index, event) else {
                continue;
            };
            for distribution in process.distributions() {
                weight *= distribution.density(&self.model, record);
            }
        }
        weight
    }
}

//! Cross sections and the collections that group them by primary type.

use std::fmt;
use std::sync::Arc;

use wisp_core::{InteractionRecord, InteractionSignature, ParticleType};

/// Interaction-probability data for one channel family.
///
/// Implementations are the physics layer; the orchestration core only
/// needs the channel signatures a cross section offers and its total
/// magnitude for a sampled record.
pub trait CrossSection {
    /// The channel signatures this cross section can produce.
    fn possible_signatures(&self) -> Vec<InteractionSignature>;

    /// Total cross section for `record`'s kinematics, in arbitrary
    /// units consistent across a collection.
    fn total_cross_section(&self, record: &InteractionRecord) -> f64;
}

/// A set of cross sections applicable to one primary particle type.
#[derive(Clone)]
pub struct CrossSectionCollection {
    primary_type: ParticleType,
    cross_sections: Vec<Arc<dyn CrossSection>>,
}

impl CrossSectionCollection {
    /// Build a collection for `primary_type`.
    pub fn new(primary_type: ParticleType, cross_sections: Vec<Arc<dyn CrossSection>>) -> Self {
        Self {
            primary_type,
            cross_sections,
        }
    }

    /// The primary type this collection applies to.
    pub fn primary_type(&self) -> ParticleType {
        self.primary_type
    }

    /// The cross sections in this collection.
    pub fn cross_sections(&self) -> &[Arc<dyn CrossSection>] {
        &self.cross_sections
    }

    /// Whether this collection applies to a signature's primary type.
    pub fn matches_primary(&self, signature: &InteractionSignature) -> bool {
        signature.primary_type == self.primary_type
    }
}

impl fmt::Debug for CrossSectionCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossSectionCollection")
            .field("primary_type", &self.primary_type)
            .field("cross_sections", &self.cross_sections.len())
            .finish()
    }
}

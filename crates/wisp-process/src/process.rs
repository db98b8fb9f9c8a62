//! Injection and physical process descriptors.
//!
//! A process pairs a primary particle type with an ordered list of
//! distributions. Processes are built once during configuration and are
//! immutable afterwards except for cross-section assignment, which
//! resolution performs as a separate step.

use std::fmt;
use std::sync::Arc;

use wisp_core::ParticleType;

use crate::cross_section::CrossSectionCollection;
use crate::distribution::{InjectionDistribution, PhysicalDistribution};

/// How one event's kinematics are sampled for a primary type.
pub struct InjectionProcess {
    primary_type: ParticleType,
    distributions: Vec<Box<dyn InjectionDistribution>>,
    cross_sections: Option<Arc<CrossSectionCollection>>,
}

impl InjectionProcess {
    /// A process for `primary_type` with no distributions yet.
    pub fn new(primary_type: ParticleType) -> Self {
        Self {
            primary_type,
            distributions: Vec::new(),
            cross_sections: None,
        }
    }

    /// The primary particle type.
    pub fn primary_type(&self) -> ParticleType {
        self.primary_type
    }

    /// Append a distribution. Order is sampling order.
    pub fn add_distribution(&mut self, distribution: Box<dyn InjectionDistribution>) {
        self.distributions.push(distribution);
    }

    /// The distributions, in sampling order.
    pub fn distributions(&self) -> &[Box<dyn InjectionDistribution>] {
        &self.distributions
    }

    /// Assign the resolved cross-section collection.
    ///
    /// A later assignment overwrites an earlier one.
    pub fn set_cross_sections(&mut self, collection: Arc<CrossSectionCollection>) {
        self.cross_sections = Some(collection);
    }

    /// The assigned cross-section collection, if resolved.
    pub fn cross_sections(&self) -> Option<&Arc<CrossSectionCollection>> {
        self.cross_sections.as_ref()
    }
}

impl fmt::Debug for InjectionProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionProcess")
            .field("primary_type", &self.primary_type)
            .field(
                "distributions",
                &self
                    .distributions
                    .iter()
                    .map(|d| d.name())
                    .collect::<Vec<_>>(),
            )
            .field("cross_sections", &self.cross_sections.is_some())
            .finish()
    }
}

/// How one event is weighted for a primary type.
pub struct PhysicalProcess {
    primary_type: ParticleType,
    distributions: Vec<Box<dyn PhysicalDistribution>>,
    cross_sections: Option<Arc<CrossSectionCollection>>,
}

impl PhysicalProcess {
    /// A process for `primary_type` with no distributions yet.
    pub fn new(primary_type: ParticleType) -> Self {
        Self {
            primary_type,
            distributions: Vec::new(),
            cross_sections: None,
        }
    }

    /// The primary particle type.
    pub fn primary_type(&self) -> ParticleType {
        self.primary_type
    }

    /// Append a distribution. Order is evaluation order.
    pub fn add_distribution(&mut self, distribution: Box<dyn PhysicalDistribution>) {
        self.distributions.push(distribution);
    }

    /// The distributions, in evaluation order.
    pub fn distributions(&self) -> &[Box<dyn PhysicalDistribution>] {
        &self.distributions
    }

    /// Assign the resolved cross-section collection.
    ///
    /// A later assignment overwrites an earlier one.
    pub fn set_cross_sections(&mut self, collection: Arc<CrossSectionCollection>) {
        self.cross_sections = Some(collection);
    }

    /// The assigned cross-section collection, if resolved.
    pub fn cross_sections(&self) -> Option<&Arc<CrossSectionCollection>> {
        self.cross_sections.as_ref()
    }
}

impl fmt::Debug for PhysicalProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicalProcess")
            .field("primary_type", &self.primary_type)
            .field(
                "distributions",
                &self
                    .distributions
                    .iter()
                    .map(|d| d.name())
                    .collect::<Vec<_>>(),
            )
            .field("cross_sections", &self.cross_sections.is_some())
            .finish()
    }
}

/// Configuration for one secondary process.
///
/// Bundles the particle type with both distribution lists so secondary
/// configuration cannot fall out of positional alignment.
pub struct SecondaryProcessConfig {
    /// The secondary's primary particle type.
    pub particle_type: ParticleType,
    /// Injection distributions for this secondary, in sampling order.
    pub injection_distributions: Vec<Box<dyn InjectionDistribution>>,
    /// Physical distributions for this secondary, in evaluation order.
    pub physical_distributions: Vec<Box<dyn PhysicalDistribution>>,
}

impl SecondaryProcessConfig {
    /// A secondary configuration with no extra distributions.
    ///
    /// The controller still appends the default position distribution,
    /// so this is the minimal useful configuration.
    pub fn bare(particle_type: ParticleType) -> Self {
        Self {
            particle_type,
            injection_distributions: Vec::new(),
            physical_distributions: Vec::new(),
        }
    }
}

impl fmt::Debug for SecondaryProcessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecondaryProcessConfig")
            .field("particle_type", &self.particle_type)
            .field("injection_distributions", &self.injection_distributions.len())
            .field("physical_distributions", &self.physical_distributions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::TargetAtRest;

    #[test]
    fn later_cross_section_assignment_overwrites() {
        let mut process = InjectionProcess::new(ParticleType::NuMu);
        let first = Arc::new(CrossSectionCollection::new(ParticleType::NuMu, vec![]));
        let second = Arc::new(CrossSectionCollection::new(ParticleType::NuMu, vec![]));
        process.set_cross_sections(first.clone());
        process.set_cross_sections(second.clone());
        assert!(Arc::ptr_eq(process.cross_sections().unwrap(), &second));
        assert!(!Arc::ptr_eq(process.cross_sections().unwrap(), &first));
    }

    #[test]
    fn distribution_order_is_insertion_order() {
        let mut process = PhysicalProcess::new(ParticleType::NuE);
        process.add_distribution(Box::new(TargetAtRest));
        assert_eq!(process.distributions().len(), 1);
        assert_eq!(process.distributions()[0].name(), "target_at_rest");
        assert!(process.cross_sections().is_none());
    }
}

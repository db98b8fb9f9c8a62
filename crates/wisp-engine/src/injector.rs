//! The reference injection engine.

use std::sync::Arc;

use wisp_core::{Event, InteractionRecord, RandomStream};
use wisp_detector::DetectorModel;
use wisp_process::InjectionProcess;

use crate::error::EngineError;

/// Predicate evaluated on each candidate event before acceptance.
///
/// Returning `false` discards the candidate; the injector samples a
/// fresh one. The default predicate accepts everything.
pub type StoppingCondition = Box<dyn Fn(&Event) -> bool>;

/// Candidate resampling cap when a stopping condition keeps rejecting.
const MAX_CANDIDATE_ATTEMPTS: usize = 10_000;

/// Maximum secondary chaining depth, guarding against cyclic process
/// graphs (a secondary whose products re-trigger itself).
const MAX_CHAIN_DEPTH: usize = 16;

/// The injection engine contract.
///
/// The injector owns the authoritative cumulative injected-event
/// counter; callers read it to drive bounded, resumable generation
/// loops.
pub trait Injector {
    /// Generate one full interaction tree and count it.
    fn generate_event(&mut self) -> Result<Event, EngineError>;

    /// Cumulative number of events injected so far.
    fn injected_events(&self) -> usize;

    /// The configured target event count.
    fn events_to_inject(&self) -> usize;

    /// Replace the stopping-condition predicate.
    fn set_stopping_condition(&mut self, condition: StoppingCondition);
}

/// Reference single-threaded injection engine.
///
/// Samples a channel signature from each process's resolved
/// cross-section collection, runs the process's injection distributions
/// in order, and chains one secondary interaction for every outgoing
/// particle that a configured secondary process covers.
pub struct StandardInjector {
    events_to_inject: usize,
    injected: usize,
    model: Arc<DetectorModel>,
    primary: InjectionProcess,
    secondaries: Vec<InjectionProcess>,
    random: RandomStream,
    stopping_condition: StoppingCondition,
}

impl std::fmt::Debug for StandardInjector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardInjector")
            .field("events_to_inject", &self.events_to_inject)
            .field("injected", &self.injected)
            .finish_non_exhaustive()
    }
}

impl StandardInjector {
    /// Wire an injector from configured processes.
    ///
    /// Every process must already carry a resolved cross-section
    /// collection; wiring fails otherwise.
    pub fn new(
        events_to_inject: usize,
        model: Arc<DetectorModel>,
        primary: InjectionProcess,
        secondaries: Vec<InjectionProcess>,
        random: RandomStream,
    ) -> Result<Self, EngineError> {
        for process in std::iter::once(&primary).chain(secondaries.iter()) {
            if process.cross_sections().is_none() {
                return Err(EngineError::ProcessNotResolved {
                    particle_type: process.primary_type(),
                });
            }
        }
        Ok(Self {
            events_to_inject,
            injected: 0,
            model,
            primary,
            secondaries,
            random,
            stopping_condition: Box::new(|_| true),
        })
    }

    /// Sample one interaction for `process`, seeded from an optional
    /// parent record.
    fn sample_interaction(
        random: &mut RandomStream,
        model: &DetectorModel,
        process: &InjectionProcess,
        parent: Option<(&InteractionRecord, usize)>,
    ) -> Result<InteractionRecord, EngineError> {
        let collection = process
            .cross_sections()
            .ok_or(EngineError::ProcessNotResolved {
                particle_type: process.primary_type(),
            })?;

        // Pick a channel: uniform over cross sections, then uniform over
        // that cross section's signatures.
        let cross_sections = collection.cross_sections();
        if cross_sections.is_empty() {
            return Err(EngineError::NoChannels {
                particle_type: process.primary_type(),
            });
        }
        let xs = &cross_sections[random.index(cross_sections.len())];
        let signatures = xs.possible_signatures();
        if signatures.is_empty() {
            return Err(EngineError::NoChannels {
                particle_type: process.primary_type(),
            });
        }
        let signature = signatures[random.index(signatures.len())].clone();

        let mut record = InteractionRecord::new(process.primary_type());
        record.signature = signature;
        record.signature.primary_type = process.primary_type();

        // Chained interactions start from the parent's kinematics.
        if let Some((parent_record, slot)) = parent {
            record.vertex = parent_record.vertex;
            if let Some(momentum) = parent_record.secondary_momenta.get(slot) {
                record.primary_momentum = *momentum;
            }
        }

        for distribution in process.distributions() {
            distribution.sample(random, model, &mut record)?;
        }

        // Reference kinematics: the primary momentum is shared equally
        // among the outgoing secondaries.
        let n = record.signature.secondary_types.len();
        if n > 0 {
            let share = record.primary_momentum.scaled(1.0 / n as f64);
            record.secondary_momenta = vec![share; n];
        }

        Ok(record)
    }

    /// Build one candidate interaction tree.
    fn sample_tree(&mut self) -> Result<Event, EngineError> {
        let mut event = Event::default();
        let primary = Self::sample_interaction(
            &mut self.random,
            &self.model,
            &self.primary,
            None,
        )?;
        event.tree.push(primary);

        // Breadth-first chaining: walk each record's outgoing particles
        // and spawn a chained interaction for every one a secondary
        // process covers.
        let mut cursor = 0;
        let mut depth = 0;
        while cursor < event.tree.len() && depth < MAX_CHAIN_DEPTH {
            let generation_end = event.tree.len();
            while cursor < generation_end {
                let parent = event.tree[cursor].clone();
                for (slot, secondary_type) in
                    parent.signature.secondary_types.iter().enumerate()
                {
                    let Some(process) = self
                        .secondaries
                        .iter()
                        .find(|p| p.primary_type() == *secondary_type)
                    else {
                        continue;
                    };
                    let chained = Self::sample_interaction(
                        &mut self.random,
                        &self.model,
                        process,
                        Some((&parent, slot)),
                    )?;
                    event.tree.push(chained);
                }
                cursor += 1;
            }
            depth += 1;
        }

        Ok(event)
    }
}

impl Injector for StandardInjector {
    fn generate_event(&mut self) -> Result<Event, EngineError> {
        if self.injected >= self.events_to_inject {
            return Err(EngineError::TargetReached {
                target: self.events_to_inject,
            });
        }
        for _ in 0..MAX_CANDIDATE_ATTEMPTS {
            let candidate = self.sample_tree()?;
            if (self.stopping_condition)(&candidate) {
                self.injected += 1;
                return Ok(candidate);
            }
        }
        Err(EngineError::NoViableEvent {
            attempts: MAX_CANDIDATE_ATTEMPTS,
        })
    }

    fn injected_events(&self) -> usize {
        self.injected
    }

    fn events_to_inject(&self) -> usize {
        self.events_to_inject
    }

    fn set_stopping_condition(&mut self, condition: StoppingCondition) {
        self.stopping_condition = condition;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisp_core::ParticleType;
    use wisp_test_utils::{
        charged_current_collection, secondary_decay_collection, single_sector_model,
    };
    use wisp_process::{Monoenergetic, SecondaryPosition, UniformVolumePosition};

    fn resolved_primary(model: &DetectorModel) -> InjectionProcess {
        let mut process = InjectionProcess::new(ParticleType::NuMu);
        process.add_distribution(Box::new(Monoenergetic::along_z(5.0)));
        process.add_distribution(Box::new(UniformVolumePosition::new(
            model.sectors()[0].geometry.clone(),
        )));
        process.set_cross_sections(Arc::new(charged_current_collection(ParticleType::NuMu)));
        process
    }

    #[test]
    fn unresolved_process_is_rejected_at_wiring() {
        let model = Arc::new(single_sector_model());
        let bare = InjectionProcess::new(ParticleType::NuMu);
        let err = StandardInjector::new(1, model, bare, vec![], RandomStream::new(0))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::ProcessNotResolved {
                particle_type: ParticleType::NuMu
            }
        );
    }

    #[test]
    fn generates_primary_only_trees_without_secondaries() {
        let model = Arc::new(single_sector_model());
        let primary = resolved_primary(&model);
        let mut injector =
            StandardInjector::new(3, model, primary, vec![], RandomStream::new(1)).unwrap();
        for expected in 1..=3 {
            let event = injector.generate_event().unwrap();
            assert_eq!(event.len(), 1);
            assert_eq!(
                event.primary().unwrap().signature.primary_type,
                ParticleType::NuMu
            );
            assert_eq!(injector.injected_events(), expected);
        }
        assert_eq!(
            injector.generate_event().unwrap_err(),
            EngineError::TargetReached { target: 3 }
        );
    }

    #[test]
    fn secondary_process_chains_after_primary() {
        let model = Arc::new(single_sector_model());
        let primary = resolved_primary(&model);

        // The charged-current channel produces a MuMinus; cover it.
        let mut secondary = InjectionProcess::new(ParticleType::MuMinus);
        secondary.add_distribution(Box::new(SecondaryPosition::new()));
        secondary
            .set_cross_sections(Arc::new(secondary_decay_collection(ParticleType::MuMinus)));

        let mut injector = StandardInjector::new(
            2,
            model,
            primary,
            vec![secondary],
            RandomStream::new(7),
        )
        .unwrap();
        let event = injector.generate_event().unwrap();
        assert!(event.len() >= 2, "expected a chained tree, got {}", event.len());
        assert_eq!(
            event.tree[1].signature.primary_type,
            ParticleType::MuMinus
        );
        // Chained momentum comes from the parent's outgoing share.
        let parent_share = event.tree[0].secondary_momenta[0];
        assert_eq!(event.tree[1].primary_momentum, parent_share);
    }

    #[test]
    fn rejecting_stopping_condition_surfaces_no_viable_event() {
        let model = Arc::new(single_sector_model());
        let primary = resolved_primary(&model);
        let mut injector =
            StandardInjector::new(1, model, primary, vec![], RandomStream::new(2)).unwrap();
        injector.set_stopping_condition(Box::new(|_| false));
        match injector.generate_event().unwrap_err() {
            EngineError::NoViableEvent { attempts } => assert!(attempts > 0),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(injector.injected_events(), 0);
    }

    #[test]
    fn identical_seeds_reproduce_identical_events() {
        let model = Arc::new(single_sector_model());
        let make = |seed| {
            let primary = resolved_primary(&model);
            StandardInjector::new(2, model.clone(), primary, vec![], RandomStream::new(seed))
                .unwrap()
        };
        let mut a = make(99);
        let mut b = make(99);
        assert_eq!(a.generate_event().unwrap(), b.generate_event().unwrap());
        assert_eq!(a.generate_event().unwrap(), b.generate_event().unwrap());
    }
}

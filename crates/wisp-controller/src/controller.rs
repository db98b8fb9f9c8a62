//! The event generation controller.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;

use wisp_core::{Event, InteractionSignature, ParticleType, RandomStream};
use wisp_detector::{
    enumerate_targets, DetectorModel, DetectorModelLoader, Geometry, ResourcePaths,
    TargetInventory,
};
use wisp_engine::{Injector, StandardInjector, StoppingCondition, TreeWeighter, Weighter};
use wisp_output::{write_container, Group};
use wisp_process::{
    CrossSectionCollection, InjectionDistribution, InjectionProcess, PhysicalDistribution,
    PhysicalProcess, PrimaryNeutrinoHelicity, SecondaryPosition, SecondaryProcessConfig,
    TargetAtRest,
};

use crate::error::ConfigError;
use crate::fiducial;
use crate::progress::{ProgressSink, StatusLine};
use crate::serialize::build_container;

/// Distribution key the target-kinematics default is injected under.
const TARGET_KEY: &str = "target";

/// Distribution key the helicity default is injected under.
const HELICITY_KEY: &str = "helicity";

/// Orchestrates configuration, generation, and serialization for one
/// experiment.
///
/// The controller owns the detector model, the configured process
/// graph, the engines, and the accumulation list. All operations take
/// `&mut self`; the controller is `Send` but the pipeline is strictly
/// single-threaded and sequential.
pub struct Controller {
    events_to_inject: usize,
    experiment: String,
    seed: u64,
    model: Arc<DetectorModel>,
    primary_injection: Option<InjectionProcess>,
    primary_physical: Option<PhysicalProcess>,
    secondary_injections: Vec<InjectionProcess>,
    secondary_physicals: Vec<PhysicalProcess>,
    injector: Option<Box<dyn Injector>>,
    weighter: Option<Box<dyn Weighter>>,
    events: Vec<Event>,
    progress: Box<dyn ProgressSink>,
}

impl Controller {
    /// Create a controller, loading the experiment's detector model
    /// through `loader` from the resolved `paths`.
    ///
    /// Load failures propagate unwrapped.
    pub fn new(
        events_to_inject: usize,
        experiment: impl Into<String>,
        seed: u64,
        paths: &ResourcePaths,
        loader: &dyn DetectorModelLoader,
    ) -> Result<Self, ConfigError> {
        let model = loader.load(paths)?;
        Ok(Self::with_model(events_to_inject, experiment, seed, model))
    }

    /// Create a controller around an already-built detector model.
    pub fn with_model(
        events_to_inject: usize,
        experiment: impl Into<String>,
        seed: u64,
        model: DetectorModel,
    ) -> Self {
        Self {
            events_to_inject,
            experiment: experiment.into(),
            seed,
            model: Arc::new(model),
            primary_injection: None,
            primary_physical: None,
            secondary_injections: Vec::new(),
            secondary_physicals: Vec::new(),
            injector: None,
            weighter: None,
            events: Vec::new(),
            progress: Box::new(StatusLine::stderr()),
        }
    }

    /// Replace the progress sink (tests use [`Silent`](crate::Silent)).
    pub fn set_progress_sink(&mut self, sink: Box<dyn ProgressSink>) {
        self.progress = sink;
    }

    /// The experiment name this controller was built for.
    pub fn experiment(&self) -> &str {
        &self.experiment
    }

    /// The loaded detector model.
    pub fn model(&self) -> &DetectorModel {
        &self.model
    }

    /// The experiment's fiducial volume, if one resolves.
    pub fn fiducial_volume(&self) -> Option<Geometry> {
        fiducial::fiducial_volume(&self.model, &self.experiment)
    }

    /// The target species present in the loaded detector model.
    ///
    /// Advisory information for matching cross-section data files to
    /// the model; nothing in the generation pipeline consumes it.
    pub fn detector_targets(&self) -> TargetInventory {
        enumerate_targets(&self.model)
    }

    /// Replace the per-candidate stopping condition.
    ///
    /// A hook point for early-termination policies; the default
    /// installed by [`initialize`](Controller::initialize) accepts
    /// every candidate.
    pub fn set_stopping_condition(
        &mut self,
        condition: StoppingCondition,
    ) -> Result<(), ConfigError> {
        let injector = self.injector.as_mut().ok_or(ConfigError::NotInitialized)?;
        injector.set_stopping_condition(condition);
        Ok(())
    }

    /// Configure the primary and secondary processes.
    ///
    /// Every supplied distribution is added in map order, then the
    /// `target` and `helicity` defaults are injected into the primary
    /// processes where the caller did not supply those keys. Each
    /// secondary gets its bundled distributions plus a position
    /// distribution: fiducial-constrained when the experiment resolves
    /// a fiducial volume, unconstrained otherwise. Cross sections are
    /// assigned separately by
    /// [`set_cross_sections`](Controller::set_cross_sections).
    pub fn set_processes(
        &mut self,
        primary_type: ParticleType,
        primary_injection_distributions: IndexMap<String, Box<dyn InjectionDistribution>>,
        primary_physical_distributions: IndexMap<String, Box<dyn PhysicalDistribution>>,
        secondaries: Vec<SecondaryProcessConfig>,
    ) {
        let mut primary_injection = InjectionProcess::new(primary_type);
        let mut primary_physical = PhysicalProcess::new(primary_type);

        let inject_target_default = !primary_injection_distributions.contains_key(TARGET_KEY);
        let inject_helicity_default =
            !primary_injection_distributions.contains_key(HELICITY_KEY);
        for (_, distribution) in primary_injection_distributions {
            primary_injection.add_distribution(distribution);
        }
        if inject_target_default {
            primary_injection.add_distribution(Box::new(TargetAtRest));
        }
        if inject_helicity_default {
            primary_injection.add_distribution(Box::new(PrimaryNeutrinoHelicity));
        }

        let physical_target_default = !primary_physical_distributions.contains_key(TARGET_KEY);
        let physical_helicity_default =
            !primary_physical_distributions.contains_key(HELICITY_KEY);
        for (_, distribution) in primary_physical_distributions {
            primary_physical.add_distribution(distribution);
        }
        if physical_target_default {
            primary_physical.add_distribution(Box::new(TargetAtRest));
        }
        if physical_helicity_default {
            primary_physical.add_distribution(Box::new(PrimaryNeutrinoHelicity));
        }

        let fiducial_volume = self.fiducial_volume();
        let mut secondary_injections = Vec::with_capacity(secondaries.len());
        let mut secondary_physicals = Vec::with_capacity(secondaries.len());
        for config in secondaries {
            let mut injection = InjectionProcess::new(config.particle_type);
            let mut physical = PhysicalProcess::new(config.particle_type);
            for distribution in config.injection_distributions {
                injection.add_distribution(distribution);
            }
            for distribution in config.physical_distributions {
                physical.add_distribution(distribution);
            }
            let position = match &fiducial_volume {
                Some(volume) => SecondaryPosition::within(volume.clone()),
                None => SecondaryPosition::new(),
            };
            injection.add_distribution(Box::new(position));
            secondary_injections.push(injection);
            secondary_physicals.push(physical);
        }

        self.primary_injection = Some(primary_injection);
        self.primary_physical = Some(primary_physical);
        self.secondary_injections = secondary_injections;
        self.secondary_physicals = secondary_physicals;
    }

    /// Assign cross-section collections to the configured processes.
    ///
    /// The primary collection is assigned unconditionally to both
    /// primary processes. Each secondary process is probed against
    /// every candidate; all accepting candidates are assigned in list
    /// order, so the last match wins. A secondary with zero matching
    /// candidates fails resolution; assignments already made are
    /// retained for diagnostics.
    pub fn set_cross_sections(
        &mut self,
        primary_collection: Arc<CrossSectionCollection>,
        secondary_collections: Vec<Arc<CrossSectionCollection>>,
    ) -> Result<(), ConfigError> {
        let primary_injection = self
            .primary_injection
            .as_mut()
            .ok_or(ConfigError::ProcessesNotConfigured)?;
        let primary_physical = self
            .primary_physical
            .as_mut()
            .ok_or(ConfigError::ProcessesNotConfigured)?;

        primary_injection.set_cross_sections(primary_collection.clone());
        primary_physical.set_cross_sections(primary_collection);

        for (injection, physical) in self
            .secondary_injections
            .iter_mut()
            .zip(self.secondary_physicals.iter_mut())
        {
            debug_assert_eq!(injection.primary_type(), physical.primary_type());
            let probe = InteractionSignature::probe(injection.primary_type());
            let mut found = false;
            for candidate in &secondary_collections {
                if candidate.matches_primary(&probe) {
                    injection.set_cross_sections(candidate.clone());
                    physical.set_cross_sections(candidate.clone());
                    found = true;
                }
            }
            if !found {
                return Err(ConfigError::UnresolvedSecondaryCrossSection {
                    particle_type: probe.primary_type,
                });
            }
        }
        Ok(())
    }

    /// Wire the configured processes into the injection and weighting
    /// engines.
    ///
    /// Installs the default always-accept stopping condition. Consumes
    /// the configured processes; the controller is ready for
    /// [`generate_events`](Controller::generate_events) afterwards.
    pub fn initialize(&mut self) -> Result<(), ConfigError> {
        let configured = self
            .primary_injection
            .as_ref()
            .ok_or(ConfigError::ProcessesNotConfigured)?;
        for process in std::iter::once(configured).chain(self.secondary_injections.iter()) {
            if process.cross_sections().is_none() {
                return Err(ConfigError::CrossSectionsNotResolved {
                    particle_type: process.primary_type(),
                });
            }
        }

        let (Some(primary_injection), Some(primary_physical)) =
            (self.primary_injection.take(), self.primary_physical.take())
        else {
            return Err(ConfigError::ProcessesNotConfigured);
        };
        let secondary_injections = std::mem::take(&mut self.secondary_injections);
        let secondary_physicals = std::mem::take(&mut self.secondary_physicals);

        let mut injector = StandardInjector::new(
            self.events_to_inject,
            self.model.clone(),
            primary_injection,
            secondary_injections,
            RandomStream::new(self.seed),
        )?;
        injector.set_stopping_condition(Box::new(|_| true));

        let weighter = TreeWeighter::new(
            self.model.clone(),
            primary_physical,
            secondary_physicals,
        );

        self.injector = Some(Box::new(injector));
        self.weighter = Some(Box::new(weighter));
        Ok(())
    }

    /// Generate events until the target is met or the batch cap is hit.
    ///
    /// `batch` caps this call's iterations; `None` means the full
    /// remaining target. The injector owns the authoritative cumulative
    /// count, so repeated calls accumulate until the global target is
    /// met and are no-ops afterwards. Returns the full accumulation
    /// list.
    pub fn generate_events(&mut self, batch: Option<usize>) -> Result<&[Event], ConfigError> {
        let injector = self.injector.as_mut().ok_or(ConfigError::NotInitialized)?;
        let cap = batch.unwrap_or(self.events_to_inject);

        let mut count = 0;
        while injector.injected_events() < self.events_to_inject && count < cap {
            self.progress
                .status(&format!("injecting event {count}/{cap}"));
            // Terminate the status line even when injection fails, so
            // the error message lands on a fresh line.
            let event = match injector.generate_event() {
                Ok(event) => event,
                Err(e) => {
                    self.progress.finish();
                    return Err(e.into());
                }
            };
            self.events.push(event);
            count += 1;
        }
        self.progress.finish();
        Ok(&self.events)
    }

    /// The accumulated events so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events produced so far.
    pub fn events_generated(&self) -> usize {
        self.events.len()
    }

    /// Number of events still to generate before the target is met.
    pub fn events_remaining(&self) -> usize {
        let injected = self
            .injector
            .as_ref()
            .map(|i| i.injected_events())
            .unwrap_or(0);
        self.events_to_inject.saturating_sub(injected)
    }

    /// Build the output container for the accumulated events.
    ///
    /// Weights are computed through the weighting engine; the events
    /// themselves are not modified.
    pub fn to_container(&mut self) -> Result<Group, ConfigError> {
        let weighter = self.weighter.as_ref().ok_or(ConfigError::NotInitialized)?;
        Ok(build_container(
            &self.events,
            weighter.as_ref(),
            self.progress.as_mut(),
        ))
    }

    /// Serialize the accumulated events to a container file at `path`.
    pub fn save_events(&mut self, path: &Path) -> Result<(), ConfigError> {
        let root = self.to_container()?;
        let file = File::create(path).map_err(wisp_output::ContainerError::Io)?;
        let mut writer = BufWriter::new(file);
        write_container(&mut writer, &root)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Silent;
    use wisp_process::{Monoenergetic, UniformVolumePosition};
    use wisp_test_utils::{
        charged_current_collection, miniboone_model, secondary_decay_collection,
        single_sector_model,
    };

    fn injection_map(
        entries: Vec<(&str, Box<dyn InjectionDistribution>)>,
    ) -> IndexMap<String, Box<dyn InjectionDistribution>> {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn physical_map(
        entries: Vec<(&str, Box<dyn PhysicalDistribution>)>,
    ) -> IndexMap<String, Box<dyn PhysicalDistribution>> {
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn beam_controller(events: usize, experiment: &str) -> Controller {
        let model = if experiment == "MiniBooNE" {
            miniboone_model()
        } else {
            single_sector_model()
        };
        let volume = model.sectors()[0].geometry.clone();
        let mut controller = Controller::with_model(events, experiment, 0, model);
        controller.set_progress_sink(Box::new(Silent));
        controller.set_processes(
            ParticleType::NuMu,
            injection_map(vec![
                ("energy", Box::new(Monoenergetic::along_z(5.0))),
                ("position", Box::new(UniformVolumePosition::new(volume.clone()))),
            ]),
            physical_map(vec![
                ("energy", Box::new(Monoenergetic::along_z(5.0))),
                ("position", Box::new(UniformVolumePosition::new(volume))),
            ]),
            vec![SecondaryProcessConfig::bare(ParticleType::MuMinus)],
        );
        controller
    }

    #[test]
    fn defaults_injected_only_when_keys_absent() {
        let mut controller = Controller::with_model(
            1,
            "lab",
            0,
            single_sector_model(),
        );
        controller.set_processes(
            ParticleType::NuMu,
            injection_map(vec![("target", Box::new(TargetAtRest))]),
            physical_map(vec![]),
            vec![],
        );
        let injection = controller.primary_injection.as_ref().unwrap();
        let names: Vec<&str> = injection.distributions().iter().map(|d| d.name()).collect();
        // Caller supplied "target", so only the helicity default lands.
        assert_eq!(names, vec!["target_at_rest", "primary_neutrino_helicity"]);

        let physical = controller.primary_physical.as_ref().unwrap();
        let names: Vec<&str> = physical.distributions().iter().map(|d| d.name()).collect();
        // No keys supplied: both defaults land.
        assert_eq!(names, vec!["target_at_rest", "primary_neutrino_helicity"]);
    }

    #[test]
    fn secondary_position_is_fiducial_constrained_when_volume_resolves() {
        let mut controller = beam_controller(1, "MiniBooNE");
        assert!(controller.fiducial_volume().is_some());
        let secondary = &controller.secondary_injections[0];
        let names: Vec<&str> = secondary.distributions().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["secondary_position"]);

        // No fiducial entry for an unknown experiment.
        controller = beam_controller(1, "lab");
        assert!(controller.fiducial_volume().is_none());
        let secondary = &controller.secondary_injections[0];
        assert_eq!(secondary.distributions().len(), 1);
    }

    #[test]
    fn detector_targets_reports_model_inventory() {
        let controller = Controller::with_model(1, "lab", 0, single_sector_model());
        let inventory = controller.detector_targets();
        assert!(inventory.targets.contains(&ParticleType::EMinus));
        assert!(inventory.nuclide_names.contains(&"Ar40".to_string()));
    }

    #[test]
    fn resolution_fails_naming_the_unmatched_secondary() {
        let mut controller = beam_controller(1, "lab");
        let err = controller
            .set_cross_sections(
                Arc::new(charged_current_collection(ParticleType::NuMu)),
                vec![Arc::new(secondary_decay_collection(ParticleType::EMinus))],
            )
            .unwrap_err();
        match err {
            ConfigError::UnresolvedSecondaryCrossSection { particle_type } => {
                assert_eq!(particle_type, ParticleType::MuMinus);
            }
            other => panic!("unexpected error: {other}"),
        }
        // The primary assignment made before the failure is retained.
        assert!(controller
            .primary_injection
            .as_ref()
            .unwrap()
            .cross_sections()
            .is_some());
    }

    #[test]
    fn last_matching_collection_wins() {
        let mut controller = beam_controller(1, "lab");
        let first = Arc::new(secondary_decay_collection(ParticleType::MuMinus));
        let second = Arc::new(secondary_decay_collection(ParticleType::MuMinus));
        controller
            .set_cross_sections(
                Arc::new(charged_current_collection(ParticleType::NuMu)),
                vec![first.clone(), second.clone()],
            )
            .unwrap();
        let assigned = controller.secondary_injections[0].cross_sections().unwrap();
        assert!(Arc::ptr_eq(assigned, &second));
        assert!(!Arc::ptr_eq(assigned, &first));
    }

    #[test]
    fn lifecycle_ordering_is_enforced() {
        let mut controller =
            Controller::with_model(1, "lab", 0, single_sector_model());
        controller.set_progress_sink(Box::new(Silent));
        assert!(matches!(
            controller.set_cross_sections(
                Arc::new(charged_current_collection(ParticleType::NuMu)),
                vec![]
            ),
            Err(ConfigError::ProcessesNotConfigured)
        ));
        assert!(matches!(
            controller.initialize(),
            Err(ConfigError::ProcessesNotConfigured)
        ));
        assert!(matches!(
            controller.generate_events(None),
            Err(ConfigError::NotInitialized)
        ));
    }

    #[test]
    fn initialize_requires_resolved_cross_sections() {
        let mut controller = beam_controller(1, "lab");
        match controller.initialize().unwrap_err() {
            ConfigError::CrossSectionsNotResolved { particle_type } => {
                assert_eq!(particle_type, ParticleType::NuMu);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn failed_generation_still_terminates_the_status_line() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        struct CountingSink {
            finishes: Arc<AtomicUsize>,
        }

        impl ProgressSink for CountingSink {
            fn status(&mut self, _line: &str) {}

            fn finish(&mut self) {
                self.finishes.fetch_add(1, Ordering::SeqCst);
            }
        }

        let mut controller = beam_controller(1, "lab");
        controller
            .set_cross_sections(
                Arc::new(charged_current_collection(ParticleType::NuMu)),
                vec![Arc::new(secondary_decay_collection(ParticleType::MuMinus))],
            )
            .unwrap();
        controller.initialize().unwrap();

        let finishes = Arc::new(AtomicUsize::new(0));
        controller.set_progress_sink(Box::new(CountingSink {
            finishes: finishes.clone(),
        }));
        // Reject every candidate so injection fails.
        controller
            .set_stopping_condition(Box::new(|_| false))
            .unwrap();

        assert!(controller.generate_events(None).is_err());
        assert_eq!(finishes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn batched_generation_never_exceeds_target() {
        let mut controller = beam_controller(5, "lab");
        controller
            .set_cross_sections(
                Arc::new(charged_current_collection(ParticleType::NuMu)),
                vec![Arc::new(secondary_decay_collection(ParticleType::MuMinus))],
            )
            .unwrap();
        controller.initialize().unwrap();

        assert_eq!(controller.generate_events(Some(2)).unwrap().len(), 2);
        assert_eq!(controller.events_remaining(), 3);
        assert_eq!(controller.generate_events(Some(2)).unwrap().len(), 4);
        // Cap exceeds the remainder: stops at the target.
        assert_eq!(controller.generate_events(Some(10)).unwrap().len(), 5);
        assert_eq!(controller.events_remaining(), 0);
        // Further calls are no-ops.
        assert_eq!(controller.generate_events(None).unwrap().len(), 5);
        assert_eq!(controller.events_generated(), 5);
    }
}

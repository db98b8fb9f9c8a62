//! End-to-end generation and serialization scenarios.

use std::sync::Arc;

use indexmap::IndexMap;
use proptest::prelude::*;
use wisp_controller::{ConfigError, Controller, Silent};
use wisp_core::ParticleType;
use wisp_output::{read_container, Attr};
use wisp_process::{
    InjectionDistribution, Monoenergetic, PhysicalDistribution, SecondaryProcessConfig,
    UniformVolumePosition,
};
use wisp_test_utils::{
    charged_current_collection, miniboone_model, secondary_decay_collection, InMemoryLoader,
};
use wisp_detector::{DetectorModelLoader, ResourcePaths};

/// A MiniBooNE-like controller: NuMu beam, one MuMinus secondary whose
/// collection matches, defaults everywhere else.
fn configured_controller(target: usize, seed: u64) -> Controller {
    let model = miniboone_model();
    let volume = model.sectors()[1].geometry.clone();
    let mut controller = Controller::with_model(target, "MiniBooNE", seed, model);
    controller.set_progress_sink(Box::new(Silent));

    let mut injection: IndexMap<String, Box<dyn InjectionDistribution>> = IndexMap::new();
    injection.insert("energy".into(), Box::new(Monoenergetic::along_z(1.0)));
    injection.insert(
        "position".into(),
        Box::new(UniformVolumePosition::new(volume.clone())),
    );
    let mut physical: IndexMap<String, Box<dyn PhysicalDistribution>> = IndexMap::new();
    physical.insert("energy".into(), Box::new(Monoenergetic::along_z(1.0)));
    physical.insert("position".into(), Box::new(UniformVolumePosition::new(volume)));

    controller.set_processes(
        ParticleType::NuMu,
        injection,
        physical,
        vec![SecondaryProcessConfig::bare(ParticleType::MuMinus)],
    );
    controller
        .set_cross_sections(
            Arc::new(charged_current_collection(ParticleType::NuMu)),
            vec![Arc::new(secondary_decay_collection(ParticleType::MuMinus))],
        )
        .expect("MuMinus collection matches");
    controller.initialize().expect("fully configured");
    controller
}

#[test]
fn three_event_scenario_produces_chained_trees() {
    let mut controller = configured_controller(3, 7);
    let events = controller.generate_events(None).unwrap();
    assert_eq!(events.len(), 3);
    for event in events {
        assert!(
            event.len() >= 2,
            "expected primary plus at least one chained secondary, got {}",
            event.len()
        );
        assert_eq!(
            event.primary().unwrap().signature.primary_type,
            ParticleType::NuMu
        );
    }

    let root = controller.to_container().unwrap();
    assert_eq!(root.attr("num_events"), Some(&Attr::U64(3)));
    for i in 0..3 {
        let event = root.group(&format!("event{i}")).unwrap();
        match event.attr("num_interactions") {
            Some(Attr::U64(n)) => assert!(*n >= 2),
            other => panic!("missing interaction count: {other:?}"),
        }
        assert!(matches!(event.attr("event_weight"), Some(Attr::F64(_))));
    }
}

#[test]
fn saved_container_round_trips_through_the_codec() {
    let mut controller = configured_controller(2, 3);
    controller.generate_events(None).unwrap();

    let path = std::env::temp_dir().join(format!(
        "wisp_e2e_{}_{}.wisp",
        std::process::id(),
        3u64
    ));
    controller.save_events(&path).unwrap();

    let mut file = std::fs::File::open(&path).unwrap();
    let root = read_container(&mut file).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(root.attr("num_events"), Some(&Attr::U64(2)));
    let interaction = root
        .group("event0")
        .and_then(|e| e.group("interaction0"))
        .expect("first interaction present");
    assert_eq!(
        interaction.attr("primary_type"),
        Some(&Attr::Str("NuMu".into()))
    );
    let primary = interaction.dataset("primary_momentum").unwrap();
    let target = interaction.dataset("target_momentum").unwrap();
    assert_eq!(primary, target);
    assert_eq!(interaction.dataset("vertex").unwrap().len(), 3);
}

#[test]
fn identical_seeds_reproduce_identical_containers() {
    let mut a = configured_controller(2, 11);
    let mut b = configured_controller(2, 11);
    a.generate_events(None).unwrap();
    b.generate_events(None).unwrap();
    assert_eq!(a.events(), b.events());
    assert_eq!(a.to_container().unwrap(), b.to_container().unwrap());
}

#[test]
fn controller_construction_through_a_loader() {
    let loader = InMemoryLoader::new(miniboone_model());
    let paths = ResourcePaths::discover(std::path::Path::new("/res"), "MiniBooNE");
    // The loader seam: the in-memory loader ignores the paths.
    assert!(loader.load(&paths).is_ok());
    let controller = Controller::new(1, "MiniBooNE", 0, &paths, &loader).unwrap();
    assert_eq!(controller.experiment(), "MiniBooNE");
    assert!(controller.fiducial_volume().is_some());
}

#[test]
fn unresolved_secondary_blocks_generation() {
    let model = miniboone_model();
    let mut controller = Controller::with_model(1, "MiniBooNE", 0, model);
    controller.set_progress_sink(Box::new(Silent));
    controller.set_processes(
        ParticleType::NuMu,
        IndexMap::new(),
        IndexMap::new(),
        vec![SecondaryProcessConfig::bare(ParticleType::MuMinus)],
    );
    let err = controller
        .set_cross_sections(
            Arc::new(charged_current_collection(ParticleType::NuMu)),
            vec![],
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnresolvedSecondaryCrossSection {
            particle_type: ParticleType::MuMinus
        }
    ));
    // Generation cannot proceed: the secondary never resolved.
    assert!(controller.initialize().is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Batch caps summing to at least the target always yield exactly
    /// the target number of events, never more.
    #[test]
    fn batched_caps_accumulate_to_exactly_the_target(
        target in 1usize..6,
        caps in prop::collection::vec(1usize..4, 1..8),
    ) {
        prop_assume!(caps.iter().sum::<usize>() >= target);
        let mut controller = configured_controller(target, 5);
        for cap in caps {
            controller.generate_events(Some(cap)).unwrap();
        }
        prop_assert_eq!(controller.events_generated(), target);
        prop_assert_eq!(controller.events_remaining(), 0);
    }
}

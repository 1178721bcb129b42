//! Loads the sample data directory shipped with the workspace.

use std::io::Write;
use std::path::{Path, PathBuf};

use castsim_content::{ContentFactory, ScenarioLoader};
use castsim_core::{ItemId, RotationMode, SpellCatalog, SpellId, StatKind};

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data")
}

#[test]
fn sample_spells_match_the_built_in_table() {
    let factory = ContentFactory::new(data_dir());
    let spells = factory.load_spells().unwrap();

    assert_eq!(spells, SpellCatalog::elemental());
    assert!(spells.get(SpellId::LIGHTNING_CAPACITOR).unwrap().is_proc());
}

#[test]
fn sample_scenario_resolves_its_equipment() {
    let factory = ContentFactory::new(data_dir());
    let scenario = factory.load_default_scenario().unwrap();
    let items = factory.load_items().unwrap();

    let equipment = items.equipment_set(&scenario.equipment).unwrap();
    let ids: Vec<_> = equipment.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![ItemId(28785), ItemId(29370), ItemId(28248)]);

    let stats = scenario.stats().unwrap();
    assert_eq!(stats[StatKind::Mana], 10_000.0);
    assert_eq!(stats[StatKind::Mp5], 150.0);
    assert_eq!(scenario.options.rotation_mode, RotationMode::FixedOrder);
}

#[test]
fn sample_scenario_reproduces_the_raid_baseline() {
    let factory = ContentFactory::new(data_dir());
    let scenario = factory.load_default_scenario().unwrap();
    let mut sim = factory.build_simulation(&scenario).unwrap();

    let metrics = sim.run_encounter().unwrap();

    assert_eq!(metrics.total_damage.round(), 45_842.0);
    assert_eq!(metrics.misses, 1);
    assert!(!metrics.ran_out_of_mana);
}

#[test]
fn scenario_with_unknown_spell_fails_to_build() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"(stats: {{ "mana": 5000.0 }}, options: (rotation: ["Frostbolt"]))"#
    )
    .unwrap();

    let scenario = ScenarioLoader::load(file.path()).unwrap();
    let factory = ContentFactory::new(data_dir());
    let err = factory.build_simulation(&scenario).unwrap_err();
    assert!(err.to_string().contains("Frostbolt"), "{err}");
}

#[test]
fn relative_scenario_paths_resolve_against_the_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("short.ron"),
        r#"(name: "short", stats: { "mana": 4000.0 }, options: (rotation: ["LB12"]))"#,
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    let scenario = factory.load_scenario(Path::new("short.ron")).unwrap();
    assert_eq!(scenario.name, "short");

    // The temp dir has no catalogs.
    let err = factory.build_simulation(&scenario).unwrap_err();
    assert!(err.to_string().starts_with("Failed to read file"), "{err}");
}

//! End-to-end runs through the public API.

use std::sync::{Arc, Mutex};

use castsim_core::{
    ActivationCooldown, Cast, ConfigError, Consumable, Equipment, ErrorSeverity, ItemDefinition,
    ItemEffect, ItemId, ItemSlot, RotationMode, SimError, SimObserver, SimOptions, Simulation,
    SpellId, StatKind, Stats, Tick, TracingObserver,
};

fn caster() -> Stats {
    Stats::new()
        .with(StatKind::Mana, 10_000.0)
        .with(StatKind::Mp5, 150.0)
        .with(StatKind::SpellDamage, 800.0)
        .with(StatKind::SpellHit, 100.0)
        .with(StatKind::SpellCrit, 300.0)
}

fn raid_gear() -> Equipment {
    Equipment::new(vec![
        ItemDefinition::passive(ItemId(28785), "The Lightning Capacitor", ItemSlot::Trinket)
            .with_activation(ItemEffect::LightningCapacitor, ActivationCooldown::Always),
        ItemDefinition::passive(ItemId(29370), "Icon of the Silver Crescent", ItemSlot::Trinket)
            .with_activation(
                ItemEffect::SpellDamage {
                    amount: 155.0,
                    duration_secs: 20,
                },
                ActivationCooldown::Seconds(120),
            ),
    ])
    .unwrap()
}

fn raid_options() -> SimOptions {
    let mut options = SimOptions::with_rotation(["CL6", "LB12", "LB12", "LB12"]);
    options.burst_cooldown_uses = 1;
    options.buffs.judgement_of_wisdom = true;
    options.talents.lightning_overload = 5;
    options.talents.elemental_precision = 3;
    options.talents.natures_guidance = 3;
    options.talents.tidal_mastery = 5;
    options.talents.call_of_thunder = 5;
    options.talents.concussion = 5;
    options.talents.convection = 5;
    options.talents.elemental_mastery = true;
    options
}

/// Records the spell of every cast the engine starts.
#[derive(Clone, Default)]
struct CastLog(Arc<Mutex<Vec<(Tick, SpellId)>>>);

impl CastLog {
    fn entries(&self) -> Vec<(Tick, SpellId)> {
        self.0.lock().unwrap().clone()
    }
}

impl SimObserver for CastLog {
    fn on_cast_started(&mut self, tick: Tick, cast: &Cast) {
        self.0.lock().unwrap().push((tick, cast.spell.id));
    }
}

#[test]
fn sixty_second_raid_run_matches_baseline() {
    let mut sim = Simulation::new(caster(), raid_gear(), raid_options()).unwrap();
    let metrics = sim.run(60).unwrap();

    assert_eq!(metrics.total_damage.round(), 45_842.0);
    assert!(!metrics.ran_out_of_mana);
    assert_eq!(metrics.oom_at_second, 0);
    assert_eq!(metrics.misses, 1);
    assert_eq!(metrics.casts.len(), 29);
    assert_eq!(metrics.procs(), 4);
}

#[test]
fn fixed_seed_runs_are_identical() {
    let first = Simulation::new(caster(), raid_gear(), raid_options())
        .unwrap()
        .run(60)
        .unwrap();
    let second = Simulation::new(caster(), raid_gear(), raid_options())
        .unwrap()
        .run(60)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn successive_runs_diverge() {
    let mut sim = Simulation::new(caster(), raid_gear(), raid_options()).unwrap();
    let first = sim.run(60).unwrap();
    let second = sim.run(60).unwrap();

    assert_ne!(first.total_damage, second.total_damage);
    assert_eq!(second.total_damage.round(), 56_353.0);
}

fn starved_caster() -> (Stats, SimOptions) {
    let stats = Stats::new()
        .with(StatKind::Mana, 3_000.0)
        .with(StatKind::Mp5, 30.0)
        .with(StatKind::SpellDamage, 500.0)
        .with(StatKind::SpellHit, 50.0)
        .with(StatKind::SpellCrit, 100.0);
    let mut options = SimOptions::with_rotation(["LB12"]);
    options.random_seed = 7;
    options.consumables.clear();
    (stats, options)
}

#[test]
fn out_of_mana_is_recorded_once() {
    let (stats, options) = starved_caster();
    let metrics = Simulation::new(stats, Equipment::empty(), options)
        .unwrap()
        .run(60)
        .unwrap();

    assert!(metrics.ran_out_of_mana);
    assert_eq!(metrics.oom_at_second, 25);
    assert_eq!(metrics.damage_at_oom, 6_992.0);
    assert_eq!(metrics.total_damage, 7_967.0);
    assert!(metrics.total_damage > metrics.damage_at_oom);
}

#[test]
fn exit_on_oom_stops_the_run_and_reports_mana() {
    let (stats, mut options) = starved_caster();
    options.exit_on_oom = true;
    let metrics = Simulation::new(stats, Equipment::empty(), options)
        .unwrap()
        .run(60)
        .unwrap();

    assert!(metrics.ran_out_of_mana);
    assert_eq!(metrics.total_damage, metrics.damage_at_oom);
    assert_eq!(metrics.total_damage, 6_992.0);
    assert!((metrics.ending_mana - 135.0).abs() < 1e-6);
}

#[test]
fn fixed_rotation_cycles_in_order() {
    let log = CastLog::default();
    let mut options = SimOptions::with_rotation(["LB12", "LB10", "CL6"]);
    options.consumables.clear();
    let mut sim = Simulation::new(caster(), Equipment::empty(), options)
        .unwrap()
        .with_observer(log.clone());

    sim.run(60).unwrap();

    let spells: Vec<_> = log.entries().into_iter().map(|(_, id)| id).collect();
    assert!(spells.len() >= 6);
    for chunk in spells.chunks_exact(3) {
        assert_eq!(
            chunk,
            [
                SpellId::LIGHTNING_BOLT_12,
                SpellId::LIGHTNING_BOLT_10,
                SpellId::CHAIN_LIGHTNING_6
            ]
        );
    }
}

#[test]
fn priority_rotation_casts_chain_lightning_on_cooldown() {
    let log = CastLog::default();
    let mut options = SimOptions::with_rotation(["CL6", "LB12"]);
    options.rotation_mode = RotationMode::Priority;
    let mut sim = Simulation::new(caster(), Equipment::empty(), options)
        .unwrap()
        .with_observer(log.clone());

    let metrics = sim.run(60).unwrap();
    assert!(metrics.total_damage > 0.0);

    let entries = log.entries();
    assert_eq!(entries[0].1, SpellId::CHAIN_LIGHTNING_6);
    let chains: Vec<Tick> = entries
        .iter()
        .filter(|(_, id)| *id == SpellId::CHAIN_LIGHTNING_6)
        .map(|(tick, _)| *tick)
        .collect();
    assert!(chains.len() >= 5);
    for pair in chains.windows(2) {
        // 2 s cast plus 6 s cooldown.
        assert!(pair[1].0 - pair[0].0 >= 240);
    }
    assert!(entries
        .iter()
        .any(|(_, id)| *id == SpellId::LIGHTNING_BOLT_12));
}

#[test]
fn partial_resist_rate_converges_to_the_flat_chance() {
    let stats = Stats::new()
        .with(StatKind::Mana, 1_000_000.0)
        .with(StatKind::SpellDamage, 500.0)
        .with(StatKind::SpellHit, 1_000.0);
    let mut options = SimOptions::with_rotation(["LB12"]);
    options.consumables.clear();
    let mut sim = Simulation::new(stats, Equipment::empty(), options).unwrap();

    let (mut hits, mut resisted) = (0usize, 0usize);
    for _ in 0..10 {
        let metrics = sim.run(3_600).unwrap();
        assert_eq!(metrics.crits(), 0);
        hits += metrics.casts.len();
        resisted += metrics.casts.iter().filter(|c| c.partial_resist).count();
    }

    let rate = resisted as f64 / hits as f64;
    assert!(hits > 10_000);
    assert!((rate - 0.025).abs() < 0.01, "partial resist rate {rate}");
}

#[test]
fn trials_summarize_consecutive_runs() {
    let mut sim = Simulation::new(caster(), raid_gear(), raid_options()).unwrap();
    let summary = sim.run_trials(5, 60).unwrap();

    assert_eq!(summary.trials, 5);
    assert_eq!(summary.duration_secs, 60);
    assert!(summary.min_damage <= summary.mean_damage);
    assert!(summary.mean_damage <= summary.max_damage);
    assert!((summary.mean_dps - summary.mean_damage / 60.0).abs() < 1e-9);
    assert_eq!(sim.seed(), 5);
}

#[test]
fn consumables_keep_a_starved_caster_casting_longer() {
    let (stats, options) = starved_caster();
    let dry = Simulation::new(stats, Equipment::empty(), options.clone())
        .unwrap()
        .run(60)
        .unwrap();

    let mut with_potions = options;
    with_potions.consumables = vec![Consumable::DarkRune, Consumable::SuperManaPotion];
    let wet = Simulation::new(stats, Equipment::empty(), with_potions)
        .unwrap()
        .run(60)
        .unwrap();

    assert!(wet.casts.len() > dry.casts.len());
}

#[test]
fn empty_rotation_is_rejected() {
    let err = Simulation::new(caster(), Equipment::empty(), SimOptions::default()).unwrap_err();
    assert_eq!(err, ConfigError::EmptyRotation);
    assert_eq!(err.severity(), ErrorSeverity::Validation);
}

#[test]
fn unknown_and_proc_spells_are_rejected() {
    let err = Simulation::new(
        caster(),
        Equipment::empty(),
        SimOptions::with_rotation(["LB12", "Frostbolt"]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownSpell { ref name } if name == "Frostbolt"));

    let err = Simulation::new(caster(), Equipment::empty(), SimOptions::with_rotation(["TLC"]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::ProcInRotation { .. }));
}

#[test]
fn tracing_observer_does_not_change_results() {
    let quiet = Simulation::new(caster(), raid_gear(), raid_options())
        .unwrap()
        .run(30)
        .unwrap();
    let traced = Simulation::new(caster(), raid_gear(), raid_options())
        .unwrap()
        .with_observer(TracingObserver)
        .run(30)
        .unwrap();

    assert_eq!(quiet, traced);
}

//! Tick-stepped simulation engine.
//!
//! The [`Simulation`] owns every piece of mutable run state (mana, in-flight
//! cast, cooldowns, auras, metrics, RNG). A run is a loop of
//! decide → advance:
//!
//! 1. [`decision`]: resolve a due cast, fire group/talent/item/consumable
//!    activations and choose the next spell. Returns how many ticks to wait.
//! 2. [`advance`]: move time forward by exactly that many ticks.
//!
//! Cast resolution lives in [`resolve`] and aura hook dispatch in [`effects`].
//! Everything is single threaded and deterministic given the seed.

mod advance;
mod decision;
mod effects;
mod resolve;

use std::sync::Arc;

use crate::config::SimConfig;
use crate::equipment::Equipment;
use crate::error::{ConfigError, RunError};
use crate::metrics::{SimMetrics, TrialSummary};
use crate::observer::{ManaSource, NoopObserver, SimObserver};
use crate::options::{RotationMode, SimOptions};
use crate::rng::SimRng;
use crate::spell::{SpellCatalog, SpellDefinition};
use crate::state::{
    Aura, AuraApplied, AuraEffect, AuraHooks, AuraId, AuraRegistry, Cast, Cooldowns,
};
use crate::stats::{StatKind, Stats};
use crate::tick::Tick;

/// Single-caster combat rotation simulator.
pub struct Simulation {
    stats: Stats,
    /// Temporary overlay written by auras; never pre-merged into `stats`.
    buffs: Stats,
    equipment: Arc<Equipment>,
    spells: Arc<SpellCatalog>,
    options: SimOptions,
    rotation: Vec<Arc<SpellDefinition>>,
    rotation_index: usize,

    current_mana: f64,
    casting: Option<Cast>,
    cooldowns: Cooldowns,
    auras: AuraRegistry,
    current_tick: Tick,
    tick_budget: u64,
    burst_uses_left: u32,

    rng: SimRng,
    seed: u64,
    metrics: SimMetrics,
    observer: Box<dyn SimObserver>,
}

impl Simulation {
    /// Creates an engine over the built-in elemental spell catalog.
    pub fn new(
        stats: Stats,
        equipment: Equipment,
        options: SimOptions,
    ) -> Result<Self, ConfigError> {
        Self::with_catalog(
            stats,
            Arc::new(equipment),
            options,
            Arc::new(SpellCatalog::elemental()),
        )
    }

    /// Creates an engine over a caller-provided spell catalog.
    ///
    /// Fails when the rotation is empty or names a spell the catalog lacks.
    pub fn with_catalog(
        stats: Stats,
        equipment: Arc<Equipment>,
        options: SimOptions,
        spells: Arc<SpellCatalog>,
    ) -> Result<Self, ConfigError> {
        let rotation = spells.resolve_rotation(&options.rotation)?;
        let seed = options.random_seed;

        Ok(Self {
            stats,
            buffs: Stats::new(),
            equipment,
            spells,
            rotation,
            rotation_index: 0,
            current_mana: stats[StatKind::Mana],
            casting: None,
            cooldowns: Cooldowns::new(),
            auras: AuraRegistry::new(),
            current_tick: Tick::ZERO,
            tick_budget: 0,
            burst_uses_left: options.burst_cooldown_uses,
            rng: SimRng::seeded(seed),
            seed,
            metrics: SimMetrics::default(),
            observer: Box::new(NoopObserver),
            options,
        })
    }

    /// Attaches an observer that receives every engine event.
    #[must_use]
    pub fn with_observer(mut self, observer: impl SimObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Runs the configured encounter duration.
    pub fn run_encounter(&mut self) -> Result<SimMetrics, RunError> {
        self.run(self.options.encounter.duration_secs)
    }

    /// Simulates `seconds` of combat and returns the run's metrics.
    ///
    /// Each call starts from a fresh state with the next seed, so repeated
    /// calls diverge while each one remains reproducible.
    pub fn run(&mut self, seconds: u64) -> Result<SimMetrics, RunError> {
        self.reset();
        self.tick_budget = SimConfig::seconds_to_ticks(seconds);

        let mut tick = 0;
        while tick < self.tick_budget {
            self.check_mana()?;

            self.current_tick = Tick(tick);
            let wait = self.spellcasting();

            if self.options.exit_on_oom && self.metrics.ran_out_of_mana {
                break;
            }

            self.advance(wait);
            tick = tick.saturating_add(wait);
        }
        self.check_mana()?;

        self.metrics.ending_mana = self.current_mana;
        Ok(std::mem::take(&mut self.metrics))
    }

    /// Runs `trials` consecutive `seconds`-long encounters and summarizes them.
    pub fn run_trials(&mut self, trials: u32, seconds: u64) -> Result<TrialSummary, RunError> {
        let runs = (0..trials)
            .map(|_| self.run(seconds))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TrialSummary::from_runs(&runs, seconds))
    }

    /// Reports an external hit on the caster, firing struck hooks.
    pub fn strike(&mut self) {
        for id in self.auras.armed(AuraHooks::STRUCK) {
            if let Some(effect) = self.auras.get(id).map(|aura| aura.effect) {
                effect.on_struck(self, id);
            }
        }
    }

    fn reset(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        self.rng.reseed(self.seed);

        self.current_tick = Tick::ZERO;
        self.current_mana = self.stats[StatKind::Mana];
        self.casting = None;
        self.buffs = Stats::new();
        self.cooldowns.clear();
        self.auras.clear();
        self.metrics = SimMetrics::default();
        self.rotation_index = 0;
        self.burst_uses_left = self.options.burst_cooldown_uses;
        self.observer.on_reset(self.seed);

        let rank = self.options.talents.lightning_overload;
        if rank > 0 {
            self.apply_aura(Aura::permanent(
                AuraId::LightningOverload,
                AuraEffect::LightningOverload { rank },
            ));
        }
        if self.options.buffs.judgement_of_wisdom {
            self.apply_aura(Aura::permanent(
                AuraId::JudgementOfWisdom,
                AuraEffect::JudgementOfWisdom,
            ));
        }
        if self.options.buffs.water_shield {
            self.apply_aura(Aura::permanent(AuraId::WaterShield, AuraEffect::WaterShield));
        }

        let equipment = Arc::clone(&self.equipment);
        for item in equipment.iter() {
            if let Some(effect) = item.always_active_effect() {
                self.activate_item_effect(item.id, effect);
            }
        }
    }

    fn check_mana(&self) -> Result<(), RunError> {
        if self.current_mana < 0.0 {
            return Err(RunError::NegativeMana {
                tick: self.current_tick,
                mana: self.current_mana,
            });
        }
        Ok(())
    }

    // ===== shared helpers =====

    /// Effective value of a stat: base plus buff overlay.
    pub(crate) fn stat(&self, kind: StatKind) -> f64 {
        self.stats[kind] + self.buffs[kind]
    }

    pub(crate) fn max_mana(&self) -> f64 {
        self.stats[StatKind::Mana]
    }

    /// Mana regenerated per tick from effective MP5.
    pub(crate) fn mana_regen_per_tick(&self) -> f64 {
        self.stat(StatKind::Mp5) / 5.0 / SimConfig::TICKS_PER_SECOND as f64
    }

    pub(crate) fn apply_aura(&mut self, aura: Aura) -> AuraApplied {
        let (id, effect) = (aura.id, aura.effect);
        let applied = self.auras.apply(aura);
        if applied == AuraApplied::Added {
            effect.on_apply(self);
        }
        self.observer
            .on_aura_applied(self.current_tick, id, applied);
        applied
    }

    /// Removes an aura by id, firing its expire hook first.
    pub(crate) fn remove_aura(&mut self, id: AuraId) {
        if let Some(index) = self.auras.position(id) {
            self.remove_aura_at(index);
        }
    }

    pub(crate) fn remove_aura_at(&mut self, index: usize) {
        let Some((id, effect, armed)) = self
            .auras
            .iter()
            .nth(index)
            .map(|aura| (aura.id, aura.effect, aura.is_armed(AuraHooks::EXPIRE)))
        else {
            return;
        };

        if armed {
            effect.on_expire(self, id);
        }
        // The expire hook may have reordered the registry.
        if let Some(index) = self.auras.position(id) {
            let mut aura = self.auras.take(index);
            aura.disarm();
        }
        self.observer.on_aura_removed(self.current_tick, id);
    }

    pub(crate) fn restore_mana(&mut self, source: ManaSource, amount: f64) {
        self.current_mana = (self.current_mana + amount).min(self.max_mana());
        self.observer
            .on_mana_restored(self.current_tick, source, amount);
    }

    // ===== read-only views =====

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn buffs(&self) -> &Stats {
        &self.buffs
    }

    pub fn options(&self) -> &SimOptions {
        &self.options
    }

    pub fn rotation_mode(&self) -> RotationMode {
        self.options.rotation_mode
    }

    pub fn rotation(&self) -> &[Arc<SpellDefinition>] {
        &self.rotation
    }

    pub fn rotation_index(&self) -> usize {
        self.rotation_index
    }

    pub fn current_mana(&self) -> f64 {
        self.current_mana
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn casting(&self) -> Option<&Cast> {
        self.casting.as_ref()
    }

    pub fn cooldowns(&self) -> &Cooldowns {
        &self.cooldowns
    }

    pub fn auras(&self) -> &AuraRegistry {
        &self.auras
    }

    pub fn metrics(&self) -> &SimMetrics {
        &self.metrics
    }

    /// Seed used by the most recent run.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("current_tick", &self.current_tick)
            .field("current_mana", &self.current_mana)
            .field("rotation_index", &self.rotation_index)
            .field("casting", &self.casting.as_ref().map(|c| &c.spell.name))
            .field("auras", &self.auras.len())
            .field("cooldowns", &self.cooldowns.len())
            .field("seed", &self.seed)
            .finish()
    }
}

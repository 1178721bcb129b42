//! Observability capability attached to the engine.
//!
//! The engine never prints. Every notable event is reported to the attached
//! [`SimObserver`]; the default [`NoopObserver`] discards them, and
//! [`TracingObserver`] forwards them to `tracing`.

use tracing::{debug, trace};

use crate::equipment::ItemDefinition;
use crate::options::Consumable;
use crate::state::{AuraApplied, AuraId, Cast};
use crate::tick::Tick;

/// Where restored mana came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManaSource {
    Consumable(Consumable),
    JudgementOfWisdom,
    WaterShield,
}

/// Receives engine events. All methods default to doing nothing.
pub trait SimObserver: Send {
    fn on_reset(&mut self, _seed: u64) {}

    fn on_cast_started(&mut self, _tick: Tick, _cast: &Cast) {}

    fn on_cast_resolved(&mut self, _tick: Tick, _cast: &Cast) {}

    fn on_aura_applied(&mut self, _tick: Tick, _aura: AuraId, _applied: AuraApplied) {}

    fn on_aura_removed(&mut self, _tick: Tick, _aura: AuraId) {}

    fn on_mana_restored(&mut self, _tick: Tick, _source: ManaSource, _amount: f64) {}

    fn on_item_activated(&mut self, _tick: Tick, _item: &ItemDefinition) {}

    fn on_out_of_mana(&mut self, _tick: Tick, _mana: f64, _needed: f64) {}
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Forwards engine events to `tracing` under the `castsim` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl SimObserver for TracingObserver {
    fn on_reset(&mut self, seed: u64) {
        debug!(target: "castsim", seed, "simulation reset");
    }

    fn on_cast_started(&mut self, tick: Tick, cast: &Cast) {
        trace!(
            target: "castsim",
            at = tick.as_secs_f64(),
            spell = %cast.spell.name,
            cast_secs = cast.ticks_remaining() as f64 / crate::SimConfig::TICKS_PER_SECOND as f64,
            mana_cost = cast.mana_cost,
            "casting"
        );
    }

    fn on_cast_resolved(&mut self, tick: Tick, cast: &Cast) {
        let outcome = match (cast.did_hit, cast.did_crit) {
            (false, _) => "miss",
            (true, true) => "crit",
            (true, false) => "hit",
        };
        debug!(
            target: "castsim",
            at = tick.as_secs_f64(),
            spell = %cast.spell.name,
            outcome,
            damage = cast.damage,
            partial_resist = cast.partial_resist,
            proc = cast.is_proc,
            "cast resolved"
        );
    }

    fn on_aura_applied(&mut self, tick: Tick, aura: AuraId, applied: AuraApplied) {
        trace!(target: "castsim", at = tick.as_secs_f64(), ?aura, ?applied, "aura applied");
    }

    fn on_aura_removed(&mut self, tick: Tick, aura: AuraId) {
        trace!(target: "castsim", at = tick.as_secs_f64(), ?aura, "aura removed");
    }

    fn on_mana_restored(&mut self, tick: Tick, source: ManaSource, amount: f64) {
        debug!(target: "castsim", at = tick.as_secs_f64(), ?source, amount, "mana restored");
    }

    fn on_item_activated(&mut self, tick: Tick, item: &ItemDefinition) {
        debug!(target: "castsim", at = tick.as_secs_f64(), item = %item.name, "item activated");
    }

    fn on_out_of_mana(&mut self, tick: Tick, mana: f64, needed: f64) {
        debug!(target: "castsim", at = tick.as_secs_f64(), mana, needed, "out of mana");
    }
}

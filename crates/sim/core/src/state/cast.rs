//! A single spell invocation, from selection through resolution.

use std::sync::Arc;

use crate::spell::SpellDefinition;
use crate::tick::Tick;

/// Effect attached to one specific cast, applied after its damage is final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastEffect {
    /// Fire a free half-damage copy of the spell.
    Overload,
}

/// A cast. Cost and chances are fixed when the cast is selected; damage is
/// filled in on resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cast {
    pub spell: Arc<SpellDefinition>,
    pub started_at: Tick,
    pub mana_cost: f64,
    pub hit_chance: f64,
    pub crit_chance: f64,
    /// Crit regardless of the roll. Not inherited by procs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub forced_crit: bool,
    /// Counts down while in flight; the cast resolves once this reaches 0.
    pub ticks_until_cast: i64,
    pub did_hit: bool,
    pub did_crit: bool,
    pub partial_resist: bool,
    /// Damage dealt, 0 until resolved.
    pub damage: f64,
    /// Damage forced by an effect, overriding the roll.
    pub preset_damage: Option<f64>,
    /// Fired by an effect rather than the rotation.
    pub is_proc: bool,
    pub effects: Vec<CastEffect>,
}

impl Cast {
    pub fn new(
        spell: Arc<SpellDefinition>,
        started_at: Tick,
        mana_cost: f64,
        hit_chance: f64,
        crit_chance: f64,
        cast_ticks: u64,
    ) -> Self {
        Self {
            spell,
            started_at,
            mana_cost,
            hit_chance,
            crit_chance,
            forced_crit: false,
            ticks_until_cast: i64::try_from(cast_ticks).unwrap_or(i64::MAX),
            did_hit: false,
            did_crit: false,
            partial_resist: false,
            damage: 0.0,
            preset_damage: None,
            is_proc: false,
            effects: Vec::new(),
        }
    }

    /// Turns this cast into a free, instant proc.
    #[must_use]
    pub fn into_proc(mut self) -> Self {
        self.mana_cost = 0.0;
        self.ticks_until_cast = 0;
        self.is_proc = true;
        self
    }

    pub fn is_due(&self) -> bool {
        self.ticks_until_cast <= 0
    }

    /// Ticks the caller should wait before this cast is due.
    pub fn ticks_remaining(&self) -> u64 {
        u64::try_from(self.ticks_until_cast).unwrap_or(0)
    }
}

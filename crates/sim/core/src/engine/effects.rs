//! Aura and cast effect dispatch.
//!
//! Handlers receive the engine and the id of the aura they belong to. They
//! re-look-up their aura by id because an earlier handler in the same pass
//! may have removed or replaced it.

use std::sync::Arc;

use crate::config::SimConfig;
use crate::observer::ManaSource;
use crate::spell::{SpellId, SpellTags};
use crate::state::{AbilityKey, AuraEffect, AuraId, Cast, CastEffect};

use super::Simulation;

impl AuraEffect {
    /// Runs when the aura is newly added. Replacements do not re-apply.
    pub(super) fn on_apply(self, sim: &mut Simulation) {
        if let Self::StatBuff { stat, amount } = self {
            sim.buffs.adjust(stat, amount);
        }
    }

    pub(super) fn on_expire(self, sim: &mut Simulation, _id: AuraId) {
        if let Self::StatBuff { stat, amount } = self {
            sim.buffs.adjust(stat, -amount);
        }
    }

    pub(super) fn on_cast_complete(self, sim: &mut Simulation, id: AuraId, cast: &mut Cast) {
        match self {
            Self::LightningOverload { rank } => {
                if cast.spell.tags.contains(SpellTags::OVERLOAD)
                    && sim
                        .rng
                        .roll(f64::from(rank) * SimConfig::OVERLOAD_CHANCE_PER_RANK)
                {
                    cast.effects.push(CastEffect::Overload);
                }
            }
            Self::ElementalFocus => {
                cast.mana_cost *= SimConfig::ELEMENTAL_FOCUS_COST_MULTIPLIER;
                if consume_charge(sim, id) {
                    sim.remove_aura(id);
                }
            }
            Self::ElementalMastery => {
                cast.forced_crit = true;
                sim.cooldowns.arm(
                    AbilityKey::ElementalMastery,
                    SimConfig::seconds_to_ticks(SimConfig::ELEMENTAL_MASTERY_COOLDOWN_SECS),
                );
                sim.remove_aura(id);
            }
            _ => {}
        }
    }

    pub(super) fn on_spell_hit(self, sim: &mut Simulation, id: AuraId, cast: &Cast) {
        match self {
            Self::JudgementOfWisdom => {
                if sim.rng.roll(SimConfig::JUDGEMENT_OF_WISDOM_CHANCE) {
                    sim.restore_mana(
                        ManaSource::JudgementOfWisdom,
                        SimConfig::JUDGEMENT_OF_WISDOM_MANA,
                    );
                }
            }
            Self::LightningCapacitor => {
                if !cast.did_crit || !sim.cooldowns.is_ready(AbilityKey::LightningCapacitor) {
                    return;
                }
                sim.cooldowns.arm(
                    AbilityKey::LightningCapacitor,
                    SimConfig::millis_to_ticks(SimConfig::CAPACITOR_INTERNAL_COOLDOWN_MS),
                );

                let Some(aura) = sim.auras.get_mut(id) else {
                    return;
                };
                aura.stacks += 1;
                if aura.stacks < SimConfig::CAPACITOR_CHARGES {
                    return;
                }
                aura.stacks = 0;

                if let Some(bolt) = sim.spells.get(SpellId::LIGHTNING_CAPACITOR).cloned() {
                    let proc = sim.prepare_cast(bolt).into_proc();
                    sim.resolve_proc(proc, 1.0);
                }
            }
            _ => {}
        }
    }

    pub(super) fn on_struck(self, sim: &mut Simulation, id: AuraId) {
        if let Self::WaterShield = self {
            sim.restore_mana(ManaSource::WaterShield, SimConfig::WATER_SHIELD_ORB_MANA);
            if consume_charge(sim, id) {
                sim.remove_aura(id);
            }
        }
    }
}

impl CastEffect {
    /// Applies a cast-local effect once its parent cast has hit.
    pub(super) fn apply(self, sim: &mut Simulation, parent: &Cast) {
        match self {
            Self::Overload => {
                let proc = Cast::new(
                    Arc::clone(&parent.spell),
                    sim.current_tick,
                    0.0,
                    parent.hit_chance,
                    parent.crit_chance,
                    0,
                )
                .into_proc();
                sim.resolve_proc(proc, SimConfig::OVERLOAD_DAMAGE_MULTIPLIER);
            }
        }
    }
}

/// Spends one charge. Returns true when the aura has none left.
fn consume_charge(sim: &mut Simulation, id: AuraId) -> bool {
    match sim.auras.get_mut(id) {
        Some(aura) => {
            aura.stacks = aura.stacks.saturating_sub(1);
            aura.stacks == 0
        }
        None => false,
    }
}

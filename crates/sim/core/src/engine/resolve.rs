//! Cast resolution.
//!
//! RNG draw order is part of the engine's observable behavior: cast-complete
//! hooks, hit, damage spread, crit, partial resist, cast effects, spell-hit
//! hooks. Changing it changes every seeded result.

use std::sync::Arc;

use crate::config::SimConfig;
use crate::spell::SpellTags;
use crate::state::{AbilityKey, Aura, AuraEffect, AuraHooks, AuraId, Cast};
use crate::stats::StatKind;

use super::Simulation;

impl Simulation {
    /// Resolves a due rotation cast and commits all of its side effects.
    pub(super) fn resolve_cast(&mut self, mut cast: Cast) {
        for id in self.auras.armed(AuraHooks::CAST_COMPLETE) {
            if let Some(effect) = self.auras.get(id).map(|aura| aura.effect) {
                effect.on_cast_complete(self, id, &mut cast);
            }
        }

        self.roll_outcome(&mut cast, 1.0);

        let mana_cost = cast.mana_cost;
        let spell_cooldown = (cast.spell.id, cast.spell.cooldown_ticks());

        if cast.did_hit {
            if cast.did_crit {
                self.apply_aura(Aura::new(
                    AuraId::ElementalFocus,
                    self.current_tick
                        .after_seconds(SimConfig::ELEMENTAL_FOCUS_DURATION_SECS),
                    AuraEffect::ElementalFocus,
                ));
            }

            for effect in cast.effects.clone() {
                effect.apply(self, &cast);
            }
            for id in self.auras.armed(AuraHooks::SPELL_HIT) {
                if let Some(effect) = self.auras.get(id).map(|aura| aura.effect) {
                    effect.on_spell_hit(self, id, &cast);
                }
            }

            self.observer.on_cast_resolved(self.current_tick, &cast);
            self.metrics.record_hit(cast);
        } else {
            self.observer.on_cast_resolved(self.current_tick, &cast);
            self.metrics.record_miss();
        }

        self.current_mana -= mana_cost;
        let (spell, ticks) = spell_cooldown;
        self.cooldowns.arm(AbilityKey::Spell(spell), ticks);
    }

    /// Resolves a free cast fired by an effect.
    ///
    /// Procs roll like any other cast but cost nothing, never fire aura hooks
    /// and never chain further procs.
    pub(super) fn resolve_proc(&mut self, mut cast: Cast, damage_multiplier: f64) {
        self.roll_outcome(&mut cast, damage_multiplier);
        self.observer.on_cast_resolved(self.current_tick, &cast);
        if cast.did_hit {
            self.metrics.record_hit(cast);
        } else {
            self.metrics.record_miss();
        }
    }

    /// Rolls hit, damage, crit and partial resist, in that order.
    fn roll_outcome(&mut self, cast: &mut Cast, damage_multiplier: f64) {
        cast.did_hit = self.rng.roll(cast.hit_chance);
        if !cast.did_hit {
            return;
        }

        let spell = Arc::clone(&cast.spell);
        let spread = self.rng.below((spell.max_damage - spell.min_damage) as u32);
        let rolled = f64::from(spread)
            + spell.min_damage
            + self.stat(StatKind::SpellDamage) * spell.coefficient;
        let mut damage = cast.preset_damage.unwrap_or(rolled) * damage_multiplier;

        // The crit draw is consumed even when the crit is forced.
        let crit_roll = self.rng.roll(cast.crit_chance);
        if crit_roll || cast.forced_crit {
            cast.did_crit = true;
            damage *= SimConfig::CRIT_DAMAGE_MULTIPLIER;
        }

        let concussion = self.options.talents.concussion;
        if concussion > 0 && spell.tags.contains(SpellTags::LIGHTNING) {
            damage *= 1.0 + f64::from(concussion) * SimConfig::CONCUSSION_DAMAGE_PER_RANK;
        }

        if self.rng.roll(SimConfig::PARTIAL_RESIST_CHANCE) {
            cast.partial_resist = true;
            damage *= SimConfig::PARTIAL_RESIST_MULTIPLIER;
        }

        cast.damage = damage;
    }
}

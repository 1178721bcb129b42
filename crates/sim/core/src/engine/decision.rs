//! Decision step: resolve, activate, then pick the next spell.

use std::sync::Arc;

use crate::config::SimConfig;
use crate::equipment::{ItemEffect, ItemId};
use crate::observer::ManaSource;
use crate::options::RotationMode;
use crate::spell::{SpellDefinition, SpellTags};
use crate::state::{AbilityKey, Aura, AuraEffect, AuraId, Cast};
use crate::stats::StatKind;

use super::Simulation;

impl Simulation {
    /// Runs one decision point and returns how many ticks to advance.
    pub(super) fn spellcasting(&mut self) -> u64 {
        if self.casting.as_ref().is_some_and(Cast::is_due) {
            if let Some(cast) = self.casting.take() {
                self.resolve_cast(cast);
            }
        }

        if self.casting.is_some() {
            return 1;
        }

        self.activate_burst();
        self.activate_elemental_mastery();
        self.use_consumables();
        self.activate_items();

        match self.options.rotation_mode {
            RotationMode::FixedOrder => self.choose_fixed(),
            RotationMode::Priority => self.choose_priority(),
        }
    }

    fn activate_burst(&mut self) {
        if self.burst_uses_left == 0 || !self.cooldowns.is_ready(AbilityKey::Bloodlust) {
            return;
        }
        self.burst_uses_left -= 1;
        self.cooldowns.arm(
            AbilityKey::Bloodlust,
            SimConfig::seconds_to_ticks(SimConfig::BLOODLUST_COOLDOWN_SECS),
        );
        self.apply_aura(Aura::new(
            AuraId::Bloodlust,
            self.current_tick
                .after_seconds(SimConfig::BLOODLUST_DURATION_SECS),
            AuraEffect::StatBuff {
                stat: StatKind::SpellHaste,
                amount: SimConfig::BLOODLUST_HASTE_RATING,
            },
        ));
    }

    fn activate_elemental_mastery(&mut self) {
        if !self.options.talents.elemental_mastery
            || !self.cooldowns.is_ready(AbilityKey::ElementalMastery)
            || self.auras.contains(AuraId::ElementalMastery)
        {
            return;
        }
        self.apply_aura(Aura::permanent(
            AuraId::ElementalMastery,
            AuraEffect::ElementalMastery,
        ));
    }

    /// Drinks every available consumable whose full restore fits in the
    /// current deficit. Tiers are evaluated independently.
    fn use_consumables(&mut self) {
        for index in 0..self.options.consumables.len() {
            let consumable = self.options.consumables[index];
            let key = AbilityKey::Consumable(consumable);
            let (min, max) = consumable.restore_range();

            let deficit = self.max_mana() - self.current_mana + self.stat(StatKind::Mp5);
            if deficit < f64::from(max) || !self.cooldowns.is_ready(key) {
                continue;
            }

            let restored = min + self.rng.below(max - min);
            self.restore_mana(ManaSource::Consumable(consumable), f64::from(restored));
            self.cooldowns.arm(
                key,
                SimConfig::seconds_to_ticks(SimConfig::CONSUMABLE_COOLDOWN_SECS),
            );
        }
    }

    fn activate_items(&mut self) {
        let equipment = Arc::clone(&self.equipment);
        for item in equipment.iter() {
            let Some((effect, cooldown_secs)) = item.on_use() else {
                continue;
            };
            if !self.cooldowns.is_ready(AbilityKey::Item(item.id)) {
                continue;
            }
            if item.is_trinket() && !self.cooldowns.is_ready(AbilityKey::TrinketSlot) {
                continue;
            }

            self.observer.on_item_activated(self.current_tick, item);
            self.activate_item_effect(item.id, effect);
            self.cooldowns.arm(
                AbilityKey::Item(item.id),
                SimConfig::seconds_to_ticks(u64::from(cooldown_secs)),
            );
            if item.is_trinket() {
                self.cooldowns.arm(
                    AbilityKey::TrinketSlot,
                    SimConfig::seconds_to_ticks(SimConfig::TRINKET_SHARED_COOLDOWN_SECS),
                );
            }
        }
    }

    pub(super) fn activate_item_effect(&mut self, item: ItemId, effect: ItemEffect) {
        let aura = match effect {
            ItemEffect::SpellDamage {
                amount,
                duration_secs,
            } => Aura::new(
                AuraId::Item(item),
                self.current_tick.after_seconds(u64::from(duration_secs)),
                AuraEffect::StatBuff {
                    stat: StatKind::SpellDamage,
                    amount,
                },
            ),
            ItemEffect::LightningCapacitor => {
                Aura::permanent(AuraId::Item(item), AuraEffect::LightningCapacitor)
            }
        };
        self.apply_aura(aura);
    }

    // ===== spell selection =====

    fn choose_fixed(&mut self) -> u64 {
        let spell = Arc::clone(&self.rotation[self.rotation_index]);

        let cooldown = self.cooldowns.remaining(AbilityKey::Spell(spell.id));
        if cooldown > 0 {
            return cooldown;
        }

        let cast = self.prepare_cast(spell);
        if self.current_mana >= cast.mana_cost {
            self.rotation_index = (self.rotation_index + 1) % self.rotation.len();
            return self.begin_cast(cast);
        }

        self.record_oom(cast.mana_cost);
        self.ticks_until_affordable(cast.mana_cost)
    }

    /// Casts the first ready, affordable spell. Otherwise waits for the
    /// soonest cooldown or regen point, whichever comes first.
    ///
    /// Out-of-mana is only recorded when regen is the limiting factor, i.e.
    /// no spell on cooldown becomes castable before mana would.
    fn choose_priority(&mut self) -> u64 {
        let mut cooldown_wait = u64::MAX;
        let mut mana_wait = u64::MAX;
        let mut cheapest_unaffordable: Option<f64> = None;

        for index in 0..self.rotation.len() {
            let spell = Arc::clone(&self.rotation[index]);

            let cooldown = self.cooldowns.remaining(AbilityKey::Spell(spell.id));
            if cooldown > 0 {
                cooldown_wait = cooldown_wait.min(cooldown);
                continue;
            }

            let cast = self.prepare_cast(spell);
            if self.current_mana >= cast.mana_cost {
                return self.begin_cast(cast);
            }

            mana_wait = mana_wait.min(self.ticks_until_affordable(cast.mana_cost));
            cheapest_unaffordable = Some(
                cheapest_unaffordable.map_or(cast.mana_cost, |cost| cost.min(cast.mana_cost)),
            );
        }

        match cheapest_unaffordable {
            Some(needed) if mana_wait < cooldown_wait => {
                self.record_oom(needed);
                mana_wait.max(1)
            }
            _ => cooldown_wait.min(mana_wait).max(1),
        }
    }

    /// Builds a cast with cost and chances fixed from the current stats.
    pub(super) fn prepare_cast(&self, spell: Arc<SpellDefinition>) -> Cast {
        let talents = &self.options.talents;

        let hit_chance = (SimConfig::BASE_HIT_CHANCE
            + self.stat(StatKind::SpellHit) / SimConfig::HIT_RATING_PER_CHANCE
            + f64::from(talents.elemental_precision) * SimConfig::ELEMENTAL_PRECISION_HIT_PER_RANK
            + f64::from(talents.natures_guidance) * SimConfig::NATURES_GUIDANCE_HIT_PER_RANK)
            .min(SimConfig::MAX_HIT_CHANCE);

        let mut crit_chance = self.stat(StatKind::SpellCrit) / SimConfig::CRIT_RATING_PER_CHANCE;
        if spell.tags.contains(SpellTags::LIGHTNING) {
            crit_chance += (f64::from(talents.tidal_mastery) + f64::from(talents.call_of_thunder))
                * SimConfig::LIGHTNING_CRIT_PER_RANK;
        }

        let mana_cost = spell.mana_cost
            * (1.0 - f64::from(talents.convection) * SimConfig::CONVECTION_COST_PER_RANK);

        let haste = 1.0 + self.stat(StatKind::SpellHaste) / SimConfig::HASTE_RATING_PER_CHANCE;
        let cast_ticks = (spell.base_cast_ticks() as f64 / haste).ceil() as u64;

        Cast::new(
            spell,
            self.current_tick,
            mana_cost,
            hit_chance,
            crit_chance,
            cast_ticks,
        )
    }

    fn begin_cast(&mut self, cast: Cast) -> u64 {
        let ticks = cast.ticks_remaining();
        self.observer.on_cast_started(self.current_tick, &cast);
        self.casting = Some(cast);
        ticks
    }

    /// Ticks of regen needed before `cost` is affordable.
    ///
    /// Without regen the caster waits out the rest of the encounter.
    fn ticks_until_affordable(&self, cost: f64) -> u64 {
        let regen = self.mana_regen_per_tick();
        if regen <= 0.0 {
            return self
                .tick_budget
                .saturating_sub(self.current_tick.0)
                .max(1);
        }
        ((cost - self.current_mana) / regen).ceil().max(1.0) as u64
    }

    fn record_oom(&mut self, needed: f64) {
        if self.metrics.record_oom(self.current_tick.whole_seconds()) {
            self.observer
                .on_out_of_mana(self.current_tick, self.current_mana, needed);
        }
    }
}

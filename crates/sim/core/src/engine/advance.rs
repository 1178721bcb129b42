//! Time advancement: cast timer, regen, cooldowns and aura expiry.

use super::Simulation;

impl Simulation {
    /// Steps simulated time forward by exactly `ticks`.
    ///
    /// A cast that becomes due here is not resolved; resolution belongs to
    /// the next decision step.
    pub(super) fn advance(&mut self, ticks: u64) {
        if let Some(cast) = self.casting.as_mut() {
            cast.ticks_until_cast = cast
                .ticks_until_cast
                .saturating_sub(i64::try_from(ticks).unwrap_or(i64::MAX));
        }

        let regen = self.mana_regen_per_tick() * ticks as f64;
        self.current_mana = (self.current_mana + regen).min(self.max_mana());

        self.cooldowns.advance(ticks);

        // Highest index first so earlier indices stay valid.
        let horizon = self.current_tick.after(ticks);
        for index in self.auras.expiring_by(horizon).into_iter().rev() {
            self.remove_aura_at(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{prepared, sim};
    use crate::state::{AbilityKey, Aura, AuraEffect, AuraId};
    use crate::stats::StatKind;
    use crate::tick::Tick;

    fn haste_buff(id: AuraId, expires: u64, amount: f64) -> Aura {
        Aura::new(
            id,
            Tick(expires),
            AuraEffect::StatBuff {
                stat: StatKind::SpellHaste,
                amount,
            },
        )
    }

    #[test]
    fn regen_is_clamped_to_max_mana() {
        let mut sim = prepared(sim(&["LB12"]), 60);
        sim.current_mana = 9_990.0;

        sim.advance(5);
        assert_eq!(sim.current_mana(), 9_995.0);

        sim.advance(30);
        assert_eq!(sim.current_mana(), 10_000.0);
    }

    #[test]
    fn buffed_mp5_counts_toward_regen() {
        let mut sim = prepared(sim(&["LB12"]), 60);
        sim.current_mana = 5_000.0;
        sim.buffs.adjust(StatKind::Mp5, 150.0);

        sim.advance(10);
        assert_eq!(sim.current_mana(), 5_020.0);
    }

    #[test]
    fn cooldowns_count_down_and_drop() {
        let mut sim = prepared(sim(&["LB12"]), 60);
        sim.cooldowns.arm(AbilityKey::Bloodlust, 10);
        sim.cooldowns.arm(AbilityKey::TrinketSlot, 4);

        sim.advance(3);
        assert_eq!(sim.cooldowns().remaining(AbilityKey::Bloodlust), 7);
        assert_eq!(sim.cooldowns().remaining(AbilityKey::TrinketSlot), 1);

        sim.advance(1);
        assert!(sim.cooldowns().is_ready(AbilityKey::TrinketSlot));
        assert_eq!(sim.cooldowns().len(), 1);
    }

    #[test]
    fn in_flight_cast_counts_down_past_zero() {
        let mut sim = prepared(sim(&["LB12"]), 60);
        sim.spellcasting();

        sim.advance(70);
        assert_eq!(sim.casting().unwrap().ticks_until_cast, 5);
        sim.advance(10);
        assert_eq!(sim.casting().unwrap().ticks_until_cast, -5);
        assert!(sim.casting().unwrap().is_due());
    }

    #[test]
    fn simultaneous_expiries_are_all_removed() {
        let mut sim = prepared(sim(&["LB12"]), 60);
        sim.apply_aura(haste_buff(AuraId::Bloodlust, 10, 100.0));
        sim.apply_aura(Aura::permanent(
            AuraId::JudgementOfWisdom,
            AuraEffect::JudgementOfWisdom,
        ));
        sim.apply_aura(haste_buff(AuraId::ElementalMastery, 12, 10.0));
        sim.apply_aura(haste_buff(AuraId::ElementalFocus, 20, 1.0));
        assert_eq!(sim.buffs()[StatKind::SpellHaste], 111.0);

        sim.current_tick = Tick(5);
        sim.advance(7);

        let left: Vec<_> = sim.auras().iter().map(|aura| aura.id).collect();
        assert_eq!(left, vec![AuraId::JudgementOfWisdom, AuraId::ElementalFocus]);
        assert_eq!(sim.buffs()[StatKind::SpellHaste], 1.0);
    }

    #[test]
    fn aura_expires_at_its_tick_and_not_before() {
        let mut sim = prepared(sim(&["LB12"]), 60);
        sim.apply_aura(haste_buff(AuraId::Bloodlust, 30, 50.0));

        sim.advance(29);
        assert!(sim.auras().contains(AuraId::Bloodlust));

        sim.current_tick = Tick(29);
        sim.advance(1);
        assert!(!sim.auras().contains(AuraId::Bloodlust));
        assert_eq!(sim.buffs()[StatKind::SpellHaste], 0.0);
    }
}

//! Timed effects on the caster and the registry that holds them.
//!
//! # Tick-based Duration
//!
//! Auras store an absolute `expires_at` tick. Because the engine can advance
//! several ticks at once, an aura is removed when
//! `tick_before_advance + advanced >= expires_at`.
//!
//! # Hooks
//!
//! Behavior is a closed set of [`AuraEffect`] variants. Each aura carries the
//! set of hooks it has armed; the engine consults that set before dispatching
//! and clears it when the aura leaves the registry, so a removed aura can
//! never fire again.

use bitflags::bitflags;

use crate::equipment::ItemId;
use crate::stats::StatKind;
use crate::tick::Tick;

/// Identity used for replacement: applying an aura whose id is already
/// present replaces it in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AuraId {
    LightningOverload,
    ElementalFocus,
    ElementalMastery,
    Bloodlust,
    JudgementOfWisdom,
    WaterShield,
    /// Effect granted by an equipped item.
    Item(ItemId),
}

bitflags! {
    /// Hook points an aura can arm. At most one handler per kind.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct AuraHooks: u8 {
        /// Before a completed cast rolls hit.
        const CAST_COMPLETE = 1 << 0;
        /// After a cast hits and its damage is final.
        const SPELL_HIT     = 1 << 1;
        /// When the caster is struck.
        const STRUCK        = 1 << 2;
        /// When the aura expires or is removed.
        const EXPIRE        = 1 << 3;
    }
}

/// Tagged effect behavior. Dispatch lives in the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AuraEffect {
    LightningOverload { rank: u8 },
    ElementalFocus,
    ElementalMastery,
    /// Adds `amount` to the buff overlay while active.
    StatBuff { stat: StatKind, amount: f64 },
    JudgementOfWisdom,
    LightningCapacitor,
    WaterShield,
}

impl AuraEffect {
    /// Hooks this effect arms when applied.
    pub const fn hooks(&self) -> AuraHooks {
        match self {
            Self::LightningOverload { .. } | Self::ElementalFocus | Self::ElementalMastery => {
                AuraHooks::CAST_COMPLETE
            }
            Self::StatBuff { .. } => AuraHooks::EXPIRE,
            Self::JudgementOfWisdom | Self::LightningCapacitor => AuraHooks::SPELL_HIT,
            Self::WaterShield => AuraHooks::STRUCK,
        }
    }

    /// Starting charge count.
    pub const fn initial_stacks(&self) -> u32 {
        match self {
            Self::ElementalFocus => 2,
            Self::WaterShield => 3,
            _ => 0,
        }
    }
}

/// A timed effect on the caster.
#[derive(Clone, Debug, PartialEq)]
pub struct Aura {
    pub id: AuraId,
    pub expires_at: Tick,
    pub effect: AuraEffect,
    /// Charges or counters owned by the effect.
    pub stacks: u32,
    hooks: AuraHooks,
}

impl Aura {
    pub fn new(id: AuraId, expires_at: Tick, effect: AuraEffect) -> Self {
        Self {
            id,
            expires_at,
            effect,
            stacks: effect.initial_stacks(),
            hooks: effect.hooks(),
        }
    }

    /// An aura that stays until explicitly removed.
    pub fn permanent(id: AuraId, effect: AuraEffect) -> Self {
        Self::new(id, Tick::NEVER, effect)
    }

    pub fn hooks(&self) -> AuraHooks {
        self.hooks
    }

    pub fn is_armed(&self, hook: AuraHooks) -> bool {
        self.hooks.contains(hook)
    }

    /// Clears every hook; called when the aura leaves the registry.
    pub fn disarm(&mut self) {
        self.hooks = AuraHooks::empty();
    }
}

/// Outcome of [`AuraRegistry::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuraApplied {
    Added,
    Replaced,
}

/// Active auras in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuraRegistry {
    auras: Vec<Aura>,
}

impl AuraRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an aura, replacing in place any aura with the same id.
    ///
    /// Stacking instances are not merged; the newer one wins.
    pub fn apply(&mut self, aura: Aura) -> AuraApplied {
        if let Some(existing) = self.auras.iter_mut().find(|a| a.id == aura.id) {
            *existing = aura;
            return AuraApplied::Replaced;
        }
        self.auras.push(aura);
        AuraApplied::Added
    }

    pub fn get(&self, id: AuraId) -> Option<&Aura> {
        self.auras.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: AuraId) -> Option<&mut Aura> {
        self.auras.iter_mut().find(|a| a.id == id)
    }

    pub fn contains(&self, id: AuraId) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: AuraId) -> Option<usize> {
        self.auras.iter().position(|a| a.id == id)
    }

    /// Snapshot of the ids that currently arm `hook`, in insertion order.
    ///
    /// Dispatch iterates this snapshot so handlers may add or remove auras.
    pub fn armed(&self, hook: AuraHooks) -> Vec<AuraId> {
        self.auras
            .iter()
            .filter(|a| a.is_armed(hook))
            .map(|a| a.id)
            .collect()
    }

    /// Indices of auras expiring at or before `tick`, in ascending order.
    pub fn expiring_by(&self, tick: Tick) -> Vec<usize> {
        self.auras
            .iter()
            .enumerate()
            .filter(|(_, a)| a.expires_at <= tick)
            .map(|(i, _)| i)
            .collect()
    }

    /// Removes and returns the aura at `index`, preserving the order of the rest.
    pub fn take(&mut self, index: usize) -> Aura {
        self.auras.remove(index)
    }

    pub fn clear(&mut self) {
        self.auras.clear();
    }

    pub fn len(&self) -> usize {
        self.auras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.auras.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aura> {
        self.auras.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus(expires: u64) -> Aura {
        Aura::new(AuraId::ElementalFocus, Tick(expires), AuraEffect::ElementalFocus)
    }

    #[test]
    fn same_id_replaces_in_place() {
        let mut auras = AuraRegistry::new();
        auras.apply(Aura::permanent(
            AuraId::LightningOverload,
            AuraEffect::LightningOverload { rank: 5 },
        ));
        assert_eq!(auras.apply(focus(100)), AuraApplied::Added);
        auras.apply(Aura::permanent(
            AuraId::JudgementOfWisdom,
            AuraEffect::JudgementOfWisdom,
        ));
        assert_eq!(auras.len(), 3);

        let mut refreshed = focus(500);
        refreshed.stacks = 1;
        assert_eq!(auras.apply(refreshed), AuraApplied::Replaced);
        assert_eq!(auras.len(), 3);
        assert_eq!(auras.position(AuraId::ElementalFocus), Some(1));
        let aura = auras.get(AuraId::ElementalFocus).unwrap();
        assert_eq!((aura.expires_at, aura.stacks), (Tick(500), 1));
    }

    #[test]
    fn new_aura_arms_hooks_of_its_effect() {
        let buff = Aura::new(
            AuraId::Bloodlust,
            Tick(450),
            AuraEffect::StatBuff {
                stat: StatKind::SpellHaste,
                amount: 473.1,
            },
        );
        assert!(buff.is_armed(AuraHooks::EXPIRE));
        assert!(!buff.is_armed(AuraHooks::SPELL_HIT));

        let mut shield = Aura::permanent(AuraId::WaterShield, AuraEffect::WaterShield);
        assert_eq!(shield.stacks, 3);
        shield.disarm();
        assert!(shield.hooks().is_empty());
    }

    #[test]
    fn reports_expiring_indices_in_order() {
        let mut auras = AuraRegistry::new();
        auras.apply(focus(50));
        auras.apply(Aura::new(
            AuraId::Bloodlust,
            Tick(40),
            AuraEffect::StatBuff {
                stat: StatKind::SpellHaste,
                amount: 1.0,
            },
        ));
        auras.apply(Aura::permanent(
            AuraId::WaterShield,
            AuraEffect::WaterShield,
        ));
        assert_eq!(auras.expiring_by(Tick(39)), Vec::<usize>::new());
        assert_eq!(auras.expiring_by(Tick(50)), vec![0, 1]);
        assert_eq!(auras.armed(AuraHooks::STRUCK), vec![AuraId::WaterShield]);
    }
}

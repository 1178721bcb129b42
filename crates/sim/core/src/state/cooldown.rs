//! Cooldown table keyed by ability.
//!
//! Absence of a key means the ability is ready. Entries are dropped as soon
//! as their remaining ticks fall below 1.

use std::collections::BTreeMap;

use crate::equipment::ItemId;
use crate::options::Consumable;
use crate::spell::SpellId;

/// Every cooldown the engine tracks: catalog spells, items and the internal
/// pseudo-abilities (shared trinket slot, group burst, consumables).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKey {
    Spell(SpellId),
    Item(ItemId),
    /// Shared by all on-use trinkets.
    TrinketSlot,
    /// Group burst cooldown (Bloodlust).
    Bloodlust,
    ElementalMastery,
    /// Internal cooldown on gaining Lightning Capacitor charges.
    LightningCapacitor,
    Consumable(Consumable),
}

/// Remaining ticks per ability. Iteration order is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cooldowns {
    remaining: BTreeMap<AbilityKey, u64>,
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a cooldown. Arming for zero ticks leaves the ability ready.
    pub fn arm(&mut self, key: AbilityKey, ticks: u64) {
        debug_assert!(
            self.is_ready(key),
            "cooldown {key:?} re-armed while still running"
        );
        if ticks == 0 {
            return;
        }
        self.remaining.insert(key, ticks);
    }

    /// Remaining ticks, 0 when ready.
    pub fn remaining(&self, key: AbilityKey) -> u64 {
        self.remaining.get(&key).copied().unwrap_or(0)
    }

    pub fn is_ready(&self, key: AbilityKey) -> bool {
        !self.remaining.contains_key(&key)
    }

    /// Counts every cooldown down by `ticks`, dropping the ones that finish.
    pub fn advance(&mut self, ticks: u64) {
        self.remaining.retain(|_, left| {
            *left = left.saturating_sub(ticks);
            *left >= 1
        });
    }

    pub fn clear(&mut self) {
        self.remaining.clear();
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AbilityKey, u64)> + '_ {
        self.remaining.iter().map(|(key, left)| (*key, *left))
    }
}

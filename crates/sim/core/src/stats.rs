//! Flat stat bundle consumed by the engine.
//!
//! Aggregating equipment, talents and raid buffs into a bundle happens outside
//! the core. The engine keeps two bundles: the base stats it was constructed
//! with and a buff overlay mutated by auras. Effective values are always
//! `base + buffs`, summed at the point of use so that an expiring buff is
//! reflected on the very next lookup.

use std::ops::{Add, Index, IndexMut};

use strum::{EnumCount, IntoEnumIterator};

/// Fixed schema of the stat bundle.
///
/// Combat stats (`SpellCrit`, `SpellHit`, `SpellHaste`) are ratings; see
/// [`crate::SimConfig`] for the conversions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumCount,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StatKind {
    Intellect,
    Stamina,
    SpellCrit,
    SpellHit,
    SpellDamage,
    SpellHaste,
    /// Mana regenerated per five seconds.
    Mp5,
    /// Maximum mana.
    Mana,
    SpellPenetration,
}

impl StatKind {
    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// Numeric vector indexed by [`StatKind`].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats([f64; StatKind::COUNT]);

impl Stats {
    /// All-zero bundle.
    pub const fn new() -> Self {
        Self([0.0; StatKind::COUNT])
    }

    pub fn get(&self, kind: StatKind) -> f64 {
        self.0[kind.index()]
    }

    pub fn set(&mut self, kind: StatKind, value: f64) {
        self.0[kind.index()] = value;
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, kind: StatKind, value: f64) -> Self {
        self.set(kind, value);
        self
    }

    /// Adds `delta` (may be negative) to one stat.
    pub fn adjust(&mut self, kind: StatKind, delta: f64) {
        self.0[kind.index()] += delta;
    }

    /// Iterates over `(kind, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, f64)> + '_ {
        StatKind::iter().map(move |kind| (kind, self.get(kind)))
    }
}

impl Index<StatKind> for Stats {
    type Output = f64;

    fn index(&self, kind: StatKind) -> &f64 {
        &self.0[kind.index()]
    }
}

impl IndexMut<StatKind> for Stats {
    fn index_mut(&mut self, kind: StatKind) -> &mut f64 {
        &mut self.0[kind.index()]
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(mut self, rhs: Stats) -> Stats {
        for kind in StatKind::iter() {
            self[kind] += rhs[kind];
        }
        self
    }
}

impl FromIterator<(StatKind, f64)> for Stats {
    fn from_iter<I: IntoIterator<Item = (StatKind, f64)>>(iter: I) -> Self {
        let mut stats = Stats::new();
        for (kind, value) in iter {
            stats.adjust(kind, value);
        }
        stats
    }
}

//! Static spell definitions.
//!
//! The catalog is read-only lookup data shared by every run. Definitions are
//! handed out as `Arc<SpellDefinition>` so that in-flight and archived casts
//! can reference them without copying.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use crate::config::SimConfig;
use crate::error::ConfigError;

/// Catalog identifier of a spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellId(pub u32);

impl SpellId {
    pub const LIGHTNING_BOLT_10: Self = Self(15207);
    pub const LIGHTNING_BOLT_12: Self = Self(25449);
    pub const CHAIN_LIGHTNING_6: Self = Self(25442);
    /// Discharge of the Lightning Capacitor trinket.
    pub const LIGHTNING_CAPACITOR: Self = Self(28785);
}

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spell#{}", self.0)
    }
}

bitflags! {
    /// Classification flags consulted by talents and the rotation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SpellTags: u8 {
        /// Benefits from lightning talents (Concussion, Call of Thunder, Tidal Mastery).
        const LIGHTNING = 1 << 0;
        /// Can trigger Lightning Overload.
        const OVERLOAD  = 1 << 1;
        /// Only ever cast by an effect; never selected by a rotation.
        const PROC      = 1 << 2;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SpellTags {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        bitflags::serde::serialize(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SpellTags {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bitflags::serde::deserialize(deserializer)
    }
}

/// A single spell: damage range, timing, cost and scaling.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub id: SpellId,
    pub name: String,
    pub min_damage: f64,
    pub max_damage: f64,
    /// Base cast time in milliseconds; 0 for instants.
    pub cast_ms: u32,
    /// 0 when the spell has no cooldown.
    pub cooldown_secs: u32,
    pub mana_cost: f64,
    /// Fraction of spell damage added to each hit.
    pub coefficient: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: SpellTags,
}

impl SpellDefinition {
    /// Unhasted cast time in ticks.
    pub fn base_cast_ticks(&self) -> u64 {
        SimConfig::millis_to_ticks(u64::from(self.cast_ms))
    }

    pub fn cooldown_ticks(&self) -> u64 {
        SimConfig::seconds_to_ticks(u64::from(self.cooldown_secs))
    }

    pub fn is_instant(&self) -> bool {
        self.cast_ms == 0
    }

    pub fn is_proc(&self) -> bool {
        self.tags.contains(SpellTags::PROC)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_damage > self.max_damage {
            return Err(ConfigError::InvalidDamageRange {
                name: self.name.clone(),
                min: self.min_damage,
                max: self.max_damage,
            });
        }
        // A free, cooldown-less instant would let the loop spin on one tick.
        if self.is_instant() && !self.is_proc() && self.cooldown_secs == 0 && self.mana_cost <= 0.0
        {
            return Err(ConfigError::FreeInstant {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// Immutable spell lookup table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpellCatalog {
    spells: Vec<Arc<SpellDefinition>>,
}

impl SpellCatalog {
    /// Builds a validated catalog.
    pub fn new(spells: Vec<SpellDefinition>) -> Result<Self, ConfigError> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for spell in &spells {
            spell.validate()?;
            if !ids.insert(spell.id) || !names.insert(spell.name.as_str()) {
                return Err(ConfigError::DuplicateSpell {
                    name: spell.name.clone(),
                });
            }
        }

        Ok(Self {
            spells: spells.into_iter().map(Arc::new).collect(),
        })
    }

    /// Built-in elemental shaman table.
    pub fn elemental() -> Self {
        let spells = vec![
            SpellDefinition {
                id: SpellId::LIGHTNING_BOLT_12,
                name: "LB12".into(),
                min_damage: 571.0,
                max_damage: 652.0,
                cast_ms: 2500,
                cooldown_secs: 0,
                mana_cost: 300.0,
                coefficient: 0.794,
                tags: SpellTags::LIGHTNING | SpellTags::OVERLOAD,
            },
            SpellDefinition {
                id: SpellId::LIGHTNING_BOLT_10,
                name: "LB10".into(),
                min_damage: 428.0,
                max_damage: 477.0,
                cast_ms: 2500,
                cooldown_secs: 0,
                mana_cost: 265.0,
                coefficient: 0.794,
                tags: SpellTags::LIGHTNING | SpellTags::OVERLOAD,
            },
            SpellDefinition {
                id: SpellId::CHAIN_LIGHTNING_6,
                name: "CL6".into(),
                min_damage: 734.0,
                max_damage: 838.0,
                cast_ms: 2000,
                cooldown_secs: 6,
                mana_cost: 760.0,
                coefficient: 0.651,
                tags: SpellTags::LIGHTNING | SpellTags::OVERLOAD,
            },
            SpellDefinition {
                id: SpellId::LIGHTNING_CAPACITOR,
                name: "TLC".into(),
                min_damage: 694.0,
                max_damage: 807.0,
                cast_ms: 0,
                cooldown_secs: 0,
                mana_cost: 0.0,
                coefficient: 0.0,
                tags: SpellTags::PROC,
            },
        ];

        Self {
            spells: spells.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn get(&self, id: SpellId) -> Option<&Arc<SpellDefinition>> {
        self.spells.iter().find(|spell| spell.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Arc<SpellDefinition>> {
        self.spells.iter().find(|spell| spell.name == name)
    }

    /// Resolves rotation names into definitions, rejecting unknown and proc spells.
    pub fn resolve_rotation<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<Arc<SpellDefinition>>, ConfigError> {
        if names.is_empty() {
            return Err(ConfigError::EmptyRotation);
        }

        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let spell = self.by_name(name).ok_or_else(|| ConfigError::UnknownSpell {
                    name: name.to_string(),
                })?;
                if spell.is_proc() {
                    return Err(ConfigError::ProcInRotation {
                        name: name.to_string(),
                    });
                }
                Ok(Arc::clone(spell))
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<SpellDefinition>> {
        self.spells.iter()
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = SpellCatalog::elemental();
        let rebuilt =
            SpellCatalog::new(catalog.iter().map(|spell| (**spell).clone()).collect()).unwrap();
        assert_eq!(rebuilt, catalog);
        assert_eq!(catalog.get(SpellId::CHAIN_LIGHTNING_6).unwrap().name, "CL6");
        assert_eq!(catalog.by_name("LB12").unwrap().base_cast_ticks(), 75);
    }

    #[test]
    fn rotation_rejects_unknown_and_proc_spells() {
        let catalog = SpellCatalog::elemental();
        assert_eq!(
            catalog.resolve_rotation::<&str>(&[]),
            Err(ConfigError::EmptyRotation)
        );
        assert!(matches!(
            catalog.resolve_rotation(&["LB12", "Frostbolt"]),
            Err(ConfigError::UnknownSpell { name }) if name == "Frostbolt"
        ));
        assert!(matches!(
            catalog.resolve_rotation(&["TLC"]),
            Err(ConfigError::ProcInRotation { .. })
        ));
        assert_eq!(catalog.resolve_rotation(&["CL6", "LB12"]).unwrap().len(), 2);
    }

    #[test]
    fn rejects_inverted_damage_range_and_duplicates() {
        let mut bolt = (**SpellCatalog::elemental()
            .get(SpellId::LIGHTNING_BOLT_12)
            .unwrap())
        .clone();
        bolt.min_damage = 700.0;
        assert!(matches!(
            SpellCatalog::new(vec![bolt.clone()]),
            Err(ConfigError::InvalidDamageRange { .. })
        ));

        bolt.min_damage = 571.0;
        assert!(matches!(
            SpellCatalog::new(vec![bolt.clone(), bolt]),
            Err(ConfigError::DuplicateSpell { .. })
        ));
    }

    #[test]
    fn rejects_free_instants() {
        let free = SpellDefinition {
            id: SpellId(1),
            name: "Spin".into(),
            min_damage: 1.0,
            max_damage: 2.0,
            cast_ms: 0,
            cooldown_secs: 0,
            mana_cost: 0.0,
            coefficient: 0.0,
            tags: SpellTags::empty(),
        };
        assert!(matches!(
            SpellCatalog::new(vec![free]),
            Err(ConfigError::FreeInstant { .. })
        ));
    }
}

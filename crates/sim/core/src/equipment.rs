//! Equipped items and their activation effects.
//!
//! Only items with an activation matter to the engine; their passive stats
//! are already folded into the stat bundle by the caller.

use std::collections::HashSet;
use std::fmt;

use crate::error::ConfigError;

/// Catalog identifier of an item. Doubles as the item's cooldown key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Equipment slot classification. Items sharing the [`ItemSlot::Trinket`]
/// slot also share a cooldown group.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ItemSlot {
    Head,
    Neck,
    Shoulder,
    Back,
    Chest,
    Wrist,
    Hands,
    Waist,
    Legs,
    Feet,
    Finger,
    Trinket,
    Totem,
    MainHand,
    OffHand,
}

/// How often an activation may fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivationCooldown {
    /// Always active: applied once at the start of each run.
    Always,
    /// On-use with a personal cooldown.
    Seconds(u32),
}

/// Effect an item applies when activated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Temporary spell damage bonus.
    SpellDamage { amount: f64, duration_secs: u32 },
    /// Charges on spell crits and discharges a lightning bolt at three charges.
    LightningCapacitor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activation {
    pub effect: ItemEffect,
    pub cooldown: ActivationCooldown,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub id: ItemId,
    pub name: String,
    pub slot: ItemSlot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub activation: Option<Activation>,
}

impl ItemDefinition {
    /// Creates an item without an activation.
    pub fn passive(id: ItemId, name: impl Into<String>, slot: ItemSlot) -> Self {
        Self {
            id,
            name: name.into(),
            slot,
            activation: None,
        }
    }

    #[must_use]
    pub fn with_activation(mut self, effect: ItemEffect, cooldown: ActivationCooldown) -> Self {
        self.activation = Some(Activation { effect, cooldown });
        self
    }

    /// Effect applied at reset, if this item is always active.
    pub fn always_active_effect(&self) -> Option<ItemEffect> {
        match self.activation {
            Some(Activation {
                effect,
                cooldown: ActivationCooldown::Always,
            }) => Some(effect),
            _ => None,
        }
    }

    /// Effect and personal cooldown, if this item is on-use.
    pub fn on_use(&self) -> Option<(ItemEffect, u32)> {
        match self.activation {
            Some(Activation {
                effect,
                cooldown: ActivationCooldown::Seconds(secs),
            }) => Some((effect, secs)),
            _ => None,
        }
    }

    pub fn is_trinket(&self) -> bool {
        self.slot == ItemSlot::Trinket
    }
}

/// The equipped item set. Read-only for the duration of a run.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    items: Vec<ItemDefinition>,
}

impl Equipment {
    /// Builds an equipment set; item ids must be unique since they key cooldowns.
    pub fn new(items: Vec<ItemDefinition>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id) {
                return Err(ConfigError::DuplicateItem { id: item.id.0 });
            }
        }
        Ok(Self { items })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.iter()
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemDefinition> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

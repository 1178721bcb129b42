//! Run configuration: rotation, talents, buffs, encounter and consumables.

/// How the rotation list is interpreted.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum RotationMode {
    /// Cycle through the list in order, waiting on the current entry.
    #[default]
    FixedOrder,
    /// Cast the first entry that is off cooldown and affordable.
    Priority,
}

/// Mana consumables. Each has its own cooldown key.
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
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Consumable {
    DarkRune,
    SuperManaPotion,
}

impl Consumable {
    /// Restored mana range `[min, max)`.
    pub const fn restore_range(self) -> (u32, u32) {
        match self {
            Self::DarkRune => (900, 1500),
            Self::SuperManaPotion => (1800, 3000),
        }
    }
}

/// Talent ranks. Zero means untalented.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Talents {
    /// 4% per rank to fire a free half-damage copy of a lightning spell.
    pub lightning_overload: u8,
    /// +2% hit per rank.
    pub elemental_precision: u8,
    /// +1% hit per rank.
    pub natures_guidance: u8,
    /// +1% crit per rank on lightning spells.
    pub tidal_mastery: u8,
    /// +1% crit per rank on lightning spells.
    pub call_of_thunder: u8,
    /// +1% damage per rank on lightning spells.
    pub concussion: u8,
    /// -2% mana cost per rank.
    pub convection: u8,
    /// Next cast after activation is a guaranteed crit.
    pub elemental_mastery: bool,
}

/// External buffs that carry engine-visible behavior.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Buffs {
    pub judgement_of_wisdom: bool,
    pub water_shield: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Encounter {
    pub duration_secs: u64,
}

impl Encounter {
    pub const DEFAULT_DURATION_SECS: u64 = 60;
}

impl Default for Encounter {
    fn default() -> Self {
        Self {
            duration_secs: Self::DEFAULT_DURATION_SECS,
        }
    }
}

/// Everything that shapes a run besides stats and equipment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SimOptions {
    /// Spell names, resolved against the spell catalog at construction.
    pub rotation: Vec<String>,
    pub rotation_mode: RotationMode,
    /// Number of Bloodlust activations available per run.
    pub burst_cooldown_uses: u32,
    pub talents: Talents,
    pub buffs: Buffs,
    pub encounter: Encounter,
    /// Stop the run at the first out-of-mana event.
    pub exit_on_oom: bool,
    /// Base seed; incremented once per run.
    pub random_seed: u64,
    /// Consumables available during the run, evaluated in this order.
    pub consumables: Vec<Consumable>,
}

impl SimOptions {
    /// Options with the given fixed-order rotation and defaults elsewhere.
    pub fn with_rotation<S: Into<String>>(rotation: impl IntoIterator<Item = S>) -> Self {
        Self {
            rotation: rotation.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            rotation: Vec::new(),
            rotation_mode: RotationMode::FixedOrder,
            burst_cooldown_uses: 0,
            talents: Talents::default(),
            buffs: Buffs::default(),
            encounter: Encounter::default(),
            exit_on_oom: false,
            random_seed: 0,
            consumables: vec![Consumable::DarkRune, Consumable::SuperManaPotion],
        }
    }
}

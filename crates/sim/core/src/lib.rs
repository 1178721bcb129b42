//! Deterministic, tick-stepped combat rotation simulator.
//!
//! `castsim-core` owns the rules: spell selection, cast resolution, the mana
//! economy and the aura/cooldown bookkeeping that the loop mutates every
//! tick. It performs no I/O. Catalogs and options come from the caller
//! (usually `castsim-content`), and every run is a pure function of the seed
//! and that static configuration. All state mutation flows through
//! [`engine::Simulation`].
pub mod config;
pub mod engine;
pub mod equipment;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod options;
pub mod rng;
pub mod spell;
pub mod state;
pub mod stats;
pub mod tick;

pub use config::SimConfig;
pub use engine::Simulation;
pub use equipment::{
    Activation, ActivationCooldown, Equipment, ItemDefinition, ItemEffect, ItemId, ItemSlot,
};
pub use error::{ConfigError, ErrorSeverity, RunError, SimError};
pub use metrics::{OomEvent, SimMetrics, TrialSummary};
pub use observer::{ManaSource, NoopObserver, SimObserver, TracingObserver};
pub use options::{Buffs, Consumable, Encounter, RotationMode, SimOptions, Talents};
pub use rng::SimRng;
pub use spell::{SpellCatalog, SpellDefinition, SpellId, SpellTags};
pub use state::{
    AbilityKey, Aura, AuraApplied, AuraEffect, AuraHooks, AuraId, AuraRegistry, Cast, CastEffect,
    Cooldowns,
};
pub use stats::{StatKind, Stats};
pub use tick::Tick;

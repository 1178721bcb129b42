//! Runtime state the engine mutates every tick.

mod aura;
mod cast;
mod cooldown;

pub use aura::{Aura, AuraApplied, AuraEffect, AuraHooks, AuraId, AuraRegistry};
pub use cast::{Cast, CastEffect};
pub use cooldown::{AbilityKey, Cooldowns};

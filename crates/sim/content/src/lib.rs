//! Data-driven simulator content.
//!
//! This crate turns RON data files into the read-only inputs the engine
//! consumes:
//! - Spell catalogs (`spells.ron`)
//! - Item catalogs and named equipment sets (`items.ron`)
//! - Scenarios: flat stats, equipped item names and run options
//!
//! Content is resolved once before a run and never changes while the engine
//! is stepping. All loaders use castsim-core types directly with serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ContentFactory, ItemCatalog, ItemLoader, LoadResult, ScenarioLoader, ScenarioSpec, SpellLoader,
};

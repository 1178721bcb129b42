//! Content loaders for reading simulator data from files.
//!
//! Each loader parses one RON document into castsim-core types and runs the
//! core's own validation on the result.

pub mod factory;
pub mod items;
pub mod scenario;
pub mod spells;

pub use factory::ContentFactory;
pub use items::{ItemCatalog, ItemLoader};
pub use scenario::{ScenarioLoader, ScenarioSpec};
pub use spells::SpellLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

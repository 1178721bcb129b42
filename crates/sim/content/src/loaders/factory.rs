//! Content factory: resolves data files and assembles ready-to-run simulations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use castsim_core::{Simulation, SpellCatalog};

use crate::loaders::{ItemCatalog, ItemLoader, LoadResult, ScenarioLoader, ScenarioSpec, SpellLoader};

/// Loads content from a data directory laid out as:
///
/// ```text
/// data/
///   spells.ron
///   items.ron
///   scenario.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const SPELLS_FILE: &'static str = "spells.ron";
    pub const ITEMS_FILE: &'static str = "items.ron";
    pub const DEFAULT_SCENARIO_FILE: &'static str = "scenario.ron";

    /// Create a new content factory with the given data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn load_spells(&self) -> LoadResult<SpellCatalog> {
        SpellLoader::load(&self.data_dir.join(Self::SPELLS_FILE))
    }

    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        ItemLoader::load(&self.data_dir.join(Self::ITEMS_FILE))
    }

    /// Loads a scenario. Relative paths resolve against the data directory.
    pub fn load_scenario(&self, path: &Path) -> LoadResult<ScenarioSpec> {
        if path.is_absolute() {
            ScenarioLoader::load(path)
        } else {
            ScenarioLoader::load(&self.data_dir.join(path))
        }
    }

    pub fn load_default_scenario(&self) -> LoadResult<ScenarioSpec> {
        self.load_scenario(Path::new(Self::DEFAULT_SCENARIO_FILE))
    }

    /// Builds a simulation for `scenario` over this directory's catalogs.
    pub fn build_simulation(&self, scenario: &ScenarioSpec) -> LoadResult<Simulation> {
        let spells = self.load_spells()?;
        let items = self.load_items()?;

        let equipment = items.equipment_set(&scenario.equipment)?;
        let stats = scenario.stats()?;

        Simulation::with_catalog(
            stats,
            Arc::new(equipment),
            scenario.options.clone(),
            Arc::new(spells),
        )
        .map_err(|e| anyhow::anyhow!("Invalid scenario '{}': {}", scenario.name, e))
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

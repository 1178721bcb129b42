//! Scenario loader: caster stats, equipped items and simulation options.

use std::collections::BTreeMap;
use std::path::Path;

use castsim_core::{SimOptions, StatKind, Stats};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// A complete run description as authored in RON.
///
/// Stats are keyed by their snake_case name (`spell_damage`, `mp5`, ...) and
/// already include every passive bonus. Equipment lists item names from the
/// item catalog; only their activations matter to the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioSpec {
    #[serde(default)]
    pub name: String,
    pub stats: BTreeMap<String, f64>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub options: SimOptions,
}

impl ScenarioSpec {
    /// Converts the named stat table into a stat bundle.
    pub fn stats(&self) -> LoadResult<Stats> {
        self.stats
            .iter()
            .map(|(name, value)| {
                let kind: StatKind = name
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Unknown stat '{}'", name))?;
                Ok((kind, *value))
            })
            .collect()
    }
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<ScenarioSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ScenarioSpec> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }
}

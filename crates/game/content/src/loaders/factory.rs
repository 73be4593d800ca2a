//! Content factory for building a simulation context from data files.

use std::path::{Path, PathBuf};

use armada_core::{AbilityCatalog, GameRules, SimContext, StatusRegistry};

use crate::loaders::{CatalogLoader, LoadResult, RulesLoader, ScenarioLoader};
use crate::scenario::Scenario;

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml        (optional)
/// ├── catalog.ron       (optional)
/// └── scenarios/
///     ├── picket.ron
///     └── siege.ron
/// ```
///
/// Missing optional files fall back to the built-in tables.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game rules from `rules.toml`.
    pub fn load_rules(&self) -> LoadResult<GameRules> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no rules file, using defaults");
            return Ok(GameRules::default());
        }
        RulesLoader::load(&path)
    }

    /// Load duration overrides from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<(AbilityCatalog, StatusRegistry)> {
        let path = self.data_dir.join("catalog.ron");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no catalog file, using built-in tables");
            return Ok((AbilityCatalog::new(), StatusRegistry::new()));
        }
        CatalogLoader::load(&path)
    }

    /// Rules and catalogs bundled for the engine.
    pub fn load_context(&self) -> LoadResult<SimContext> {
        let rules = self.load_rules()?;
        let (abilities, statuses) = self.load_catalog()?;
        Ok(SimContext::new(rules, abilities, statuses))
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        ScenarioLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

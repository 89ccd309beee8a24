//! Content factory for building oracles from a data directory.

use std::path::{Path, PathBuf};

use combat_core::BehaviorConfig;

use crate::loaders::{ActionCatalog, ArchetypeCatalog, ConfigLoader, LoadResult};

/// Loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── behavior.toml
/// ├── actions.ron
/// ├── archetypes.ron
/// └── scenarios/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// Load behavior configuration from `behavior.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<BehaviorConfig> {
        let path = self.data_dir.join("behavior.toml");
        if !path.exists() {
            return Ok(BehaviorConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the action catalog from `actions.ron`.
    pub fn load_actions(&self) -> LoadResult<ActionCatalog> {
        ActionCatalog::load(&self.data_dir.join("actions.ron"))
    }

    /// Load archetypes from `archetypes.ron` and check them against `actions`.
    pub fn load_archetypes(&self, actions: &ActionCatalog) -> LoadResult<ArchetypeCatalog> {
        let archetypes = ArchetypeCatalog::load(&self.data_dir.join("archetypes.ron"))?;
        archetypes.validate(actions)?;
        Ok(archetypes)
    }

    /// Path of `scenarios/{name}.ron`.
    pub fn scenario_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("scenarios").join(format!("{}.ron", name))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

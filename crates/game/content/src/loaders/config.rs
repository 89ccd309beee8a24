//! Behavior configuration loader.

use std::path::Path;

use combat_core::BehaviorConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for behavior configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys left out of the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<BehaviorConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(toml_text: &str) -> LoadResult<BehaviorConfig> {
        let config: BehaviorConfig = toml::from_str(toml_text)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("max_update_range = 12\nface_target_chance = 0\n").unwrap();
        assert_eq!(config.max_update_range, 12);
        assert_eq!(config.face_target_chance, 0);
        assert_eq!(
            config.hard_pursuit_ceiling,
            BehaviorConfig::DEFAULT_HARD_PURSUIT_CEILING
        );
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("behavior.toml");
        std::fs::write(&path, "capability_retry = 4\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.capability_retry, 4);
        assert_eq!(
            config.invalid_decision_retry,
            BehaviorConfig::DEFAULT_INVALID_DECISION_RETRY
        );
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(ConfigLoader::parse("max_update_range = \"far\"").is_err());
    }
}

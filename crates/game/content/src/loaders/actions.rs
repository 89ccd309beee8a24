//! Action catalog loader.
//!
//! Loads action profiles from RON data files and serves them as an
//! [`ActionOracle`].

use std::collections::HashMap;
use std::path::Path;

use combat_core::{ActionId, ActionOracle, ActionProfile};

use crate::loaders::{LoadResult, read_file};

/// Catalog of action profiles keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    profiles: HashMap<ActionId, ActionProfile>,
}

impl ActionCatalog {
    /// Load the catalog from a RON file.
    ///
    /// RON format: `Vec<ActionProfile>`. Duplicate ids are rejected.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load action catalog {}: {}", path.display(), e))
    }

    /// Catalog shipped with the crate (`data/actions.ron`).
    pub fn embedded() -> LoadResult<Self> {
        Self::parse(include_str!("../../data/actions.ron"))
    }

    /// Parse a catalog from RON text.
    pub fn parse(ron_text: &str) -> LoadResult<Self> {
        let profiles: Vec<ActionProfile> = ron::from_str(ron_text)
            .map_err(|e| anyhow::anyhow!("Failed to parse action catalog RON: {}", e))?;
        Self::from_profiles(profiles)
    }

    /// Build a catalog from already constructed profiles.
    pub fn from_profiles(profiles: impl IntoIterator<Item = ActionProfile>) -> LoadResult<Self> {
        let mut catalog = Self::default();
        for profile in profiles {
            let id = profile.id;
            if let Some(previous) = catalog.profiles.insert(id, profile) {
                anyhow::bail!("duplicate action id {} ('{}')", id, previous.name);
            }
        }
        Ok(catalog)
    }

    pub fn get(&self, id: ActionId) -> Option<&ActionProfile> {
        self.profiles.get(&id)
    }

    /// Looks up a profile by its name.
    pub fn by_name(&self, name: &str) -> Option<&ActionProfile> {
        self.profiles.values().find(|profile| profile.name == name)
    }

    /// All ids, sorted.
    pub fn ids(&self) -> Vec<ActionId> {
        let mut ids: Vec<ActionId> = self.profiles.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ActionOracle for ActionCatalog {
    fn profile(&self, id: ActionId) -> Option<&ActionProfile> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ActionScope, AgentId, AgentRecord, EntityId, Position, Team};

    #[test]
    fn embedded_catalog_loads() {
        let catalog = ActionCatalog::embedded().expect("embedded catalog");
        assert!(catalog.len() >= 4);

        let slash = catalog.by_name("slash").expect("slash");
        assert_eq!(slash.scope, ActionScope::Enemy);
        assert_eq!(slash.range, 1);

        let rally = catalog.by_name("rally").expect("rally");
        assert_eq!(rally.scope, ActionScope::SelfTarget);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let catalog = ActionCatalog::parse(
            r#"[(id: 7, name: "jab", scope: Enemy, range: 1)]"#,
        )
        .unwrap();
        let jab = catalog.get(ActionId(7)).unwrap();
        assert_eq!(jab.cast_time, 0);
        assert_eq!(jab.weight, ActionProfile::DEFAULT_WEIGHT);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = ActionCatalog::parse(
            r#"[
                (id: 1, name: "a", scope: Enemy, range: 1),
                (id: 1, name: "b", scope: Enemy, range: 2),
            ]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate action id"));
    }

    #[test]
    fn default_instantiation_uses_base_instance() {
        let catalog = ActionCatalog::embedded().unwrap();
        let slash = catalog.by_name("slash").unwrap().clone();
        let agent = AgentRecord::new(AgentId(1), EntityId(1), Team(1), Position::ORIGIN);

        let instances = catalog.instantiate(&agent, slash.id);
        assert_eq!(instances, vec![slash.instance()]);
        assert!(catalog.instantiate(&agent, ActionId(999)).is_empty());
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("actions.ron");
        std::fs::write(&path, r#"[(id: 3, name: "kick", scope: Enemy, range: 1)]"#).unwrap();

        let catalog = ActionCatalog::load(&path).unwrap();
        assert_eq!(catalog.ids(), vec![ActionId(3)]);

        assert!(ActionCatalog::load(&dir.path().join("missing.ron")).is_err());
    }
}

//! Agent archetype loader.
//!
//! Loads [`AgentTemplate`]s keyed by definition id from RON files.

use std::collections::HashMap;
use std::path::Path;

use combat_core::{ActionOracle, AgentTemplate, ArchetypeOracle};

use crate::loaders::{LoadResult, read_file};

/// Archetype templates keyed by definition id (e.g. "goblin_archer").
#[derive(Debug, Clone, Default)]
pub struct ArchetypeCatalog {
    templates: HashMap<String, AgentTemplate>,
}

impl ArchetypeCatalog {
    /// Load archetypes from a RON file.
    ///
    /// RON format: `Vec<(String, AgentTemplate)>`.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load archetypes {}: {}", path.display(), e))
    }

    /// Archetypes shipped with the crate (`data/archetypes.ron`).
    pub fn embedded() -> LoadResult<Self> {
        Self::parse(include_str!("../../data/archetypes.ron"))
    }

    pub fn parse(ron_text: &str) -> LoadResult<Self> {
        let entries: Vec<(String, AgentTemplate)> = ron::from_str(ron_text)
            .map_err(|e| anyhow::anyhow!("Failed to parse archetype RON: {}", e))?;

        let mut templates = HashMap::with_capacity(entries.len());
        for (def_id, template) in entries {
            if templates.insert(def_id.clone(), template).is_some() {
                anyhow::bail!("duplicate archetype '{}'", def_id);
            }
        }
        Ok(Self { templates })
    }

    /// Checks that every action an archetype knows exists in `actions`.
    pub fn validate(&self, actions: &dyn ActionOracle) -> LoadResult<()> {
        for def_id in self.all_ids() {
            let Some(template) = self.templates.get(&def_id) else {
                continue;
            };
            if let Some(missing) = template
                .actions
                .iter()
                .find(|id| actions.profile(**id).is_none())
            {
                anyhow::bail!("archetype '{}' references unknown action {}", def_id, missing);
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl ArchetypeOracle for ArchetypeCatalog {
    fn template(&self, def_id: &str) -> Option<&AgentTemplate> {
        self.templates.get(def_id)
    }

    fn all_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.templates.keys().cloned().collect();
        ids.sort();
        ids
    }
}

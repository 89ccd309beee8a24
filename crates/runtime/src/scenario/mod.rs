//! Scenario files: which archetypes stand where when a fight starts.
//!
//! A scenario names each placement with a key so leaders, the primary agent
//! and initial provocations can refer to one another before any agent id
//! exists. Ids are allocated by the scheduler at population time.

use std::collections::HashMap;
use std::path::Path;

use combat_core::{AgentId, ArchetypeOracle, Position};
use serde::{Deserialize, Serialize};

use crate::api::{Result, RuntimeError};
use crate::sandbox::SandboxWorld;
use crate::scheduler::Scheduler;

/// One agent to place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Scenario-local name used by `leader`, `primary` and provocations.
    pub key: String,
    pub archetype: String,
    pub position: Position,
    #[serde(default)]
    pub leader: Option<String>,
    /// Starting hit points; the sandbox default when absent.
    #[serde(default)]
    pub hp: Option<u32>,
}

/// `agent` starts the scenario already fighting `source`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provocation {
    pub agent: String,
    pub source: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Key of the player-controlled placement.
    pub primary: String,
    pub agents: Vec<Placement>,
    #[serde(default)]
    pub provocations: Vec<Provocation>,
}

impl Scenario {
    /// Load scenario from a RON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::InvalidConfig(format!("Failed to read scenario file: {}", e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        ron::from_str(content).map_err(|e| {
            RuntimeError::InvalidConfig(format!("Failed to parse scenario RON: {}", e))
        })
    }

    /// Spawns every placement into `world` and `scheduler`, then wires up
    /// leaders, the primary agent and the initial provocations.
    ///
    /// Returns the agent id allocated for each placement key.
    pub fn populate(
        &self,
        scheduler: &mut Scheduler,
        world: &SandboxWorld,
        archetypes: &dyn ArchetypeOracle,
    ) -> Result<HashMap<String, AgentId>> {
        tracing::info!(
            "Populating scenario '{}' with {} placements",
            self.name,
            self.agents.len()
        );

        let mut ids = HashMap::with_capacity(self.agents.len());
        for placement in &self.agents {
            if ids.contains_key(&placement.key) {
                return Err(RuntimeError::InvalidConfig(format!(
                    "Duplicate placement key '{}'",
                    placement.key
                )));
            }
            let template = archetypes
                .template(&placement.archetype)
                .ok_or_else(|| RuntimeError::UnknownArchetype(placement.archetype.clone()))?;

            let hp = placement.hp.unwrap_or(SandboxWorld::DEFAULT_HP);
            let entity = world.spawn_body(placement.position, hp);
            let id = scheduler.spawn(template, entity, placement.position);
            ids.insert(placement.key.clone(), id);
        }

        for placement in &self.agents {
            if let Some(leader) = &placement.leader {
                let follower = lookup(&ids, &placement.key)?;
                scheduler.set_leader(follower, lookup(&ids, leader)?)?;
            }
        }

        scheduler.set_primary(lookup(&ids, &self.primary)?)?;

        for provocation in &self.provocations {
            scheduler.provoke(
                lookup(&ids, &provocation.agent)?,
                lookup(&ids, &provocation.source)?,
            )?;
        }

        Ok(ids)
    }
}

fn lookup(ids: &HashMap<String, AgentId>, key: &str) -> Result<AgentId> {
    ids.get(key)
        .copied()
        .ok_or_else(|| RuntimeError::InvalidConfig(format!("Unknown placement key '{}'", key)))
}

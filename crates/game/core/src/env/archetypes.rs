//! Archetype templates for spawning agents from data.
//!
//! An [`AgentTemplate`] carries everything about an agent except its identity
//! and placement. Templates are loaded from RON by the content crate and
//! turned into [`AgentRecord`]s at spawn time.

use arrayvec::ArrayVec;

use crate::config::BehaviorConfig;
use crate::policy::PolicyKind;
use crate::state::{
    ActionId, AgentId, AgentKind, AgentRecord, EntityId, Position, SpatialParams, Team,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentTemplate {
    pub team: Team,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: AgentKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spatial: SpatialParams,
    #[cfg_attr(feature = "serde", serde(default))]
    pub actions: ArrayVec<ActionId, { BehaviorConfig::MAX_ACTIONS }>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub policy: PolicyKind,
    #[cfg_attr(feature = "serde", serde(default = "default_think_frames"))]
    pub think_frames: u32,
}

#[cfg(feature = "serde")]
fn default_think_frames() -> u32 {
    AgentRecord::DEFAULT_THINK_FRAMES
}

impl AgentTemplate {
    /// Creates an idle agent from this template, standing on `home`.
    pub fn to_agent(&self, id: AgentId, entity: EntityId, home: Position) -> AgentRecord {
        AgentRecord::new(id, entity, self.team, home)
            .with_kind(self.kind)
            .with_spatial(self.spatial)
            .with_actions(self.actions.iter().copied())
            .with_policy(self.policy.clone())
            .with_think_frames(self.think_frames)
    }

    pub fn builder() -> AgentTemplateBuilder {
        AgentTemplateBuilder::default()
    }
}

/// Builder for constructing agent templates.
#[derive(Default)]
pub struct AgentTemplateBuilder {
    team: Option<Team>,
    kind: Option<AgentKind>,
    spatial: Option<SpatialParams>,
    actions: Option<ArrayVec<ActionId, { BehaviorConfig::MAX_ACTIONS }>>,
    policy: Option<PolicyKind>,
    think_frames: Option<u32>,
}

impl AgentTemplateBuilder {
    pub fn team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }

    pub fn kind(mut self, kind: AgentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn spatial(mut self, spatial: SpatialParams) -> Self {
        self.spatial = Some(spatial);
        self
    }

    /// Set known actions. Actions beyond the capacity are ignored.
    pub fn actions(mut self, actions: impl IntoIterator<Item = ActionId>) -> Self {
        self.actions = Some(
            actions
                .into_iter()
                .take(BehaviorConfig::MAX_ACTIONS)
                .collect(),
        );
        self
    }

    pub fn policy(mut self, policy: PolicyKind) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn think_frames(mut self, frames: u32) -> Self {
        self.think_frames = Some(frames);
        self
    }

    pub fn build(self) -> AgentTemplate {
        AgentTemplate {
            team: self.team.unwrap_or(Team::NEUTRAL),
            kind: self.kind.unwrap_or_default(),
            spatial: self.spatial.unwrap_or_default(),
            actions: self.actions.unwrap_or_default(),
            policy: self.policy.unwrap_or_default(),
            think_frames: self
                .think_frames
                .unwrap_or(AgentRecord::DEFAULT_THINK_FRAMES),
        }
    }
}

/// Oracle providing archetype templates by definition id (e.g. "goblin_archer").
pub trait ArchetypeOracle {
    fn template(&self, def_id: &str) -> Option<&AgentTemplate>;

    /// All known definition ids.
    fn all_ids(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;

    #[test]
    fn template_spawns_idle_agent_at_home() {
        let template = AgentTemplate::builder()
            .team(Team(2))
            .actions([ActionId(1), ActionId(4)])
            .policy(PolicyKind::Weighted)
            .think_frames(6)
            .build();

        let agent = template.to_agent(AgentId(3), EntityId(30), Position::new(4, 1));

        assert_eq!(agent.team, Team(2));
        assert_eq!(agent.phase, Phase::Idle);
        assert_eq!(agent.position, agent.home);
        assert_eq!(agent.actions.as_slice(), &[ActionId(1), ActionId(4)]);
        assert_eq!(agent.policy, PolicyKind::Weighted);
        assert_eq!(agent.think_frames, 6);
        assert!(agent.is_idle());
    }
}

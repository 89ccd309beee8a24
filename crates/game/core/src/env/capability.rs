//! Liveness and capability checks.

use crate::state::{ActionId, AgentRecord, EntityId};

/// Answers whether a body may currently act.
///
/// Capability covers everything the behavior engine does not model itself:
/// stuns, resource costs, silences, roots.
pub trait CapabilityOracle {
    /// True while the entity is alive in the host world.
    fn is_alive(&self, entity: EntityId) -> bool;

    /// True if the agent may move this frame.
    fn can_move(&self, agent: &AgentRecord) -> bool;

    /// True if the agent may perform `action` right now.
    fn can_execute(&self, agent: &AgentRecord, action: ActionId) -> bool;
}

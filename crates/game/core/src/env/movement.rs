//! Movement and orientation queries against the host world.

use crate::state::{EntityId, Position};

/// Host-side locomotion for agent bodies.
///
/// Movement is fire-and-forget: the scheduler issues at most one step request
/// per agent per frame and learns the outcome by reading positions on a later
/// frame.
pub trait MovementOracle {
    /// Current tile of `entity`, or `None` once it left the world.
    fn position(&self, entity: EntityId) -> Option<Position>;

    /// True while a previously requested step is still in progress.
    fn is_moving(&self, entity: EntityId) -> bool;

    /// True while the body is decelerating after a step.
    fn is_stopping(&self, entity: EntityId) -> bool;

    /// Requests one step from the current tile toward `destination`.
    fn step_toward(&self, entity: EntityId, destination: Position);

    /// Turns `entity` to face `target` without moving.
    fn turn_toward(&self, entity: EntityId, target: Position);

    /// True if a new movement request would be premature.
    fn is_busy(&self, entity: EntityId) -> bool {
        self.is_moving(entity) || self.is_stopping(entity)
    }
}

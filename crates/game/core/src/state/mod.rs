//! Behavior state representation.
//!
//! This module owns the per-agent record, the phase table, and the action
//! types that flow through a decision. Runtime layers mutate records only
//! through the methods defined here so the record invariants hold.
pub mod action;
pub mod agent;
pub mod common;
pub mod phase;

pub use action::{
    ActionId, ActionInstance, ActionProfile, ActionScope, CooldownGroup, Cooldowns, DecidedAction,
};
pub use agent::{
    AgentFlags, AgentKind, AgentRecord, InvariantViolation, Spacing, SpatialParams, Timers,
};
pub use common::{AgentId, EntityId, Frame, Position, Team};
pub use phase::{Phase, PhaseEvent, TransitionError};

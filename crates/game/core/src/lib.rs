//! Deterministic behavior rules and data types for NPC combat scheduling.
//!
//! `combat-core` defines the agent record, the Idle/Approach/Decide/Cooldown
//! phase table, the agent registry, the collaborator traits the scheduler
//! talks to the host world through, and the pluggable decision policies.
//! Nothing here logs or owns a clock; the frame loop lives in
//! `combat-runtime`.
pub mod config;
pub mod env;
pub mod error;
pub mod policy;
pub mod registry;
pub mod state;

pub use config::BehaviorConfig;
pub use env::{
    ActionOracle, AgentTemplate, AgentTemplateBuilder, ArchetypeOracle, BehaviorEnv,
    CapabilityOracle, GlobalGate, InteractionResolver, MovementOracle, OpenGate, OracleError,
    PcgRng, ResolveError, RngOracle, RollKind, Suppression, compute_seed,
};
pub use error::{CombatError, ErrorSeverity};
pub use policy::{ActionDecisionPolicy, Decision, DecisionContext, PolicyKind};
pub use registry::Registry;
pub use state::{
    ActionId, ActionInstance, ActionProfile, ActionScope, AgentFlags, AgentId, AgentKind,
    AgentRecord, CooldownGroup, Cooldowns, DecidedAction, EntityId, Frame, InvariantViolation,
    Phase, PhaseEvent, Position, Spacing, SpatialParams, Team, Timers, TransitionError,
};

//! Frame-driven orchestration of NPC combat behavior.
//!
//! This crate runs the phase state machine defined in `combat-core` once per
//! frame for every agent near the primary agent. Consumers own a
//! [`Scheduler`], hand it a [`BehaviorEnv`](combat_core::BehaviorEnv) each
//! frame, and read back a [`TickReport`].
//!
//! Modules are organized by responsibility:
//! - [`scheduler`] hosts the frame loop and agent lifecycle operations
//! - [`behavior`] holds one handler per phase plus engagement and spacing rules
//! - [`api`] exposes error types and the policy registry
//! - [`sandbox`] is an in-memory world implementing every collaborator
//! - [`scenario`] places archetypes on a sandbox battlefield from RON files
pub mod api;
pub mod behavior;
pub mod config;
pub mod sandbox;
pub mod scenario;
pub mod scheduler;

pub use api::{BehaviorError, PolicyRegistry, Result, RuntimeError};
pub use config::RuntimeConfig;
pub use sandbox::{Execution, SandboxWorld, WorldCall};
pub use scenario::{Placement, Provocation, Scenario};
pub use scheduler::{Scheduler, SchedulerBuilder, TickReport};

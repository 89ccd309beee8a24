//! Error types surfaced by the runtime.
//!
//! [`BehaviorError`] is raised inside a single agent's dispatch and never
//! escapes the frame loop: the scheduler logs it and skips that agent.
//! [`RuntimeError`] is returned from scheduler operations themselves.
use thiserror::Error;

use combat_core::{AgentId, CombatError, ErrorSeverity, OracleError, TransitionError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("no primary agent has been set")]
    PrimaryNotSet,

    #[error("primary agent {0} is not registered")]
    PrimaryMissing(AgentId),

    #[error("agent {0} is not registered")]
    UnknownAgent(AgentId),

    #[error("archetype '{0}' not found")]
    UnknownArchetype(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CombatError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(err) => err.severity(),
            Self::Transition(err) => err.severity(),
            Self::PrimaryNotSet | Self::PrimaryMissing(_) => ErrorSeverity::Fatal,
            Self::UnknownAgent(_) | Self::UnknownArchetype(_) | Self::InvalidConfig(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(err) => err.error_code(),
            Self::Transition(err) => err.error_code(),
            Self::PrimaryNotSet => "RUNTIME_PRIMARY_NOT_SET",
            Self::PrimaryMissing(_) => "RUNTIME_PRIMARY_MISSING",
            Self::UnknownAgent(_) => "RUNTIME_UNKNOWN_AGENT",
            Self::UnknownArchetype(_) => "RUNTIME_UNKNOWN_ARCHETYPE",
            Self::InvalidConfig(_) => "RUNTIME_INVALID_CONFIG",
        }
    }
}

/// Failure while running one agent's phase handler.
#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("decision policy '{0}' is not registered")]
    UnknownPolicy(String),
}

impl CombatError for BehaviorError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(err) => err.severity(),
            Self::Transition(err) => err.severity(),
            Self::UnknownPolicy(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(err) => err.error_code(),
            Self::Transition(err) => err.error_code(),
            Self::UnknownPolicy(_) => "BEHAVIOR_UNKNOWN_POLICY",
        }
    }
}

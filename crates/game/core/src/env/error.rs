//! Oracle access errors.
//!
//! Errors related to collaborator availability and data access.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::ActionId;

/// Errors that occur when accessing a collaborator through [`super::BehaviorEnv`].
///
/// A missing collaborator is fatal for the frame: nothing useful can be
/// decided without movement queries or action data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("MovementOracle not available")]
    MovementNotAvailable,

    #[error("CapabilityOracle not available")]
    CapabilityNotAvailable,

    #[error("ActionOracle not available")]
    ActionsNotAvailable,

    #[error("InteractionResolver not available")]
    ResolverNotAvailable,

    #[error("GlobalGate not available")]
    GateNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    /// Action profile was not found by id.
    #[error("action profile {0} not found")]
    ActionNotFound(ActionId),

    /// Archetype template was not found by definition id.
    #[error("archetype template '{0}' not found")]
    ArchetypeNotFound(String),
}

impl CombatError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            MovementNotAvailable
            | CapabilityNotAvailable
            | ActionsNotAvailable
            | ResolverNotAvailable
            | GateNotAvailable
            | RngNotAvailable => ErrorSeverity::Fatal,

            ActionNotFound(_) | ArchetypeNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MovementNotAvailable => "ORACLE_MOVEMENT_NOT_AVAILABLE",
            CapabilityNotAvailable => "ORACLE_CAPABILITY_NOT_AVAILABLE",
            ActionsNotAvailable => "ORACLE_ACTIONS_NOT_AVAILABLE",
            ResolverNotAvailable => "ORACLE_RESOLVER_NOT_AVAILABLE",
            GateNotAvailable => "ORACLE_GATE_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            ActionNotFound(_) => "ORACLE_ACTION_NOT_FOUND",
            ArchetypeNotFound(_) => "ORACLE_ARCHETYPE_NOT_FOUND",
        }
    }
}

//! Hand-off point for executing a decided action.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::{ActionInstance, AgentId, AgentRecord};

/// Executes the effects of an action (damage, healing, buffs).
///
/// The behavior engine only decides *when* an action fires; what it does is
/// entirely up to the resolver.
pub trait InteractionResolver {
    /// Resolves `actions` from `source` onto `target`.
    ///
    /// `target` is the ally target for ally-scoped actions, the current target
    /// for enemy-scoped ones and `None` for self-targeted ones.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the host refused the action. The agent still
    /// enters recovery; the failure is logged by the caller.
    fn execute(
        &self,
        actions: &[ActionInstance],
        source: &AgentRecord,
        target: Option<&AgentRecord>,
    ) -> Result<(), ResolveError>;
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("{agent} has nothing to execute")]
    Empty { agent: AgentId },

    #[error("target {target} is no longer valid")]
    InvalidTarget { target: AgentId },

    #[error("action rejected: {reason}")]
    Rejected { reason: String },
}

impl CombatError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Empty { .. } => ErrorSeverity::Internal,
            Self::InvalidTarget { .. } => ErrorSeverity::Recoverable,
            Self::Rejected { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty { .. } => "RESOLVE_EMPTY",
            Self::InvalidTarget { .. } => "RESOLVE_INVALID_TARGET",
            Self::Rejected { .. } => "RESOLVE_REJECTED",
        }
    }
}

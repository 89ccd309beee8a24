//! Action decision policies.
//!
//! A policy looks at an agent, its target and the actions that are currently
//! off cooldown, and names one action to perform. Policies are pure: they read
//! the [`DecisionContext`] and return a [`Decision`], and every random choice
//! draws from the seed in the context.
//!
//! Agents carry a [`PolicyKind`] rather than a policy object. Built-in kinds
//! resolve through [`PolicyKind::builtin`]; `Custom` kinds are looked up by
//! name in the runtime's policy registry.
mod builtin;

pub use builtin::{ClosestFit, FirstAvailable, Weighted};

use crate::env::RngOracle;
use crate::state::{ActionId, ActionProfile, AgentRecord};

/// Everything a policy may look at when deciding.
pub struct DecisionContext<'a> {
    pub agent: &'a AgentRecord,
    /// The resolved current target, if it still exists.
    pub target: Option<&'a AgentRecord>,
    /// Tile distance to the target.
    pub distance: Option<u32>,
    /// Profiles of known actions that are off cooldown, in the agent's order.
    pub available: &'a [ActionProfile],
    pub seed: u64,
    pub rng: &'a dyn RngOracle,
}

/// Outcome of a policy call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Nothing worth doing this time.
    Pass,
    Action(ActionId),
    /// The policy could not settle on one action. Treated like `Pass`.
    Ambiguous(Vec<ActionId>),
}

impl Decision {
    /// The single chosen action, if the decision names exactly one.
    pub fn chosen(&self) -> Option<ActionId> {
        match self {
            Self::Action(id) => Some(*id),
            Self::Pass | Self::Ambiguous(_) => None,
        }
    }
}

/// Strategy that picks an action for an engaged agent.
pub trait ActionDecisionPolicy {
    fn decide(&self, ctx: &DecisionContext<'_>) -> Decision;
}

/// Which policy an agent uses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolicyKind {
    /// Take the first available action.
    #[default]
    FirstAvailable,
    /// Take the tightest-ranged action that already reaches the target.
    ClosestFit,
    /// Weighted random pick over available actions.
    Weighted,
    /// Host-registered policy, looked up by name.
    Custom(String),
}

impl PolicyKind {
    /// The built-in implementation for this kind, or `None` for `Custom`.
    pub fn builtin(&self) -> Option<&'static dyn ActionDecisionPolicy> {
        match self {
            Self::FirstAvailable => Some(&FirstAvailable),
            Self::ClosestFit => Some(&ClosestFit),
            Self::Weighted => Some(&Weighted),
            Self::Custom(_) => None,
        }
    }
}

impl core::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FirstAvailable => f.write_str("first_available"),
            Self::ClosestFit => f.write_str("closest_fit"),
            Self::Weighted => f.write_str("weighted"),
            Self::Custom(name) => write!(f, "custom:{name}"),
        }
    }
}

//! Action profile oracle.
//!
//! Provides access to action definitions and their expansion into concrete
//! instances at decision time.

use crate::state::{ActionId, ActionInstance, ActionProfile, AgentRecord};

/// Oracle providing action profiles.
pub trait ActionOracle {
    /// Returns the profile for `id`, or `None` if the catalog does not know it.
    fn profile(&self, id: ActionId) -> Option<&ActionProfile>;

    /// Expands a chosen action into the concrete instances `agent` performs.
    ///
    /// The default expands every known action into its single base instance.
    /// An empty result marks the decision as invalid.
    fn instantiate(&self, agent: &AgentRecord, id: ActionId) -> Vec<ActionInstance> {
        let _ = agent;
        self.profile(id)
            .map(|profile| vec![profile.instance()])
            .unwrap_or_default()
    }
}

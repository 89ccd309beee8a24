//! Registry of host-supplied decision policies.
//!
//! Built-in [`PolicyKind`]s resolve to the policies shipped with
//! `combat-core`; `PolicyKind::Custom(name)` is looked up here.

use std::collections::HashMap;
use std::sync::Arc;

use combat_core::{ActionDecisionPolicy, PolicyKind};

use super::BehaviorError;

/// Named custom policies, shared across every agent that refers to them.
#[derive(Clone, Default)]
pub struct PolicyRegistry {
    custom: HashMap<String, Arc<dyn ActionDecisionPolicy>>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom policy under `name`.
    ///
    /// If a policy already exists under this name, it will be replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        policy: impl ActionDecisionPolicy + 'static,
    ) {
        self.custom.insert(name.into(), Arc::new(policy));
    }

    /// Remove a custom policy. Agents still referring to it fail to decide
    /// until they are given another policy.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn ActionDecisionPolicy>> {
        self.custom.remove(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.custom.contains_key(name)
    }

    /// Number of registered custom policies.
    pub fn len(&self) -> usize {
        self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.custom.is_empty()
    }

    /// Resolve the policy an agent with `kind` should use.
    ///
    /// # Errors
    ///
    /// Returns `BehaviorError::UnknownPolicy` if `kind` names a custom policy
    /// that was never registered.
    pub fn resolve(&self, kind: &PolicyKind) -> Result<&dyn ActionDecisionPolicy, BehaviorError> {
        if let Some(builtin) = kind.builtin() {
            return Ok(builtin);
        }
        match kind {
            PolicyKind::Custom(name) => self
                .custom
                .get(name)
                .map(|policy| policy.as_ref())
                .ok_or_else(|| BehaviorError::UnknownPolicy(name.clone())),
            _ => Err(BehaviorError::UnknownPolicy(kind.to_string())),
        }
    }
}

impl std::fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.custom.keys().collect();
        names.sort();
        f.debug_struct("PolicyRegistry")
            .field("custom", &names)
            .finish()
    }
}

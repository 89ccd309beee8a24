//! Public runtime API surface: errors and the policy registry.
mod errors;
mod registry;

pub use errors::{BehaviorError, Result, RuntimeError};
pub use registry::PolicyRegistry;

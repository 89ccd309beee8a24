//! Collaborator traits the behavior engine consumes.
//!
//! The engine never touches the host world directly. Movement, capability
//! checks, action data, effect resolution, global gating and randomness all
//! come in through the traits here, bundled per frame in a [`BehaviorEnv`].
mod actions;
mod archetypes;
mod capability;
mod error;
mod gate;
mod movement;
mod resolver;
mod rng;

pub use actions::ActionOracle;
pub use archetypes::{AgentTemplate, AgentTemplateBuilder, ArchetypeOracle};
pub use capability::CapabilityOracle;
pub use error::OracleError;
pub use gate::{GlobalGate, OpenGate, Suppression};
pub use movement::MovementOracle;
pub use resolver::{InteractionResolver, ResolveError};
pub use rng::{PcgRng, RngOracle, RollKind, compute_seed};

/// Aggregates the collaborators handed to one scheduler frame.
#[derive(Clone, Copy)]
pub struct BehaviorEnv<'a> {
    movement: Option<&'a dyn MovementOracle>,
    capability: Option<&'a dyn CapabilityOracle>,
    actions: Option<&'a dyn ActionOracle>,
    resolver: Option<&'a dyn InteractionResolver>,
    gate: Option<&'a dyn GlobalGate>,
    rng: Option<&'a dyn RngOracle>,
}

impl<'a> BehaviorEnv<'a> {
    pub fn new(
        movement: Option<&'a dyn MovementOracle>,
        capability: Option<&'a dyn CapabilityOracle>,
        actions: Option<&'a dyn ActionOracle>,
        resolver: Option<&'a dyn InteractionResolver>,
        gate: Option<&'a dyn GlobalGate>,
        rng: Option<&'a dyn RngOracle>,
    ) -> Self {
        Self {
            movement,
            capability,
            actions,
            resolver,
            gate,
            rng,
        }
    }

    pub fn with_all(
        movement: &'a dyn MovementOracle,
        capability: &'a dyn CapabilityOracle,
        actions: &'a dyn ActionOracle,
        resolver: &'a dyn InteractionResolver,
        gate: &'a dyn GlobalGate,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self::new(
            Some(movement),
            Some(capability),
            Some(actions),
            Some(resolver),
            Some(gate),
            Some(rng),
        )
    }

    pub fn empty() -> Self {
        Self::new(None, None, None, None, None, None)
    }

    /// Returns the MovementOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MovementNotAvailable` if no movement oracle was provided.
    pub fn movement(&self) -> Result<&'a dyn MovementOracle, OracleError> {
        self.movement.ok_or(OracleError::MovementNotAvailable)
    }

    /// Returns the CapabilityOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::CapabilityNotAvailable` if no capability oracle was provided.
    pub fn capability(&self) -> Result<&'a dyn CapabilityOracle, OracleError> {
        self.capability.ok_or(OracleError::CapabilityNotAvailable)
    }

    /// Returns the ActionOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ActionsNotAvailable` if no actions oracle was provided.
    pub fn actions(&self) -> Result<&'a dyn ActionOracle, OracleError> {
        self.actions.ok_or(OracleError::ActionsNotAvailable)
    }

    /// Returns the InteractionResolver, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ResolverNotAvailable` if no resolver was provided.
    pub fn resolver(&self) -> Result<&'a dyn InteractionResolver, OracleError> {
        self.resolver.ok_or(OracleError::ResolverNotAvailable)
    }

    /// Returns the GlobalGate, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::GateNotAvailable` if no gate was provided.
    pub fn gate(&self) -> Result<&'a dyn GlobalGate, OracleError> {
        self.gate.ok_or(OracleError::GateNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a dyn RngOracle, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Current suppression reason; a missing gate never suppresses.
    pub fn suppression(&self) -> Option<Suppression> {
        self.gate.and_then(|gate| gate.suppression())
    }
}

impl core::fmt::Debug for BehaviorEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BehaviorEnv")
            .field("movement", &self.movement.is_some())
            .field("capability", &self.capability.is_some())
            .field("actions", &self.actions.is_some())
            .field("resolver", &self.resolver.is_some())
            .field("gate", &self.gate.is_some())
            .field("rng", &self.rng.is_some())
            .finish()
    }
}

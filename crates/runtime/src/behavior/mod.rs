//! Per-agent phase handlers.
//!
//! [`execute_behavior`] runs one agent for one frame. It works on the
//! caller's copy of the record and only reads other agents through the
//! registry, so a failing dispatch can be discarded without touching shared
//! state.
//!
//! Every handler re-checks liveness and target validity itself: agents
//! dispatched earlier in the same frame may have killed, moved or removed
//! anything captured before.
mod approach;
mod cooldown;
mod decide;
mod engagement;
mod idle;
mod spacing;

use combat_core::{
    AgentRecord, BehaviorConfig, BehaviorEnv, Frame, Phase, Registry, RollKind, compute_seed,
};

use crate::api::{BehaviorError, PolicyRegistry};

/// Read-only view of everything a handler may consult besides its own agent.
pub struct BehaviorContext<'a> {
    pub registry: &'a Registry,
    pub config: &'a BehaviorConfig,
    pub policies: &'a PolicyRegistry,
    pub env: &'a BehaviorEnv<'a>,
    pub frame: Frame,
    pub seed: u64,
}

impl BehaviorContext<'_> {
    /// Seed for one roll of `agent` on the current frame.
    pub fn roll_seed(&self, agent: &AgentRecord, kind: RollKind) -> u64 {
        compute_seed(self.seed, self.frame.0, agent.id.0, kind)
    }
}

/// Runs one frame of behavior for `agent`.
///
/// # Errors
///
/// Returns [`BehaviorError`] when a collaborator is missing, a policy cannot
/// be resolved, or a phase change is rejected. The caller discards the
/// agent's changes for this frame.
pub fn execute_behavior(
    agent: &mut AgentRecord,
    ctx: &BehaviorContext<'_>,
) -> Result<(), BehaviorError> {
    agent.tick_timers();

    let Some(target) = agent.current_target else {
        return idle::run(agent, ctx);
    };

    if engagement::adjust_target(agent, ctx)?.is_disengaged() {
        return Ok(());
    }

    match agent.phase {
        // Engaged through a direct record update rather than a provocation.
        Phase::Idle => {
            agent.engage(agent.current_target.unwrap_or(target))?;
            Ok(())
        }
        Phase::Approach => approach::run(agent, ctx),
        Phase::Decide => decide::run(agent, ctx),
        Phase::Cooldown => cooldown::run(agent, ctx),
    }
}

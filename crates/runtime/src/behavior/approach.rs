//! Approach phase: reposition until the think delay runs out.

use combat_core::{AgentRecord, PhaseEvent};

use super::BehaviorContext;
use super::engagement::{live_agent, pursue};
use super::spacing::{can_reposition, keep_distance};
use crate::api::BehaviorError;

pub(crate) fn run(agent: &mut AgentRecord, ctx: &BehaviorContext<'_>) -> Result<(), BehaviorError> {
    if agent.timers.wait == 0 {
        agent.apply(PhaseEvent::ReadyToDecide)?;
        tracing::debug!("{} ready to decide", agent.id);
        return Ok(());
    }
    if leader_has_decided(agent, ctx)? {
        agent.timers.wait = 0;
        agent.apply(PhaseEvent::ReadyToDecide)?;
        tracing::debug!("{} follows its leader into a decision", agent.id);
        return Ok(());
    }

    if !can_reposition(agent, ctx)? {
        return Ok(());
    }
    let Some(engagement) = pursue(agent, ctx)? else {
        return Ok(());
    };
    keep_distance(agent, &engagement, ctx)
}

/// Followers skip their own think delay once their leader has committed.
fn leader_has_decided(
    agent: &AgentRecord,
    ctx: &BehaviorContext<'_>,
) -> Result<bool, BehaviorError> {
    let Some(leader) = agent.leader else {
        return Ok(false);
    };
    Ok(live_agent(leader, ctx)?.is_some_and(AgentRecord::is_action_decided))
}

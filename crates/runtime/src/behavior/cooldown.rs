//! Cooldown phase: wait out recovery, keep spacing, then loop back.

use combat_core::{AgentRecord, PhaseEvent};

use super::BehaviorContext;
use super::engagement::measure;
use super::spacing::{can_reposition, keep_distance};
use crate::api::BehaviorError;

pub(crate) fn run(agent: &mut AgentRecord, ctx: &BehaviorContext<'_>) -> Result<(), BehaviorError> {
    if agent.timers.wait == 0 {
        agent.clear_decision();
        agent.apply(PhaseEvent::Recovered)?;
        agent.timers.wait = agent.think_frames;
        tracing::debug!("{} recovered, approaching again", agent.id);
        return Ok(());
    }

    if !can_reposition(agent, ctx)? {
        return Ok(());
    }
    // No pursuit limit here: a recovering agent never gives up mid-cooldown.
    let Some(engagement) = measure(agent, ctx)? else {
        return Ok(());
    };
    keep_distance(agent, &engagement, ctx)
}

//! Distance keeping while engaged.

use combat_core::{AgentRecord, Position, RollKind, Spacing};

use super::BehaviorContext;
use super::engagement::Engagement;
use crate::api::BehaviorError;

/// Requests one step toward `destination` and refreshes the position proxy.
pub(crate) fn step_to(
    agent: &mut AgentRecord,
    destination: Position,
    ctx: &BehaviorContext<'_>,
) -> Result<(), BehaviorError> {
    let movement = ctx.env.movement()?;
    movement.step_toward(agent.entity, destination);
    if let Some(position) = movement.position(agent.entity) {
        agent.position = position;
    }
    Ok(())
}

/// True if the agent may issue a movement request this frame.
pub(crate) fn can_reposition(
    agent: &AgentRecord,
    ctx: &BehaviorContext<'_>,
) -> Result<bool, BehaviorError> {
    let movement = ctx.env.movement()?;
    Ok(!movement.is_busy(agent.entity) && ctx.env.capability()?.can_move(agent))
}

/// Backs off when too close, closes in when too far, then maybe turns to
/// face the target.
pub(crate) fn keep_distance(
    agent: &mut AgentRecord,
    engagement: &Engagement<'_>,
    ctx: &BehaviorContext<'_>,
) -> Result<(), BehaviorError> {
    match agent.spatial.classify(engagement.distance) {
        Spacing::Close => {
            let away = agent.position.step_away(engagement.position);
            step_to(agent, away, ctx)?;
        }
        Spacing::Far => step_to(agent, engagement.position, ctx)?,
        Spacing::Safe => {}
    }

    let seed = ctx.roll_seed(agent, RollKind::FaceTarget);
    if ctx
        .env
        .rng()?
        .roll_percent(seed, ctx.config.face_target_chance)
    {
        ctx.env
            .movement()?
            .turn_toward(agent.entity, engagement.position);
    }
    Ok(())
}

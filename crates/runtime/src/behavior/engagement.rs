//! Target validation, re-targeting and the pursuit limit.

use combat_core::{AgentId, AgentRecord, Position};

use super::BehaviorContext;
use crate::api::BehaviorError;

/// Result of validating the current target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TargetAdjustment {
    Kept,
    Retargeted(AgentId),
    Disengaged,
}

impl TargetAdjustment {
    pub(crate) fn is_disengaged(self) -> bool {
        self == Self::Disengaged
    }
}

/// A validated target together with its live position.
pub(crate) struct Engagement<'a> {
    pub target: &'a AgentRecord,
    pub position: Position,
    pub distance: u32,
}

/// Resolves `id` to a record that is registered and alive right now.
pub(crate) fn live_agent<'a>(
    id: AgentId,
    ctx: &BehaviorContext<'a>,
) -> Result<Option<&'a AgentRecord>, BehaviorError> {
    let capability = ctx.env.capability()?;
    Ok(ctx
        .registry
        .resolve_target(id)
        .filter(|record| capability.is_alive(record.entity)))
}

/// Drops a target that died or left tracking, picking the closest visible
/// opponent instead. Disengages when nobody is left.
pub(crate) fn adjust_target(
    agent: &mut AgentRecord,
    ctx: &BehaviorContext<'_>,
) -> Result<TargetAdjustment, BehaviorError> {
    let Some(target) = agent.current_target else {
        return Ok(TargetAdjustment::Disengaged);
    };
    if live_agent(target, ctx)?.is_some() {
        return Ok(TargetAdjustment::Kept);
    }

    match closest_live_opponent(agent, ctx)? {
        Some(replacement) => {
            tracing::debug!("{} lost {}, retargeting {}", agent.id, target, replacement);
            agent.current_target = Some(replacement);
            Ok(TargetAdjustment::Retargeted(replacement))
        }
        None => {
            tracing::debug!("{} lost {} with no opponent in sight", agent.id, target);
            agent.disengage();
            Ok(TargetAdjustment::Disengaged)
        }
    }
}

/// Measures the engagement and disengages when the target is unmeasurable or
/// beyond the pursuit limit.
///
/// Returns `None` if the agent disengaged (or the target vanished) and the
/// frame should stop here.
pub(crate) fn pursue<'a>(
    agent: &mut AgentRecord,
    ctx: &BehaviorContext<'a>,
) -> Result<Option<Engagement<'a>>, BehaviorError> {
    let engagement = measure(agent, ctx)?;
    let limit = ctx.config.pursuit_limit(agent.spatial.pursuit_radius);

    match engagement {
        Some(engagement) if engagement.distance <= limit => Ok(Some(engagement)),
        Some(engagement) => {
            tracing::debug!(
                "{} disengages: {} is {} tiles away (limit {})",
                agent.id,
                engagement.target.id,
                engagement.distance,
                limit
            );
            agent.disengage();
            Ok(None)
        }
        None => {
            tracing::debug!("{} disengages: target distance unmeasurable", agent.id);
            agent.disengage();
            Ok(None)
        }
    }
}

/// Measures the distance to the current target without enforcing any limit.
pub(crate) fn measure<'a>(
    agent: &AgentRecord,
    ctx: &BehaviorContext<'a>,
) -> Result<Option<Engagement<'a>>, BehaviorError> {
    let Some(id) = agent.current_target else {
        return Ok(None);
    };
    let Some(target) = live_agent(id, ctx)? else {
        return Ok(None);
    };
    let Some(position) = ctx.env.movement()?.position(target.entity) else {
        return Ok(None);
    };
    Ok(Some(Engagement {
        target,
        position,
        distance: agent.position.distance(position),
    }))
}

fn closest_live_opponent(
    agent: &AgentRecord,
    ctx: &BehaviorContext<'_>,
) -> Result<Option<AgentId>, BehaviorError> {
    let capability = ctx.env.capability()?;
    Ok(ctx
        .registry
        .closest_opponent_where(agent.id, |other| capability.is_alive(other.entity)))
}

/// Nearest live teammate of `agent`, used as the target of ally actions.
pub(crate) fn nearest_live_teammate(
    agent: &AgentRecord,
    ctx: &BehaviorContext<'_>,
) -> Result<Option<AgentId>, BehaviorError> {
    let capability = ctx.env.capability()?;
    let candidates: Vec<AgentId> = ctx
        .registry
        .teammates(agent.id)
        .into_iter()
        .filter(|id| {
            ctx.registry
                .resolve_target(*id)
                .is_some_and(|other| capability.is_alive(other.entity))
        })
        .collect();
    Ok(ctx
        .registry
        .nearest_first(&candidates, agent.position)
        .first()
        .copied())
}

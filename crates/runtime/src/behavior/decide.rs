//! Decide phase: pick an action, close to its range, fire it.

use combat_core::{
    ActionProfile, ActionScope, AgentRecord, DecidedAction, DecisionContext, PhaseEvent,
    Position, RollKind,
};

use super::BehaviorContext;
use super::engagement::{Engagement, live_agent, nearest_live_teammate, pursue};
use super::spacing::{can_reposition, step_to};
use crate::api::BehaviorError;

pub(crate) fn run(agent: &mut AgentRecord, ctx: &BehaviorContext<'_>) -> Result<(), BehaviorError> {
    let Some(engagement) = pursue(agent, ctx)? else {
        return Ok(());
    };

    if !agent.is_action_decided() {
        if agent.timers.wait > 0 {
            return Ok(());
        }
        return choose_action(agent, &engagement, ctx);
    }

    if !agent.is_in_position() {
        return take_position(agent, &engagement, ctx);
    }

    if agent.timers.cast == 0 && agent.timers.wait == 0 {
        return fire(agent, &engagement, ctx);
    }
    Ok(())
}

fn choose_action(
    agent: &mut AgentRecord,
    engagement: &Engagement<'_>,
    ctx: &BehaviorContext<'_>,
) -> Result<(), BehaviorError> {
    let actions = ctx.env.actions()?;
    let available: Vec<ActionProfile> = agent
        .ready_actions()
        .filter_map(|id| actions.profile(id).cloned())
        .collect();

    let policy = ctx.policies.resolve(&agent.policy)?;
    let decision = policy.decide(&DecisionContext {
        agent: &*agent,
        target: Some(engagement.target),
        distance: Some(engagement.distance),
        available: &available,
        seed: ctx.roll_seed(agent, RollKind::Decision),
        rng: ctx.env.rng()?,
    });

    let Some(action) = decision
        .chosen()
        .filter(|id| available.iter().any(|profile| profile.id == *id))
    else {
        tracing::warn!("{} made no usable decision: {:?}", agent.id, decision);
        agent.cancel_decision(ctx.config.invalid_decision_retry);
        return Ok(());
    };

    if !ctx.env.capability()?.can_execute(agent, action) {
        tracing::warn!("{} cannot execute {} right now", agent.id, action);
        agent.cancel_decision(ctx.config.capability_retry);
        return Ok(());
    }

    let Some(decided) = DecidedAction::from_instances(actions.instantiate(agent, action)) else {
        tracing::warn!("{} got no instances for {}", agent.id, action);
        agent.cancel_decision(ctx.config.invalid_decision_retry);
        return Ok(());
    };

    if decided.primary().is_some_and(|primary| primary.scope == ActionScope::Ally) {
        match nearest_live_teammate(agent, ctx)? {
            Some(ally) => agent.ally_target = Some(ally),
            None => {
                tracing::warn!("{} decided {} with no ally to aim at", agent.id, action);
                agent.cancel_decision(ctx.config.invalid_decision_retry);
                return Ok(());
            }
        }
    }

    agent.commit_decision(decided, ctx.config.post_decision_wait);
    tracing::debug!(
        "{} decided {} against {} at distance {}",
        agent.id,
        action,
        engagement.target.id,
        engagement.distance
    );
    Ok(())
}

fn take_position(
    agent: &mut AgentRecord,
    engagement: &Engagement<'_>,
    ctx: &BehaviorContext<'_>,
) -> Result<(), BehaviorError> {
    if agent.timers.wait > 0 || !can_reposition(agent, ctx)? {
        return Ok(());
    }
    let Some(primary) = agent.decided.primary().copied() else {
        return Ok(());
    };

    let destination = match primary.scope {
        ActionScope::SelfTarget => {
            agent.mark_in_position();
            return Ok(());
        }
        ActionScope::Enemy => engagement.position,
        ActionScope::Ally => match ally_position(agent, ctx)? {
            Some(position) => position,
            None => {
                tracing::warn!("{} lost its ally target", agent.id);
                agent.cancel_decision(ctx.config.invalid_decision_retry);
                return Ok(());
            }
        },
    };

    if agent.position.distance(destination) > primary.range {
        step_to(agent, destination, ctx)?;
    }
    if agent.position.distance(destination) <= primary.range {
        agent.mark_in_position();
        tracing::debug!("{} in position for {}", agent.id, primary.action);
    }
    Ok(())
}

fn fire(
    agent: &mut AgentRecord,
    engagement: &Engagement<'_>,
    ctx: &BehaviorContext<'_>,
) -> Result<(), BehaviorError> {
    let Some(primary) = agent.decided.primary().copied() else {
        return Ok(());
    };

    let target = match primary.scope {
        ActionScope::SelfTarget => None,
        ActionScope::Enemy => Some(engagement.target),
        ActionScope::Ally => {
            let ally = match agent.ally_target {
                Some(ally) => live_agent(ally, ctx)?,
                None => None,
            };
            if ally.is_none() {
                tracing::warn!("{} lost its ally target before firing", agent.id);
                agent.cancel_decision(ctx.config.invalid_decision_retry);
                return Ok(());
            }
            ally
        }
    };
    if let Some(target) = target {
        let facing = ctx
            .env
            .movement()?
            .position(target.entity)
            .unwrap_or(target.position);
        ctx.env.movement()?.turn_toward(agent.entity, facing);
    }

    if let Err(err) = ctx
        .env
        .resolver()?
        .execute(agent.decided.instances(), agent, target)
    {
        tracing::warn!("{} failed to resolve {}: {}", agent.id, primary.action, err);
    }

    let cooldown = ctx
        .env
        .actions()?
        .profile(primary.action)
        .map_or(0, |profile| profile.cooldown);
    agent.cooldowns.arm(primary.cooldown_group, cooldown);
    agent.timers.wait = ctx
        .config
        .post_execution_wait
        .saturating_add(primary.recovery);
    agent.apply(PhaseEvent::Executed)?;
    tracing::debug!("{} executed {}", agent.id, primary.action);
    Ok(())
}

fn ally_position(
    agent: &AgentRecord,
    ctx: &BehaviorContext<'_>,
) -> Result<Option<Position>, BehaviorError> {
    let Some(ally) = agent.ally_target else {
        return Ok(None);
    };
    let Some(record) = live_agent(ally, ctx)? else {
        return Ok(None);
    };
    Ok(ctx.env.movement()?.position(record.entity))
}

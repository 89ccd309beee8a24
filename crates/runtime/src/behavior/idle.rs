//! Idle phase: alerts, returning home and wandering.

use combat_core::{AgentFlags, AgentRecord, RollKind};

use super::BehaviorContext;
use super::spacing::{can_reposition, step_to};
use crate::api::BehaviorError;

pub(crate) fn run(agent: &mut AgentRecord, ctx: &BehaviorContext<'_>) -> Result<(), BehaviorError> {
    if !can_reposition(agent, ctx)? {
        return Ok(());
    }

    if agent.is_alerted() {
        return investigate(agent, ctx);
    }

    if !agent.is_idle() {
        if !agent.at_home() {
            let home = agent.home;
            step_to(agent, home, ctx)?;
        }
        if agent.at_home() {
            tracing::debug!("{} settled at home {}", agent.id, agent.home);
            agent.flags.insert(AgentFlags::IDLE);
        }
        return Ok(());
    }

    wander(agent, ctx)
}

fn investigate(agent: &mut AgentRecord, ctx: &BehaviorContext<'_>) -> Result<(), BehaviorError> {
    let Some(spot) = agent.alert else {
        agent.clear_alert();
        return Ok(());
    };
    if agent.position != spot {
        step_to(agent, spot, ctx)?;
    }
    if agent.position == spot {
        tracing::debug!("{} reached alert spot {}", agent.id, spot);
        agent.clear_alert();
    }
    Ok(())
}

/// One low-probability step per eligible frame: random near home, homeward
/// once too far out.
fn wander(agent: &mut AgentRecord, ctx: &BehaviorContext<'_>) -> Result<(), BehaviorError> {
    if agent.timers.idle_action > 0 {
        return Ok(());
    }

    let rng = ctx.env.rng()?;
    let roll = ctx.roll_seed(agent, RollKind::IdleMove);
    if !rng.roll_percent(roll, ctx.config.idle_move_chance) {
        return Ok(());
    }

    let destination = if agent.position.distance(agent.home) < ctx.config.idle_wander_radius {
        let direction = rng.next_u32(ctx.roll_seed(agent, RollKind::WanderDirection));
        agent.position.neighbor(direction)
    } else {
        agent.home
    };
    step_to(agent, destination, ctx)?;
    agent.timers.idle_action = ctx.config.idle_action_cooldown;
    Ok(())
}

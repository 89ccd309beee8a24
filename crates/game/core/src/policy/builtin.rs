//! Built-in decision policies.

use super::{ActionDecisionPolicy, Decision, DecisionContext};
use crate::state::ActionScope;

/// Picks the first available action.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstAvailable;

impl ActionDecisionPolicy for FirstAvailable {
    fn decide(&self, ctx: &DecisionContext<'_>) -> Decision {
        ctx.available
            .first()
            .map_or(Decision::Pass, |profile| Decision::Action(profile.id))
    }
}

/// Prefers the shortest-ranged enemy action that already reaches the target.
///
/// When nothing reaches, the longest-ranged enemy action is chosen so the
/// agent closes the smallest gap. Agents with no enemy actions fall back to
/// the first available action.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClosestFit;

impl ActionDecisionPolicy for ClosestFit {
    fn decide(&self, ctx: &DecisionContext<'_>) -> Decision {
        let Some(distance) = ctx.distance else {
            return FirstAvailable.decide(ctx);
        };

        let mut offensive = ctx
            .available
            .iter()
            .filter(|profile| profile.scope == ActionScope::Enemy)
            .peekable();
        if offensive.peek().is_none() {
            return FirstAvailable.decide(ctx);
        }

        let (reaching, short): (Vec<_>, Vec<_>) =
            offensive.partition(|profile| profile.range >= distance);

        // min_by_key/max_by_key keep the first/last of equal keys respectively.
        if let Some(best) = reaching.iter().min_by_key(|profile| profile.range) {
            return Decision::Action(best.id);
        }
        short
            .iter()
            .rev()
            .max_by_key(|profile| profile.range)
            .map_or(Decision::Pass, |profile| Decision::Action(profile.id))
    }
}

/// Weighted random choice over available actions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Weighted;

impl ActionDecisionPolicy for Weighted {
    fn decide(&self, ctx: &DecisionContext<'_>) -> Decision {
        let total: u32 = ctx.available.iter().map(|profile| profile.weight).sum();
        if total == 0 {
            return Decision::Pass;
        }

        let mut roll = ctx.rng.range(ctx.seed, 0, total - 1);
        for profile in ctx.available {
            if roll < profile.weight {
                return Decision::Action(profile.id);
            }
            roll -= profile.weight;
        }
        Decision::Pass
    }
}

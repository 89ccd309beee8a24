//! Per-agent mutable behavior state.
//!
//! # Invariants
//!
//! - An agent without `current_target` is never in an engaged phase.
//! - `IN_POSITION` is only set while `ACTION_DECIDED` is set; clearing the
//!   decision always clears positioning too.
//! - `ACTION_DECIDED` is set exactly when `decided` holds instances.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use super::action::{ActionId, CooldownGroup, Cooldowns, DecidedAction};
use super::common::{AgentId, EntityId, Position, Team};
use super::phase::{Phase, PhaseEvent, TransitionError};
use crate::config::BehaviorConfig;
use crate::policy::PolicyKind;

bitflags! {
    /// Boolean behavior flags of an agent.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct AgentFlags: u8 {
        /// Settled at home; eligible for idle wandering.
        const IDLE           = 1 << 0;
        /// Disturbed without engagement; heading to `alert` coordinates.
        const ALERTED        = 1 << 1;
        /// Within range of the decided action.
        const IN_POSITION    = 1 << 2;
        /// `decided` holds an action waiting to fire.
        const ACTION_DECIDED = 1 << 3;
    }
}

/// What kind of body the agent has.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AgentKind {
    /// Regular behavior-driven fighter.
    #[default]
    Combatant,
    /// Decorative or inanimate body (training dummy, barrel); never scheduled.
    Inanimate,
}

/// Frame-counted timers. Each dispatch decrements them by one (saturating).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Timers {
    /// Frames until the next decision attempt / end of the current pause.
    pub wait: u32,
    /// Frames until a positioned, decided action fires.
    pub cast: u32,
    /// Frames until the next idle move is allowed.
    pub idle_action: u32,
}

/// Per-agent spatial parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpatialParams {
    /// Beyond this distance from its target the agent gives up.
    pub pursuit_radius: u32,
    /// Radius for target acquisition queries.
    pub sight_radius: u32,
    /// Distances below this are "close": back off.
    pub keep_away: u32,
    /// Distances above this are "far": close in.
    pub engage_distance: u32,
}

impl Default for SpatialParams {
    fn default() -> Self {
        Self {
            pursuit_radius: 10,
            sight_radius: 8,
            keep_away: 1,
            engage_distance: 2,
        }
    }
}

/// Result of classifying the distance to a target against spacing thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Spacing {
    Close,
    Safe,
    Far,
}

impl SpatialParams {
    pub fn classify(&self, distance: u32) -> Spacing {
        if distance < self.keep_away {
            Spacing::Close
        } else if distance > self.engage_distance {
            Spacing::Far
        } else {
            Spacing::Safe
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("{agent} is in phase {phase} without a target")]
    EngagedWithoutTarget { agent: AgentId, phase: Phase },

    #[error("{agent} is in position without a decided action")]
    InPositionWithoutDecision { agent: AgentId },

    #[error("{agent} decision flag does not match its decided action list")]
    DecisionFlagMismatch { agent: AgentId },
}

/// One behavior-driven combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentRecord {
    pub id: AgentId,
    pub entity: EntityId,
    pub team: Team,
    pub kind: AgentKind,
    pub phase: Phase,

    /// Position proxy, refreshed from the world each running frame.
    pub position: Position,
    /// Liveness proxy, refreshed alongside `position`.
    pub alive: bool,

    pub timers: Timers,

    pub current_target: Option<AgentId>,
    pub ally_target: Option<AgentId>,

    pub flags: AgentFlags,
    /// Last known coordinates of whatever alerted the agent.
    pub alert: Option<Position>,

    pub decided: DecidedAction,

    pub home: Position,
    pub spatial: SpatialParams,

    /// Known action set.
    pub actions: ArrayVec<ActionId, { BehaviorConfig::MAX_ACTIONS }>,
    pub cooldowns: Cooldowns,
    pub policy: PolicyKind,

    /// Leader whose decisions this agent defers to.
    pub leader: Option<AgentId>,
    /// Think delay armed on every entry into Approach.
    pub think_frames: u32,
}

impl AgentRecord {
    pub const DEFAULT_THINK_FRAMES: u32 = 20;

    /// Creates an idle combatant standing on its home anchor.
    pub fn new(id: AgentId, entity: EntityId, team: Team, home: Position) -> Self {
        Self {
            id,
            entity,
            team,
            kind: AgentKind::Combatant,
            phase: Phase::Idle,
            position: home,
            alive: true,
            timers: Timers::default(),
            current_target: None,
            ally_target: None,
            flags: AgentFlags::IDLE,
            alert: None,
            decided: DecidedAction::default(),
            home,
            spatial: SpatialParams::default(),
            actions: ArrayVec::new(),
            cooldowns: Cooldowns::default(),
            policy: PolicyKind::default(),
            leader: None,
            think_frames: Self::DEFAULT_THINK_FRAMES,
        }
    }

    pub fn with_kind(mut self, kind: AgentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_spatial(mut self, spatial: SpatialParams) -> Self {
        self.spatial = spatial;
        self
    }

    /// Sets the known action set. Actions beyond the capacity are ignored.
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = ActionId>) -> Self {
        self.actions = actions
            .into_iter()
            .take(BehaviorConfig::MAX_ACTIONS)
            .collect();
        self
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_leader(mut self, leader: AgentId) -> Self {
        self.leader = Some(leader);
        self
    }

    pub fn with_think_frames(mut self, frames: u32) -> Self {
        self.think_frames = frames;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub fn is_engaged(&self) -> bool {
        self.current_target.is_some()
    }

    #[inline]
    pub fn is_action_decided(&self) -> bool {
        self.flags.contains(AgentFlags::ACTION_DECIDED)
    }

    #[inline]
    pub fn is_in_position(&self) -> bool {
        self.flags.contains(AgentFlags::IN_POSITION)
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags.contains(AgentFlags::IDLE)
    }

    #[inline]
    pub fn is_alerted(&self) -> bool {
        self.flags.contains(AgentFlags::ALERTED)
    }

    #[inline]
    pub fn is_inanimate(&self) -> bool {
        self.kind == AgentKind::Inanimate
    }

    #[inline]
    pub fn at_home(&self) -> bool {
        self.position == self.home
    }

    /// Applies a phase event through the transition table.
    pub fn apply(&mut self, event: PhaseEvent) -> Result<Phase, TransitionError> {
        self.phase = self.phase.transition(event)?;
        Ok(self.phase)
    }

    /// Assigns `target` and enters the engaged cycle.
    ///
    /// An agent that is already engaged only switches targets; its phase and
    /// timers are left alone.
    pub fn engage(&mut self, target: AgentId) -> Result<(), TransitionError> {
        self.current_target = Some(target);
        self.flags.remove(AgentFlags::IDLE | AgentFlags::ALERTED);
        self.alert = None;
        if self.phase == Phase::Idle {
            self.apply(PhaseEvent::Engage)?;
            self.timers.wait = self.think_frames;
        }
        Ok(())
    }

    /// Drops targets and decision and returns to Idle.
    pub fn disengage(&mut self) {
        self.current_target = None;
        self.clear_decision();
        self.timers.wait = 0;
        // Disengage is accepted from every phase.
        self.phase = self
            .phase
            .transition(PhaseEvent::Disengage)
            .unwrap_or(Phase::Idle);
    }

    /// Marks the agent as alerted toward `source` (only while not engaged).
    pub fn raise_alert(&mut self, source: Position) -> bool {
        if self.is_engaged() {
            return false;
        }
        self.flags.insert(AgentFlags::ALERTED);
        self.flags.remove(AgentFlags::IDLE);
        self.alert = Some(source);
        true
    }

    pub fn clear_alert(&mut self) {
        self.flags.remove(AgentFlags::ALERTED);
        self.alert = None;
    }

    /// Stores a freshly decided action and starts the post-decision pause.
    pub fn commit_decision(&mut self, decided: DecidedAction, post_decision_wait: u32) {
        self.timers.cast = decided.primary().map(|p| p.cast_time).unwrap_or(0);
        self.flags.set(AgentFlags::ACTION_DECIDED, !decided.is_empty());
        self.flags.remove(AgentFlags::IN_POSITION);
        self.decided = decided;
        self.timers.wait = post_decision_wait;
    }

    /// Clears the decided action together with the positioning flag.
    pub fn clear_decision(&mut self) {
        self.decided.clear();
        self.flags
            .remove(AgentFlags::ACTION_DECIDED | AgentFlags::IN_POSITION);
        self.timers.cast = 0;
        self.ally_target = None;
    }

    /// Abandons the current decision attempt and backs off for `retry` frames.
    pub fn cancel_decision(&mut self, retry: u32) {
        self.clear_decision();
        self.timers.wait = retry;
    }

    /// Sets `IN_POSITION`; refused unless an action is decided.
    pub fn mark_in_position(&mut self) -> bool {
        if !self.is_action_decided() {
            return false;
        }
        self.flags.insert(AgentFlags::IN_POSITION);
        true
    }

    /// Advances every timer by one frame.
    pub fn tick_timers(&mut self) {
        self.timers.wait = self.timers.wait.saturating_sub(1);
        self.timers.idle_action = self.timers.idle_action.saturating_sub(1);
        if self.is_in_position() {
            self.timers.cast = self.timers.cast.saturating_sub(1);
        }
        self.cooldowns.tick();
    }

    /// Known actions whose cooldown group is not locked.
    pub fn ready_actions(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.actions
            .iter()
            .copied()
            .filter(|action| self.cooldowns.is_ready(CooldownGroup::of(*action)))
    }

    /// Checks the record's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.current_target.is_none() && self.phase.is_engaged() {
            return Err(InvariantViolation::EngagedWithoutTarget {
                agent: self.id,
                phase: self.phase,
            });
        }
        if self.is_in_position() && !self.is_action_decided() {
            return Err(InvariantViolation::InPositionWithoutDecision { agent: self.id });
        }
        if self.is_action_decided() == self.decided.is_empty() {
            return Err(InvariantViolation::DecisionFlagMismatch { agent: self.id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::action::{ActionProfile, ActionScope};

    fn agent() -> AgentRecord {
        AgentRecord::new(AgentId(1), EntityId(1), Team(1), Position::ORIGIN)
            .with_actions([ActionId(1), ActionId(2)])
            .with_think_frames(3)
    }

    fn decided() -> DecidedAction {
        let profile =
            ActionProfile::new(ActionId(1), "slash", ActionScope::Enemy, 1).with_timing(2, 0, 0);
        DecidedAction::from_instances([profile.instance()]).unwrap()
    }

    #[test]
    fn engage_moves_idle_agent_into_approach() {
        let mut agent = agent();
        agent.engage(AgentId(9)).unwrap();

        assert_eq!(agent.phase, Phase::Approach);
        assert_eq!(agent.current_target, Some(AgentId(9)));
        assert_eq!(agent.timers.wait, 3);
        assert!(!agent.is_idle());
        agent.check_invariants().unwrap();
    }

    #[test]
    fn retargeting_keeps_phase_and_timers() {
        let mut agent = agent();
        agent.engage(AgentId(9)).unwrap();
        agent.apply(PhaseEvent::ReadyToDecide).unwrap();
        agent.timers.wait = 7;

        agent.engage(AgentId(10)).unwrap();

        assert_eq!(agent.phase, Phase::Decide);
        assert_eq!(agent.timers.wait, 7);
        assert_eq!(agent.current_target, Some(AgentId(10)));
    }

    #[test]
    fn disengage_clears_everything_engaged() {
        let mut agent = agent();
        agent.engage(AgentId(9)).unwrap();
        agent.commit_decision(decided(), 0);
        agent.mark_in_position();

        agent.disengage();

        assert_eq!(agent.phase, Phase::Idle);
        assert_eq!(agent.current_target, None);
        assert!(!agent.is_action_decided());
        assert!(!agent.is_in_position());
        agent.check_invariants().unwrap();
    }

    #[test]
    fn in_position_requires_decision() {
        let mut agent = agent();
        assert!(!agent.mark_in_position());

        agent.commit_decision(decided(), 0);
        assert!(agent.mark_in_position());

        agent.clear_decision();
        assert!(!agent.is_in_position());
    }

    #[test]
    fn cast_timer_only_runs_in_position() {
        let mut agent = agent();
        agent.commit_decision(decided(), 0);
        assert_eq!(agent.timers.cast, 2);

        agent.tick_timers();
        assert_eq!(agent.timers.cast, 2);

        agent.mark_in_position();
        agent.tick_timers();
        assert_eq!(agent.timers.cast, 1);
    }

    #[test]
    fn cooling_actions_are_not_ready() {
        let mut agent = agent();
        agent.cooldowns.arm(CooldownGroup::of(ActionId(1)), 5);

        let ready: Vec<_> = agent.ready_actions().collect();
        assert_eq!(ready, vec![ActionId(2)]);
    }

    #[test]
    fn alert_is_ignored_while_engaged() {
        let mut agent = agent();
        assert!(agent.raise_alert(Position::new(4, 4)));
        assert!(agent.is_alerted());

        agent.engage(AgentId(2)).unwrap();
        assert!(!agent.is_alerted());
        assert!(!agent.raise_alert(Position::new(1, 1)));
    }

    #[test]
    fn spacing_classification_uses_both_thresholds() {
        let spatial = SpatialParams {
            keep_away: 2,
            engage_distance: 4,
            ..SpatialParams::default()
        };
        assert_eq!(spatial.classify(1), Spacing::Close);
        assert_eq!(spatial.classify(2), Spacing::Safe);
        assert_eq!(spatial.classify(4), Spacing::Safe);
        assert_eq!(spatial.classify(5), Spacing::Far);
    }

    #[test]
    fn invariant_check_flags_targetless_engagement() {
        let mut agent = agent();
        agent.phase = Phase::Decide;
        assert_eq!(
            agent.check_invariants(),
            Err(InvariantViolation::EngagedWithoutTarget {
                agent: AgentId(1),
                phase: Phase::Decide
            })
        );
    }
}

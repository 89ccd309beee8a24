//! Action identities, static profiles and the concrete instances an agent fires.

use std::fmt;

use arrayvec::ArrayVec;

use crate::config::BehaviorConfig;

/// Abstract action (skill) identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionId(pub u16);

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

/// Key under which per-action recovery timers are tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CooldownGroup(pub u16);

impl CooldownGroup {
    /// Cooldown group derived from an action's identity.
    pub const fn of(action: ActionId) -> Self {
        Self(action.0)
    }
}

/// Who an action is aimed at, which decides whether the agent has to move.
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
pub enum ActionScope {
    /// Centered on the caster; never requires closing distance.
    SelfTarget,
    /// Aimed at the current (hostile) target.
    #[default]
    Enemy,
    /// Aimed at a teammate held in `ally_target`.
    Ally,
}

/// Static definition of an action, loaded from content files.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionProfile {
    pub id: ActionId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scope: ActionScope,
    /// Proximity threshold: maximum tile distance the action can be fired from.
    pub range: u32,
    /// Frames between reaching position and the action firing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cast_time: u32,
    /// Extra frames added to the post-execution wait.
    #[cfg_attr(feature = "serde", serde(default))]
    pub recovery: u32,
    /// Frames the action's cooldown group stays locked after firing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    /// Relative weight for weighted decision policies.
    #[cfg_attr(feature = "serde", serde(default = "ActionProfile::default_weight"))]
    pub weight: u32,
}

impl ActionProfile {
    pub const DEFAULT_WEIGHT: u32 = 10;

    pub fn new(id: ActionId, name: impl Into<String>, scope: ActionScope, range: u32) -> Self {
        Self {
            id,
            name: name.into(),
            scope,
            range,
            cast_time: 0,
            recovery: 0,
            cooldown: 0,
            weight: Self::DEFAULT_WEIGHT,
        }
    }

    pub fn with_timing(mut self, cast_time: u32, recovery: u32, cooldown: u32) -> Self {
        self.cast_time = cast_time;
        self.recovery = recovery;
        self.cooldown = cooldown;
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    #[cfg(feature = "serde")]
    fn default_weight() -> u32 {
        Self::DEFAULT_WEIGHT
    }

    /// Builds the single instance this profile fires by default.
    pub fn instance(&self) -> ActionInstance {
        ActionInstance {
            action: self.id,
            cooldown_group: CooldownGroup::of(self.id),
            cast_time: self.cast_time,
            recovery: self.recovery,
            range: self.range,
            scope: self.scope,
        }
    }
}

/// Concrete, cast-time-bearing action handed to the interaction resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionInstance {
    pub action: ActionId,
    pub cooldown_group: CooldownGroup,
    pub cast_time: u32,
    pub recovery: u32,
    pub range: u32,
    pub scope: ActionScope,
}

/// Ordered list of instances for the decided action; index 0 is the primary.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct DecidedAction {
    instances: ArrayVec<ActionInstance, { BehaviorConfig::MAX_ACTION_INSTANCES }>,
}

impl DecidedAction {
    /// Builds a decision from instantiated actions, tagging every instance with
    /// the cooldown group of the primary.
    ///
    /// Returns `None` for an empty list. Instances beyond the capacity are
    /// dropped (secondary effects only; the primary is always kept).
    pub fn from_instances(instances: impl IntoIterator<Item = ActionInstance>) -> Option<Self> {
        let mut iter = instances.into_iter();
        let primary = iter.next()?;
        let group = CooldownGroup::of(primary.action);

        let mut list = ArrayVec::new();
        list.push(ActionInstance {
            cooldown_group: group,
            ..primary
        });
        for secondary in iter {
            if list.is_full() {
                break;
            }
            list.push(ActionInstance {
                cooldown_group: group,
                ..secondary
            });
        }

        Some(Self { instances: list })
    }

    pub fn primary(&self) -> Option<&ActionInstance> {
        self.instances.first()
    }

    pub fn instances(&self) -> &[ActionInstance] {
        &self.instances
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }
}

/// Per cooldown-group recovery timers (frames remaining).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Cooldowns {
    entries: ArrayVec<(CooldownGroup, u32), { BehaviorConfig::MAX_ACTIONS }>,
}

impl Cooldowns {
    /// Locks `group` for `frames`; a zero duration clears it.
    pub fn arm(&mut self, group: CooldownGroup, frames: u32) {
        self.entries.retain(|(g, _)| *g != group);
        if frames > 0 && !self.entries.is_full() {
            self.entries.push((group, frames));
        }
    }

    pub fn remaining(&self, group: CooldownGroup) -> u32 {
        self.entries
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, frames)| *frames)
            .unwrap_or(0)
    }

    pub fn is_ready(&self, group: CooldownGroup) -> bool {
        self.remaining(group) == 0
    }

    /// Advances every timer by one frame and forgets the expired ones.
    pub fn tick(&mut self) {
        for (_, frames) in self.entries.iter_mut() {
            *frames = frames.saturating_sub(1);
        }
        self.entries.retain(|(_, frames)| *frames > 0);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strike() -> ActionProfile {
        ActionProfile::new(ActionId(7), "strike", ActionScope::Enemy, 1).with_timing(4, 2, 30)
    }

    #[test]
    fn decided_action_tags_every_instance_with_primary_group() {
        let primary = strike().instance();
        let mut secondary = ActionProfile::new(ActionId(9), "bleed", ActionScope::Enemy, 1)
            .instance();
        secondary.cooldown_group = CooldownGroup(99);

        let decided = DecidedAction::from_instances([primary, secondary]).unwrap();

        assert_eq!(decided.instances().len(), 2);
        assert!(
            decided
                .instances()
                .iter()
                .all(|i| i.cooldown_group == CooldownGroup::of(ActionId(7)))
        );
        assert_eq!(decided.primary().unwrap().cast_time, 4);
    }

    #[test]
    fn empty_instantiation_is_not_a_decision() {
        assert!(DecidedAction::from_instances(Vec::new()).is_none());
    }

    #[test]
    fn cooldowns_expire_after_their_duration() {
        let mut cooldowns = Cooldowns::default();
        let group = CooldownGroup(3);
        cooldowns.arm(group, 2);
        assert!(!cooldowns.is_ready(group));

        cooldowns.tick();
        assert_eq!(cooldowns.remaining(group), 1);
        cooldowns.tick();
        assert!(cooldowns.is_ready(group));
        assert!(cooldowns.is_empty());
    }

    #[test]
    fn rearming_replaces_previous_timer() {
        let mut cooldowns = Cooldowns::default();
        let group = CooldownGroup(1);
        cooldowns.arm(group, 10);
        cooldowns.arm(group, 3);
        assert_eq!(cooldowns.remaining(group), 3);
        cooldowns.arm(group, 0);
        assert!(cooldowns.is_ready(group));
    }
}

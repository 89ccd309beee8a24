/// Behavior scheduler constants and tunable parameters.
///
/// All durations are frame counts. Per-agent spatial parameters (pursuit and
/// sight radius, spacing thresholds) live on the agent record, not here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    /// Radius around the primary agent within which agents are scheduled.
    pub max_update_range: u32,
    /// Absolute pursuit limit, applied on top of each agent's pursuit radius.
    pub hard_pursuit_ceiling: u32,
    /// Retry wait after the decision policy returned nothing usable.
    pub invalid_decision_retry: u32,
    /// Retry wait after the capability check rejected a decided action.
    pub capability_retry: u32,
    /// Pause between committing to an action and starting to position for it.
    pub post_decision_wait: u32,
    /// Pause after handing an action to the resolver (before recovery).
    pub post_execution_wait: u32,
    /// Chance (out of 100) that an idle agent at home takes a wander step.
    pub idle_move_chance: u32,
    /// Minimum frames between two idle moves of the same agent.
    pub idle_action_cooldown: u32,
    /// Distance from home within which idle wandering is random.
    pub idle_wander_radius: u32,
    /// Chance (out of 100) that a repositioning agent turns to face its target.
    pub face_target_chance: u32,
}

impl BehaviorConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of actions an agent can know.
    pub const MAX_ACTIONS: usize = 12;
    /// Maximum number of concrete instances a single decision can expand into.
    pub const MAX_ACTION_INSTANCES: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_UPDATE_RANGE: u32 = 24;
    pub const DEFAULT_HARD_PURSUIT_CEILING: u32 = 40;
    pub const DEFAULT_INVALID_DECISION_RETRY: u32 = 10;
    pub const DEFAULT_CAPABILITY_RETRY: u32 = 10;
    pub const DEFAULT_POST_DECISION_WAIT: u32 = 5;
    pub const DEFAULT_POST_EXECUTION_WAIT: u32 = 5;
    pub const DEFAULT_IDLE_MOVE_CHANCE: u32 = 1;
    pub const DEFAULT_IDLE_ACTION_COOLDOWN: u32 = 30;
    pub const DEFAULT_IDLE_WANDER_RADIUS: u32 = 3;
    pub const DEFAULT_FACE_TARGET_CHANCE: u32 = 70;

    pub fn new() -> Self {
        Self {
            max_update_range: Self::DEFAULT_MAX_UPDATE_RANGE,
            hard_pursuit_ceiling: Self::DEFAULT_HARD_PURSUIT_CEILING,
            invalid_decision_retry: Self::DEFAULT_INVALID_DECISION_RETRY,
            capability_retry: Self::DEFAULT_CAPABILITY_RETRY,
            post_decision_wait: Self::DEFAULT_POST_DECISION_WAIT,
            post_execution_wait: Self::DEFAULT_POST_EXECUTION_WAIT,
            idle_move_chance: Self::DEFAULT_IDLE_MOVE_CHANCE,
            idle_action_cooldown: Self::DEFAULT_IDLE_ACTION_COOLDOWN,
            idle_wander_radius: Self::DEFAULT_IDLE_WANDER_RADIUS,
            face_target_chance: Self::DEFAULT_FACE_TARGET_CHANCE,
        }
    }

    pub fn with_max_update_range(mut self, max_update_range: u32) -> Self {
        self.max_update_range = max_update_range;
        self
    }

    /// Effective pursuit limit for an agent with the given pursuit radius.
    pub fn pursuit_limit(&self, pursuit_radius: u32) -> u32 {
        pursuit_radius.min(self.hard_pursuit_ceiling)
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pursuit_limit_never_exceeds_ceiling() {
        let config = BehaviorConfig::default();
        assert_eq!(config.pursuit_limit(10), 10);
        assert_eq!(
            config.pursuit_limit(1_000),
            BehaviorConfig::DEFAULT_HARD_PURSUIT_CEILING
        );
    }

    #[test]
    fn both_retry_waits_default_to_the_same_value() {
        let config = BehaviorConfig::default();
        assert_eq!(config.invalid_decision_retry, config.capability_retry);
    }
}

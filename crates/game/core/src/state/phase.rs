//! Agent lifecycle phases and the single transition function between them.
//!
//! Once engaged, an agent cycles `Approach → Decide → Cooldown → Approach`.
//! Only disengagement returns it to `Idle`.

use crate::error::{CombatError, ErrorSeverity};

/// Behavior phase of an agent. Exactly one is active at any time.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Phase {
    /// No target; wander, return home or chase an alert.
    #[default]
    Idle = 0,
    /// Pre-decision positioning while the think delay runs.
    Approach = 1,
    /// Choose an action, close to its range, fire it.
    Decide = 2,
    /// Wait out the executed action's recovery window.
    Cooldown = 3,
}

impl Phase {
    /// Returns true for every phase that requires a live target.
    pub const fn is_engaged(self) -> bool {
        !matches!(self, Phase::Idle)
    }

    /// Applies `event` to this phase.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::Invalid`] for any edge that is not part of the
    /// cycle graph.
    pub fn transition(self, event: PhaseEvent) -> Result<Phase, TransitionError> {
        use Phase::*;
        use PhaseEvent::*;

        match (self, event) {
            (_, Disengage) => Ok(Idle),
            (Idle, Engage) => Ok(Approach),
            (Approach, ReadyToDecide) => Ok(Decide),
            (Decide, Executed) => Ok(Cooldown),
            (Cooldown, Recovered) => Ok(Approach),
            (from, event) => Err(TransitionError::Invalid { from, event }),
        }
    }
}

/// Inputs that drive [`Phase::transition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PhaseEvent {
    /// A target was assigned (provoke/aggro).
    Engage,
    /// The think delay elapsed or the leader committed to an action.
    ReadyToDecide,
    /// The decided action was handed to the resolver.
    Executed,
    /// The recovery window elapsed.
    Recovered,
    /// Target lost, out of range or dead.
    Disengage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("no transition from {from} on {event}")]
    Invalid { from: Phase, event: PhaseEvent },
}

impl CombatError for TransitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "PHASE_INVALID_TRANSITION"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn engaged_cycle_never_passes_through_idle() {
        let mut phase = Phase::Idle.transition(PhaseEvent::Engage).unwrap();
        assert_eq!(phase, Phase::Approach);

        for _ in 0..3 {
            phase = phase.transition(PhaseEvent::ReadyToDecide).unwrap();
            assert_eq!(phase, Phase::Decide);
            phase = phase.transition(PhaseEvent::Executed).unwrap();
            assert_eq!(phase, Phase::Cooldown);
            phase = phase.transition(PhaseEvent::Recovered).unwrap();
            assert_eq!(phase, Phase::Approach);
        }
    }

    #[test]
    fn disengage_is_accepted_from_every_phase() {
        for phase in Phase::iter() {
            assert_eq!(phase.transition(PhaseEvent::Disengage), Ok(Phase::Idle));
        }
    }

    #[test]
    fn transition_table_rejects_everything_else() {
        let allowed = [
            (Phase::Idle, PhaseEvent::Engage),
            (Phase::Approach, PhaseEvent::ReadyToDecide),
            (Phase::Decide, PhaseEvent::Executed),
            (Phase::Cooldown, PhaseEvent::Recovered),
        ];

        for phase in Phase::iter() {
            for event in PhaseEvent::iter() {
                let result = phase.transition(event);
                if event == PhaseEvent::Disengage || allowed.contains(&(phase, event)) {
                    assert!(result.is_ok(), "{phase} on {event} should be valid");
                } else {
                    assert_eq!(
                        result,
                        Err(TransitionError::Invalid { from: phase, event })
                    );
                }
            }
        }
    }

    #[test]
    fn phase_discriminants_are_stable() {
        assert_eq!(Phase::Idle as u8, 0);
        assert_eq!(Phase::Approach as u8, 1);
        assert_eq!(Phase::Decide as u8, 2);
        assert_eq!(Phase::Cooldown as u8, 3);
    }
}

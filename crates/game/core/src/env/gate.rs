//! Global conditions that freeze the whole scheduler.

/// Why a frame was skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Suppression {
    /// The scheduler itself was switched off.
    Disabled,
    Paused,
    ModalDialog,
    ScriptedSequence,
}

/// Host-wide switches checked once at the top of every frame.
pub trait GlobalGate {
    fn is_paused(&self) -> bool;

    fn is_modal_blocking(&self) -> bool;

    fn is_scripted_sequence_active(&self) -> bool;

    /// First active suppression reason, if any.
    fn suppression(&self) -> Option<Suppression> {
        if self.is_paused() {
            Some(Suppression::Paused)
        } else if self.is_modal_blocking() {
            Some(Suppression::ModalDialog)
        } else if self.is_scripted_sequence_active() {
            Some(Suppression::ScriptedSequence)
        } else {
            None
        }
    }
}

/// Gate that never suppresses anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenGate;

impl GlobalGate for OpenGate {
    fn is_paused(&self) -> bool {
        false
    }

    fn is_modal_blocking(&self) -> bool {
        false
    }

    fn is_scripted_sequence_active(&self) -> bool {
        false
    }
}

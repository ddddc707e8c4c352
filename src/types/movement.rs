#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Discrete movement state derived from the ground-speed field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MovementState {
    Stopped,
    Taxying,
    Flying,
}

impl MovementState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementState::Stopped => "stopped",
            MovementState::Taxying => "taxying",
            MovementState::Flying => "flying",
        }
    }

    /// Operator-facing status line for this state, as shown on the display
    pub fn status_message(&self) -> &'static str {
        match self {
            MovementState::Stopped => "Airplane is stopped or parked",
            MovementState::Taxying => "Airplane is taxying",
            MovementState::Flying => "Airplane is flying",
        }
    }
}

impl std::fmt::Display for MovementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-shot notification raised by the movement classifier.
///
/// Fires at most once per state streak: the taxying notice on entry, the
/// stopped notice once the hold-off has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MovementNotice {
    Stopped,
    Taxying,
}

impl MovementNotice {
    /// The state this notice announces
    pub fn state(&self) -> MovementState {
        match self {
            MovementNotice::Stopped => MovementState::Stopped,
            MovementNotice::Taxying => MovementState::Taxying,
        }
    }

    /// Operator-facing message for this notice, as shown on the display.
    pub fn message(&self) -> &'static str {
        self.state().status_message()
    }
}

/// A movement notice recorded during a session, for event export
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NoticeEntry {
    pub cycle: u64,
    pub state: String,
    pub message: String,
}

impl NoticeEntry {
    pub fn new(cycle: u64, notice: MovementNotice) -> Self {
        Self {
            cycle,
            state: notice.state().as_str().to_string(),
            message: notice.message().to_string(),
        }
    }
}

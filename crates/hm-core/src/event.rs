//! Manipulation notifications

use serde::{Deserialize, Serialize};

use crate::state::ManipulationState;

/// Notification raised by a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManipulationEvent {
    /// Left `None`; exclusive focus was acquired
    Started,
    /// Entered `None`; exclusive focus was released
    Ended,
    OneHandStarted,
    OneHandEnded,
    TwoHandStarted(ManipulationState),
    TwoHandEnded(ManipulationState),
}

impl ManipulationEvent {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ManipulationEvent::Started => "Manipulation started",
            ManipulationEvent::Ended => "Manipulation ended",
            ManipulationEvent::OneHandStarted => "One-hand move started",
            ManipulationEvent::OneHandEnded => "One-hand move ended",
            ManipulationEvent::TwoHandStarted(_) => "Two-hand manipulation started",
            ManipulationEvent::TwoHandEnded(_) => "Two-hand manipulation ended",
        }
    }
}

//! Manipulation capabilities and the mode state machine

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::constants::TWO_HAND_CONTACTS;

bitflags! {
    /// Transform categories an object allows during two-hand manipulation.
    ///
    /// This is configuration only. What the object is doing right now is a
    /// [`ManipulationState`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ManipulationCapabilities: u8 {
        const MOVE = 1 << 0;
        const ROTATE = 1 << 1;
        const SCALE = 1 << 2;
    }
}

impl Default for ManipulationCapabilities {
    fn default() -> Self {
        Self::all()
    }
}

/// Concrete manipulation state of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ManipulationState {
    #[default]
    None,
    Move,
    Scale,
    Rotate,
    MoveScale,
    MoveRotate,
    RotateScale,
    MoveRotateScale,
}

impl ManipulationState {
    /// State entered when two hands engage with the given capabilities
    pub fn from_capabilities(caps: ManipulationCapabilities) -> Self {
        let m = caps.contains(ManipulationCapabilities::MOVE);
        let r = caps.contains(ManipulationCapabilities::ROTATE);
        let s = caps.contains(ManipulationCapabilities::SCALE);
        match (m, r, s) {
            (false, false, false) => Self::None,
            (true, false, false) => Self::Move,
            (false, false, true) => Self::Scale,
            (false, true, false) => Self::Rotate,
            (true, false, true) => Self::MoveScale,
            (true, true, false) => Self::MoveRotate,
            (false, true, true) => Self::RotateScale,
            (true, true, true) => Self::MoveRotateScale,
        }
    }

    /// Transform categories active in this state
    pub fn capabilities(&self) -> ManipulationCapabilities {
        use ManipulationCapabilities as C;
        match self {
            Self::None => C::empty(),
            Self::Move => C::MOVE,
            Self::Scale => C::SCALE,
            Self::Rotate => C::ROTATE,
            Self::MoveScale => C::MOVE | C::SCALE,
            Self::MoveRotate => C::MOVE | C::ROTATE,
            Self::RotateScale => C::ROTATE | C::SCALE,
            Self::MoveRotateScale => C::all(),
        }
    }

    /// Any state other than `None` and `Move`
    pub fn is_two_hand(&self) -> bool {
        !matches!(self, Self::None | Self::Move)
    }

    pub fn is_active(&self) -> bool {
        *self != Self::None
    }

    /// Compute the state for the next tick.
    ///
    /// A two-hand state holds while at least two contacts remain, even if
    /// `configured` changed in the meantime. Only a crossing from `None` or
    /// `Move` re-reads the configuration.
    pub fn next(
        self,
        contact_count: usize,
        configured: ManipulationCapabilities,
        one_hand_move: bool,
    ) -> Self {
        match contact_count {
            0 => Self::None,
            1 if one_hand_move => Self::Move,
            1 => Self::None,
            n if n >= TWO_HAND_CONTACTS && self.is_two_hand() => self,
            _ => Self::from_capabilities(configured),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Move => "Move",
            Self::Scale => "Scale",
            Self::Rotate => "Rotate",
            Self::MoveScale => "Move + Scale",
            Self::MoveRotate => "Move + Rotate",
            Self::RotateScale => "Rotate + Scale",
            Self::MoveRotateScale => "Move + Rotate + Scale",
        }
    }

    /// All states
    pub fn all() -> &'static [ManipulationState] {
        &[
            Self::None,
            Self::Move,
            Self::Scale,
            Self::Rotate,
            Self::MoveScale,
            Self::MoveRotate,
            Self::RotateScale,
            Self::MoveRotateScale,
        ]
    }
}

//! Transform update strategies
//!
//! Each strategy captures its starting state in `setup` and then turns the
//! current contact positions into a new position, rotation or scale on every
//! `update`. A strategy value lives exactly as long as the manipulation phase
//! that uses it.

mod move_logic;
mod rotate;
mod scale;

pub use move_logic::MoveLogic;
pub use rotate::{RotateLogic, RotationConstraint};
pub use scale::{ScaleLimits, ScaleLogic};

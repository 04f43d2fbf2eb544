//! Gesture replay for the manipulation core
//!
//! Feeds recorded contact events through a `ManipulationController` one
//! frame at a time:
//! - ReplayScript: config, starting transform and per-frame contact commands
//! - Replayer: applies the commands, ticks the controller, records results
//! - SharedFocus: focus collaborator that logs acquire/release calls

pub mod focus;
pub mod runner;
pub mod script;

pub use focus::*;
pub use runner::*;
pub use script::*;

//! Two-hand manipulation core
//!
//! This crate contains the engine-independent core of two-hand object
//! manipulation:
//! - ContactTracker: active contact points and their positions
//! - ManipulationState: mode state machine driven by contact count
//! - MoveLogic / RotateLogic / ScaleLogic: setup/update transform strategies
//! - ManipulationController: per-tick orchestration and notifications

pub mod collaborators;
pub mod config;
pub mod constants;
pub mod contact;
pub mod controller;
pub mod event;
pub mod logic;
pub mod state;
pub mod transform;

pub use collaborators::*;
pub use config::*;
pub use constants::*;
pub use contact::*;
pub use controller::*;
pub use event::*;
pub use logic::*;
pub use state::*;
pub use transform::*;

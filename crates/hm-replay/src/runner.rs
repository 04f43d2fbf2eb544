//! Frame-by-frame replay driver

use std::collections::HashMap;

use glam::Vec3;
use hm_core::{
    ContactId, HostTransform, ManipulationConfig, ManipulationController, ManipulationEvent,
    ManipulationState,
};
use uuid::Uuid;

use crate::focus::{FocusLog, FocusRecorder, SharedFocus};
use crate::script::{ContactCommand, Frame, ReplayScript};

/// Result of one replayed frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub index: usize,
    pub state: ManipulationState,
    pub transform: HostTransform,
    pub events: Vec<ManipulationEvent>,
}

/// Result of a whole replay
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub name: String,
    pub frames: Vec<FrameReport>,
    pub focus: FocusLog,
}

impl ReplayReport {
    /// Transform after the last frame
    pub fn final_transform(&self) -> Option<HostTransform> {
        self.frames.last().map(|f| f.transform)
    }

    /// All events in firing order
    pub fn events(&self) -> impl Iterator<Item = &ManipulationEvent> {
        self.frames.iter().flat_map(|f| f.events.iter())
    }
}

/// Plays contact commands into a controller, one tick per frame
pub struct Replayer {
    controller: ManipulationController<FocusRecorder>,
    /// Positions the simulated input system currently reports
    live: HashMap<ContactId, Vec3>,
    host: HostTransform,
    focus: SharedFocus,
}

impl Replayer {
    /// Create a replayer for a fresh object
    pub fn new(config: ManipulationConfig, initial: HostTransform) -> Self {
        let focus = SharedFocus::default();
        let controller =
            ManipulationController::new(Uuid::new_v4(), config, FocusRecorder::new(focus.clone()));
        Self {
            controller,
            live: HashMap::new(),
            host: initial,
            focus,
        }
    }

    /// Replay a whole script on a fresh object
    pub fn run(script: &ReplayScript) -> ReplayReport {
        tracing::info!(
            "Replaying '{}' ({} frames)",
            script.name,
            script.frames.len()
        );
        let mut replayer = Self::new(script.config.clone(), script.initial);
        let frames = script
            .frames
            .iter()
            .enumerate()
            .map(|(index, frame)| replayer.step(index, frame))
            .collect();

        ReplayReport {
            name: script.name.clone(),
            frames,
            focus: replayer.focus.lock().clone(),
        }
    }

    pub fn controller(&self) -> &ManipulationController<FocusRecorder> {
        &self.controller
    }

    pub fn host(&self) -> &HostTransform {
        &self.host
    }

    /// Apply one frame of commands and tick once
    pub fn step(&mut self, index: usize, frame: &Frame) -> FrameReport {
        for command in &frame.commands {
            self.apply(*command);
        }

        let events = self.controller.tick(&self.live, &mut self.host);
        let report = FrameReport {
            index,
            state: self.controller.state(),
            transform: self.host,
            events,
        };

        tracing::info!(
            "frame {:>3} {:<22} pos={:?} scale={:?}",
            index,
            report.state.display_name(),
            report.transform.position,
            report.transform.scale
        );
        for event in &report.events {
            tracing::info!("frame {:>3}   {}", index, event.display_name());
        }

        report
    }

    fn apply(&mut self, command: ContactCommand) {
        match command {
            ContactCommand::Down { id, position } => {
                self.live.insert(id, position);
                self.controller.on_contact_added(id, position);
            }
            ContactCommand::Move { id, position } => {
                self.live.insert(id, position);
                self.controller.on_contact_moved(id, position);
            }
            ContactCommand::Up { id } => {
                self.live.remove(&id);
                self.controller.on_contact_removed(id);
            }
            ContactCommand::Lost { id } => {
                // The controller finds out on its next refresh
                self.live.remove(&id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    #[test]
    fn test_demo_replay() {
        let report = Replayer::run(&ReplayScript::demo());

        let states: Vec<_> = report.frames.iter().map(|f| f.state).collect();
        assert_eq!(states[0], ManipulationState::Move);
        assert_eq!(states[2], ManipulationState::MoveRotateScale);
        assert_eq!(*states.last().unwrap(), ManipulationState::None);

        let ended = report
            .events()
            .filter(|e| **e == ManipulationEvent::Ended)
            .count();
        assert_eq!(ended, 1);
        assert_eq!(report.focus.acquired, 1);
        assert_eq!(report.focus.released, 1);
        assert!(report.focus.holder.is_none());
    }

    #[test]
    fn test_demo_twist_and_spread() {
        let script = ReplayScript::demo();
        let report = Replayer::run(&script);

        // Last twist frame: quarter turn, hands twice as far apart
        let twist = &report.frames[8];
        assert_eq!(twist.state, ManipulationState::MoveRotateScale);
        assert!(
            twist
                .transform
                .rotation
                .abs_diff_eq(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2), 1e-4)
        );
        assert!(twist.transform.scale.abs_diff_eq(Vec3::splat(2.0), 1e-4));
        // Centroid stayed put since the second hand joined, so did the object
        let joined = report.frames[2].transform.position;
        assert!(twist.transform.position.abs_diff_eq(joined, 1e-4));
        assert!(!joined.abs_diff_eq(script.initial.position, 1e-4));
    }

    #[test]
    fn test_lost_contact_ends_manipulation() {
        let mut script = ReplayScript::new("lost");
        script
            .push(Frame::new([ContactCommand::Down {
                id: ContactId(1),
                position: Vec3::ZERO,
            }]))
            .push(Frame::new([ContactCommand::Lost { id: ContactId(1) }]));

        let report = Replayer::run(&script);
        assert_eq!(
            report.frames[1].events,
            vec![ManipulationEvent::OneHandEnded, ManipulationEvent::Ended]
        );
    }
}

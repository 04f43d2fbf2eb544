//! Replay script serialization

use std::path::Path;

use glam::{Quat, Vec3};
use hm_core::{ConfigError, ContactId, HostTransform, ManipulationConfig};
use serde::{Deserialize, Serialize};

/// One contact event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ContactCommand {
    /// Source pressed on the object
    Down { id: ContactId, position: Vec3 },
    /// Source moved
    Move { id: ContactId, position: Vec3 },
    /// Source released
    Up { id: ContactId },
    /// Source stopped reporting without a release
    Lost { id: ContactId },
}

/// Commands delivered before one tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub commands: Vec<ContactCommand>,
}

impl Frame {
    pub fn new(commands: impl Into<Vec<ContactCommand>>) -> Self {
        Self {
            commands: commands.into(),
        }
    }

    /// Frame with no input changes
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Recorded gesture session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub name: String,
    #[serde(default)]
    pub config: ManipulationConfig,
    #[serde(default)]
    pub initial: HostTransform,
    pub frames: Vec<Frame>,
}

impl ReplayScript {
    /// Create an empty script
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: ManipulationConfig::default(),
            initial: HostTransform::IDENTITY,
            frames: Vec::new(),
        }
    }

    pub fn push(&mut self, frame: Frame) -> &mut Self {
        self.frames.push(frame);
        self
    }

    /// Grab with one hand, add a second, twist and spread, then let go
    pub fn demo() -> Self {
        use ContactCommand::*;

        let left = ContactId(1);
        let right = ContactId(2);
        let mut script = Self::new("demo");
        script.initial = HostTransform::from_position(Vec3::new(0.0, 1.5, 2.0));

        script
            .push(Frame::new([Down {
                id: left,
                position: Vec3::new(-0.2, 1.4, 1.8),
            }]))
            .push(Frame::new([Move {
                id: left,
                position: Vec3::new(-0.1, 1.4, 1.8),
            }]))
            .push(Frame::new([Down {
                id: right,
                position: Vec3::new(0.3, 1.4, 1.8),
            }]));

        // Twist a quarter turn about Y while spreading to twice the distance
        let center = Vec3::new(0.1, 1.4, 1.8);
        let steps = 6;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let half = Quat::from_rotation_y(t * std::f32::consts::FRAC_PI_2)
                * Vec3::new(0.2 * (1.0 + t), 0.0, 0.0);
            script.push(Frame::new([
                Move {
                    id: left,
                    position: center - half,
                },
                Move {
                    id: right,
                    position: center + half,
                },
            ]));
        }

        script
            .push(Frame::new([Up { id: right }]))
            .push(Frame::new([Move {
                id: left,
                position: Vec3::new(0.1, 1.6, 1.5),
            }]))
            .push(Frame::new([Lost { id: left }]))
            .push(Frame::idle());

        script
    }

    /// Save script to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReplayError> {
        let content = self.to_bytes()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ReplayError::Io(e.to_string()))?;
        Ok(())
    }

    /// Serialize script to RON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ReplayError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ReplayError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Load script from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let data = std::fs::read(path.as_ref()).map_err(|e| ReplayError::Io(e.to_string()))?;
        Self::from_bytes(&data)
    }

    /// Load script from RON bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self, ReplayError> {
        let content =
            std::str::from_utf8(data).map_err(|e| ReplayError::Deserialize(e.to_string()))?;
        ron::from_str(content).map_err(|e| ReplayError::Deserialize(e.to_string()))
    }
}

/// Replay-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_demo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.ron");

        let script = ReplayScript::demo();
        script.save(&path).unwrap();
        let loaded = ReplayScript::load(&path).unwrap();

        assert_eq!(loaded.name, "demo");
        assert_eq!(loaded.frames.len(), script.frames.len());
        assert_eq!(loaded.config, script.config);
    }

    #[test]
    fn test_parse_handwritten_script() {
        let text = r#"(
            name: "tap",
            frames: [
                (commands: [Down(id: 3, position: (0.0, 1.0, 0.0))]),
                (commands: []),
                (commands: [Up(id: 3)]),
            ],
        )"#;

        let script = ReplayScript::from_bytes(text.as_bytes()).unwrap();
        assert_eq!(script.initial, HostTransform::IDENTITY);
        assert_eq!(
            script.frames[0].commands[0],
            ContactCommand::Down {
                id: ContactId(3),
                position: Vec3::Y,
            }
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let result = ReplayScript::from_bytes(&[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(ReplayError::Deserialize(_))));
    }
}

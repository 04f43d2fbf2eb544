//! Manipulation configuration
//!
//! This module provides the per-object manipulation settings that can be
//! serialized and loaded from configuration files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logic::{RotationConstraint, ScaleLimits};
use crate::state::ManipulationCapabilities;

/// Settings of one manipulable object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ManipulationConfig {
    /// Transform categories enabled for two-hand manipulation
    pub capabilities: ManipulationCapabilities,
    /// Axis restriction for two-hand rotation
    pub rotation_constraint: RotationConstraint,
    /// Whether a single contact moves the object
    pub one_hand_move: bool,
    /// Optional bounds for the resulting scale
    pub scale_limits: Option<ScaleLimits>,
}

impl Default for ManipulationConfig {
    fn default() -> Self {
        Self::full()
    }
}

impl ManipulationConfig {
    /// Move, rotate and scale with one-hand move
    pub fn full() -> Self {
        Self {
            capabilities: ManipulationCapabilities::all(),
            rotation_constraint: RotationConstraint::None,
            one_hand_move: true,
            scale_limits: None,
        }
    }

    /// Translation only, with one or more hands
    pub fn move_only() -> Self {
        Self {
            capabilities: ManipulationCapabilities::MOVE,
            ..Self::full()
        }
    }

    /// Rotate and scale in place; one hand does nothing
    pub fn rotate_scale() -> Self {
        Self {
            capabilities: ManipulationCapabilities::ROTATE | ManipulationCapabilities::SCALE,
            one_hand_move: false,
            ..Self::full()
        }
    }

    pub fn with_rotation_constraint(mut self, constraint: RotationConstraint) -> Self {
        self.rotation_constraint = constraint;
        self
    }

    pub fn with_scale_limits(mut self, limits: ScaleLimits) -> Self {
        self.scale_limits = Some(limits);
        self
    }

    /// Parse from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Serialize to pretty RON text
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Save config to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Load config from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }
}

/// Config-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manip.ron");

        let config = ManipulationConfig::rotate_scale()
            .with_rotation_constraint(RotationConstraint::YAxisOnly)
            .with_scale_limits(ScaleLimits::with_range(0.25, 4.0));
        config.save(&path).unwrap();

        let loaded = ManipulationConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = ManipulationConfig::from_ron_str("(one_hand_move: false)").unwrap();
        assert!(!config.one_hand_move);
        assert_eq!(config.capabilities, ManipulationCapabilities::all());
        assert_eq!(config.rotation_constraint, RotationConstraint::None);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ManipulationConfig::load(dir.path().join("absent.ron"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_invalid_text() {
        let result = ManipulationConfig::from_ron_str("(capabilities: 42.5.1)");
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }
}

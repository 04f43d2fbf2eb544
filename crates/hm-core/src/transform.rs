//! Host transform of the manipulated object

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position, orientation and scale of the manipulated object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for HostTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl HostTransform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Compose into a TRS matrix
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Decompose a TRS matrix
    pub fn from_mat4(matrix: Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            rotation,
            scale,
        }
    }
}

/// Object whose transform the controller reads and writes.
///
/// The controller is the only writer while a manipulation is active.
pub trait TransformTarget {
    fn transform(&self) -> HostTransform;
    fn set_transform(&mut self, transform: HostTransform);
}

impl TransformTarget for HostTransform {
    fn transform(&self) -> HostTransform {
        *self
    }

    fn set_transform(&mut self, transform: HostTransform) {
        *self = transform;
    }
}

/// Hosts that keep their transform as a matrix
impl TransformTarget for Mat4 {
    fn transform(&self) -> HostTransform {
        HostTransform::from_mat4(*self)
    }

    fn set_transform(&mut self, transform: HostTransform) {
        *self = transform.to_mat4();
    }
}

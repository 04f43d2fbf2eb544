//! Anchor-following translation

use glam::Vec3;

use crate::transform::HostTransform;

/// Keeps the object at a fixed offset from the anchor point.
///
/// The anchor is the single contact in one-hand mode and the centroid of all
/// contacts otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveLogic {
    offset: Vec3,
}

impl MoveLogic {
    /// Record the offset between the host position and the anchor
    pub fn setup(anchor: Vec3, host: &HostTransform) -> Self {
        Self {
            offset: host.position - anchor,
        }
    }

    /// New host position for the current anchor
    pub fn update(&self, anchor: Vec3) -> Vec3 {
        anchor + self.offset
    }
}

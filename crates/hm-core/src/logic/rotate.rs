//! Handlebar rotation
//!
//! Rotation follows the "handlebar": the vector between the two lowest-id
//! contacts. Each update rotates the object by the shortest arc that carries
//! the previous handlebar onto the current one.

use std::collections::BTreeMap;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::DEGENERATE_EPSILON;
use crate::contact::{ContactId, handlebar};

/// Restricts two-hand rotation to a single world axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationConstraint {
    #[default]
    None,
    XAxisOnly,
    YAxisOnly,
    ZAxisOnly,
}

impl RotationConstraint {
    /// World axis rotation is limited to, `None` when unconstrained
    pub fn axis(&self) -> Option<Vec3> {
        match self {
            RotationConstraint::None => None,
            RotationConstraint::XAxisOnly => Some(Vec3::X),
            RotationConstraint::YAxisOnly => Some(Vec3::Y),
            RotationConstraint::ZAxisOnly => Some(Vec3::Z),
        }
    }

    /// Project a vector onto the plane perpendicular to the constraint axis
    pub fn project(&self, v: Vec3) -> Vec3 {
        match self.axis() {
            Some(axis) => v - axis * v.dot(axis),
            None => v,
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RotationConstraint::None => "None",
            RotationConstraint::XAxisOnly => "X Axis Only",
            RotationConstraint::YAxisOnly => "Y Axis Only",
            RotationConstraint::ZAxisOnly => "Z Axis Only",
        }
    }

    /// All constraints for UI
    pub fn all() -> &'static [RotationConstraint] {
        &[
            RotationConstraint::None,
            RotationConstraint::XAxisOnly,
            RotationConstraint::YAxisOnly,
            RotationConstraint::ZAxisOnly,
        ]
    }
}

/// Incremental two-hand rotation state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateLogic {
    constraint: RotationConstraint,
    /// Last non-degenerate handlebar, already projected by the constraint
    previous_handlebar: Vec3,
}

impl RotateLogic {
    /// Capture the starting handlebar.
    ///
    /// Requires at least two contacts.
    pub fn setup(contacts: &BTreeMap<ContactId, Vec3>, constraint: RotationConstraint) -> Self {
        debug_assert!(
            contacts.len() >= 2,
            "rotate setup needs two contacts, got {}",
            contacts.len()
        );
        let previous_handlebar = constraint.project(handlebar(contacts).unwrap_or(Vec3::ZERO));
        Self {
            constraint,
            previous_handlebar,
        }
    }

    /// Rotate `current_rotation` by the handlebar change since the last call.
    ///
    /// # Algorithm
    ///
    /// 1. Take the current handlebar and project it with the constraint.
    /// 2. If either the previous or the current handlebar is shorter than
    ///    [`DEGENERATE_EPSILON`], return `current_rotation` unchanged.
    /// 3. Unconstrained: shortest-arc quaternion from previous to current.
    ///    Constrained: signed angle between the projected vectors, measured
    ///    around the constraint axis.
    /// 4. Pre-multiply the delta onto `current_rotation`.
    ///
    /// A degenerate current handlebar is not stored, so rotation resumes
    /// from the last usable direction once the contacts separate.
    pub fn update(&mut self, contacts: &BTreeMap<ContactId, Vec3>, current_rotation: Quat) -> Quat {
        let Some(raw) = handlebar(contacts) else {
            return current_rotation;
        };
        let current = self.constraint.project(raw);

        if current.length() <= DEGENERATE_EPSILON {
            tracing::warn!("Contacts coincide, holding rotation");
            return current_rotation;
        }
        if self.previous_handlebar.length() <= DEGENERATE_EPSILON {
            self.previous_handlebar = current;
            return current_rotation;
        }

        let from = self.previous_handlebar.normalize();
        let to = current.normalize();
        self.previous_handlebar = current;

        let delta = match self.constraint.axis() {
            Some(axis) => {
                let angle = axis.dot(from.cross(to)).atan2(from.dot(to));
                Quat::from_axis_angle(axis, angle)
            }
            None => Quat::from_rotation_arc(from, to),
        };

        (delta * current_rotation).normalize()
    }
}

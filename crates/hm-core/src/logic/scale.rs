//! Spread-ratio scaling

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEGENERATE_EPSILON};
use crate::contact::{ContactId, min_pair_distance};
use crate::transform::HostTransform;

/// Per-component bounds applied to the computed scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleLimits {
    pub min: f32,
    pub max: f32,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_SCALE,
            max: DEFAULT_MAX_SCALE,
        }
    }
}

impl ScaleLimits {
    /// Create limits with specified range
    pub fn with_range(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, scale: Vec3) -> Vec3 {
        scale.clamp(Vec3::splat(self.min), Vec3::splat(self.max))
    }
}

/// Scales the object by how far the hands have spread since setup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLogic {
    initial_spread: f32,
    initial_scale: Vec3,
    limits: Option<ScaleLimits>,
    /// Last scale computed from a usable spread
    last_scale: Vec3,
}

impl ScaleLogic {
    /// Record the starting spread and host scale.
    ///
    /// Requires at least two contacts.
    pub fn setup(
        contacts: &BTreeMap<ContactId, Vec3>,
        host: &HostTransform,
        limits: Option<ScaleLimits>,
    ) -> Self {
        debug_assert!(
            contacts.len() >= 2,
            "scale setup needs two contacts, got {}",
            contacts.len()
        );
        let initial_spread = min_pair_distance(contacts).unwrap_or(0.0);
        if initial_spread <= DEGENERATE_EPSILON {
            tracing::warn!("Contacts coincide at scale start, holding scale");
        }
        Self {
            initial_spread,
            initial_scale: host.scale,
            limits,
            last_scale: host.scale,
        }
    }

    /// `initial_scale * current_spread / initial_spread`, optionally clamped.
    ///
    /// Holds the initial scale when the starting spread was degenerate, and
    /// the last usable scale while the contacts coincide.
    pub fn update(&mut self, contacts: &BTreeMap<ContactId, Vec3>) -> Vec3 {
        if self.initial_spread <= DEGENERATE_EPSILON {
            return self.initial_scale;
        }
        let spread = min_pair_distance(contacts).unwrap_or(self.initial_spread);
        if spread <= DEGENERATE_EPSILON {
            tracing::warn!("Contacts coincide, holding scale");
            return self.last_scale;
        }
        let scale = self.initial_scale * (spread / self.initial_spread);
        self.last_scale = match self.limits {
            Some(limits) => limits.clamp(scale),
            None => scale,
        };
        self.last_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(distance: f32) -> BTreeMap<ContactId, Vec3> {
        BTreeMap::from([
            (ContactId(1), Vec3::new(-0.5, 1.0, 0.0)),
            (ContactId(2), Vec3::new(-0.5 + distance, 1.0, 0.0)),
        ])
    }

    #[test]
    fn test_unchanged_spread_keeps_scale() {
        for s in [Vec3::ONE, Vec3::new(0.3, 2.0, 7.5), Vec3::splat(0.001)] {
            let host = HostTransform::IDENTITY.with_scale(s);
            let mut logic = ScaleLogic::setup(&pair(0.4), &host, None);
            assert!(logic.update(&pair(0.4)).abs_diff_eq(s, 1e-6));
        }
    }

    #[test]
    fn test_doubling_spread_doubles_scale() {
        let host = HostTransform::IDENTITY.with_scale(Vec3::new(1.0, 2.0, 3.0));
        let mut logic = ScaleLogic::setup(&pair(0.25), &host, None);

        let scaled = logic.update(&pair(0.5));
        assert!(scaled.abs_diff_eq(Vec3::new(2.0, 4.0, 6.0), 1e-5));
    }

    #[test]
    fn test_degenerate_initial_spread_holds_scale() {
        let host = HostTransform::IDENTITY.with_scale(Vec3::splat(1.5));
        let mut logic = ScaleLogic::setup(&pair(0.0), &host, None);

        let scaled = logic.update(&pair(2.0));
        assert_eq!(scaled, Vec3::splat(1.5));
        assert!(scaled.is_finite());
    }

    #[test]
    fn test_limits_clamp_result() {
        let host = HostTransform::IDENTITY;
        let mut logic = ScaleLogic::setup(&pair(0.1), &host, Some(ScaleLimits::with_range(0.5, 3.0)));

        assert!(logic.update(&pair(1.0)).abs_diff_eq(Vec3::splat(3.0), 1e-6));
        assert!(logic.update(&pair(0.01)).abs_diff_eq(Vec3::splat(0.5), 1e-6));
    }

    #[test]
    fn test_coincident_contacts_hold_last_scale() {
        let host = HostTransform::IDENTITY.with_scale(Vec3::splat(2.0));
        let mut logic = ScaleLogic::setup(&pair(0.5), &host, None);

        let grown = logic.update(&pair(0.75));
        assert!(grown.abs_diff_eq(Vec3::splat(3.0), 1e-5));

        let held = logic.update(&pair(0.0));
        assert_eq!(held, grown);
        assert!(held.is_finite());

        // Separating again scales relative to the original spread
        let resumed = logic.update(&pair(0.25));
        assert!(resumed.abs_diff_eq(Vec3::splat(1.0), 1e-5));
    }
}

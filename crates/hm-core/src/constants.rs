//! Global constants for hm-core

/// Lengths at or below this are treated as degenerate (coincident contacts)
pub const DEGENERATE_EPSILON: f32 = 1e-5;

/// Minimum number of contacts for a two-hand state
pub const TWO_HAND_CONTACTS: usize = 2;

/// Default lower scale bound used by `ScaleLimits::default()`
pub const DEFAULT_MIN_SCALE: f32 = 0.05;

/// Default upper scale bound used by `ScaleLimits::default()`
pub const DEFAULT_MAX_SCALE: f32 = 20.0;

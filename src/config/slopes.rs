//! Configuration for slope limits.

use bevy::prelude::*;

/// Maximum walkable slope angles, per surface kind.
///
/// The per-contact comparisons use cosines derived from these angles; see
/// [`SlopeThresholds`](crate::surface::SlopeThresholds).
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct SlopeConfig {
    /// Steepest walkable angle on regular ground, in degrees.
    /// Clamped to [0, 90).
    pub max_ground_angle: f32,

    /// Steepest walkable angle on stairs-tagged surfaces, in degrees.
    /// Clamped to [0, 90).
    pub max_stairs_angle: f32,
}

impl Default for SlopeConfig {
    fn default() -> Self {
        Self {
            max_ground_angle: 25.0,
            max_stairs_angle: 50.0,
        }
    }
}

//! Configuration for ground snapping.

use bevy::prelude::*;

/// Configuration for the snap-to-ground probe.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct SnapConfig {
    /// Above this speed the character is moving too fast to be considered
    /// "on the ground conceptually" and never snaps (units/second).
    /// Clamped to [0, 100].
    pub max_snap_speed: f32,

    /// Length of the downward probe ray used to re-acquire ground contact.
    /// Clamped to be non-negative.
    pub probe_distance: f32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            max_snap_speed: 100.0,
            probe_distance: 1.0,
        }
    }
}

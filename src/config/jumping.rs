//! Configuration for jump mechanics.

use bevy::prelude::*;

/// Configuration for jump mechanics.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct JumpConfig {
    /// Apex height of a jump in world units, reached under the local gravity
    /// magnitude. Clamped to [0, 10].
    pub height: f32,

    /// Number of jumps allowed without ground contact. Clamped to [0, 5].
    pub max_air_jumps: u32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            height: 2.0,
            max_air_jumps: 0,
        }
    }
}

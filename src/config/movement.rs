//! Configuration for velocity-driven movement.

use bevy::prelude::*;

/// Configuration for velocity-driven movement.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    /// Maximum horizontal movement speed (units/second). Clamped to [0, 100].
    pub max_speed: f32,

    /// Acceleration toward the desired velocity while grounded
    /// (units/second^2). Clamped to [0, 100].
    pub ground_acceleration: f32,

    /// Acceleration toward the desired velocity while airborne
    /// (units/second^2). Intentionally weaker than ground acceleration for
    /// limited air control. Clamped to [0, 100].
    pub air_acceleration: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_speed: 10.0,
            ground_acceleration: 10.0,
            air_acceleration: 1.0,
        }
    }
}

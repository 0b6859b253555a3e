//! Controller configuration.
//!
//! [`ControllerConfig`] aggregates the per-concern configuration structs into
//! a single component. All values are range-validated: out-of-range values
//! are clamped by [`ControllerConfig::sanitize`] (with a warning) before the
//! derived slope thresholds are recomputed, so the per-tick logic never sees
//! NaN-producing inputs.

mod jumping;
mod movement;
mod slopes;
mod snapping;

pub use jumping::JumpConfig;
pub use movement::MovementConfig;
pub use slopes::SlopeConfig;
pub use snapping::SnapConfig;

use bevy::prelude::*;

/// Slope angles must stay below 90 degrees so a walkable contact normal can
/// never be perpendicular to the up axis.
const MAX_SLOPE_ANGLE: f32 = 89.9;

/// Configuration parameters for a character controller entity.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Default)]
#[reflect(Component)]
pub struct ControllerConfig {
    /// Speed and acceleration limits.
    pub movement: MovementConfig,
    /// Jump height and air-jump budget.
    pub jumping: JumpConfig,
    /// Maximum walkable slope angles.
    pub slopes: SlopeConfig,
    /// Ground-snap speed limit and probe length.
    pub snapping: SnapConfig,
}

impl ControllerConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the maximum movement speed.
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.movement.max_speed = max_speed;
        self
    }

    /// Builder: set ground and air acceleration.
    pub fn with_acceleration(mut self, ground: f32, air: f32) -> Self {
        self.movement.ground_acceleration = ground;
        self.movement.air_acceleration = air;
        self
    }

    /// Builder: set the jump apex height.
    pub fn with_jump_height(mut self, height: f32) -> Self {
        self.jumping.height = height;
        self
    }

    /// Builder: set the number of jumps allowed without ground contact.
    pub fn with_max_air_jumps(mut self, jumps: u32) -> Self {
        self.jumping.max_air_jumps = jumps;
        self
    }

    /// Builder: set the maximum walkable slope angles in degrees.
    pub fn with_slope_angles(mut self, ground: f32, stairs: f32) -> Self {
        self.slopes.max_ground_angle = ground;
        self.slopes.max_stairs_angle = stairs;
        self
    }

    /// Builder: set the maximum speed at which ground snapping still engages.
    pub fn with_max_snap_speed(mut self, speed: f32) -> Self {
        self.snapping.max_snap_speed = speed;
        self
    }

    /// Builder: set the length of the downward snap probe.
    pub fn with_probe_distance(mut self, distance: f32) -> Self {
        self.snapping.probe_distance = distance;
        self
    }

    /// Clamp every parameter into its valid range.
    ///
    /// Returns `true` if anything was out of range.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;
        let mut clamp = |value: &mut f32, min: f32, max: f32| {
            let clamped = value.clamp(min, max);
            if clamped != *value {
                *value = clamped;
                changed = true;
            }
        };

        clamp(&mut self.movement.max_speed, 0.0, 100.0);
        clamp(&mut self.movement.ground_acceleration, 0.0, 100.0);
        clamp(&mut self.movement.air_acceleration, 0.0, 100.0);
        clamp(&mut self.jumping.height, 0.0, 10.0);
        clamp(&mut self.slopes.max_ground_angle, 0.0, MAX_SLOPE_ANGLE);
        clamp(&mut self.slopes.max_stairs_angle, 0.0, MAX_SLOPE_ANGLE);
        clamp(&mut self.snapping.max_snap_speed, 0.0, 100.0);
        clamp(&mut self.snapping.probe_distance, 0.0, f32::MAX);

        if self.jumping.max_air_jumps > 5 {
            self.jumping.max_air_jumps = 5;
            changed = true;
        }

        changed
    }
}

//! Slope-relative velocity adjustment.
//!
//! Player intent is expressed per input axis; this module projects those axes
//! onto the current contact plane and moves the matching velocity components
//! toward the desired values under an acceleration cap. The component along
//! the contact normal is left alone so gravity and jump impulses are never
//! disturbed.

use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::motion::MotionState;

/// Project a direction onto the plane with the given normal and renormalize.
///
/// Returns zero if the direction is parallel to the normal; slope limits keep
/// that from happening for walkable contacts, but the guard avoids NaNs.
pub fn project_direction_on_plane(direction: Vec3, normal: Vec3) -> Vec3 {
    (direction - normal * direction.dot(normal)).normalize_or_zero()
}

/// Move `current` toward `target` by at most `max_delta`, without overshoot.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Advance the velocity toward the desired velocity along the contact plane.
///
/// Grounded movement uses the ground acceleration; airborne movement uses the
/// weaker air acceleration.
pub fn adjust_velocity(state: &mut MotionState, movement: &MovementConfig, delta: f32) {
    let x_axis = project_direction_on_plane(state.right_axis, state.contact_normal);
    let z_axis = project_direction_on_plane(state.forward_axis, state.contact_normal);

    let current_x = state.velocity.dot(x_axis);
    let current_z = state.velocity.dot(z_axis);

    let acceleration = if state.is_grounded() {
        movement.ground_acceleration
    } else {
        movement.air_acceleration
    };
    let max_delta = acceleration * delta;

    let new_x = move_towards(current_x, state.desired_velocity.x, max_delta);
    let new_z = move_towards(current_z, state.desired_velocity.z, max_delta);

    state.velocity += x_axis * (new_x - current_x) + z_axis * (new_z - current_z);
}

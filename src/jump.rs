//! Jump state machine.
//!
//! A jump picks its launch direction from the current contact situation, in
//! priority order: ground contact, steep contact, then the air-jump budget.
//! When no source is available the request is dropped silently.

use crate::config::JumpConfig;
use crate::motion::MotionState;

/// Attempt a jump for this tick's consumed request.
///
/// Returns `true` when a jump was executed. The jump direction is blended
/// with the up axis so wall jumps still gain height, and any existing
/// velocity along that direction counts toward the target jump speed so
/// repeated jumps never stack impulse.
pub fn try_jump(state: &mut MotionState, jumping: &JumpConfig) -> bool {
    let jump_direction;
    if state.is_grounded() {
        jump_direction = state.contact_normal;
    } else if state.on_steep() {
        // A steep touch refreshes the air-jump budget.
        jump_direction = state.steep_normal;
        state.jump_phase = 0;
    } else if jumping.max_air_jumps > 0 && state.jump_phase <= jumping.max_air_jumps {
        // Falling off a ledge without jumping leaves the phase at zero; the
        // first air jump still spends one phase.
        if state.jump_phase == 0 {
            state.jump_phase = 1;
        }
        jump_direction = state.contact_normal;
    } else {
        return false;
    }

    state.steps_since_jump = 0;
    state.jump_phase += 1;

    let mut jump_speed = (2.0 * state.gravity.length() * jumping.height).sqrt();
    let jump_direction = (jump_direction + state.up_axis).normalize_or_zero();
    let aligned_speed = state.velocity.dot(jump_direction);
    if aligned_speed > 0.0 {
        jump_speed = (jump_speed - aligned_speed).max(0.0);
    }
    state.velocity += jump_direction * jump_speed;
    true
}

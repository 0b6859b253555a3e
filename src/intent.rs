//! Player input surface.
//!
//! Gameplay code writes intent into these components once per input frame;
//! the fixed-timestep pipeline reads them. [`MovementIntent`] is a sampled
//! value that persists between writes, while [`JumpRequest`] is an
//! edge-latched flag that is consumed exactly once.

use bevy::prelude::*;

/// Desired planar movement, expressed in the input basis.
///
/// `x` maps to the basis right axis and `y` to the basis forward axis. The
/// stored vector never exceeds unit length, so diagonal input is no faster
/// than cardinal input.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Default)]
#[reflect(Component)]
pub struct MovementIntent {
    axis: Vec2,
}

impl MovementIntent {
    /// Set the movement axis. Inputs longer than one are scaled down to unit
    /// length; shorter inputs pass through for analog control.
    pub fn set(&mut self, axis: Vec2) {
        self.axis = axis.clamp_length_max(1.0);
    }

    /// The clamped movement axis.
    pub fn axis(&self) -> Vec2 {
        self.axis
    }

    /// Clear the movement axis.
    pub fn clear(&mut self) {
        self.axis = Vec2::ZERO;
    }
}

/// World-space frame that [`MovementIntent`] is interpreted in.
///
/// Swap this out to make movement camera-relative or planet-relative. The
/// axes are projected onto the contact plane before use, so they do not need
/// to be horizontal, only non-parallel to the surface normal.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct InputBasis {
    /// World-space direction that intent `x` pushes toward.
    pub right: Vec3,
    /// World-space direction that intent `y` pushes toward.
    pub forward: Vec3,
}

impl Default for InputBasis {
    fn default() -> Self {
        Self {
            right: Vec3::X,
            forward: Vec3::Z,
        }
    }
}

/// A single-slot, edge-latched jump request.
///
/// [`press`](Self::press) latches the request; the pipeline consumes it on
/// the next fixed tick. Pressing twice before a tick runs still produces one
/// jump, and a press is never lost to frame-rate mismatch because the slot
/// stays latched until consumed.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Default)]
#[reflect(Component)]
pub struct JumpRequest {
    requested: bool,
}

impl JumpRequest {
    /// Latch a jump request.
    pub fn press(&mut self) {
        self.requested = true;
    }

    /// Whether a request is currently latched.
    pub fn pending(&self) -> bool {
        self.requested
    }

    /// Take the latched request, clearing the slot.
    pub fn consume(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_clamps_to_unit_length() {
        let mut intent = MovementIntent::default();
        intent.set(Vec2::new(3.0, 4.0));
        assert!((intent.axis().length() - 1.0).abs() < 1e-6);

        intent.set(Vec2::new(0.5, 0.0));
        assert_eq!(intent.axis(), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn intent_preserves_direction_when_clamping() {
        let mut intent = MovementIntent::default();
        intent.set(Vec2::new(2.0, 2.0));
        let axis = intent.axis();
        assert!((axis.x - axis.y).abs() < 1e-6);
    }

    #[test]
    fn intent_clear_zeroes_axis() {
        let mut intent = MovementIntent::default();
        intent.set(Vec2::X);
        intent.clear();
        assert_eq!(intent.axis(), Vec2::ZERO);
    }

    #[test]
    fn jump_request_latches_until_consumed() {
        let mut request = JumpRequest::default();
        assert!(!request.pending());
        assert!(!request.consume());

        request.press();
        assert!(request.pending());
        assert!(request.consume());
        assert!(!request.pending());
        assert!(!request.consume());
    }

    #[test]
    fn double_press_produces_single_request() {
        let mut request = JumpRequest::default();
        request.press();
        request.press();
        assert!(request.consume());
        assert!(!request.consume());
    }

    #[test]
    fn default_basis_is_world_aligned() {
        let basis = InputBasis::default();
        assert_eq!(basis.right, Vec3::X);
        assert_eq!(basis.forward, Vec3::Z);
    }
}

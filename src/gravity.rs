//! Gravity sources.
//!
//! The controller treats gravity as an external input sampled per tick, so
//! uniform "flat world" gravity and radial "tiny planet" gravity go through
//! the same path. The local up axis is always the negated, normalized gravity
//! direction.

use bevy::prelude::*;

/// The gravity field characters move in.
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Resource)]
pub enum GravityField {
    /// The same acceleration everywhere.
    Uniform(Vec3),
    /// Acceleration pointing at `center`, like a small planet.
    Radial {
        /// World-space point gravity pulls toward.
        center: Vec3,
        /// Acceleration magnitude (units/second^2).
        strength: f32,
    },
}

impl Default for GravityField {
    fn default() -> Self {
        Self::Uniform(Vec3::new(0.0, -9.81, 0.0))
    }
}

impl GravityField {
    /// Gravity acceleration at a world position.
    pub fn at(&self, position: Vec3) -> Vec3 {
        match *self {
            Self::Uniform(gravity) => gravity,
            Self::Radial { center, strength } => {
                (center - position).normalize_or_zero() * strength
            }
        }
    }

    /// Gravity and the matching up axis at a world position.
    ///
    /// In a degenerate field (zero gravity, or a radial sample exactly at the
    /// center) the up axis falls back to `Vec3::Y` so the controller always
    /// has a usable frame.
    pub fn sample(&self, position: Vec3) -> (Vec3, Vec3) {
        let gravity = self.at(position);
        let up = -gravity.normalize_or_zero();
        if up == Vec3::ZERO {
            (gravity, Vec3::Y)
        } else {
            (gravity, up)
        }
    }
}

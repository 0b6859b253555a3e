//! Surface tagging and contact classification.
//!
//! Every collision contact is classified against the character's up axis:
//! walkable ground, a steep (near-vertical) surface, or something to ignore
//! entirely (ceilings, undersides). Surfaces opt into the more permissive
//! stairs threshold by carrying a [`SurfaceKind::Stairs`] tag.

use bevy::prelude::*;

use crate::config::SlopeConfig;

/// Contacts whose up-dot lies above this value but below the slope threshold
/// count as steep. Anything below is an overhang/underside and is discarded.
pub const STEEP_DOT_LIMIT: f32 = -0.01;

/// How a surface participates in ground detection.
///
/// Attach this to static geometry entities. Surfaces without the tag behave
/// as [`SurfaceKind::Ground`].
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[reflect(Component)]
pub enum SurfaceKind {
    /// Regular terrain; uses the ground slope threshold.
    #[default]
    Ground,
    /// Stair-like geometry; uses the more permissive stairs threshold.
    Stairs,
    /// Never treated as ground or steep, and never snapped to.
    Ignored,
}

/// Category assigned to a single contact normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactClass {
    /// Walkable: the normal is aligned with up at least as much as the
    /// surface's slope threshold requires.
    Ground,
    /// Too steep to walk on but not an overhang; walls and steep slopes.
    Steep,
    /// Overhangs, undersides, and surfaces tagged [`SurfaceKind::Ignored`].
    Ignored,
}

/// Cosine thresholds derived from the configured maximum slope angles.
///
/// Derived once from [`SlopeConfig`] and refreshed whenever the config
/// changes, so the per-contact test is a plain comparison.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct SlopeThresholds {
    /// Minimum up-dot for a regular surface to count as ground.
    pub min_ground_dot: f32,
    /// Minimum up-dot for a stairs-tagged surface to count as ground.
    pub min_stairs_dot: f32,
}

impl Default for SlopeThresholds {
    fn default() -> Self {
        Self::from_config(&SlopeConfig::default())
    }
}

impl SlopeThresholds {
    /// Derive thresholds from the configured angles.
    pub fn from_config(slopes: &SlopeConfig) -> Self {
        Self {
            min_ground_dot: slopes.max_ground_angle.to_radians().cos(),
            min_stairs_dot: slopes.max_stairs_angle.to_radians().cos(),
        }
    }

    /// The minimum up-dot for the given surface to count as ground.
    ///
    /// [`SurfaceKind::Ignored`] yields an unsatisfiable threshold.
    #[inline]
    pub fn min_dot(&self, surface: SurfaceKind) -> f32 {
        match surface {
            SurfaceKind::Ground => self.min_ground_dot,
            SurfaceKind::Stairs => self.min_stairs_dot,
            SurfaceKind::Ignored => f32::INFINITY,
        }
    }

    /// Classify a contact by its normal's alignment with the up axis.
    pub fn classify(&self, surface: SurfaceKind, up_dot: f32) -> ContactClass {
        if surface == SurfaceKind::Ignored {
            return ContactClass::Ignored;
        }
        if up_dot >= self.min_dot(surface) {
            ContactClass::Ground
        } else if up_dot > STEEP_DOT_LIMIT {
            ContactClass::Steep
        } else {
            ContactClass::Ignored
        }
    }
}

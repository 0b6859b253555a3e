//! Detection result structures.
//!
//! These structures hold the results of the downward probe ray used to
//! re-attach the character to ground it briefly lost contact with.

use bevy::prelude::*;

use crate::surface::SurfaceKind;

/// Result of the downward ground probe.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ProbeHit {
    /// Normal of the surface at the hit point.
    pub normal: Vec3,
    /// Kind of the surface that was hit.
    pub surface: SurfaceKind,
}

impl ProbeHit {
    /// Create a probe hit.
    pub fn new(normal: Vec3, surface: SurfaceKind) -> Self {
        Self { normal, surface }
    }
}

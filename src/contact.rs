//! Per-tick contact accumulation.
//!
//! Collision contacts arrive zero or more times per fixed tick, once per
//! contact point, possibly from several overlapping colliders. They are all
//! folded into a [`ContactBatch`] before grounded-state resolution runs;
//! accumulation is a plain sum so ordering among contacts does not matter.

use bevy::prelude::*;

use crate::detection::ProbeHit;
use crate::surface::ContactClass;

/// Accumulated contact data for a single fixed tick.
///
/// Rebuilt every tick: sensors fill it after the previous tick's state was
/// cleared, grounded resolution consumes it, and the commit phase clears it
/// again.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct ContactBatch {
    ground_count: u32,
    steep_count: u32,
    ground_sum: Vec3,
    steep_sum: Vec3,
    snap_candidate: Option<ProbeHit>,
}

impl ContactBatch {
    /// Fold one classified contact point into the batch.
    ///
    /// Ignored contacts are dropped here so callers can push unconditionally.
    pub fn push(&mut self, class: ContactClass, normal: Vec3) {
        match class {
            ContactClass::Ground => {
                self.ground_count += 1;
                self.ground_sum += normal;
            }
            ContactClass::Steep => {
                self.steep_count += 1;
                self.steep_sum += normal;
            }
            ContactClass::Ignored => {}
        }
    }

    /// Number of ground contacts seen this tick.
    #[inline]
    pub fn ground_count(&self) -> u32 {
        self.ground_count
    }

    /// Number of steep contacts seen this tick.
    #[inline]
    pub fn steep_count(&self) -> u32 {
        self.steep_count
    }

    /// Representative ground normal: the single contact's normal, or the
    /// normalized sum when several ground contacts were accumulated.
    pub fn ground_normal(&self) -> Vec3 {
        if self.ground_count > 1 {
            self.ground_sum.normalize_or_zero()
        } else {
            self.ground_sum
        }
    }

    /// Averaged steep normal, normalized. Zero when no steep contacts.
    pub fn steep_normal(&self) -> Vec3 {
        self.steep_sum.normalize_or_zero()
    }

    /// Store (or clear) the downward probe result for this tick.
    pub fn set_snap_candidate(&mut self, hit: Option<ProbeHit>) {
        self.snap_candidate = hit;
    }

    /// The downward probe result for this tick, if one was recorded.
    #[inline]
    pub fn snap_candidate(&self) -> Option<ProbeHit> {
        self.snap_candidate
    }

    /// Reset the batch at the end of the tick.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

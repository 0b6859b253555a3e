//! Authoritative per-tick motion state.
//!
//! [`MotionState`] mirrors the rigid body's velocity at the start of each
//! fixed tick, carries the resolved contact frame through the velocity and
//! jump stages, and is written back to the body at the end. Everything in
//! here is plain arithmetic over one entity's state; the ECS side lives in
//! `systems`.

use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::contact::ContactBatch;
use crate::intent::{InputBasis, JumpRequest, MovementIntent};
use crate::surface::SlopeThresholds;
use crate::velocity::project_direction_on_plane;

/// Per-tick movement state of one character.
///
/// `contact_normal` is only meaningful while `ground_contacts > 0`; when the
/// character is airborne it holds the up axis so velocity adjustment and air
/// jumps keep a sane frame.
#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
#[require(
    ContactBatch,
    MovementIntent,
    InputBasis,
    JumpRequest,
    ControllerConfig,
    SlopeThresholds
)]
pub struct MotionState {
    /// World-space velocity, authoritative within a tick.
    pub velocity: Vec3,
    /// Player-intended velocity, expressed per input axis (`x` along the
    /// right axis, `z` along the forward axis).
    pub desired_velocity: Vec3,
    /// Representative ground normal for this tick.
    pub contact_normal: Vec3,
    /// Averaged steep-wall normal for this tick.
    pub steep_normal: Vec3,
    /// Ground contacts counted toward grounded status this tick.
    pub ground_contacts: u32,
    /// Steep contacts seen this tick.
    pub steep_contacts: u32,
    /// Jumps used since the last ground or steep contact.
    pub jump_phase: u32,
    /// Fixed ticks since the character was last grounded.
    pub steps_since_grounded: u32,
    /// Fixed ticks since the last executed jump.
    pub steps_since_jump: u32,
    /// Local up axis, opposite the sampled gravity.
    pub up_axis: Vec3,
    /// Input right axis projected onto the up plane.
    pub right_axis: Vec3,
    /// Input forward axis projected onto the up plane.
    pub forward_axis: Vec3,
    /// Gravity sampled at the body position this tick.
    pub gravity: Vec3,
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            desired_velocity: Vec3::ZERO,
            contact_normal: Vec3::Y,
            steep_normal: Vec3::ZERO,
            ground_contacts: 0,
            steep_contacts: 0,
            jump_phase: 0,
            steps_since_grounded: 0,
            // Large enough that the first tick is past every jump guard.
            steps_since_jump: u32::MAX / 2,
            up_axis: Vec3::Y,
            right_axis: Vec3::X,
            forward_axis: Vec3::Z,
            gravity: Vec3::new(0.0, -9.81, 0.0),
        }
    }
}

impl MotionState {
    /// Whether the character counts as grounded this tick.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.ground_contacts > 0
    }

    /// Whether the character touched a steep surface this tick.
    #[inline]
    pub fn on_steep(&self) -> bool {
        self.steep_contacts > 0
    }

    /// Start a fixed tick: refresh velocity and the gravity frame, derive the
    /// desired velocity from intent, and advance the step counters.
    ///
    /// The jump phase resets once a full tick has elapsed without a jump, so
    /// a consumed budget comes back after landing (or after the latch window
    /// passes).
    pub fn begin_tick(
        &mut self,
        velocity: Vec3,
        gravity: Vec3,
        up_axis: Vec3,
        basis: &InputBasis,
        intent: &MovementIntent,
        max_speed: f32,
    ) {
        self.velocity = velocity;
        self.gravity = gravity;
        self.up_axis = up_axis;
        self.right_axis = project_direction_on_plane(basis.right, up_axis);
        self.forward_axis = project_direction_on_plane(basis.forward, up_axis);
        let axis = intent.axis();
        self.desired_velocity = Vec3::new(axis.x, 0.0, axis.y) * max_speed;

        self.steps_since_grounded = self.steps_since_grounded.saturating_add(1);
        if self.steps_since_jump > 1 {
            self.jump_phase = 0;
        }
        self.steps_since_jump = self.steps_since_jump.saturating_add(1);
    }

    /// Resolve grounded status from this tick's contact batch.
    ///
    /// Tries, in order: raw ground contacts, the snap probe, and promotion of
    /// an averaged steep normal. On success the grounded counters reset; on
    /// failure the contact normal falls back to the up axis.
    pub fn resolve(
        &mut self,
        batch: &ContactBatch,
        thresholds: &SlopeThresholds,
        max_snap_speed: f32,
    ) {
        self.ground_contacts = batch.ground_count();
        self.steep_contacts = batch.steep_count();
        if self.ground_contacts > 0 {
            self.contact_normal = batch.ground_normal();
        }
        self.steep_normal = batch.steep_normal();

        let grounded = self.ground_contacts > 0
            || self.try_snap(batch, thresholds, max_snap_speed)
            || self.promote_steep(thresholds);

        if grounded {
            self.steps_since_grounded = 0;
            self.jump_phase = 0;
        } else {
            self.contact_normal = self.up_axis;
        }
    }

    /// Re-attach to ground the body only just lost.
    ///
    /// Skipped when the body has been airborne for more than one tick, when a
    /// jump happened within the last two ticks (a deliberate jump must not be
    /// snapped back down), or when the body moves faster than the snap limit.
    fn try_snap(
        &mut self,
        batch: &ContactBatch,
        thresholds: &SlopeThresholds,
        max_snap_speed: f32,
    ) -> bool {
        if self.steps_since_grounded > 1 || self.steps_since_jump <= 2 {
            return false;
        }
        let speed = self.velocity.length();
        if speed > max_snap_speed {
            return false;
        }
        let Some(hit) = batch.snap_candidate() else {
            return false;
        };
        if self.up_axis.dot(hit.normal) < thresholds.min_dot(hit.surface) {
            return false;
        }

        self.ground_contacts = 1;
        self.contact_normal = hit.normal;
        // Remove any outward component so a convex bump does not launch the
        // body, but keep the speed.
        let dot = self.velocity.dot(hit.normal);
        if dot > 0.0 {
            self.velocity = (self.velocity - hit.normal * dot).normalize_or_zero() * speed;
        }
        true
    }

    /// Treat a crevasse of steep walls as ground when their averaged normal
    /// is walkable. Requires at least two steep contacts.
    fn promote_steep(&mut self, thresholds: &SlopeThresholds) -> bool {
        if self.steep_contacts > 1
            && self.up_axis.dot(self.steep_normal) >= thresholds.min_ground_dot
        {
            self.ground_contacts = 1;
            self.contact_normal = self.steep_normal;
            return true;
        }
        false
    }
}

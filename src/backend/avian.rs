//! Avian3D physics backend implementation.
//!
//! This module provides the physics backend for Avian3D. Enable with the
//! `avian3d` feature.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::config::ControllerConfig;
use crate::contact::ContactBatch;
use crate::detection::ProbeHit;
use crate::motion::MotionState;
use crate::surface::{SlopeThresholds, SurfaceKind};
use crate::ControllerSet;

/// Avian3D physics backend for the character controller.
///
/// Velocity and position go through Avian's components; contact gathering
/// reads Avian's contact graph and the snap probe uses `SpatialQuery`
/// raycasts.
pub struct Avian3dBackend;

impl CharacterPhysicsBackend for Avian3dBackend {
    fn plugin() -> impl Plugin {
        Avian3dBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<LinearVelocity>(entity)
            .map(|v| v.0)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3) {
        if let Some(mut vel) = world.get_mut::<LinearVelocity>(entity) {
            vel.0 = velocity;
        }
    }

    fn get_position(world: &World, entity: Entity) -> Vec3 {
        // Try Avian's Position component first, then fall back to Transform
        world
            .get::<Position>(entity)
            .map(|p| p.0)
            .or_else(|| world.get::<Transform>(entity).map(|t| t.translation))
            .or_else(|| {
                world
                    .get::<GlobalTransform>(entity)
                    .map(|t| t.translation())
            })
            .unwrap_or(Vec3::ZERO)
    }
}

/// Plugin that sets up Avian3D-specific systems for the character controller.
pub struct Avian3dBackendPlugin;

impl Plugin for Avian3dBackendPlugin {
    fn build(&self, app: &mut App) {
        // Contact gathering must finish before the snap probe decides whether
        // a probe is needed at all.
        app.add_systems(
            FixedUpdate,
            (gather_contacts, probe_for_snap)
                .chain()
                .in_set(ControllerSet::Sensors),
        );
    }
}

/// Fold Avian's contact manifolds into each character's contact batch.
///
/// Runs every tick contacts persist, once per contact point. The manifold
/// normal points from the first collider toward the second, so it is flipped
/// when the character is the first collider to always face the character.
fn gather_contacts(
    collisions: Collisions,
    mut characters: Query<(Entity, &mut ContactBatch, &MotionState, &SlopeThresholds)>,
    surfaces: Query<&SurfaceKind>,
) {
    for (entity, mut batch, state, thresholds) in &mut characters {
        for pair in collisions.collisions_with(entity) {
            if !pair.is_touching() {
                continue;
            }
            let (other, flip) = if pair.collider1 == entity {
                (pair.collider2, true)
            } else {
                (pair.collider1, false)
            };
            let surface = surfaces.get(other).copied().unwrap_or_default();
            for manifold in &pair.manifolds {
                let normal = if flip {
                    -manifold.normal
                } else {
                    manifold.normal
                };
                let up_dot = state.up_axis.dot(normal);
                for _point in &manifold.points {
                    batch.push(thresholds.classify(surface, up_dot), normal);
                }
            }
        }
    }
}

/// Cast the downward snap probe for characters with no ground contact.
///
/// Only records a candidate; whether the snap actually happens is decided by
/// the grounded-resolution step, which also checks the step counters and the
/// speed limit.
fn probe_for_snap(
    spatial_query: SpatialQuery,
    mut characters: Query<(
        Entity,
        &mut ContactBatch,
        &MotionState,
        &ControllerConfig,
        &GlobalTransform,
    )>,
    positions: Query<&Position>,
    surfaces: Query<&SurfaceKind>,
) {
    for (entity, mut batch, state, config, transform) in &mut characters {
        batch.set_snap_candidate(None);
        if batch.ground_count() > 0 {
            continue;
        }
        let Ok(direction) = Dir3::new(-state.up_axis) else {
            continue;
        };
        let origin = positions
            .get(entity)
            .map(|p| p.0)
            .unwrap_or_else(|_| transform.translation());
        let filter = SpatialQueryFilter::default().with_excluded_entities([entity]);
        if let Some(hit) = spatial_query.cast_ray(
            origin,
            direction,
            config.snapping.probe_distance,
            true,
            &filter,
        ) {
            let surface = surfaces.get(hit.entity).copied().unwrap_or_default();
            batch.set_snap_candidate(Some(ProbeHit::new(hit.normal, surface)));
        }
    }
}

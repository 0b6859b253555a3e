//! Fixed-tick systems.
//!
//! These systems run in [`ControllerSet`](crate::ControllerSet) order every
//! fixed tick: preparation, sensors (backend-owned), grounded resolution,
//! motion, then commit. The backend-generic systems are exclusive world
//! systems so they can go through [`CharacterPhysicsBackend`] for body state.

use bevy::prelude::*;

use crate::backend::CharacterPhysicsBackend;
use crate::config::ControllerConfig;
use crate::contact::ContactBatch;
use crate::gravity::GravityField;
use crate::intent::{InputBasis, JumpRequest, MovementIntent};
use crate::jump::try_jump;
use crate::motion::MotionState;
use crate::surface::SlopeThresholds;
use crate::velocity::adjust_velocity;

/// Sanitize edited configs and re-derive the slope thresholds.
pub fn refresh_config(
    mut characters: Query<
        (Entity, &mut ControllerConfig, &mut SlopeThresholds),
        Changed<ControllerConfig>,
    >,
) {
    for (entity, mut config, mut thresholds) in &mut characters {
        // Bypass change detection so the clamp itself does not re-trigger
        // this system every tick.
        if config.bypass_change_detection().sanitize() {
            warn!("controller config on {entity} had out-of-range values, clamped");
        }
        *thresholds = SlopeThresholds::from_config(&config.slopes);
    }
}

/// Start the tick for every character: mirror body velocity, sample gravity,
/// derive the desired velocity, advance step counters.
pub fn begin_tick<B: CharacterPhysicsBackend>(world: &mut World) {
    let field = *world.resource::<GravityField>();
    let mut query = world.query_filtered::<Entity, With<MotionState>>();
    let entities: Vec<Entity> = query.iter(world).collect();

    for entity in entities {
        let velocity = B::get_velocity(world, entity);
        let position = B::get_position(world, entity);
        let (gravity, up_axis) = field.sample(position);

        let Some(basis) = world.get::<InputBasis>(entity).copied() else {
            continue;
        };
        let Some(intent) = world.get::<MovementIntent>(entity).copied() else {
            continue;
        };
        let Some(config) = world.get::<ControllerConfig>(entity).copied() else {
            continue;
        };
        let Some(mut state) = world.get_mut::<MotionState>(entity) else {
            continue;
        };
        state.begin_tick(
            velocity,
            gravity,
            up_axis,
            &basis,
            &intent,
            config.movement.max_speed,
        );
    }
}

/// Resolve grounded status from this tick's contact batch.
pub fn resolve_grounded(
    mut characters: Query<(
        &mut MotionState,
        &ContactBatch,
        &SlopeThresholds,
        &ControllerConfig,
    )>,
) {
    for (mut state, batch, thresholds, config) in &mut characters {
        state.resolve(batch, thresholds, config.snapping.max_snap_speed);
    }
}

/// Accelerate toward the desired velocity along the contact plane.
pub fn apply_movement(
    time: Res<Time>,
    mut characters: Query<(&mut MotionState, &ControllerConfig)>,
) {
    let delta = time.delta_secs();
    for (mut state, config) in &mut characters {
        adjust_velocity(&mut state, &config.movement, delta);
    }
}

/// Consume latched jump requests and execute jumps where a source exists.
pub fn process_jumps(
    mut characters: Query<(&mut MotionState, &mut JumpRequest, &ControllerConfig)>,
) {
    for (mut state, mut request, config) in &mut characters {
        if request.consume() {
            try_jump(&mut state, &config.jumping);
        }
    }
}

/// Integrate gravity into the working velocity.
pub fn apply_gravity(time: Res<Time>, mut characters: Query<&mut MotionState>) {
    let delta = time.delta_secs();
    for mut state in &mut characters {
        let gravity = state.gravity;
        state.velocity += gravity * delta;
    }
}

/// Write the working velocity back to the physics body.
pub fn commit_velocity<B: CharacterPhysicsBackend>(world: &mut World) {
    let mut query = world.query::<(Entity, &MotionState)>();
    let commits: Vec<(Entity, Vec3)> = query
        .iter(world)
        .map(|(entity, state)| (entity, state.velocity))
        .collect();
    for (entity, velocity) in commits {
        B::set_velocity(world, entity, velocity);
    }
}

/// Reset per-tick accumulators once the tick's velocity has been committed.
pub fn clear_tick_state(mut batches: Query<&mut ContactBatch, With<MotionState>>) {
    for mut batch in &mut batches {
        batch.clear();
    }
}

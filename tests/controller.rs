//! End-to-end tests of the fixed-tick pipeline against a scripted backend.
//!
//! The scripted backend stores body state in plain components and a test
//! system plays scripted contacts into the batch during the sensor phase, so
//! the full tick order (prepare, sense, resolve, move, jump, gravity, commit,
//! clear) runs without a physics engine.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use grip_character_controller::detection::ProbeHit;
use grip_character_controller::prelude::*;
use grip_character_controller::surface::ContactClass;

const TICK: f64 = 1.0 / 60.0;

#[derive(Component, Default)]
struct BodyVelocity(Vec3);

struct ScriptedBackend;

impl CharacterPhysicsBackend for ScriptedBackend {
    fn plugin() -> impl Plugin {
        NoOpBackendPlugin
    }

    fn get_velocity(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<BodyVelocity>(entity)
            .map(|v| v.0)
            .unwrap_or(Vec3::ZERO)
    }

    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3) {
        if let Some(mut vel) = world.get_mut::<BodyVelocity>(entity) {
            vel.0 = velocity;
        }
    }

    fn get_position(world: &World, entity: Entity) -> Vec3 {
        world
            .get::<Transform>(entity)
            .map(|t| t.translation)
            .unwrap_or(Vec3::ZERO)
    }
}

/// Contacts replayed into every character's batch each tick.
#[derive(Resource, Default)]
struct ScriptedContacts {
    contacts: Vec<(ContactClass, Vec3)>,
    probe: Option<ProbeHit>,
}

fn feed_contacts(script: Res<ScriptedContacts>, mut batches: Query<&mut ContactBatch>) {
    for mut batch in &mut batches {
        for &(class, normal) in &script.contacts {
            batch.push(class, normal);
        }
        batch.set_snap_candidate(script.probe);
    }
}

fn create_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(Time::<Fixed>::from_hz(60.0));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        TICK,
    )));
    app.add_plugins(CharacterControllerPlugin::<ScriptedBackend>::default());
    app.init_resource::<ScriptedContacts>();
    app.add_systems(FixedUpdate, feed_contacts.in_set(ControllerSet::Sensors));
    // The first update has a zero delta and runs no fixed step; warm up here
    // so every `tick` below advances exactly one fixed tick.
    app.update();
    app
}

fn spawn_character(app: &mut App, config: ControllerConfig) -> Entity {
    app.world_mut()
        .spawn((
            Transform::default(),
            BodyVelocity::default(),
            MotionState::default(),
            config,
        ))
        .id()
}

fn tick(app: &mut App) {
    app.update();
}

fn set_contacts(app: &mut App, contacts: Vec<(ContactClass, Vec3)>) {
    app.world_mut().resource_mut::<ScriptedContacts>().contacts = contacts;
}

fn set_probe(app: &mut App, probe: Option<ProbeHit>) {
    app.world_mut().resource_mut::<ScriptedContacts>().probe = probe;
}

fn state(app: &App, entity: Entity) -> MotionState {
    app.world().get::<MotionState>(entity).unwrap().clone()
}

fn body_velocity(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<BodyVelocity>(entity).unwrap().0
}

fn press_jump(app: &mut App, entity: Entity) {
    app.world_mut()
        .get_mut::<JumpRequest>(entity)
        .unwrap()
        .press();
}

/// Config with no gravity influence on the assertions: zero acceleration so
/// idle ticks leave velocity alone.
fn inert_config() -> ControllerConfig {
    ControllerConfig::new().with_acceleration(0.0, 0.0)
}

#[test]
fn ground_contacts_accumulate_into_grounded_state() {
    let mut app = create_app();
    app.insert_resource(GravityField::Uniform(Vec3::ZERO));
    let entity = spawn_character(&mut app, inert_config());

    let a = Vec3::new(0.2, 0.98, 0.0).normalize();
    let b = Vec3::new(-0.2, 0.98, 0.0).normalize();
    set_contacts(&mut app, vec![(ContactClass::Ground, a), (ContactClass::Ground, b)]);
    tick(&mut app);

    let state = state(&app, entity);
    assert!(state.is_grounded());
    assert_eq!(state.ground_contacts, 2);
    let expected = (a + b).normalize();
    assert!((state.contact_normal - expected).length() < 1e-5);
    assert_eq!(state.steps_since_grounded, 0);
}

#[test]
fn snap_reattaches_and_preserves_speed() {
    let mut app = create_app();
    app.insert_resource(GravityField::Uniform(Vec3::ZERO));
    let entity = spawn_character(&mut app, inert_config());

    // Grounded for one tick so the snap window is open.
    set_contacts(&mut app, vec![(ContactClass::Ground, Vec3::Y)]);
    tick(&mut app);

    // Contact lost, probe still sees the floor, body drifting up and forward.
    set_contacts(&mut app, Vec::new());
    set_probe(
        &mut app,
        Some(ProbeHit::new(Vec3::Y, SurfaceKind::Ground)),
    );
    app.world_mut().get_mut::<BodyVelocity>(entity).unwrap().0 = Vec3::new(3.0, 1.0, 0.0);
    tick(&mut app);

    let state = state(&app, entity);
    assert!(state.is_grounded());
    assert_eq!(state.ground_contacts, 1);

    let speed = Vec3::new(3.0, 1.0, 0.0).length();
    let velocity = body_velocity(&app, entity);
    assert!((velocity.length() - speed).abs() < 1e-4);
    assert!(velocity.y.abs() < 1e-4);
    assert!((velocity.x - speed).abs() < 1e-4);
}

#[test]
fn snap_never_cancels_a_fresh_jump() {
    let mut app = create_app();
    let entity = spawn_character(&mut app, inert_config());

    set_contacts(&mut app, vec![(ContactClass::Ground, Vec3::Y)]);
    tick(&mut app);

    press_jump(&mut app, entity);
    tick(&mut app);
    assert!(body_velocity(&app, entity).y > 0.0);

    // Airborne right after the jump; the probe still sees the floor below.
    set_contacts(&mut app, Vec::new());
    set_probe(
        &mut app,
        Some(ProbeHit::new(Vec3::Y, SurfaceKind::Ground)),
    );
    tick(&mut app);

    let state = state(&app, entity);
    assert!(!state.is_grounded());
    assert!(body_velocity(&app, entity).y > 0.0);
}

#[test]
fn jump_speed_matches_configured_height() {
    let mut app = create_app();
    let entity = spawn_character(&mut app, inert_config());

    set_contacts(&mut app, vec![(ContactClass::Ground, Vec3::Y)]);
    tick(&mut app);

    press_jump(&mut app, entity);
    tick(&mut app);

    // One tick of gravity accrued before the jump and one after it.
    let expected = (2.0_f32 * 9.81 * 2.0).sqrt() - 2.0 * 9.81 * (TICK as f32);
    assert!((body_velocity(&app, entity).y - expected).abs() < 1e-3);
}

#[test]
fn air_jump_budget_allows_exactly_two_air_jumps() {
    let mut app = create_app();
    let entity = spawn_character(&mut app, inert_config().with_max_air_jumps(2));

    set_contacts(&mut app, vec![(ContactClass::Ground, Vec3::Y)]);
    tick(&mut app);

    // Ground jump, then airborne from here on. One idle tick between
    // requests keeps the jump phase from resetting while airborne.
    press_jump(&mut app, entity);
    tick(&mut app);
    set_contacts(&mut app, Vec::new());
    tick(&mut app);

    // Air jump 1.
    press_jump(&mut app, entity);
    let before = body_velocity(&app, entity).y;
    tick(&mut app);
    assert!(body_velocity(&app, entity).y > before);
    tick(&mut app);

    // Air jump 2.
    press_jump(&mut app, entity);
    let before = body_velocity(&app, entity).y;
    tick(&mut app);
    assert!(body_velocity(&app, entity).y > before);
    tick(&mut app);

    // Third request: silently dropped, only gravity acts.
    press_jump(&mut app, entity);
    let before = body_velocity(&app, entity).y;
    tick(&mut app);
    let after = body_velocity(&app, entity).y;
    assert!((after - (before - 9.81 * TICK as f32)).abs() < 1e-4);
}

#[test]
fn velocity_adjustment_is_idempotent_at_target() {
    let mut app = create_app();
    app.insert_resource(GravityField::Uniform(Vec3::ZERO));
    let config = ControllerConfig::new()
        .with_max_speed(5.0)
        .with_acceleration(50.0, 1.0);
    let entity = spawn_character(&mut app, config);

    app.world_mut()
        .get_mut::<MovementIntent>(entity)
        .unwrap()
        .set(Vec2::new(1.0, 0.0));
    set_contacts(&mut app, vec![(ContactClass::Ground, Vec3::Y)]);

    for _ in 0..30 {
        tick(&mut app);
    }
    let settled = body_velocity(&app, entity);
    assert!((settled.x - 5.0).abs() < 1e-4);

    for _ in 0..10 {
        tick(&mut app);
    }
    assert!((body_velocity(&app, entity) - settled).length() < 1e-4);
}

#[test]
fn steep_trench_promotes_to_ground_and_allows_jumping_out() {
    let mut app = create_app();
    let entity = spawn_character(&mut app, inert_config());

    set_contacts(
        &mut app,
        vec![
            (ContactClass::Steep, Vec3::new(0.9, 0.44, 0.0)),
            (ContactClass::Steep, Vec3::new(-0.9, 0.44, 0.0)),
        ],
    );
    tick(&mut app);

    let state = state(&app, entity);
    assert!(state.is_grounded());
    assert_eq!(state.ground_contacts, 1);
    assert!((state.contact_normal - Vec3::Y).length() < 1e-4);

    press_jump(&mut app, entity);
    tick(&mut app);
    assert!(body_velocity(&app, entity).y > 0.0);
}

#[test]
fn airborne_character_keeps_up_axis_as_contact_normal() {
    let mut app = create_app();
    let entity = spawn_character(&mut app, inert_config());

    tick(&mut app);
    tick(&mut app);

    let state = state(&app, entity);
    assert!(!state.is_grounded());
    assert_eq!(state.contact_normal, Vec3::Y);
    assert!(state.steps_since_grounded > 0);
}

#[test]
fn gravity_field_accelerates_the_body() {
    let mut app = create_app();
    let entity = spawn_character(&mut app, inert_config());

    tick(&mut app);
    tick(&mut app);
    tick(&mut app);

    let expected = -9.81 * 3.0 * TICK as f32;
    assert!((body_velocity(&app, entity).y - expected).abs() < 1e-4);
}

#[test]
fn radial_gravity_pulls_toward_center_with_local_up() {
    let mut app = create_app();
    app.insert_resource(GravityField::Radial {
        center: Vec3::ZERO,
        strength: 9.81,
    });
    let entity = spawn_character(&mut app, inert_config());
    app.world_mut()
        .get_mut::<Transform>(entity)
        .unwrap()
        .translation = Vec3::new(10.0, 0.0, 0.0);

    tick(&mut app);

    let state = state(&app, entity);
    assert!((state.up_axis - Vec3::X).length() < 1e-5);
    assert!(body_velocity(&app, entity).x < 0.0);
}

#[test]
fn out_of_range_config_is_clamped_and_thresholds_follow() {
    let mut app = create_app();
    let entity = spawn_character(
        &mut app,
        ControllerConfig::new().with_slope_angles(200.0, 45.0),
    );

    tick(&mut app);

    let config = app.world().get::<ControllerConfig>(entity).unwrap();
    assert!(config.slopes.max_ground_angle < 90.0);

    let thresholds = app
        .world()
        .get::<grip_character_controller::surface::SlopeThresholds>(entity)
        .unwrap();
    assert!((thresholds.min_stairs_dot - 45.0_f32.to_radians().cos()).abs() < 1e-5);
}

#[test]
fn contact_batch_is_cleared_every_tick() {
    let mut app = create_app();
    let entity = spawn_character(&mut app, inert_config());

    set_contacts(&mut app, vec![(ContactClass::Ground, Vec3::Y)]);
    tick(&mut app);
    set_contacts(&mut app, Vec::new());
    tick(&mut app);
    tick(&mut app);

    // Stale contacts from the first tick must not keep the character grounded.
    let state = state(&app, entity);
    assert!(!state.is_grounded());
    let batch = app.world().get::<ContactBatch>(entity).unwrap();
    assert_eq!(batch.ground_count(), 0);
}

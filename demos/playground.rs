//! Flat-world playground: a sphere character on ground, a slope, and a
//! stairs-tagged ramp.
//!
//! Controls: WASD to move, Space to jump.
//!
//! Run with: `cargo run --example playground --features avian3d`

use avian3d::prelude::*;
use bevy::prelude::*;

use grip_character_controller::prelude::*;

#[derive(Component)]
struct Player;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(CharacterControllerPlugin::<Avian3dBackend>::default())
        // The controller integrates gravity itself.
        .insert_resource(Gravity(Vec3::ZERO))
        .add_systems(Startup, setup)
        .add_systems(Update, (read_input, follow_camera))
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_material = materials.add(Color::srgb(0.3, 0.5, 0.3));

    // Ground plane.
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(40.0, 1.0, 40.0))),
        MeshMaterial3d(ground_material.clone()),
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Static,
        Collider::cuboid(40.0, 1.0, 40.0),
        SurfaceKind::Ground,
    ));

    // A 40 degree slope: too steep to walk, jumpable as a steep surface.
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(8.0, 1.0, 8.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.5, 0.4, 0.3))),
        Transform::from_xyz(8.0, 1.0, 0.0)
            .with_rotation(Quat::from_rotation_z(40.0_f32.to_radians())),
        RigidBody::Static,
        Collider::cuboid(8.0, 1.0, 8.0),
        SurfaceKind::Ground,
    ));

    // The same angle tagged as stairs is walkable.
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(8.0, 1.0, 8.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.4, 0.4, 0.6))),
        Transform::from_xyz(-8.0, 1.0, 0.0)
            .with_rotation(Quat::from_rotation_z(-40.0_f32.to_radians())),
        RigidBody::Static,
        Collider::cuboid(8.0, 1.0, 8.0),
        SurfaceKind::Stairs,
    ));

    // Player sphere.
    commands.spawn((
        Player,
        Mesh3d(meshes.add(Sphere::new(0.5))),
        MeshMaterial3d(materials.add(Color::srgb(0.9, 0.6, 0.2))),
        Transform::from_xyz(0.0, 2.0, 0.0),
        RigidBody::Dynamic,
        Collider::sphere(0.5),
        LockedAxes::ROTATION_LOCKED,
        MotionState::default(),
        ControllerConfig::new().with_max_air_jumps(1),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 8.0, 14.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut players: Query<(&mut MovementIntent, &mut JumpRequest), With<Player>>,
) {
    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyW) {
        axis.y -= 1.0;
    }

    for (mut intent, mut jump) in &mut players {
        intent.set(axis);
        if keys.just_pressed(KeyCode::Space) {
            jump.press();
        }
    }
}

fn follow_camera(
    players: Query<&Transform, (With<Player>, Without<Camera3d>)>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    for mut camera in &mut cameras {
        let target = player.translation + Vec3::new(0.0, 8.0, 14.0);
        camera.translation = camera.translation.lerp(target, 0.1);
        camera.look_at(player.translation, Vec3::Y);
    }
}

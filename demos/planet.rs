//! Tiny-planet demo: radial gravity pulls the character onto a sphere and
//! the controller keeps working with a per-position up axis.
//!
//! Controls: WASD to move, Space to jump.
//!
//! Run with: `cargo run --example planet --features avian3d`

use avian3d::prelude::*;
use bevy::prelude::*;

use grip_character_controller::prelude::*;

const PLANET_RADIUS: f32 = 12.0;

#[derive(Component)]
struct Player;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PhysicsPlugins::default())
        .add_plugins(CharacterControllerPlugin::<Avian3dBackend>::default())
        .insert_resource(Gravity(Vec3::ZERO))
        .insert_resource(GravityField::Radial {
            center: Vec3::ZERO,
            strength: 9.81,
        })
        .add_systems(Startup, setup)
        .add_systems(Update, (read_input, update_input_basis, follow_camera))
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // The planet.
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(PLANET_RADIUS))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.5, 0.35))),
        Transform::default(),
        RigidBody::Static,
        Collider::sphere(PLANET_RADIUS),
        SurfaceKind::Ground,
    ));

    // Player sphere, dropped just above the north pole.
    commands.spawn((
        Player,
        Mesh3d(meshes.add(Sphere::new(0.5))),
        MeshMaterial3d(materials.add(Color::srgb(0.9, 0.6, 0.2))),
        Transform::from_xyz(0.0, PLANET_RADIUS + 2.0, 0.0),
        RigidBody::Dynamic,
        Collider::sphere(0.5),
        LockedAxes::ROTATION_LOCKED,
        MotionState::default(),
        ControllerConfig::new()
            // The planet surface curves away underfoot; a longer probe keeps
            // the character attached while walking around it.
            .with_probe_distance(2.0)
            .with_slope_angles(45.0, 60.0),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(20.0, 30.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, PLANET_RADIUS + 10.0, 18.0).looking_at(Vec3::ZERO, Vec3::Y),
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

/// Keep the input frame tangent to the planet so "forward" follows the
/// surface as the character walks around it.
fn update_input_basis(mut players: Query<(&Transform, &mut InputBasis), With<Player>>) {
    for (transform, mut basis) in &mut players {
        let up = transform.translation.normalize_or_zero();
        if up == Vec3::ZERO {
            continue;
        }
        let right = Vec3::X - up * up.dot(Vec3::X);
        let right = if right.length_squared() > 1e-4 {
            right.normalize()
        } else {
            up.cross(Vec3::Z).normalize_or_zero()
        };
        basis.right = right;
        basis.forward = right.cross(up).normalize_or_zero();
    }
}

fn follow_camera(
    players: Query<&Transform, (With<Player>, Without<Camera3d>)>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    let Ok(player) = players.single() else {
        return;
    };
    let up = player.translation.normalize_or_zero();
    for mut camera in &mut cameras {
        let target = player.translation + up * 6.0 + Vec3::new(0.0, 0.0, 12.0);
        camera.translation = camera.translation.lerp(target, 0.1);
        camera.look_at(player.translation, if up == Vec3::ZERO { Vec3::Y } else { up });
    }
}

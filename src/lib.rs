//! A velocity-driven character controller for Bevy.
//!
//! Drives a dynamic rigid body with responsive, acceleration-limited
//! movement: contacts are classified into ground, steep, and ignored
//! surfaces per tick, a downward probe re-attaches the body to ground it
//! briefly lost (no hopping down bumpy slopes), velocity is adjusted along
//! the contact plane so movement hugs slopes, and a jump state machine
//! handles ground, wall, and air jumps under an arbitrary gravity field.
//!
//! Physics engines plug in through [`CharacterPhysicsBackend`]; an Avian3D
//! backend ships behind the `avian3d` feature.
//!
//! # Example
//!
//! ```no_run
//! use bevy::prelude::*;
//! use grip_character_controller::prelude::*;
//!
//! # #[cfg(feature = "avian3d")]
//! fn setup(mut commands: Commands) {
//!     commands.spawn((
//!         Transform::from_xyz(0.0, 2.0, 0.0),
//!         MotionState::default(),
//!         ControllerConfig::new().with_max_air_jumps(1),
//!     ));
//! }
//! ```

use std::marker::PhantomData;

use bevy::prelude::*;

pub mod backend;
pub mod config;
pub mod contact;
pub mod detection;
pub mod gravity;
pub mod intent;
pub mod jump;
pub mod motion;
pub mod surface;
pub mod systems;
pub mod velocity;

pub use backend::CharacterPhysicsBackend;

/// Commonly used types.
pub mod prelude {
    #[cfg(feature = "avian3d")]
    pub use crate::backend::Avian3dBackend;
    pub use crate::backend::{CharacterPhysicsBackend, NoOpBackendPlugin};
    pub use crate::config::{ControllerConfig, JumpConfig, MovementConfig, SlopeConfig, SnapConfig};
    pub use crate::contact::ContactBatch;
    pub use crate::gravity::GravityField;
    pub use crate::intent::{InputBasis, JumpRequest, MovementIntent};
    pub use crate::motion::MotionState;
    pub use crate::surface::SurfaceKind;
    pub use crate::{CharacterControllerPlugin, ControllerSet};
}

/// Fixed-tick phases of the controller, in execution order.
///
/// The order is load-bearing: jump direction depends on the grounded state
/// resolved earlier in the same tick, and the velocity commit must come
/// after gravity is applied.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerSet {
    /// Config validation, velocity mirror, counters, desired velocity.
    Preparation,
    /// Backend-owned contact gathering and the snap probe.
    Sensors,
    /// Grounded-state resolution from the contact batch.
    Resolution,
    /// Velocity adjustment, jumps, gravity.
    Motion,
    /// Velocity write-back and per-tick state reset.
    Commit,
}

/// Character controller plugin, generic over the physics backend.
pub struct CharacterControllerPlugin<B: CharacterPhysicsBackend> {
    _backend: PhantomData<B>,
}

impl<B: CharacterPhysicsBackend> Default for CharacterControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _backend: PhantomData,
        }
    }
}

impl<B: CharacterPhysicsBackend> Plugin for CharacterControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<config::ControllerConfig>()
            .register_type::<contact::ContactBatch>()
            .register_type::<gravity::GravityField>()
            .register_type::<intent::InputBasis>()
            .register_type::<intent::JumpRequest>()
            .register_type::<intent::MovementIntent>()
            .register_type::<motion::MotionState>()
            .register_type::<surface::SlopeThresholds>()
            .register_type::<surface::SurfaceKind>();

        app.init_resource::<gravity::GravityField>();

        app.configure_sets(
            FixedUpdate,
            (
                ControllerSet::Preparation,
                ControllerSet::Sensors,
                ControllerSet::Resolution,
                ControllerSet::Motion,
                ControllerSet::Commit,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                (systems::refresh_config, systems::begin_tick::<B>)
                    .chain()
                    .in_set(ControllerSet::Preparation),
                systems::resolve_grounded.in_set(ControllerSet::Resolution),
                (
                    systems::apply_movement,
                    systems::process_jumps,
                    systems::apply_gravity,
                )
                    .chain()
                    .in_set(ControllerSet::Motion),
                (systems::commit_velocity::<B>, systems::clear_tick_state)
                    .chain()
                    .in_set(ControllerSet::Commit),
            ),
        );

        app.add_plugins(B::plugin());
    }
}

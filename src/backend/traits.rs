//! Physics backend abstraction.
//!
//! The controller core never talks to a physics engine directly; it reads and
//! writes body state through this trait so backends (Avian, custom, test
//! stubs) can be swapped without touching the movement logic.

use bevy::prelude::*;

/// Trait for physics backend implementations.
///
/// The backend owns body state access (velocity, position) and contact
/// gathering; its plugin registers the sensor systems that fill each
/// character's contact batch during the sensor phase.
pub trait CharacterPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Get the current velocity of an entity.
    fn get_velocity(world: &World, entity: Entity) -> Vec3;

    /// Set the velocity of an entity.
    fn set_velocity(world: &mut World, entity: Entity, velocity: Vec3);

    /// Get the current position of an entity.
    fn get_position(world: &World, entity: Entity) -> Vec3;
}

//! Physics module
//!
//! Overlap queries (PhysicsQuery), collider snapshot, headless интеграция тел.
//! Порядок в FixedUpdate: sync_physics_world (Snapshot) → ... →
//! apply_gravity → integrate_velocity → resolve_ground_contacts (Integrate).

use bevy::prelude::*;

use crate::SimulationSet;

pub mod body;
pub mod layers;
pub mod query;

// Re-export основных типов
pub use body::{apply_gravity, integrate_velocity, resolve_ground_contacts, Body2D};
pub use query::{
    sync_physics_world, Collider2D, ColliderShape, PhysicsQuery, PhysicsWorld, SecondaryCollider,
};

/// Plugin для physics snapshot + интеграции
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhysicsWorld>();

        app.add_systems(FixedUpdate, sync_physics_world.in_set(SimulationSet::Snapshot));

        app.add_systems(
            FixedUpdate,
            (apply_gravity, integrate_velocity, resolve_ground_contacts)
                .chain()
                .in_set(SimulationSet::Integrate),
        );
    }
}

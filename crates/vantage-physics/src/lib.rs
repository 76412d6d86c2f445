//! Vantage Physics - Collision queries and character movement using rapier3d
//!
//! Provides the static scene, ray casts with layer filtering, the kinematic
//! character controller, and the boundary traits the player rig is written
//! against.

mod boundary;
mod character_controller;
mod scene;

pub use boundary::{CharacterBody, SceneHit, SceneQuery};
pub use character_controller::{CharacterController, CharacterControllerConfig};
pub use scene::PhysicsScene;

use std::collections::HashMap;

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;
use tracing::debug;
use vantage_core::{EntityId, LayerMask};

/// Collision storage and the query pipeline for ray casts
pub struct PhysicsWorld {
    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,

    /// Island manager (needed for removals)
    island_manager: IslandManager,
    /// Query pipeline for raycasts and shape casts
    query_pipeline: QueryPipeline,
    /// Colliders spawned on behalf of scene entities
    entity_colliders: HashMap<EntityId, ColliderHandle>,
}

impl PhysicsWorld {
    /// Create an empty physics world
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
            entity_colliders: HashMap::new(),
        }
    }

    /// Rebuild the query acceleration structure after colliders moved
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set
            .remove(handle, &mut self.island_manager, &mut self.rigid_body_set, true);
    }

    /// Cast a ray and get detailed hit information
    pub fn raycast_detailed(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<RaycastHit> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray_and_get_normal(&self.rigid_body_set, &self.collider_set, &ray, max_distance, true, filter)
            .map(|(handle, intersection)| RaycastHit {
                collider: handle,
                entity: self
                    .collider_set
                    .get(handle)
                    .and_then(|c| EntityId::from_bits(c.user_data)),
                distance: intersection.time_of_impact,
                point: origin + direction * intersection.time_of_impact,
                normal: Vec3::new(
                    intersection.normal.x,
                    intersection.normal.y,
                    intersection.normal.z,
                ),
            })
    }

    /// Build a query filter that only sees colliders on the given layers
    pub fn layer_filter(layers: LayerMask) -> QueryFilter<'static> {
        QueryFilter::default().groups(InteractionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(layers.bits()),
        ))
    }

    /// Create a ground plane collider
    pub fn create_ground(&mut self, y: f32) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .restitution(0.0)
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider that belongs to a scene entity
    pub fn spawn_entity_box(
        &mut self,
        entity: EntityId,
        half_extents: Vec3,
        position: Vec3,
        layers: LayerMask,
    ) -> ColliderHandle {
        let groups = InteractionGroups::new(Group::from_bits_truncate(layers.bits()), Group::ALL);
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![position.x, position.y, position.z])
            .collision_groups(groups)
            .user_data(entity.to_bits())
            .build();
        let handle = self.add_static_collider(collider);
        self.entity_colliders.insert(entity, handle);
        handle
    }

    /// Remove the collider belonging to a scene entity
    pub fn despawn_entity(&mut self, entity: EntityId) -> bool {
        match self.entity_colliders.remove(&entity) {
            Some(handle) => {
                self.remove_collider(handle);
                debug!("Despawned collider for entity {:?}", entity);
                true
            }
            None => false,
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Detailed raycast hit information
#[derive(Debug, Clone)]
pub struct RaycastHit {
    /// The collider that was hit
    pub collider: ColliderHandle,
    /// Entity stored in the collider's user data
    pub entity: Option<EntityId>,
    /// Distance along the ray to the hit point
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at hit point
    pub normal: Vec3,
}

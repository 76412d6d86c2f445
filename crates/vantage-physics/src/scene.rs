//! Physics-backed implementation of the engine boundary

use glam::{Quat, Vec3};
use vantage_core::{EntityId, LayerMask, Ray};

use crate::{CharacterBody, CharacterController, PhysicsWorld, SceneHit, SceneQuery};

/// A physics world plus the player's character capsule
pub struct PhysicsScene {
    pub world: PhysicsWorld,
    pub character: CharacterController,
}

impl PhysicsScene {
    /// Wrap a world and spawn the character at `position`
    pub fn new(mut world: PhysicsWorld, mut character: CharacterController, position: Vec3) -> Self {
        character.spawn(&mut world, position);
        world.refresh_queries();
        Self { world, character }
    }
}

impl CharacterBody for PhysicsScene {
    fn position(&self) -> Vec3 {
        self.character.position
    }

    fn rotation(&self) -> Quat {
        self.character.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.character.rotation = rotation;
    }

    fn move_by(&mut self, displacement: Vec3, dt: f32) {
        // A zero move would only overwrite the grounded flag
        if displacement == Vec3::ZERO {
            return;
        }
        self.character.move_character(&mut self.world, displacement, dt);
        self.world.refresh_queries();
    }

    fn is_grounded(&self) -> bool {
        self.character.is_grounded()
    }
}

impl SceneQuery for PhysicsScene {
    fn cast(&self, ray: &Ray, max_distance: f32, layers: LayerMask) -> Option<SceneHit> {
        let mut filter = PhysicsWorld::layer_filter(layers);
        if let Some(handle) = self.character.collider_handle {
            filter = filter.exclude_collider(handle);
        }

        self.world
            .raycast_detailed(ray.origin, ray.direction, max_distance, filter)
            .map(|hit| SceneHit {
                entity: hit.entity,
                point: hit.point,
                normal: hit.normal,
                distance: hit.distance,
            })
    }

    fn despawn(&mut self, entity: EntityId) {
        if self.world.despawn_entity(entity) {
            self.world.refresh_queries();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> PhysicsScene {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        PhysicsScene::new(world, CharacterController::new(), Vec3::new(0.0, 0.5, 0.0))
    }

    #[test]
    fn test_cast_ignores_character() {
        let scene = scene();
        // Straight down through the capsule onto the ground plane
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let hit = scene.cast(&ray, 100.0, LayerMask::ALL).expect("ground hit");
        assert!(hit.point.y.abs() < 1e-3);
        assert!(hit.entity.is_none());
    }

    #[test]
    fn test_despawn_removes_entity_hit() {
        let mut scene = scene();
        let entity = EntityId::new();
        scene
            .world
            .spawn_entity_box(entity, Vec3::splat(0.5), Vec3::new(0.0, 1.0, -6.0), LayerMask::ALL);
        scene.world.refresh_queries();

        let ray = Ray::new(Vec3::new(0.0, 1.0, -2.0), Vec3::NEG_Z);
        assert_eq!(scene.cast(&ray, 100.0, LayerMask::ALL).and_then(|h| h.entity), Some(entity));

        scene.despawn(entity);
        assert!(scene.cast(&ray, 100.0, LayerMask::ALL).is_none());
    }

    #[test]
    fn test_zero_move_keeps_ground_contact() {
        let mut scene = scene();
        for _ in 0..60 {
            scene.move_by(Vec3::new(0.0, -0.05, 0.0), 1.0 / 60.0);
        }
        assert!(scene.is_grounded());

        scene.move_by(Vec3::ZERO, 1.0 / 60.0);
        assert!(scene.is_grounded());
    }

    #[test]
    fn test_set_rotation() {
        let mut scene = scene();
        scene.set_rotation(Quat::from_rotation_y(std::f32::consts::PI));
        assert!((scene.forward() - Vec3::Z).length() < 1e-4);
    }
}

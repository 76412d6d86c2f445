//! Movement controller with per-mode translation, gravity and jumping

use glam::{Vec2, Vec3};
use tracing::info;
use vantage_core::look_rotation;
use vantage_physics::CharacterBody;

use crate::camera::CameraRig;
use crate::error::ConfigError;
use crate::visibility::SceneVisibility;

use super::{MovementMode, MovementSettings};

/// Movement controller driving a [`CharacterBody`]
#[derive(Debug, Clone)]
pub struct MovementController {
    /// Settings (the movement mode lives here)
    settings: MovementSettings,
    /// Last received move input, held until replaced
    move_input: Vec2,
    /// Vertical velocity (jumping/falling)
    vertical_velocity: f32,
    /// Grounded flag polled from the body
    grounded: bool,
}

impl MovementController {
    /// Create a controller from validated settings
    pub fn new(settings: MovementSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            settings,
            move_input: Vec2::ZERO,
            vertical_velocity: 0.0,
            grounded: false,
        })
    }

    /// Read-only view of the settings
    pub fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    /// Current movement mode
    pub fn movement_mode(&self) -> MovementMode {
        self.settings.movement_mode
    }

    /// Store the latest directional input
    pub fn set_move_input(&mut self, input: Vec2) {
        self.move_input = input;
    }

    /// Jump if grounded. Returns whether the jump was accepted.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.vertical_velocity = self.settings.jump_velocity();
        true
    }

    /// Set the movement mode and push it to the camera rig
    pub fn set_movement_mode(
        &mut self,
        mode: MovementMode,
        camera: &mut CameraRig,
        scene: &mut SceneVisibility,
    ) {
        self.settings.movement_mode = mode;
        camera.set_movement_mode(mode, scene);
        info!("Movement mode: {:?}", mode);
    }

    /// Toggle between first and third person
    pub fn change_movement_mode(&mut self, camera: &mut CameraRig, scene: &mut SceneVisibility) {
        let mode = self.settings.movement_mode.toggled();
        self.set_movement_mode(mode, camera, scene);
    }

    /// Per-frame update: gravity, grounded refresh, then mode translation
    pub fn update(
        &mut self,
        body: &mut impl CharacterBody,
        yaw_forward: Vec3,
        yaw_right: Vec3,
        dt: f32,
    ) {
        if self.settings.use_gravity {
            if !self.grounded {
                self.vertical_velocity += self.settings.gravity * dt;
            }
            body.move_by(Vec3::new(0.0, self.vertical_velocity, 0.0) * dt, dt);
        }

        self.grounded = body.is_grounded();
        if self.grounded && self.vertical_velocity < 0.0 {
            // One frame of gravity keeps the body pressed into the ground
            // so the contact is reported every frame.
            self.vertical_velocity = self.settings.gravity * dt;
        }

        let direction = yaw_forward * self.move_input.y + yaw_right * self.move_input.x;
        let step = self.settings.move_speed * dt;

        match self.settings.movement_mode {
            MovementMode::FirstPerson => {
                body.move_by(direction * step, dt);
            }
            MovementMode::ThirdPerson => {
                if self.move_input.length() > 0.0 {
                    body.set_rotation(look_rotation(direction, Vec3::Y));
                    let forward = body.forward();
                    body.move_by(forward * step, dt);
                }
            }
        }
    }

    /// Last received move input
    pub fn move_input(&self) -> Vec2 {
        self.move_input
    }

    /// Current vertical velocity
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Grounded flag from the last update
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use vantage_physics::{CharacterController, PhysicsScene, PhysicsWorld};

    use crate::camera::CameraRigConfig;

    /// Infinite floor at y = 0
    struct FlatGround {
        position: Vec3,
        rotation: Quat,
        grounded: bool,
    }

    impl FlatGround {
        fn at(position: Vec3) -> Self {
            Self {
                position,
                rotation: Quat::IDENTITY,
                grounded: position.y <= 0.0,
            }
        }
    }

    impl CharacterBody for FlatGround {
        fn position(&self) -> Vec3 {
            self.position
        }

        fn rotation(&self) -> Quat {
            self.rotation
        }

        fn set_rotation(&mut self, rotation: Quat) {
            self.rotation = rotation;
        }

        fn move_by(&mut self, displacement: Vec3, _dt: f32) {
            self.position += displacement;
            if self.position.y <= 0.0 {
                self.position.y = 0.0;
                self.grounded = true;
            } else {
                self.grounded = false;
            }
        }

        fn is_grounded(&self) -> bool {
            self.grounded
        }
    }

    const DT: f32 = 1.0 / 60.0;

    fn controller(mode: MovementMode) -> MovementController {
        MovementController::new(MovementSettings {
            movement_mode: mode,
            ..Default::default()
        })
        .unwrap()
    }

    fn settle(controller: &mut MovementController, body: &mut FlatGround) {
        controller.update(body, -Vec3::Z, Vec3::X, DT);
        assert!(controller.is_grounded());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = MovementSettings {
            gravity: 9.0,
            ..Default::default()
        };
        assert!(MovementController::new(settings).is_err());
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut controller = controller(MovementMode::FirstPerson);
        assert!(!controller.jump());
        assert_eq!(controller.vertical_velocity(), 0.0);

        let mut body = FlatGround::at(Vec3::ZERO);
        settle(&mut controller, &mut body);
        assert!(controller.jump());
        let expected = (1.0_f32 * 2.0 * 9.0).sqrt();
        assert!((controller.vertical_velocity() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_airborne_jump_leaves_velocity() {
        let mut controller = controller(MovementMode::FirstPerson);
        let mut body = FlatGround::at(Vec3::ZERO);
        settle(&mut controller, &mut body);
        controller.jump();
        controller.update(&mut body, -Vec3::Z, Vec3::X, DT);
        assert!(!controller.is_grounded());

        let before = controller.vertical_velocity();
        assert!(!controller.jump());
        assert_eq!(controller.vertical_velocity(), before);
    }

    #[test]
    fn test_jump_lands_again() {
        let mut controller = controller(MovementMode::FirstPerson);
        let mut body = FlatGround::at(Vec3::ZERO);
        settle(&mut controller, &mut body);
        controller.jump();

        let mut peak: f32 = 0.0;
        for _ in 0..120 {
            controller.update(&mut body, -Vec3::Z, Vec3::X, DT);
            peak = peak.max(body.position.y);
        }
        assert!(controller.is_grounded());
        assert!((controller.vertical_velocity() + 9.0 * DT).abs() < 1e-5);
        assert!((peak - 1.0).abs() < 0.1);
    }

    #[test]
    fn test_falling_accumulates_gravity() {
        let mut controller = controller(MovementMode::FirstPerson);
        let mut body = FlatGround::at(Vec3::new(0.0, 10.0, 0.0));
        controller.update(&mut body, -Vec3::Z, Vec3::X, 0.1);
        controller.update(&mut body, -Vec3::Z, Vec3::X, 0.1);
        assert!((controller.vertical_velocity() + 1.8).abs() < 1e-5);
        assert!(body.position.y < 10.0);
    }

    #[test]
    fn test_no_gravity_keeps_height() {
        let mut controller = MovementController::new(MovementSettings {
            use_gravity: false,
            movement_mode: MovementMode::FirstPerson,
            ..Default::default()
        })
        .unwrap();
        let mut body = FlatGround::at(Vec3::new(0.0, 5.0, 0.0));
        controller.update(&mut body, -Vec3::Z, Vec3::X, 0.5);
        assert_eq!(body.position.y, 5.0);
        assert_eq!(controller.vertical_velocity(), 0.0);
    }

    #[test]
    fn test_first_person_strafes_without_turning() {
        let mut controller = controller(MovementMode::FirstPerson);
        let mut body = FlatGround::at(Vec3::ZERO);
        controller.set_move_input(Vec2::new(1.0, 1.0));
        controller.update(&mut body, -Vec3::Z, Vec3::X, 0.5);

        assert!((body.position - Vec3::new(1.0, 0.0, -1.0)).length() < 1e-5);
        assert_eq!(body.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_move_input_persists() {
        let mut controller = controller(MovementMode::FirstPerson);
        let mut body = FlatGround::at(Vec3::ZERO);
        controller.set_move_input(Vec2::new(0.0, 1.0));
        for _ in 0..4 {
            controller.update(&mut body, -Vec3::Z, Vec3::X, 0.25);
        }
        assert!((body.position.z + 2.0).abs() < 1e-5);

        controller.set_move_input(Vec2::ZERO);
        controller.update(&mut body, -Vec3::Z, Vec3::X, 0.25);
        assert!((body.position.z + 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_third_person_turns_then_advances() {
        let mut controller = controller(MovementMode::ThirdPerson);
        let mut body = FlatGround::at(Vec3::ZERO);
        controller.set_move_input(Vec2::new(1.0, 0.0));
        controller.update(&mut body, -Vec3::Z, Vec3::X, 0.5);

        assert!((body.forward() - Vec3::X).length() < 1e-5);
        assert!((body.position - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_third_person_zero_input_freezes() {
        let mut controller = controller(MovementMode::ThirdPerson);
        let start_rotation = Quat::from_rotation_y(0.7);
        let mut body = FlatGround::at(Vec3::new(2.0, 0.0, 3.0));
        body.rotation = start_rotation;

        controller.update(&mut body, -Vec3::Z, Vec3::X, DT);

        assert_eq!(body.position, Vec3::new(2.0, 0.0, 3.0));
        assert_eq!(body.rotation, start_rotation);
    }

    fn rest_on_ground(frames: usize) -> (MovementController, PhysicsScene) {
        let mut world = PhysicsWorld::new();
        world.create_ground(0.0);
        let mut scene = PhysicsScene::new(world, CharacterController::new(), Vec3::new(0.0, 0.5, 0.0));
        let mut controller = controller(MovementMode::FirstPerson);
        for _ in 0..frames {
            controller.update(&mut scene, -Vec3::Z, Vec3::X, DT);
        }
        (controller, scene)
    }

    #[test]
    fn test_grounded_holds_at_rest_on_physics_ground() {
        let (mut controller, mut scene) = rest_on_ground(60);
        for frame in 0..40 {
            controller.update(&mut scene, -Vec3::Z, Vec3::X, DT);
            assert!(controller.is_grounded(), "lost ground contact on frame {}", frame);
        }
        assert!(scene.position().y.abs() < 0.05);
    }

    #[test]
    fn test_jump_accepted_on_any_resting_frame() {
        for frames in 60..100 {
            let (mut controller, mut scene) = rest_on_ground(frames);
            assert!(controller.jump(), "jump rejected after {} frames at rest", frames);

            let mut peak: f32 = 0.0;
            for _ in 0..30 {
                controller.update(&mut scene, -Vec3::Z, Vec3::X, DT);
                peak = peak.max(scene.position().y);
            }
            assert!(peak > 0.5);
        }
    }

    #[test]
    fn test_mode_change_reaches_camera() {
        let mut scene = SceneVisibility::new();
        let mut rig = CameraRig::new(CameraRigConfig::default(), MovementMode::FirstPerson).unwrap();
        let mut controller = controller(MovementMode::FirstPerson);

        controller.change_movement_mode(&mut rig, &mut scene);
        assert_eq!(controller.movement_mode(), MovementMode::ThirdPerson);
        assert_eq!(rig.slot_offset(), rig.config.camera.third_person_view);

        controller.change_movement_mode(&mut rig, &mut scene);
        assert_eq!(controller.settings().movement_mode, MovementMode::FirstPerson);
        assert_eq!(rig.slot_offset(), Vec3::ZERO);
    }
}

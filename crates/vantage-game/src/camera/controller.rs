//! Camera rig with yaw/pitch accumulation and instant or smoothed look
//!
//! The rig is a small transform chain: rig root (world position) -> yaw
//! pivot (world rotation) -> pitch pivot (local rotation) -> camera slot
//! (local offset). Look input only moves the targets; `update` moves the
//! pivots toward them.

use glam::{Quat, Vec3};
use tracing::debug;
use vantage_core::{euler_degrees, Transform};

use crate::error::ConfigError;
use crate::player::MovementMode;
use crate::visibility::SceneVisibility;

use super::{CameraLookMode, CameraRigConfig};

/// Camera rig
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// Configuration
    pub config: CameraRigConfig,
    /// Accumulated yaw in degrees (unbounded)
    current_yaw: f32,
    /// Accumulated pitch in degrees (clamped)
    current_pitch: f32,
    /// Euler target for the yaw pivot
    yaw_target: Vec3,
    /// Euler target for the pitch pivot
    pitch_target: Vec3,
    /// Look mode cached from the active perspective
    look_mode: CameraLookMode,
    /// Movement mode the cached look mode was read for
    movement_mode: MovementMode,
    /// Rig root position
    position: Vec3,
    /// Yaw pivot world rotation
    yaw_rotation: Quat,
    /// Pitch pivot rotation relative to the yaw pivot
    pitch_rotation: Quat,
    /// Camera slot offset relative to the pitch pivot
    slot_offset: Vec3,
}

impl CameraRig {
    /// Create a rig for the given initial movement mode
    pub fn new(config: CameraRigConfig, mode: MovementMode) -> Result<Self, ConfigError> {
        config.validate()?;
        let look_mode = config.perspective(mode).look_mode;
        Ok(Self {
            config,
            current_yaw: 0.0,
            current_pitch: 0.0,
            yaw_target: Vec3::ZERO,
            pitch_target: Vec3::ZERO,
            look_mode,
            movement_mode: mode,
            position: Vec3::ZERO,
            yaw_rotation: Quat::IDENTITY,
            pitch_rotation: Quat::IDENTITY,
            slot_offset: Vec3::ZERO,
        })
    }

    /// Accumulate look input. Axes with an exactly zero delta are skipped.
    pub fn rotate(&mut self, yaw: f32, pitch: f32, mode: MovementMode) {
        if yaw.abs() > 0.0 {
            self.yaw_rotate(yaw, mode);
        }

        if pitch.abs() > 0.0 {
            self.pitch_rotate(pitch, mode);
        }
    }

    /// Accumulate yaw input using the sensitivity of `mode`
    pub fn yaw_rotate(&mut self, value: f32, mode: MovementMode) {
        self.current_yaw += value * self.config.perspective(mode).horizontal_sensitivity;
        self.yaw_target = Vec3::new(0.0, self.current_yaw, 0.0);
    }

    /// Accumulate pitch input using the sensitivity of `mode`, then clamp
    pub fn pitch_rotate(&mut self, value: f32, mode: MovementMode) {
        self.current_pitch += value * self.config.perspective(mode).vertical_sensitivity;
        self.current_pitch = self
            .current_pitch
            .clamp(self.config.camera.min_pitch, self.config.camera.max_pitch);
        self.pitch_target = Vec3::new(self.current_pitch, 0.0, 0.0);
    }

    /// Per-frame update: re-sync the look mode if the movement mode changed,
    /// then move the pivots toward their targets.
    pub fn update(&mut self, mode: MovementMode, dt: f32) {
        if mode != self.movement_mode {
            self.movement_mode = mode;
            self.look_mode = self.config.perspective(mode).look_mode;
            debug!("Camera look mode now {:?} for {:?}", self.look_mode, mode);
        }

        let yaw_target = euler_degrees(self.yaw_target);
        let pitch_target = euler_degrees(self.pitch_target);

        match self.look_mode {
            CameraLookMode::Instant => {
                self.yaw_rotation = yaw_target;
                self.pitch_rotation = pitch_target;
            }
            CameraLookMode::Slerp => {
                let t = (self.config.camera.slerp_speed * dt).clamp(0.0, 1.0);
                self.pitch_rotation = self.pitch_rotation.slerp(pitch_target, t);
                self.yaw_rotation = self.yaw_rotation.slerp(yaw_target, t);
            }
        }
    }

    /// Reposition the camera slot and swap the perspective's visibility sets.
    ///
    /// Always reapplied, so calling twice with the same mode is harmless.
    pub fn set_movement_mode(&mut self, mode: MovementMode, scene: &mut SceneVisibility) {
        self.slot_offset = match mode {
            MovementMode::FirstPerson => Vec3::ZERO,
            MovementMode::ThirdPerson => self.config.camera.third_person_view,
        };

        let perspective = self.config.perspective(mode);
        for &id in &perspective.objects_to_hide {
            scene.set_active(id, false);
        }
        for &id in &perspective.objects_to_show {
            scene.set_active(id, true);
        }
    }

    /// Late-frame follow: place the rig at the player plus the rig offset
    pub fn set_location(&mut self, player_position: Vec3) {
        self.position = player_position + self.config.camera.rig_offset;
    }

    /// World transform of the yaw pivot
    pub fn yaw_transform(&self) -> Transform {
        Transform::from_position_rotation(self.position, self.yaw_rotation)
    }

    /// World transform of the pitch pivot
    pub fn pitch_transform(&self) -> Transform {
        Transform::from_position_rotation(self.position, self.yaw_rotation * self.pitch_rotation)
    }

    /// World transform of the camera itself
    pub fn camera_transform(&self) -> Transform {
        self.pitch_transform()
            .mul_transform(&Transform::from_position(self.slot_offset))
    }

    /// Planar forward of the yaw pivot
    pub fn yaw_forward(&self) -> Vec3 {
        self.yaw_rotation * -Vec3::Z
    }

    /// Planar right of the yaw pivot
    pub fn yaw_right(&self) -> Vec3 {
        self.yaw_rotation * Vec3::X
    }

    /// Accumulated yaw in degrees
    pub fn current_yaw(&self) -> f32 {
        self.current_yaw
    }

    /// Accumulated pitch in degrees
    pub fn current_pitch(&self) -> f32 {
        self.current_pitch
    }

    /// Euler target of the yaw pivot
    pub fn yaw_target(&self) -> Vec3 {
        self.yaw_target
    }

    /// Euler target of the pitch pivot
    pub fn pitch_target(&self) -> Vec3 {
        self.pitch_target
    }

    /// Cached look mode
    pub fn look_mode(&self) -> CameraLookMode {
        self.look_mode
    }

    /// Current yaw pivot rotation
    pub fn yaw_rotation(&self) -> Quat {
        self.yaw_rotation
    }

    /// Current pitch pivot rotation (relative to yaw)
    pub fn pitch_rotation(&self) -> Quat {
        self.pitch_rotation
    }

    /// Camera slot offset relative to the pitch pivot
    pub fn slot_offset(&self) -> Vec3 {
        self.slot_offset
    }

    /// Rig root position
    pub fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: MovementMode = MovementMode::FirstPerson;
    const THIRD: MovementMode = MovementMode::ThirdPerson;

    fn angle(a: Quat, b: Quat) -> f32 {
        2.0 * a.dot(b).abs().min(1.0).acos()
    }

    fn rig() -> CameraRig {
        CameraRig::new(CameraRigConfig::default(), FIRST).unwrap()
    }

    fn slerp_rig() -> CameraRig {
        let mut config = CameraRigConfig::default();
        config.first_person.look_mode = CameraLookMode::Slerp;
        CameraRig::new(config, FIRST).unwrap()
    }

    #[test]
    fn test_rig_creation() {
        let rig = rig();
        assert_eq!(rig.current_yaw(), 0.0);
        assert_eq!(rig.current_pitch(), 0.0);
        assert_eq!(rig.look_mode(), CameraLookMode::Instant);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = CameraRigConfig::default();
        config.camera.min_pitch = 45.0;
        config.camera.max_pitch = 0.0;
        assert!(CameraRig::new(config, FIRST).is_err());
    }

    #[test]
    fn test_rotate_uses_mode_sensitivity() {
        let mut config = CameraRigConfig::default();
        config.first_person.horizontal_sensitivity = 1.0;
        config.third_person.horizontal_sensitivity = 2.0;
        let mut rig = CameraRig::new(config, FIRST).unwrap();

        rig.rotate(10.0, 0.0, FIRST);
        assert_eq!(rig.current_yaw(), 10.0);
        rig.rotate(10.0, 0.0, THIRD);
        assert_eq!(rig.current_yaw(), 30.0);
        assert_eq!(rig.yaw_target(), Vec3::new(0.0, 30.0, 0.0));
    }

    #[test]
    fn test_pitch_always_within_clamp() {
        let mut rig = rig();
        for delta in [1000.0, -5000.0, 37.5, 1e9, -1e9, 0.25] {
            rig.rotate(0.0, delta, FIRST);
            assert!(rig.current_pitch() >= rig.config.camera.min_pitch);
            assert!(rig.current_pitch() <= rig.config.camera.max_pitch);
        }
        rig.rotate(0.0, 1e9, THIRD);
        assert_eq!(rig.current_pitch(), 90.0);
    }

    #[test]
    fn test_yaw_is_unbounded() {
        let mut rig = rig();
        for _ in 0..10 {
            rig.rotate(200.0, 0.0, FIRST);
        }
        assert_eq!(rig.current_yaw(), 1000.0);
    }

    #[test]
    fn test_zero_input_is_noop() {
        let mut rig = rig();
        rig.rotate(4.0, -6.0, FIRST);
        let (yaw, pitch) = (rig.current_yaw(), rig.current_pitch());
        let (yaw_target, pitch_target) = (rig.yaw_target(), rig.pitch_target());

        rig.rotate(0.0, 0.0, FIRST);
        rig.rotate(-0.0, 0.0, THIRD);

        assert_eq!(rig.current_yaw(), yaw);
        assert_eq!(rig.current_pitch(), pitch);
        assert_eq!(rig.yaw_target(), yaw_target);
        assert_eq!(rig.pitch_target(), pitch_target);
    }

    #[test]
    fn test_instant_converges_in_one_tick() {
        let mut rig = rig();
        rig.rotate(120.0, 40.0, FIRST);
        rig.update(FIRST, 1.0 / 60.0);

        assert_eq!(rig.yaw_rotation(), euler_degrees(rig.yaw_target()));
        assert_eq!(rig.pitch_rotation(), euler_degrees(rig.pitch_target()));
    }

    #[test]
    fn test_slerp_reduces_but_does_not_reach_target() {
        let mut rig = slerp_rig();
        rig.rotate(90.0, 40.0, FIRST);
        let yaw_target = euler_degrees(rig.yaw_target());
        let pitch_target = euler_degrees(rig.pitch_target());

        let yaw_before = angle(rig.yaw_rotation(), yaw_target);
        let pitch_before = angle(rig.pitch_rotation(), pitch_target);
        rig.update(FIRST, 1.0 / 60.0);
        let yaw_after = angle(rig.yaw_rotation(), yaw_target);
        let pitch_after = angle(rig.pitch_rotation(), pitch_target);

        assert!(yaw_after < yaw_before);
        assert!(yaw_after > 1e-3);
        assert!(pitch_after < pitch_before);
        assert!(pitch_after > 1e-3);
    }

    #[test]
    fn test_slerp_keeps_converging() {
        let mut rig = slerp_rig();
        rig.rotate(90.0, 0.0, FIRST);
        let target = euler_degrees(rig.yaw_target());
        let mut last = angle(rig.yaw_rotation(), target);
        for _ in 0..30 {
            rig.update(FIRST, 1.0 / 60.0);
            let now = angle(rig.yaw_rotation(), target);
            assert!(now <= last + 1e-4);
            last = now;
        }
        assert!(last < 0.01);
    }

    #[test]
    fn test_mode_change_resyncs_look_mode() {
        let mut config = CameraRigConfig::default();
        config.third_person.look_mode = CameraLookMode::Slerp;
        let mut rig = CameraRig::new(config, FIRST).unwrap();
        assert_eq!(rig.look_mode(), CameraLookMode::Instant);

        rig.update(THIRD, 0.0);
        assert_eq!(rig.look_mode(), CameraLookMode::Slerp);

        rig.update(FIRST, 0.0);
        assert_eq!(rig.look_mode(), CameraLookMode::Instant);
    }

    #[test]
    fn test_set_movement_mode_offsets_and_visibility() {
        let mut scene = SceneVisibility::new();
        let body = scene.register(true);
        let arms = scene.register(false);

        let mut config = CameraRigConfig::default();
        config.first_person.objects_to_hide = vec![body];
        config.first_person.objects_to_show = vec![arms];
        config.third_person.objects_to_hide = vec![arms];
        config.third_person.objects_to_show = vec![body];
        let mut rig = CameraRig::new(config, FIRST).unwrap();

        rig.set_movement_mode(FIRST, &mut scene);
        assert_eq!(rig.slot_offset(), Vec3::ZERO);
        assert!(!scene.is_active(body));
        assert!(scene.is_active(arms));

        rig.set_movement_mode(THIRD, &mut scene);
        assert_eq!(rig.slot_offset(), rig.config.camera.third_person_view);
        assert!(scene.is_active(body));
        assert!(!scene.is_active(arms));
    }

    #[test]
    fn test_set_movement_mode_idempotent() {
        let mut scene = SceneVisibility::new();
        let body = scene.register(true);
        let mut config = CameraRigConfig::default();
        config.third_person.objects_to_hide = vec![body];
        let mut rig = CameraRig::new(config, THIRD).unwrap();

        rig.set_movement_mode(THIRD, &mut scene);
        // Something else re-shows the body between calls
        scene.set_active(body, true);
        rig.set_movement_mode(THIRD, &mut scene);

        assert!(!scene.is_active(body));
        assert_eq!(rig.slot_offset(), rig.config.camera.third_person_view);
    }

    #[test]
    fn test_set_location_applies_offset() {
        let mut rig = rig();
        rig.set_location(Vec3::new(3.0, 0.0, -2.0));
        assert_eq!(rig.position(), Vec3::new(3.0, 1.0, -2.0));
    }

    #[test]
    fn test_camera_transform_third_person_sits_behind() {
        let mut scene = SceneVisibility::new();
        let mut rig = rig();
        rig.set_movement_mode(THIRD, &mut scene);
        rig.set_location(Vec3::ZERO);
        rig.update(FIRST, 0.0);

        let camera = rig.camera_transform();
        assert!((camera.position - Vec3::new(0.0, 1.0, 2.5)).length() < 1e-4);
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_yaw_basis_follows_yaw() {
        let mut rig = rig();
        rig.rotate(180.0, 0.0, FIRST); // 0.5 sensitivity -> 90 degrees
        rig.update(FIRST, 0.0);
        assert!((rig.yaw_forward() - Vec3::X).length() < 1e-4);
        assert!((rig.yaw_right() - Vec3::Z).length() < 1e-4);
    }
}

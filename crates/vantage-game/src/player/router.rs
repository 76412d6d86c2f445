//! Player: routes input events and runs the per-frame update in order
//!
//! One `tick` is one frame: time, camera look, movement, weapons, late
//! camera follow, then hand IK.

use glam::{Mat4, Vec2};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vantage_core::{GameTime, TimeConfig, Transform};
use vantage_physics::{CharacterBody, SceneQuery};

use crate::camera::{CameraRig, CameraRigConfig, Lens};
use crate::combat::{Aim, HitEffects, Loadout, PlayerEquipment, Shot};
use crate::error::ConfigError;
use crate::ik::{HandIk, IkPose};
use crate::input::PlayerInput;
use crate::interaction::InteractionProbe;
use crate::target::TargetRegistry;
use crate::visibility::SceneVisibility;

use super::{MovementController, MovementSettings};

/// How the host should treat the OS cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorMode {
    /// Visible and free to leave the window
    Free,
    /// Hidden and pinned to the viewport center
    #[default]
    Locked,
    /// Visible but kept inside the window
    Confined,
}

/// Everything needed to build a [`Player`]
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub camera: CameraRigConfig,
    pub movement: MovementSettings,
    pub lens: Lens,
    pub loadout: Loadout,
    pub time: TimeConfig,
    /// Cursor mode restored when unpausing
    pub default_cursor: CursorMode,
    /// Viewport size in pixels
    pub viewport: Vec2,
    pub ik_weight: f32,
    /// Scene objects the perspectives show and hide
    pub visibility: SceneVisibility,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            camera: CameraRigConfig::default(),
            movement: MovementSettings::default(),
            lens: Lens::default(),
            loadout: Loadout::default(),
            time: TimeConfig::default(),
            default_cursor: CursorMode::Locked,
            viewport: Vec2::new(1280.0, 720.0),
            ik_weight: 1.0,
            visibility: SceneVisibility::new(),
        }
    }
}

/// What a frame produced for the host
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// World transform of the camera
    pub camera: Transform,
    /// Projection times view for the renderer
    pub view_projection: Mat4,
    /// Hand IK goals for the animator
    pub ik: IkPose,
    /// Shots fired this frame
    pub shots: Vec<Shot>,
}

/// The player rig
#[derive(Debug)]
pub struct Player {
    rig: CameraRig,
    movement: MovementController,
    equipment: PlayerEquipment,
    loadout: Loadout,
    targets: TargetRegistry,
    effects: HitEffects,
    visibility: SceneVisibility,
    probe: InteractionProbe,
    hand_ik: HandIk,
    time: GameTime,
    default_cursor: CursorMode,
    cursor: CursorMode,
    cursor_position: Vec2,
    viewport: Vec2,
    input_enabled: bool,
    paused: bool,
    /// Use presses waiting for the next tick's scene access
    pending_uses: u32,
}

impl Player {
    /// Build the rig and apply the configured movement mode once
    pub fn new(config: PlayerConfig) -> Result<Self, ConfigError> {
        let mode = config.movement.movement_mode;
        let mut rig = CameraRig::new(config.camera, mode)?;
        let mut movement = MovementController::new(config.movement)?;
        let mut visibility = config.visibility;
        movement.set_movement_mode(mode, &mut rig, &mut visibility);

        Ok(Self {
            rig,
            movement,
            equipment: PlayerEquipment::new(config.lens),
            loadout: config.loadout,
            targets: TargetRegistry::new(),
            effects: HitEffects::new(),
            visibility,
            probe: InteractionProbe::new(),
            hand_ik: HandIk::new(config.ik_weight),
            time: GameTime::new(config.time),
            default_cursor: config.default_cursor,
            cursor: config.default_cursor,
            cursor_position: config.viewport * 0.5,
            viewport: config.viewport,
            input_enabled: true,
            paused: false,
            pending_uses: 0,
        })
    }

    /// Route one input event. While input is disabled only `Pause` gets
    /// through.
    pub fn handle_input(&mut self, event: PlayerInput) {
        if !self.input_enabled && event != PlayerInput::Pause {
            debug!("Dropped {:?} while input is disabled", event);
            return;
        }

        let mode = self.movement.movement_mode();
        match event {
            PlayerInput::Look(delta) => self.rig.rotate(delta.x, delta.y, mode),
            PlayerInput::Move(direction) => self.movement.set_move_input(direction),
            PlayerInput::Jump => {
                self.movement.jump();
            }
            PlayerInput::ToggleMovementMode => {
                self.movement
                    .change_movement_mode(&mut self.rig, &mut self.visibility);
            }
            PlayerInput::Pause => self.set_paused(!self.paused),
            PlayerInput::Fire { pressed } => self.equipment.fire_input(pressed),
            PlayerInput::Use => self.pending_uses += 1,
            PlayerInput::Reload => self.equipment.reload(),
            PlayerInput::EquipPrimary => {
                self.loadout.equip_primary(&mut self.equipment);
            }
            PlayerInput::EquipSecondary => {
                self.loadout.equip_secondary(&mut self.equipment);
            }
        }
    }

    /// Pause or resume: time scale, input gate and cursor follow the flag
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if paused {
            self.time.set_time_scale(0.0);
            self.input_enabled = false;
            self.equipment.fire_input(false);
            self.cursor = CursorMode::Free;
        } else {
            self.time.set_time_scale(1.0);
            self.input_enabled = true;
            self.cursor = self.default_cursor;
        }
        info!("Paused: {} (cursor {:?})", paused, self.cursor);
    }

    /// Run one frame against the scene
    pub fn tick<W>(&mut self, raw_dt: f32, world: &mut W) -> FrameOutput
    where
        W: CharacterBody + SceneQuery,
    {
        self.time.update(raw_dt);
        let dt = self.time.delta_time;

        self.rig.update(self.movement.movement_mode(), dt);

        self.movement
            .update(world, self.rig.yaw_forward(), self.rig.yaw_right(), dt);

        let aim = self.aim();
        let lens = self.equipment.lens();
        for _ in 0..std::mem::take(&mut self.pending_uses) {
            self.probe
                .use_at_cursor(&lens, &aim, &*world, &mut self.targets);
        }
        let shots = self
            .equipment
            .tick(dt, &aim, world, &mut self.targets, &mut self.effects);
        self.effects.tick(dt);

        self.rig.set_location(world.position());

        let camera = self.rig.camera_transform();
        FrameOutput {
            camera,
            view_projection: self.view_projection(&camera),
            ik: self.apply_ik(&*world),
            shots,
        }
    }

    fn view_projection(&self, camera: &Transform) -> Mat4 {
        let aspect = if self.viewport.y > 0.0 {
            self.viewport.x / self.viewport.y
        } else {
            1.0
        };
        self.equipment.lens().projection(aspect) * Lens::view(camera)
    }

    fn apply_ik(&mut self, body: &impl CharacterBody) -> IkPose {
        if self.equipment.weapon_count() > 0 {
            let anchors = self.equipment.anchors();
            self.hand_ik
                .set_targets(Some(anchors.ik_main_hand), Some(anchors.ik_off_hand));
        } else {
            self.hand_ik.set_targets(None, None);
        }
        let body = Transform::from_position_rotation(body.position(), body.rotation());
        self.hand_ik.pose(&body)
    }

    /// Aim for this frame: a locked cursor sits at the viewport center
    pub fn aim(&self) -> Aim {
        let cursor = match self.cursor {
            CursorMode::Locked => self.viewport * 0.5,
            CursorMode::Free | CursorMode::Confined => self.cursor_position,
        };
        Aim {
            cursor,
            viewport: self.viewport,
            camera: self.rig.camera_transform(),
        }
    }

    pub fn set_cursor_position(&mut self, position: Vec2) {
        self.cursor_position = position;
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    pub fn equipment(&self) -> &PlayerEquipment {
        &self.equipment
    }

    pub fn equipment_mut(&mut self) -> &mut PlayerEquipment {
        &mut self.equipment
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut TargetRegistry {
        &mut self.targets
    }

    pub fn effects(&self) -> &HitEffects {
        &self.effects
    }

    pub fn visibility(&self) -> &SceneVisibility {
        &self.visibility
    }

    pub fn time(&self) -> &GameTime {
        &self.time
    }

    pub fn cursor(&self) -> CursorMode {
        self.cursor
    }

    pub fn default_cursor(&self) -> CursorMode {
        self.default_cursor
    }

    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }
}

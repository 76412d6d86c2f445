//! Vantage - headless player rig sandbox
//!
//! Builds a small physics scene, spawns the player and plays a scripted
//! input timeline through the same input mapping a window would use.

mod settings;

use anyhow::{Context, Result};
use glam::Vec3;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use vantage_core::{EntityId, LayerMask};
use vantage_game::{
    Dummy, Enemy, HandPositions, HitEffectKind, InputHandler, Loadout, Player, PlayerConfig,
    SceneVisibility, Shot, Switch, WeaponDefinition,
};
use vantage_physics::{CharacterBody, CharacterController, PhysicsScene, PhysicsWorld};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

use settings::SandboxSettings;

/// Layer for things weapons can hit
const SHOOTABLE: LayerMask = LayerMask::layer(1);
/// Layer for props only the use action reaches
const PROPS: LayerMask = LayerMask::layer(2);

/// One raw window event at a given frame
enum ScriptEvent {
    Key(KeyCode, ElementState),
    Mouse(MouseButton, ElementState),
    Motion(f64, f64),
}

fn timeline() -> Vec<(u32, ScriptEvent)> {
    use ElementState::{Pressed, Released};
    use ScriptEvent::{Key, Motion, Mouse};

    vec![
        (5, Key(KeyCode::Digit1, Pressed)),
        (6, Key(KeyCode::Digit1, Released)),
        (10, Mouse(MouseButton::Left, Pressed)),
        (70, Mouse(MouseButton::Left, Released)),
        // Quarter turn right, towards the switch
        (80, Motion(180.0, 0.0)),
        (90, Key(KeyCode::KeyE, Pressed)),
        (91, Key(KeyCode::KeyE, Released)),
        (100, Key(KeyCode::KeyW, Pressed)),
        (160, Key(KeyCode::KeyW, Released)),
        (170, Key(KeyCode::KeyV, Pressed)),
        (171, Key(KeyCode::KeyV, Released)),
        (180, Key(KeyCode::Space, Pressed)),
        (181, Key(KeyCode::Space, Released)),
        (240, Key(KeyCode::Escape, Pressed)),
        (241, Key(KeyCode::Escape, Released)),
        // Dropped while paused
        (250, Motion(-500.0, 0.0)),
        (270, Key(KeyCode::Escape, Pressed)),
        (271, Key(KeyCode::Escape, Released)),
        // Back to facing the targets
        (280, Motion(-180.0, 0.0)),
        (290, Key(KeyCode::Digit2, Pressed)),
        (291, Key(KeyCode::Digit2, Released)),
        (300, Mouse(MouseButton::Left, Pressed)),
        (302, Mouse(MouseButton::Left, Released)),
    ]
}

fn rifle() -> WeaponDefinition {
    WeaponDefinition {
        name: "Rifle".to_string(),
        hand_positions: HandPositions {
            main_hand_position: Vec3::new(0.25, 1.3, -0.3),
            main_hand_rotation: Vec3::new(0.0, 0.0, -10.0),
            off_hand_position: Vec3::new(0.05, 1.35, -0.7),
            off_hand_rotation: Vec3::new(0.0, 0.0, 80.0),
            ik_off_hand_position: Some(Vec3::new(0.05, 1.33, -0.68)),
            ..Default::default()
        },
        layer_mask: SHOOTABLE,
        damage: 12.0,
        recoil_duration: 0.1,
        hit_effect: Some(HitEffectKind::Sparks),
        ..Default::default()
    }
}

fn pistol() -> WeaponDefinition {
    WeaponDefinition {
        name: "Pistol".to_string(),
        hand_positions: HandPositions {
            main_hand_position: Vec3::new(0.2, 1.3, -0.4),
            off_hand_position: Vec3::new(0.15, 1.25, -0.45),
            ..Default::default()
        },
        layer_mask: SHOOTABLE,
        damage: 25.0,
        single_burst: true,
        recoil_duration: 0.25,
        hit_effect: Some(HitEffectKind::Dust),
        max_range: 100.0,
        ..Default::default()
    }
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    info!("Starting Vantage sandbox...");

    let settings = SandboxSettings::load();

    // Scene
    let mut world = PhysicsWorld::new();
    world.create_ground(0.0);
    let enemy = EntityId::new();
    world.spawn_entity_box(enemy, Vec3::new(0.5, 1.0, 0.5), Vec3::new(0.0, 1.0, -8.0), SHOOTABLE);
    let dummy = EntityId::new();
    world.spawn_entity_box(dummy, Vec3::new(0.5, 1.0, 0.5), Vec3::new(0.0, 1.0, -14.0), SHOOTABLE);
    let switch = EntityId::new();
    world.spawn_entity_box(switch, Vec3::new(0.2, 0.4, 0.2), Vec3::new(6.0, 1.0, 0.0), PROPS);
    let mut scene = PhysicsScene::new(world, CharacterController::new(), Vec3::ZERO);

    // Player
    let mut visibility = SceneVisibility::new();
    let body_mesh = visibility.register(true);
    let arms_mesh = visibility.register(false);

    let mut camera = settings.camera.clone();
    camera.first_person.objects_to_hide = vec![body_mesh];
    camera.first_person.objects_to_show = vec![arms_mesh];
    camera.third_person.objects_to_hide = vec![arms_mesh];
    camera.third_person.objects_to_show = vec![body_mesh];

    let mut player = Player::new(PlayerConfig {
        camera,
        movement: settings.movement.clone(),
        lens: settings.lens,
        loadout: Loadout::new(rifle(), pistol()),
        time: settings.time.clone(),
        visibility,
        ..Default::default()
    })
    .context("Invalid player settings")?;

    player.targets_mut().insert(enemy, Enemy::new("Grunt", 50.0));
    player.targets_mut().insert(dummy, Dummy::new("Practice Dummy"));
    player.targets_mut().insert(switch, Switch::new("Lamp Switch"));

    let mut input = InputHandler::new(settings.controls);
    let script = timeline();
    let run = &settings.sandbox;

    info!("Running {} frames", run.frames);
    let mut hits = 0usize;
    for frame in 0..run.frames {
        for (_, event) in script.iter().filter(|(at, _)| *at == frame) {
            match event {
                ScriptEvent::Key(code, state) => input.handle_keyboard(PhysicalKey::Code(*code), *state),
                ScriptEvent::Mouse(button, state) => input.handle_mouse_button(*button, *state),
                ScriptEvent::Motion(dx, dy) => input.handle_mouse_motion((*dx, *dy)),
            }
        }
        for event in input.drain() {
            player.handle_input(event);
        }

        let output = player.tick(run.frame_time, &mut scene);
        hits += output
            .shots
            .iter()
            .filter(|shot| matches!(shot, Shot::Struck { .. }))
            .count();
    }

    let position = scene.position();
    info!(
        "Player at ({:.2}, {:.2}, {:.2}), grounded: {}",
        position.x,
        position.y,
        position.z,
        scene.is_grounded()
    );
    info!(
        "Yaw {:.1}, pitch {:.1}, mode {:?}",
        player.rig().current_yaw(),
        player.rig().current_pitch(),
        player.movement().movement_mode()
    );
    info!(
        "{} target hits, {} targets left, {} live effects",
        hits,
        player.targets().len(),
        player.effects().len()
    );
    for entity in [enemy, dummy, switch] {
        match player.targets().get(entity) {
            Some(target) => info!("{:?}", target),
            None => info!("Target {:?} is gone", entity),
        }
    }
    let camera = player.aim().camera;
    info!("Camera at {:?}, looking {:?}", camera.position, camera.forward());
    info!("Viewport {:?}, cursor {:?}", player.viewport(), player.cursor());

    if run.save_on_exit {
        settings.save().context("Failed to save settings")?;
    }

    Ok(())
}

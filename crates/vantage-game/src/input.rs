//! Input mapping from raw window events to player events
//!
//! Physical keys and buttons are mapped to [`InputAction`]s through
//! [`InputBindings`]; the [`InputHandler`] turns those into a queue of
//! [`PlayerInput`] events the player router drains once per frame.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    /// Move forward (W by default)
    MoveForward,
    /// Move backward (S by default)
    MoveBackward,
    /// Move left (A by default)
    MoveLeft,
    /// Move right (D by default)
    MoveRight,
    /// Jump (Space by default)
    Jump,
    /// Switch first/third person (V by default)
    ToggleView,
    /// Pause/unpause (Escape by default)
    Pause,
    /// Fire held weapons (left mouse button by default)
    Fire,
    /// Use whatever is under the cursor (E by default)
    Use,
    /// Reload held weapons (R by default)
    Reload,
    /// Pull out the primary weapon (1 by default)
    EquipPrimary,
    /// Pull out the secondary weapon (2 by default)
    EquipSecondary,
}

impl InputAction {
    fn is_movement(self) -> bool {
        matches!(
            self,
            Self::MoveForward | Self::MoveBackward | Self::MoveLeft | Self::MoveRight
        )
    }
}

/// Events delivered to the player router
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerInput {
    /// Look delta: x is yaw (right positive), y is pitch (up positive)
    Look(Vec2),
    /// New move direction; a cancel arrives as `Move(Vec2::ZERO)`
    Move(Vec2),
    Jump,
    ToggleMovementMode,
    Pause,
    Fire { pressed: bool },
    Use,
    Reload,
    EquipPrimary,
    EquipSecondary,
}

/// Mouse look tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Multiplier applied to raw mouse motion
    pub mouse_sensitivity: f32,
    /// Invert the vertical look axis
    pub invert_y: bool,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.0,
            invert_y: false,
        }
    }
}

/// Binding of a physical key to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    /// Keyboard key
    Key(KeyCode),
    /// Mouse button
    Mouse(u32), // 0 = left, 1 = right, 2 = middle
}

impl From<KeyCode> for InputBinding {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for InputBinding {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(match button {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
            MouseButton::Other(id) => id as u32,
        })
    }
}

/// Maps physical inputs to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<InputBinding, InputAction>,
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };

        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::KeyV, InputAction::ToggleView);
        bindings.bind(KeyCode::Escape, InputAction::Pause);
        bindings.bind(KeyCode::KeyE, InputAction::Use);
        bindings.bind(KeyCode::KeyR, InputAction::Reload);
        bindings.bind(KeyCode::Digit1, InputAction::EquipPrimary);
        bindings.bind(KeyCode::Digit2, InputAction::EquipSecondary);

        bindings.bind_mouse(0, InputAction::Fire);

        bindings
    }
}

impl InputBindings {
    /// Bind a key to an action
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.bindings.insert(InputBinding::Key(key), action);
    }

    /// Bind a mouse button to an action
    pub fn bind_mouse(&mut self, button: u32, action: InputAction) {
        self.bindings.insert(InputBinding::Mouse(button), action);
    }

    /// Get the action for a binding, if any
    pub fn get_action(&self, binding: &InputBinding) -> Option<InputAction> {
        self.bindings.get(binding).copied()
    }

    /// All bindings that trigger an action
    pub fn bindings_for(&self, action: InputAction) -> impl Iterator<Item = InputBinding> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, bound)| **bound == action)
            .map(|(binding, _)| *binding)
    }
}

/// Turns raw window events into queued [`PlayerInput`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    pub bindings: InputBindings,
    pub controls: ControlSettings,
    /// Keys and buttons currently held down
    held: HashSet<InputBinding>,
    /// Last move vector sent out
    last_move: Vec2,
    queue: Vec<PlayerInput>,
}

impl InputHandler {
    /// Create a handler with default bindings
    pub fn new(controls: ControlSettings) -> Self {
        Self {
            controls,
            ..Default::default()
        }
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, state: ElementState) {
        if let PhysicalKey::Code(key_code) = physical_key {
            self.handle_binding(key_code.into(), state);
        }
    }

    /// Handle a mouse button event
    pub fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.handle_binding(button.into(), state);
    }

    /// Handle raw mouse motion (winit reports y growing downward)
    pub fn handle_mouse_motion(&mut self, delta: (f64, f64)) {
        let y_mult = if self.controls.invert_y { 1.0 } else { -1.0 };
        let look = Vec2::new(
            delta.0 as f32 * self.controls.mouse_sensitivity,
            delta.1 as f32 * self.controls.mouse_sensitivity * y_mult,
        );
        if look != Vec2::ZERO {
            self.queue.push(PlayerInput::Look(look));
        }
    }

    /// Release everything that is held, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        if self.is_held(InputAction::Fire) {
            self.queue.push(PlayerInput::Fire { pressed: false });
        }
        self.held.clear();
        self.refresh_move();
    }

    /// Take the queued events in arrival order
    pub fn drain(&mut self) -> Vec<PlayerInput> {
        std::mem::take(&mut self.queue)
    }

    /// Whether any binding of `action` is held down
    pub fn is_held(&self, action: InputAction) -> bool {
        self.bindings
            .bindings_for(action)
            .any(|binding| self.held.contains(&binding))
    }

    /// Move vector derived from the held movement keys
    pub fn move_vector(&self) -> Vec2 {
        let axis = |positive, negative| {
            self.is_held(positive) as i32 as f32 - self.is_held(negative) as i32 as f32
        };
        Vec2::new(
            axis(InputAction::MoveRight, InputAction::MoveLeft),
            axis(InputAction::MoveForward, InputAction::MoveBackward),
        )
        .normalize_or_zero()
    }

    fn handle_binding(&mut self, binding: InputBinding, state: ElementState) {
        let Some(action) = self.bindings.get_action(&binding) else {
            return;
        };

        // An action is down while any of its bindings is down
        let newly_pressed = match state {
            ElementState::Pressed => {
                let was_held = self.is_held(action);
                self.held.insert(binding) && !was_held
            }
            ElementState::Released => {
                if self.held.remove(&binding)
                    && action == InputAction::Fire
                    && !self.is_held(action)
                {
                    self.queue.push(PlayerInput::Fire { pressed: false });
                }
                false
            }
        };

        if action.is_movement() {
            self.refresh_move();
            return;
        }
        if !newly_pressed {
            return;
        }

        let event = match action {
            InputAction::Jump => PlayerInput::Jump,
            InputAction::ToggleView => PlayerInput::ToggleMovementMode,
            InputAction::Pause => PlayerInput::Pause,
            InputAction::Fire => PlayerInput::Fire { pressed: true },
            InputAction::Use => PlayerInput::Use,
            InputAction::Reload => PlayerInput::Reload,
            InputAction::EquipPrimary => PlayerInput::EquipPrimary,
            InputAction::EquipSecondary => PlayerInput::EquipSecondary,
            InputAction::MoveForward
            | InputAction::MoveBackward
            | InputAction::MoveLeft
            | InputAction::MoveRight => return,
        };
        self.queue.push(event);
    }

    fn refresh_move(&mut self) {
        let current = self.move_vector();
        if current != self.last_move {
            self.last_move = current;
            self.queue.push(PlayerInput::Move(current));
        }
    }
}

//! Input system with action-based mapping
//!
//! Turns raw keyboard events into movement actions, raw axes and
//! just-pressed edges for the player controller.

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::ElementState;
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
    /// Start sliding (Q by default)
    Slide,
    /// Stop sliding and walk (E by default)
    Walk,
}

/// Configurable keys for the locomotion actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub jump: KeyCode,
    pub slide: KeyCode,
    pub walk: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            jump: KeyCode::Space,
            slide: KeyCode::KeyQ,
            walk: KeyCode::KeyE,
        }
    }
}

/// Current state of all inputs for a frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Actions currently held down
    pub held: HashSet<InputAction>,
    /// Actions that were just pressed this frame
    pub just_pressed: HashSet<InputAction>,
    /// Actions that were just released this frame
    pub just_released: HashSet<InputAction>,
    /// Analog stick axes (x = right, y = forward), always within [-1, 1]
    analog: Vec2,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn is_just_pressed(&self, action: InputAction) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn is_just_released(&self, action: InputAction) -> bool {
        self.just_released.contains(&action)
    }

    /// Raw digital axis: -1, 0 or 1 depending on which of the two actions are held
    pub fn axis(&self, positive: InputAction, negative: InputAction) -> f32 {
        let mut value = 0.0;
        if self.is_held(positive) {
            value += 1.0;
        }
        if self.is_held(negative) {
            value -= 1.0;
        }
        value
    }

    /// Set the analog stick axes. Values are clamped to [-1, 1], NaN reads as 0.
    pub fn set_analog(&mut self, axes: Vec2) {
        self.analog = Vec2::new(clamp_axis(axes.x), clamp_axis(axes.y));
    }

    /// Raw movement axes: x = horizontal (right positive), y = vertical
    /// (forward positive). Keyboard and analog input are summed and clamped,
    /// no smoothing is applied.
    pub fn movement_axes(&self) -> Vec2 {
        let digital = Vec2::new(
            self.axis(InputAction::MoveRight, InputAction::MoveLeft),
            self.axis(InputAction::MoveForward, InputAction::MoveBackward),
        );
        let combined = digital + self.analog;
        Vec2::new(clamp_axis(combined.x), clamp_axis(combined.y))
    }

    /// Clear frame-specific data (call at end of frame)
    pub fn clear_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Maps physical keys to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    /// Key to action mappings
    bindings: HashMap<KeyCode, InputAction>,
    /// Reverse lookup: action to all keys
    reverse: HashMap<InputAction, Vec<KeyCode>>,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::from_keys(&KeyBindings::default())
    }
}

impl InputBindings {
    /// Movement on WASD and arrow keys, actions from `keys`
    pub fn from_keys(keys: &KeyBindings) -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
            reverse: HashMap::new(),
        };

        bindings.bind(KeyCode::KeyW, InputAction::MoveForward);
        bindings.bind(KeyCode::KeyS, InputAction::MoveBackward);
        bindings.bind(KeyCode::KeyA, InputAction::MoveLeft);
        bindings.bind(KeyCode::KeyD, InputAction::MoveRight);

        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBackward);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);

        bindings.bind(keys.jump, InputAction::Jump);
        bindings.bind(keys.slide, InputAction::Slide);
        bindings.bind(keys.walk, InputAction::Walk);

        bindings
    }

    /// Bind a key to an action, replacing whatever the key did before
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.unbind(key);
        self.bindings.insert(key, action);
        self.reverse.entry(action).or_default().push(key);
    }

    /// Unbind a key
    pub fn unbind(&mut self, key: KeyCode) {
        if let Some(action) = self.bindings.remove(&key) {
            if let Some(keys) = self.reverse.get_mut(&action) {
                keys.retain(|k| *k != key);
            }
        }
    }

    /// Get the action for a key, if any
    pub fn get_key_action(&self, key: KeyCode) -> Option<InputAction> {
        self.bindings.get(&key).copied()
    }

    /// All keys bound to an action
    pub fn keys_for(&self, action: InputAction) -> &[KeyCode] {
        self.reverse.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Input handler that processes raw events and updates state
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Current input state
    pub state: InputState,
    /// Input bindings
    pub bindings: InputBindings,
}

impl InputHandler {
    /// Create a new input handler with the given bindings
    pub fn new(bindings: InputBindings) -> Self {
        Self {
            state: InputState::new(),
            bindings,
        }
    }

    /// Handle a keyboard event
    pub fn handle_keyboard(&mut self, physical_key: PhysicalKey, element_state: ElementState) {
        if let PhysicalKey::Code(key_code) = physical_key {
            match element_state {
                ElementState::Pressed => self.press(key_code),
                ElementState::Released => self.release(key_code),
            }
        }
    }

    /// Register a key press. Repeated presses while held do not produce a new edge.
    pub fn press(&mut self, key: KeyCode) {
        if let Some(action) = self.bindings.get_key_action(key) {
            if !self.state.held.contains(&action) {
                self.state.just_pressed.insert(action);
            }
            self.state.held.insert(action);
        }
    }

    /// Register a key release
    pub fn release(&mut self, key: KeyCode) {
        if let Some(action) = self.bindings.get_key_action(key) {
            self.state.held.remove(&action);
            self.state.just_released.insert(action);
        }
    }

    /// Clear frame-specific input data
    pub fn end_frame(&mut self) {
        self.state.clear_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(
            bindings.get_key_action(KeyCode::KeyW),
            Some(InputAction::MoveForward)
        );
        assert_eq!(
            bindings.get_key_action(KeyCode::Space),
            Some(InputAction::Jump)
        );
        assert_eq!(
            bindings.get_key_action(KeyCode::KeyQ),
            Some(InputAction::Slide)
        );
        assert_eq!(bindings.keys_for(InputAction::MoveLeft).len(), 2);
    }

    #[test]
    fn test_custom_keys_rebind() {
        let keys = KeyBindings {
            jump: KeyCode::KeyJ,
            slide: KeyCode::ShiftLeft,
            walk: KeyCode::KeyW,
        };
        let bindings = InputBindings::from_keys(&keys);

        assert_eq!(bindings.get_key_action(KeyCode::KeyJ), Some(InputAction::Jump));
        assert_eq!(bindings.get_key_action(KeyCode::Space), None);
        // W was taken over by walk
        assert_eq!(bindings.get_key_action(KeyCode::KeyW), Some(InputAction::Walk));
        assert_eq!(bindings.keys_for(InputAction::MoveForward), &[KeyCode::ArrowUp]);
    }

    #[test]
    fn test_input_state() {
        let mut state = InputState::new();
        state.held.insert(InputAction::MoveForward);
        state.just_pressed.insert(InputAction::Jump);

        assert!(state.is_held(InputAction::MoveForward));
        assert!(state.is_just_pressed(InputAction::Jump));
        assert!(!state.is_held(InputAction::Slide));

        state.clear_frame();
        assert!(state.is_held(InputAction::MoveForward));
        assert!(!state.is_just_pressed(InputAction::Jump));
    }

    #[test]
    fn test_raw_axes() {
        let mut handler = InputHandler::default();
        handler.press(KeyCode::KeyW);
        handler.press(KeyCode::KeyA);
        assert_eq!(handler.state.movement_axes(), Vec2::new(-1.0, 1.0));

        // Opposite keys cancel out
        handler.press(KeyCode::KeyD);
        assert_eq!(handler.state.movement_axes(), Vec2::new(0.0, 1.0));

        handler.release(KeyCode::KeyW);
        assert_eq!(handler.state.movement_axes(), Vec2::ZERO);
    }

    #[test]
    fn test_analog_axes_clamped() {
        let mut state = InputState::new();
        state.set_analog(Vec2::new(3.0, f32::NAN));
        assert_eq!(state.movement_axes(), Vec2::new(1.0, 0.0));

        state.held.insert(InputAction::MoveRight);
        state.set_analog(Vec2::new(0.5, -0.25));
        assert_eq!(state.movement_axes(), Vec2::new(1.0, -0.25));
    }

    #[test]
    fn test_press_edges() {
        let mut handler = InputHandler::default();
        handler.press(KeyCode::Space);
        assert!(handler.state.is_just_pressed(InputAction::Jump));

        handler.end_frame();
        // Key repeat while held is not a new edge
        handler.press(KeyCode::Space);
        assert!(!handler.state.is_just_pressed(InputAction::Jump));

        handler.handle_keyboard(PhysicalKey::Code(KeyCode::Space), ElementState::Released);
        assert!(handler.state.is_just_released(InputAction::Jump));
        handler.end_frame();
        handler.handle_keyboard(PhysicalKey::Code(KeyCode::Space), ElementState::Pressed);
        assert!(handler.state.is_just_pressed(InputAction::Jump));
    }
}

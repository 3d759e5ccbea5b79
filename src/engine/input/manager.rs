// Input manager - maps raw winit events onto game actions

use super::action::{default_bindings, Action, InputSource};
use super::player::{InputSnapshot, PlayerInput};
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Coordinates bindings and input state for the local player
pub struct InputManager {
    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Input state of the player
    player: PlayerInput,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_bindings(default_bindings())
    }

    /// Create an input manager from a list of bindings
    pub fn with_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
            player: PlayerInput::new(),
        }
    }

    /// Bind an input source to an action, replacing any previous binding
    pub fn bind(&mut self, source: InputSource, action: Action) {
        self.bindings.insert(source, action);
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_source(InputSource::key(key_code), event.state, event.repeat);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_event(&mut self, button: MouseButton, state: ElementState) {
        self.process_source(InputSource::mouse(button), state, false);
    }

    /// Apply a press or release of a bound source
    pub fn process_source(&mut self, source: InputSource, state: ElementState, repeat: bool) {
        let Some(action) = self.get_action(source) else {
            return;
        };

        match state {
            ElementState::Pressed => {
                // Key repeats are not new presses
                if !repeat {
                    self.player.press(action);
                }
            }
            ElementState::Released => self.player.release(action),
        }
    }

    /// Edge/held state of an action for this frame
    pub fn snapshot(&self, action: Action) -> InputSnapshot {
        self.player.snapshot(action)
    }

    /// Update input state for a new frame
    /// Call this once per frame after the frame's edges were consumed
    pub fn update(&mut self) {
        self.player.update();
    }

    /// Get the player input state
    pub fn player(&self) -> &PlayerInput {
        &self.player
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_left_click_jumps() {
        let mut manager = InputManager::new();
        manager.process_mouse_event(MouseButton::Left, ElementState::Pressed);

        assert!(manager.snapshot(Action::Jump).pressed);
    }

    #[test]
    fn test_unbound_source_is_ignored() {
        let mut manager = InputManager::new();
        manager.process_mouse_event(MouseButton::Right, ElementState::Pressed);

        assert_eq!(manager.snapshot(Action::Jump), InputSnapshot::default());
    }

    #[test]
    fn test_key_repeat_is_not_a_press() {
        let mut manager = InputManager::new();
        manager.process_source(
            InputSource::key(KeyCode::Space),
            ElementState::Pressed,
            true,
        );

        assert!(!manager.player().is_pressed(Action::Jump));
    }

    #[test]
    fn test_release_edge_after_update() {
        let mut manager = InputManager::new();
        let space = InputSource::key(KeyCode::Space);

        manager.process_source(space, ElementState::Pressed, false);
        manager.update();
        manager.process_source(space, ElementState::Released, false);

        let snapshot = manager.snapshot(Action::Jump);
        assert!(snapshot.released);
        assert!(!snapshot.pressed);
        assert!(!snapshot.held);
    }

    #[test]
    fn test_rebinding() {
        let mut manager = InputManager::with_bindings(Vec::new());
        let up = InputSource::key(KeyCode::ArrowUp);
        assert_eq!(manager.get_action(up), None);

        manager.bind(up, Action::Jump);
        manager.process_source(up, ElementState::Pressed, false);
        assert!(manager.snapshot(Action::Jump).pressed);
    }
}

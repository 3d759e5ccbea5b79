// Per-player input state management

use super::action::Action;
use std::collections::HashSet;

/// Edge/held state of one button for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Went down this tick
    pub pressed: bool,
    /// Went up this tick
    pub released: bool,
    /// Currently down
    pub held: bool,
}

impl InputSnapshot {
    /// A tick where the button went down
    pub fn press() -> Self {
        Self {
            pressed: true,
            released: false,
            held: true,
        }
    }

    /// A tick where the button went up
    pub fn release() -> Self {
        Self {
            pressed: false,
            released: true,
            held: false,
        }
    }

    /// Same held state with the edges removed
    ///
    /// Used when one frame runs several fixed updates: only the first one
    /// sees the edges.
    pub fn without_edges(self) -> Self {
        Self {
            pressed: false,
            released: false,
            held: self.held,
        }
    }
}

/// Represents the input state for a single player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed this frame
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame (release events)
    just_released: HashSet<Action>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Edge/held state of an action for the current frame
    pub fn snapshot(&self, action: Action) -> InputSnapshot {
        InputSnapshot {
            pressed: self.just_pressed(action),
            released: self.just_released(action),
            held: self.is_pressed(action),
        }
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if !self.pressed.contains(&action) {
            self.just_pressed.insert(action);
            self.pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        if self.pressed.contains(&action) {
            self.just_released.insert(action);
            self.pressed.remove(&action);
        }
    }

    /// Update input state for a new frame
    /// Call this once the frame's edges have been consumed
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

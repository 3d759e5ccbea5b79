// Input handling system
//
// Turns raw keyboard and mouse events into per-tick button snapshots.
//
// - `action`: game actions and default bindings
// - `player`: press/release tracking and the per-tick `InputSnapshot`
// - `manager`: winit event routing
//
// ```rust,ignore
// let mut input = InputManager::new();
//
// // In the event loop
// input.process_mouse_event(button, state);
//
// // Once per frame
// let snapshot = input.snapshot(Action::Jump);
// level.tick(snapshot)?;
// input.update();
// ```

pub mod action;
pub mod manager;
pub mod player;

pub use action::{Action, InputSource};
pub use manager::InputManager;
pub use player::{InputSnapshot, PlayerInput};

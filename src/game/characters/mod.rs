// Character system
//
// - Runner controller reacting to host callbacks
// - Runner state and tuning values
// - Parameter-driven animator

pub mod animation;
pub mod config;
pub mod controller;
pub mod state;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationDriver, Animator, DIE_TRIGGER, GROUNDED_PARAM};
pub use config::RunnerConfig;
pub use controller::{CharacterController, ControllerBuilder};
pub use state::{CharacterState, Posture};

/// Controller setup errors
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Required component missing: {0}")]
    MissingComponent(&'static str),

    #[error("Invalid runner config: {0}")]
    InvalidConfig(String),
}

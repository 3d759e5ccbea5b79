// Runner tuning values, authored once per character

use crate::engine::assets::SoundHandle;

use super::ControllerError;

/// Upward force applied on every jump
pub const DEFAULT_JUMP_FORCE: f32 = 700.0;

/// Jumps available before the runner has to touch the ground again
pub const DEFAULT_MAX_JUMPS: u32 = 2;

/// Minimum upward component of a contact normal for it to count as ground
/// (cos 45°, rounded)
pub const DEFAULT_GROUND_NORMAL_THRESHOLD: f32 = 0.7;

/// Velocity multiplier when the jump button is released while rising
pub const DEFAULT_SHORT_HOP_FACTOR: f32 = 0.5;

/// Asset path of the default death sound
pub const DEFAULT_DEATH_CLIP: &str = "sounds/die.wav";

/// Asset path of the default jump sound
pub const DEFAULT_JUMP_CLIP: &str = "sounds/jump.wav";

/// Runner configuration. Read-only once the controller is built.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Jump force magnitude
    pub jump_force: f32,
    /// Clip played on death
    pub death_clip: SoundHandle,
    /// Number of jumps allowed between groundings
    pub max_jumps: u32,
    /// Walkable slope cutoff on the contact normal's y component
    pub ground_normal_threshold: f32,
    /// Velocity scale applied on an early release
    pub short_hop_factor: f32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            jump_force: DEFAULT_JUMP_FORCE,
            death_clip: SoundHandle::from_path(DEFAULT_DEATH_CLIP),
            max_jumps: DEFAULT_MAX_JUMPS,
            ground_normal_threshold: DEFAULT_GROUND_NORMAL_THRESHOLD,
            short_hop_factor: DEFAULT_SHORT_HOP_FACTOR,
        }
    }
}

impl RunnerConfig {
    pub fn with_jump_force(mut self, jump_force: f32) -> Self {
        self.jump_force = jump_force;
        self
    }

    pub fn with_death_clip(mut self, clip: SoundHandle) -> Self {
        self.death_clip = clip;
        self
    }

    pub fn with_max_jumps(mut self, max_jumps: u32) -> Self {
        self.max_jumps = max_jumps;
        self
    }

    pub fn with_ground_normal_threshold(mut self, threshold: f32) -> Self {
        self.ground_normal_threshold = threshold;
        self
    }

    pub fn with_short_hop_factor(mut self, factor: f32) -> Self {
        self.short_hop_factor = factor;
        self
    }

    /// Reject values the controller can't work with
    pub fn validate(&self) -> Result<(), ControllerError> {
        if !self.jump_force.is_finite() || self.jump_force < 0.0 {
            return Err(ControllerError::InvalidConfig(format!(
                "jump_force must be finite and non-negative, got {}",
                self.jump_force
            )));
        }

        if !(-1.0..=1.0).contains(&self.ground_normal_threshold) {
            return Err(ControllerError::InvalidConfig(format!(
                "ground_normal_threshold must be within [-1, 1], got {}",
                self.ground_normal_threshold
            )));
        }

        if !(0.0..=1.0).contains(&self.short_hop_factor) {
            return Err(ControllerError::InvalidConfig(format!(
                "short_hop_factor must be within [0, 1], got {}",
                self.short_hop_factor
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert_eq!(config.jump_force, 700.0);
        assert_eq!(config.max_jumps, 2);
        assert_eq!(config.ground_normal_threshold, 0.7);
        assert_eq!(config.short_hop_factor, 0.5);
        assert_eq!(config.death_clip, SoundHandle::from_path("sounds/die.wav"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let clip = SoundHandle::from_path("sounds/splat.wav");
        let config = RunnerConfig::default()
            .with_jump_force(500.0)
            .with_death_clip(clip)
            .with_max_jumps(3);

        assert_eq!(config.jump_force, 500.0);
        assert_eq!(config.death_clip, clip);
        assert_eq!(config.max_jumps, 3);
    }

    #[test]
    fn test_rejects_bad_jump_force() {
        assert!(RunnerConfig::default()
            .with_jump_force(f32::NAN)
            .validate()
            .is_err());
        assert!(RunnerConfig::default()
            .with_jump_force(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_rejects_out_of_range_ratios() {
        assert!(RunnerConfig::default()
            .with_ground_normal_threshold(1.5)
            .validate()
            .is_err());
        assert!(RunnerConfig::default()
            .with_short_hop_factor(2.0)
            .validate()
            .is_err());
    }
}

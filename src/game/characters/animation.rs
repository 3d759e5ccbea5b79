// Character animation system
//
// The controller only talks to the animator through named parameters, the
// same way a designer-authored state graph is driven: a persistent boolean
// (`Grounded`) and a one-shot trigger (`Die`). The animator turns those into
// the clip that is currently playing.

use std::collections::{HashMap, HashSet};

use super::state::Posture;

/// Boolean parameter mirrored from the controller's grounded flag
pub const GROUNDED_PARAM: &str = "Grounded";

/// Trigger fired once when the character dies
pub const DIE_TRIGGER: &str = "Die";

/// Parameter-level access to an animation state graph
pub trait AnimationDriver {
    /// Set a persistent boolean parameter
    fn set_bool(&mut self, name: &str, value: bool);

    /// Fire a one-shot trigger, consumed by the next transition that reads it
    fn set_trigger(&mut self, name: &str);
}

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g. "run", "jump", "die")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count,
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once, holds the last frame)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count as f32 * self.frame_duration
    }
}

/// Parameter-driven animation player for the runner
#[derive(Debug, Default)]
pub struct Animator {
    /// All available animations
    clips: HashMap<String, AnimationClip>,
    /// Boolean parameters
    bools: HashMap<String, bool>,
    /// Triggers fired but not yet consumed
    triggers: HashSet<String>,
    /// Currently playing animation name
    current_animation: String,
    /// Current frame index
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Whether the animation is playing
    playing: bool,
    /// Entered the death state; no further transitions
    dead: bool,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an animator with the runner's clips, starting in `jump`
    /// (the runner spawns in the air and lands on the first platform)
    pub fn with_runner_clips() -> Self {
        let mut animator = Self::new();
        animator.add_clip(AnimationClip::looping(
            Posture::Running.animation_name(),
            8,
            12.0,
        ));
        animator.add_clip(AnimationClip::looping(
            Posture::Airborne.animation_name(),
            2,
            6.0,
        ));
        animator.add_clip(AnimationClip::one_shot(Posture::Dead.animation_name(), 6, 10.0));
        animator.play(Posture::Airborne.animation_name());
        animator
    }

    /// Add an animation clip
    pub fn add_clip(&mut self, clip: AnimationClip) {
        self.clips.insert(clip.name.clone(), clip);
    }

    /// Play an animation by name (no-op if it is already current)
    pub fn play(&mut self, name: &str) {
        if self.current_animation != name {
            self.play_from_start(name);
        }
    }

    /// Play an animation from the beginning, even if it's the same
    pub fn play_from_start(&mut self, name: &str) {
        self.current_animation = name.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
    }

    /// Read a boolean parameter (unset parameters read as false)
    pub fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    /// Check whether a trigger is waiting to be consumed
    pub fn is_trigger_set(&self, name: &str) -> bool {
        self.triggers.contains(name)
    }

    /// Evaluate transitions then advance frame timing (called every frame)
    pub fn update(&mut self, dt: f32) {
        self.evaluate_transitions();
        self.advance(dt);
    }

    fn evaluate_transitions(&mut self) {
        if self.dead {
            return;
        }

        if self.triggers.remove(DIE_TRIGGER) {
            self.dead = true;
            self.play_from_start(Posture::Dead.animation_name());
            return;
        }

        let posture = if self.get_bool(GROUNDED_PARAM) {
            Posture::Running
        } else {
            Posture::Airborne
        };
        self.play(posture.animation_name());
    }

    fn advance(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        let Some(clip) = self.clips.get(&self.current_animation) else {
            return;
        };

        self.frame_timer += dt;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    self.current_frame = clip.frame_count - 1;
                    self.playing = false;
                    break;
                }
            }
        }
    }

    /// Get the current animation name
    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Check if the animation is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if the current animation has finished (for non-looping animations)
    pub fn is_finished(&self) -> bool {
        match self.clips.get(&self.current_animation) {
            Some(clip) => !clip.looping && !self.playing,
            None => true,
        }
    }

}

impl AnimationDriver for Animator {
    fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }

    fn set_trigger(&mut self, name: &str) {
        self.triggers.insert(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_animation_clip_creation() {
        let clip = AnimationClip::looping("run", 4, 8.0);
        assert_eq!(clip.name, "run");
        assert_eq!(clip.frame_count, 4);
        assert_eq!(clip.frame_duration, 0.125); // 1/8
        assert!(clip.looping);
    }

    #[test]
    fn test_animation_clip_duration() {
        let clip = AnimationClip::one_shot("die", 6, 10.0);
        assert_relative_eq!(clip.total_duration(), 0.6, epsilon = 1e-6);
    }

    #[test]
    fn test_starts_airborne() {
        let animator = Animator::with_runner_clips();
        assert_eq!(animator.current_animation(), "jump");
        assert!(!animator.get_bool(GROUNDED_PARAM));
    }

    #[test]
    fn test_grounded_param_selects_run() {
        let mut animator = Animator::with_runner_clips();

        animator.set_bool(GROUNDED_PARAM, true);
        animator.update(0.0);
        assert_eq!(animator.current_animation(), "run");

        animator.set_bool(GROUNDED_PARAM, false);
        animator.update(0.0);
        assert_eq!(animator.current_animation(), "jump");
    }

    #[test]
    fn test_clip_follows_state_posture() {
        use super::super::state::CharacterState;

        let mut animator = Animator::with_runner_clips();
        let mut state = CharacterState::new();

        state.land();
        animator.set_bool(GROUNDED_PARAM, state.is_grounded());
        animator.update(0.0);
        assert_eq!(animator.current_animation(), state.posture().animation_name());

        state.leave_ground();
        animator.set_bool(GROUNDED_PARAM, state.is_grounded());
        animator.update(0.0);
        assert_eq!(animator.current_animation(), state.posture().animation_name());

        state.kill();
        animator.set_trigger(DIE_TRIGGER);
        animator.update(0.0);
        assert_eq!(animator.current_animation(), state.posture().animation_name());
    }

    #[test]
    fn test_same_clip_keeps_frame() {
        let mut animator = Animator::with_runner_clips();
        animator.set_bool(GROUNDED_PARAM, true);
        animator.update(0.0);
        animator.update(0.1); // 12 fps: one frame

        animator.set_bool(GROUNDED_PARAM, true);
        animator.update(0.0);
        assert_eq!(animator.current_frame(), 1);
    }

    #[test]
    fn test_die_trigger_is_consumed_once() {
        let mut animator = Animator::with_runner_clips();
        animator.set_trigger(DIE_TRIGGER);
        assert!(animator.is_trigger_set(DIE_TRIGGER));

        animator.update(0.0);
        assert_eq!(animator.current_animation(), "die");
        assert!(!animator.is_trigger_set(DIE_TRIGGER));
    }

    #[test]
    fn test_death_ignores_grounded_changes() {
        let mut animator = Animator::with_runner_clips();
        animator.set_trigger(DIE_TRIGGER);
        animator.update(0.0);

        animator.set_bool(GROUNDED_PARAM, true);
        animator.update(0.0);
        assert_eq!(animator.current_animation(), "die");
    }

    #[test]
    fn test_looping_wraps() {
        let mut animator = Animator::new();
        animator.add_clip(AnimationClip::looping("test", 3, 10.0));
        animator.play("test");

        animator.advance(0.35); // 3.5 frames
        assert_eq!(animator.current_frame(), 0);
        assert!(animator.is_playing());
    }

    #[test]
    fn test_one_shot_holds_last_frame() {
        let mut animator = Animator::with_runner_clips();
        animator.set_trigger(DIE_TRIGGER);
        animator.update(0.0);

        animator.update(2.0);
        assert_eq!(animator.current_frame(), 5);
        assert!(!animator.is_playing());
        assert!(animator.is_finished());
    }
}

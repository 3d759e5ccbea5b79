// Runner character controller
//
// Reacts to four host callbacks (tick, hazard overlap, contact begin,
// contact end) and drives the injected body, animator and audio source.

use glam::Vec2;
use log::{debug, info};

use crate::core::math::{is_walkable, slope_degrees};
use crate::engine::audio::AudioPlayer;
use crate::engine::input::InputSnapshot;
use crate::engine::physics::PhysicsBody;

use super::animation::{AnimationDriver, DIE_TRIGGER, GROUNDED_PARAM};
use super::config::RunnerConfig;
use super::state::CharacterState;
use super::ControllerError;

/// Controller for a double-jumping runner
#[derive(Debug)]
pub struct CharacterController<B, A, S> {
    config: RunnerConfig,
    state: CharacterState,
    body: B,
    animator: A,
    audio: S,
}

impl<B, A, S> CharacterController<B, A, S>
where
    B: PhysicsBody,
    A: AnimationDriver,
    S: AudioPlayer,
{
    /// Build a controller from its collaborators
    ///
    /// Prefer [`ControllerBuilder`] when collaborators are looked up from a
    /// host entity and may be missing.
    pub fn new(
        config: RunnerConfig,
        body: B,
        animator: A,
        audio: S,
    ) -> Result<Self, ControllerError> {
        config.validate()?;

        Ok(Self {
            config,
            state: CharacterState::new(),
            body,
            animator,
            audio,
        })
    }

    /// Per-frame update with the primary action button's state
    pub fn on_tick(&mut self, input: InputSnapshot) {
        if self.state.is_dead() {
            return;
        }

        if input.pressed && self.state.can_jump(self.config.max_jumps) {
            self.jump();
        } else if input.released && self.body.velocity().y > 0.0 {
            // Early release while rising: short hop
            let velocity = self.body.velocity() * self.config.short_hop_factor;
            self.body.set_velocity(velocity);
            debug!("Short hop, velocity now {:?}", velocity);
        }

        self.animator.set_bool(GROUNDED_PARAM, self.state.is_grounded());
    }

    fn jump(&mut self) {
        self.state.register_jump();

        self.body.set_velocity(Vec2::ZERO);
        self.body.add_force(Vec2::new(0.0, self.config.jump_force));

        // The assigned clip is the jump sound until death swaps it
        self.audio.play();

        debug!(
            "Jump {}/{} (force {})",
            self.state.jump_count(),
            self.config.max_jumps,
            self.config.jump_force
        );
    }

    /// The runner overlapped a hazard volume
    pub fn on_hazard_contact(&mut self) {
        if !self.state.is_dead() {
            self.die();
        }
    }

    /// Terminal transition. Callers guarantee it runs once; see
    /// [`on_hazard_contact`](Self::on_hazard_contact).
    pub fn die(&mut self) {
        self.animator.set_trigger(DIE_TRIGGER);

        self.audio.set_clip(self.config.death_clip);
        self.audio.play();

        self.body.set_velocity(Vec2::ZERO);
        self.state.kill();

        info!("Runner died after {} jump(s) in the air", self.state.jump_count());
    }

    /// A collision began; `contact_normals` point from the other surface
    /// toward the runner, in the order the physics engine reported them
    ///
    /// Only the first contact is inspected.
    pub fn on_surface_contact_begin(&mut self, contact_normals: &[Vec2]) {
        let Some(&normal) = contact_normals.first() else {
            return;
        };

        if is_walkable(normal, self.config.ground_normal_threshold) {
            if !self.state.is_grounded() {
                info!("Landed on a {:.0}° slope", slope_degrees(normal));
            }
            self.state.land();
        } else {
            debug!("Ignoring {:.0}° contact", slope_degrees(normal));
        }
    }

    /// A collision ended. Clears the grounded flag even if another surface
    /// is still being touched.
    pub fn on_surface_contact_end(&mut self) {
        self.state.leave_ground();
    }

    pub fn is_dead(&self) -> bool {
        self.state.is_dead()
    }

    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded()
    }

    pub fn jump_count(&self) -> u32 {
        self.state.jump_count()
    }

    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn audio(&self) -> &S {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut S {
        &mut self.audio
    }
}

/// Assembles a controller from collaborators that may not exist
pub struct ControllerBuilder<B, A, S> {
    config: RunnerConfig,
    body: Option<B>,
    animator: Option<A>,
    audio: Option<S>,
}

impl<B, A, S> ControllerBuilder<B, A, S>
where
    B: PhysicsBody,
    A: AnimationDriver,
    S: AudioPlayer,
{
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            body: None,
            animator: None,
            audio: None,
        }
    }

    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    pub fn animator(mut self, animator: A) -> Self {
        self.animator = Some(animator);
        self
    }

    pub fn audio(mut self, audio: S) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Fails if any collaborator is missing or the config is invalid
    pub fn build(self) -> Result<CharacterController<B, A, S>, ControllerError> {
        let body = self
            .body
            .ok_or(ControllerError::MissingComponent("physics body"))?;
        let animator = self
            .animator
            .ok_or(ControllerError::MissingComponent("animation driver"))?;
        let audio = self
            .audio
            .ok_or(ControllerError::MissingComponent("audio player"))?;

        CharacterController::new(self.config, body, animator, audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::SoundHandle;
    use approx::assert_relative_eq;

    #[derive(Debug, Default)]
    struct MockBody {
        velocity: Vec2,
        forces: Vec<Vec2>,
    }

    impl PhysicsBody for MockBody {
        fn velocity(&self) -> Vec2 {
            self.velocity
        }

        fn set_velocity(&mut self, velocity: Vec2) {
            self.velocity = velocity;
        }

        fn add_force(&mut self, force: Vec2) {
            self.forces.push(force);
        }
    }

    #[derive(Debug, Default)]
    struct MockAnimator {
        bools: Vec<(String, bool)>,
        triggers: Vec<String>,
    }

    impl AnimationDriver for MockAnimator {
        fn set_bool(&mut self, name: &str, value: bool) {
            self.bools.push((name.to_string(), value));
        }

        fn set_trigger(&mut self, name: &str) {
            self.triggers.push(name.to_string());
        }
    }

    #[derive(Debug, Default)]
    struct MockAudio {
        clip: Option<SoundHandle>,
        clip_assignments: Vec<SoundHandle>,
        plays: Vec<Option<SoundHandle>>,
    }

    impl AudioPlayer for MockAudio {
        fn set_clip(&mut self, clip: SoundHandle) {
            self.clip = Some(clip);
            self.clip_assignments.push(clip);
        }

        fn play(&mut self) {
            self.plays.push(self.clip);
        }
    }

    type TestController = CharacterController<MockBody, MockAnimator, MockAudio>;

    fn jump_clip() -> SoundHandle {
        SoundHandle::from_path("sounds/jump.wav")
    }

    fn controller() -> TestController {
        let audio = MockAudio {
            clip: Some(jump_clip()),
            ..MockAudio::default()
        };
        CharacterController::new(
            RunnerConfig::default(),
            MockBody::default(),
            MockAnimator::default(),
            audio,
        )
        .unwrap()
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    const UP: Vec2 = Vec2::new(0.0, 1.0);

    #[test]
    fn test_jump_zeroes_velocity_and_applies_force() {
        let mut c = controller();
        c.body_mut().velocity = Vec2::new(3.0, -8.0);

        c.on_tick(InputSnapshot::press());

        assert_eq!(c.jump_count(), 1);
        assert_eq!(c.body().velocity, Vec2::ZERO);
        assert_eq!(c.body().forces, vec![Vec2::new(0.0, 700.0)]);
        assert_eq!(c.audio().plays, vec![Some(jump_clip())]);
    }

    #[test]
    fn test_third_jump_is_refused() {
        let mut c = controller();
        c.on_tick(InputSnapshot::press());
        c.on_tick(InputSnapshot::press());
        assert_eq!(c.jump_count(), 2);

        c.body_mut().velocity = Vec2::new(1.0, 4.0);
        c.on_tick(InputSnapshot::press());

        assert_eq!(c.jump_count(), 2);
        assert_eq!(c.body().forces.len(), 2);
        assert_eq!(c.body().velocity, Vec2::new(1.0, 4.0));
        assert_eq!(c.audio().plays.len(), 2);
    }

    #[test]
    fn test_grounding_refills_jumps() {
        let mut c = controller();
        c.on_tick(InputSnapshot::press());
        c.on_tick(InputSnapshot::press());

        c.on_surface_contact_begin(&[UP]);
        assert!(c.is_grounded());
        assert_eq!(c.jump_count(), 0);

        c.on_tick(InputSnapshot::press());
        assert_eq!(c.jump_count(), 1);
        assert_eq!(c.body().forces.len(), 3);
    }

    #[test]
    fn test_steep_contact_does_not_ground() {
        let mut c = controller();
        c.on_tick(InputSnapshot::press());
        c.on_tick(InputSnapshot::press());

        c.on_surface_contact_begin(&[Vec2::new(-0.6, 0.6)]);

        assert!(!c.is_grounded());
        assert_eq!(c.jump_count(), 2);
    }

    #[test]
    fn test_only_first_contact_is_examined() {
        let mut c = controller();
        c.on_tick(InputSnapshot::press());

        c.on_surface_contact_begin(&[Vec2::X, UP]);
        assert!(!c.is_grounded());
        assert_eq!(c.jump_count(), 1);

        c.on_surface_contact_begin(&[UP, Vec2::X]);
        assert!(c.is_grounded());
    }

    #[test]
    fn test_empty_contact_list_is_ignored() {
        let mut c = controller();
        c.on_surface_contact_begin(&[]);
        assert!(!c.is_grounded());
    }

    #[test]
    fn test_contact_end_always_ungrounds() {
        let mut c = controller();
        c.on_surface_contact_begin(&[UP]);
        c.on_surface_contact_begin(&[UP]);

        // Still standing on the second surface, but the flag drops anyway
        c.on_surface_contact_end();
        assert!(!c.is_grounded());
    }

    #[test]
    fn test_release_while_rising_halves_velocity() {
        let mut c = controller();
        c.body_mut().velocity = Vec2::new(4.0, 10.0);

        c.on_tick(InputSnapshot::release());

        assert_relative_eq!(c.body().velocity.x, 2.0);
        assert_relative_eq!(c.body().velocity.y, 5.0);
    }

    #[test]
    fn test_release_while_falling_does_nothing() {
        let mut c = controller();
        c.body_mut().velocity = Vec2::new(4.0, -10.0);

        c.on_tick(InputSnapshot::release());

        assert_eq!(c.body().velocity, Vec2::new(4.0, -10.0));
    }

    #[test]
    fn test_press_and_release_in_same_tick_only_jumps() {
        let mut c = controller();
        c.body_mut().velocity = Vec2::new(0.0, 10.0);

        c.on_tick(InputSnapshot {
            pressed: true,
            released: true,
            held: false,
        });

        assert_eq!(c.jump_count(), 1);
        assert_eq!(c.body().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_refused_press_falls_through_to_release() {
        let mut c = controller();
        c.on_tick(InputSnapshot::press());
        c.on_tick(InputSnapshot::press());
        c.body_mut().velocity = Vec2::new(0.0, 8.0);

        c.on_tick(InputSnapshot {
            pressed: true,
            released: true,
            held: false,
        });

        assert_relative_eq!(c.body().velocity.y, 4.0);
    }

    #[test]
    fn test_grounded_param_written_every_tick() {
        let mut c = controller();
        c.on_tick(idle());
        c.on_surface_contact_begin(&[UP]);
        c.on_tick(idle());
        c.on_surface_contact_end();
        c.on_tick(idle());

        let expected: Vec<(String, bool)> = [false, true, false]
            .into_iter()
            .map(|v| (GROUNDED_PARAM.to_string(), v))
            .collect();
        assert_eq!(c.animator().bools, expected);
    }

    #[test]
    fn test_die_sequence() {
        let mut c = controller();
        c.body_mut().velocity = Vec2::new(6.0, -3.0);

        c.die();

        let death_clip = c.config().death_clip;
        assert!(c.is_dead());
        assert_eq!(c.body().velocity, Vec2::ZERO);
        assert_eq!(c.audio().clip, Some(death_clip));
        assert_eq!(c.audio().plays, vec![Some(death_clip)]);
        assert_eq!(c.animator().triggers, vec![DIE_TRIGGER.to_string()]);
    }

    #[test]
    fn test_double_hazard_contact_dies_once() {
        let mut c = controller();

        c.on_hazard_contact();
        c.on_hazard_contact();

        assert!(c.is_dead());
        assert_eq!(c.animator().triggers.len(), 1);
        assert_eq!(c.audio().clip_assignments.len(), 1);
        assert_eq!(c.audio().plays.len(), 1);
    }

    #[test]
    fn test_dead_runner_ignores_input() {
        let mut c = controller();
        c.on_hazard_contact();
        c.body_mut().velocity = Vec2::new(2.0, 10.0);
        let bools_before = c.animator().bools.len();

        c.on_tick(InputSnapshot::press());
        c.on_tick(InputSnapshot::release());
        c.on_surface_contact_begin(&[UP]);
        c.on_tick(InputSnapshot::press());

        assert!(c.is_dead());
        assert_eq!(c.jump_count(), 0);
        assert!(c.body().forces.is_empty());
        assert_eq!(c.body().velocity, Vec2::new(2.0, 10.0));
        assert_eq!(c.animator().bools.len(), bools_before);
        assert_eq!(c.audio().plays.len(), 1);
    }

    #[test]
    fn test_dead_flag_never_resets() {
        let mut c = controller();
        c.on_hazard_contact();

        for input in [InputSnapshot::press(), InputSnapshot::release(), idle()] {
            c.on_surface_contact_begin(&[UP]);
            c.on_surface_contact_end();
            c.on_tick(input);
            c.on_hazard_contact();
            assert!(c.is_dead());
        }
    }

    #[test]
    fn test_custom_jump_cap() {
        let mut c = CharacterController::new(
            RunnerConfig::default().with_max_jumps(1),
            MockBody::default(),
            MockAnimator::default(),
            MockAudio::default(),
        )
        .unwrap();

        c.on_tick(InputSnapshot::press());
        c.on_tick(InputSnapshot::press());
        assert_eq!(c.jump_count(), 1);
    }

    #[test]
    fn test_builder_reports_missing_component() {
        let err =
            ControllerBuilder::<MockBody, MockAnimator, MockAudio>::new(RunnerConfig::default())
                .body(MockBody::default())
                .audio(MockAudio::default())
                .build()
                .unwrap_err();

        assert!(matches!(
            err,
            ControllerError::MissingComponent("animation driver")
        ));
    }

    #[test]
    fn test_builder_with_all_components() {
        let c = ControllerBuilder::new(RunnerConfig::default())
            .body(MockBody::default())
            .animator(MockAnimator::default())
            .audio(MockAudio::default())
            .build()
            .unwrap();

        assert!(!c.is_dead());
        assert!(!c.is_grounded());
        assert_eq!(c.jump_count(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = CharacterController::new(
            RunnerConfig::default().with_jump_force(f32::INFINITY),
            MockBody::default(),
            MockAnimator::default(),
            MockAudio::default(),
        );

        assert!(matches!(result, Err(ControllerError::InvalidConfig(_))));
    }
}

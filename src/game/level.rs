// Level: physics world, static geometry and the runner
//
// Owns the fixed-step order of operations and routes physics events to the
// runner's controller callbacks.

use anyhow::Result;
use glam::Vec2;
use log::{debug, info, warn};

use crate::engine::assets::SoundHandle;
use crate::engine::audio::{AudioCommand, AudioSource};
use crate::engine::input::InputSnapshot;
use crate::engine::physics::{
    body::presets, ColliderHandle, CollisionEvent, PhysicsWorld, RigidBodyProxy,
};

use super::characters::config::DEFAULT_JUMP_CLIP;
use super::characters::{
    Animator, CharacterController, ControllerBuilder, Posture, RunnerConfig,
};

/// Tag carried by lethal trigger volumes
pub const HAZARD_TAG: &str = "Dead";

/// Tag carried by platforms
pub const GROUND_TAG: &str = "Ground";

/// The runner as hosted by a level
pub type Runner = CharacterController<RigidBodyProxy, Animator, AudioSource>;

/// Axis-aligned box in world units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub center: Vec2,
    pub size: Vec2,
}

impl Block {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }
}

/// Static description of a level
#[derive(Debug, Clone)]
pub struct LevelLayout {
    /// Runner spawn point (collider center)
    pub spawn: Vec2,
    /// Runner collider width
    pub runner_width: f32,
    /// Runner collider height
    pub runner_height: f32,
    /// Solid platforms
    pub platforms: Vec<Block>,
    /// Trigger volumes tagged as hazards
    pub hazards: Vec<Block>,
}

impl Default for LevelLayout {
    /// One long floor with a kill zone underneath it
    fn default() -> Self {
        Self {
            spawn: Vec2::new(0.0, 2.0),
            runner_width: 1.0,
            runner_height: 2.0,
            platforms: vec![Block::new(Vec2::new(0.0, 0.0), Vec2::new(40.0, 1.0))],
            hazards: vec![Block::new(Vec2::new(0.0, -10.0), Vec2::new(200.0, 2.0))],
        }
    }
}

/// A running level
pub struct Level {
    physics: PhysicsWorld,
    runner: Runner,
    runner_collider: ColliderHandle,
    posture: Posture,
    ticks: u64,
}

impl Level {
    /// Build the level geometry and spawn the runner
    pub fn new(layout: &LevelLayout, config: RunnerConfig) -> Result<Self> {
        let mut physics = PhysicsWorld::new();

        for platform in &layout.platforms {
            let body = physics.add_rigid_body(presets::platform_body(
                platform.center.x,
                platform.center.y,
            ));
            physics.add_tagged_collider(
                presets::platform_collider(platform.size.x, platform.size.y),
                body,
                GROUND_TAG,
            );
        }

        for hazard in &layout.hazards {
            let body =
                physics.add_rigid_body(presets::platform_body(hazard.center.x, hazard.center.y));
            physics.add_tagged_collider(
                presets::hazard_collider(hazard.size.x, hazard.size.y),
                body,
                HAZARD_TAG,
            );
        }

        let runner_body =
            physics.add_rigid_body(presets::runner_body(layout.spawn.x, layout.spawn.y));
        let runner_collider = physics.add_collider(
            presets::runner_collider(layout.runner_width, layout.runner_height),
            runner_body,
        );

        let runner = ControllerBuilder::new(config)
            .body(RigidBodyProxy::new(runner_body))
            .animator(Animator::with_runner_clips())
            .audio(AudioSource::with_clip(SoundHandle::from_path(DEFAULT_JUMP_CLIP)))
            .build()?;

        info!(
            "Level ready: {} platform(s), {} hazard(s), runner at {:?}",
            layout.platforms.len(),
            layout.hazards.len(),
            layout.spawn
        );

        let posture = runner.state().posture();

        Ok(Self {
            physics,
            runner,
            runner_collider,
            posture,
            ticks: 0,
        })
    }

    /// Advance one fixed step with this tick's input
    pub fn tick(&mut self, input: InputSnapshot) -> Result<()> {
        let dt = self.physics.timestep();

        self.runner.body_mut().pull(&self.physics)?;
        self.runner.on_tick(input);
        self.runner.body_mut().push(&mut self.physics)?;

        self.physics.step();

        for event in self.physics.get_collision_events() {
            self.dispatch(&event);
        }
        // Callbacks may have changed the velocity (death stops the runner)
        self.runner.body_mut().push(&mut self.physics)?;

        let posture = self.runner.state().posture();
        if posture != self.posture {
            debug!("Runner {:?} -> {:?} at tick {}", self.posture, posture, self.ticks);
            self.posture = posture;
        }

        self.runner.animator_mut().update(dt);
        self.ticks += 1;
        Ok(())
    }

    fn dispatch(&mut self, event: &CollisionEvent) {
        let Some(other) = event.other(self.runner_collider) else {
            return;
        };

        match event {
            CollisionEvent::Started { sensor: true, .. } => {
                if self.physics.has_tag(other, HAZARD_TAG) {
                    self.runner.on_hazard_contact();
                } else {
                    debug!("Runner entered untagged trigger {:?}", other);
                }
            }
            CollisionEvent::Started { sensor: false, .. } => {
                if self.physics.get_collider(other).is_none() {
                    warn!("Contact with unknown collider {:?}", other);
                    return;
                }
                let normals = event.normals_toward(self.runner_collider);
                self.runner.on_surface_contact_begin(&normals);
            }
            CollisionEvent::Stopped { sensor: false, .. } => {
                self.runner.on_surface_contact_end();
            }
            CollisionEvent::Stopped { sensor: true, .. } => {}
        }
    }

    /// Take the audio requests made since the last call
    pub fn drain_audio(&mut self) -> Vec<AudioCommand> {
        self.runner.audio_mut().drain()
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Current runner position (collider center)
    pub fn runner_position(&self) -> Option<Vec2> {
        self.physics
            .get_rigid_body(self.runner.body().handle())
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
    }

    /// Current runner velocity as seen by the physics world
    pub fn runner_velocity(&self) -> Option<Vec2> {
        self.physics
            .get_rigid_body(self.runner.body().handle())
            .map(|body| Vec2::new(body.linvel().x, body.linvel().y))
    }

    /// Fixed steps run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

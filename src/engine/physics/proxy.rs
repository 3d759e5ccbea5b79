// Character-facing view of a rapier rigid body
//
// Gameplay code runs between physics steps and never holds a borrow of the
// world. The proxy mirrors the body's velocity, records what gameplay asked
// for, and writes it back before the next step.

use glam::Vec2;
use rapier2d::prelude::*;

use super::{PhysicsError, PhysicsWorld};

/// Velocity and force access needed by character controllers
pub trait PhysicsBody {
    /// Current linear velocity
    fn velocity(&self) -> Vec2;

    /// Overwrite the linear velocity
    fn set_velocity(&mut self, velocity: Vec2);

    /// Apply a force for a single simulation step
    fn add_force(&mut self, force: Vec2);
}

/// Mirror of a rigid body living in a [`PhysicsWorld`]
#[derive(Debug, Clone)]
pub struct RigidBodyProxy {
    handle: RigidBodyHandle,
    velocity: Vec2,
    velocity_dirty: bool,
    pending_force: Vec2,
}

impl RigidBodyProxy {
    pub fn new(handle: RigidBodyHandle) -> Self {
        Self {
            handle,
            velocity: Vec2::ZERO,
            velocity_dirty: false,
            pending_force: Vec2::ZERO,
        }
    }

    /// Handle of the mirrored body
    pub fn handle(&self) -> RigidBodyHandle {
        self.handle
    }

    /// Force queued for the next step
    pub fn pending_force(&self) -> Vec2 {
        self.pending_force
    }

    /// Refresh the mirrored velocity from the world
    pub fn pull(&mut self, world: &PhysicsWorld) -> Result<(), PhysicsError> {
        let body = world
            .get_rigid_body(self.handle)
            .ok_or(PhysicsError::MissingBody(self.handle))?;

        let linvel = body.linvel();
        self.velocity = Vec2::new(linvel.x, linvel.y);
        self.velocity_dirty = false;
        Ok(())
    }

    /// Write velocity changes and queued forces back to the world
    ///
    /// Forces are converted into an impulse spanning one timestep, matching
    /// a force applied for exactly one physics step.
    pub fn push(&mut self, world: &mut PhysicsWorld) -> Result<(), PhysicsError> {
        let dt = world.timestep();
        let body = world
            .get_rigid_body_mut(self.handle)
            .ok_or(PhysicsError::MissingBody(self.handle))?;

        if self.velocity_dirty {
            body.set_linvel(vector![self.velocity.x, self.velocity.y], true);
            self.velocity_dirty = false;
        }

        if self.pending_force != Vec2::ZERO {
            let impulse = self.pending_force * dt;
            body.apply_impulse(vector![impulse.x, impulse.y], true);
            self.pending_force = Vec2::ZERO;
        }

        Ok(())
    }
}

impl PhysicsBody for RigidBodyProxy {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.velocity_dirty = true;
    }

    fn add_force(&mut self, force: Vec2) {
        self.pending_force += force;
    }
}

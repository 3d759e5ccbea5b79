// Physics system using rapier2d

pub mod body;
mod collision;
mod proxy;
mod world;

pub use body::{ColliderHandle, RigidBodyHandle};
pub use collision::{CollisionEvent, CollisionGroups};
pub use proxy::{PhysicsBody, RigidBodyProxy};
pub use world::PhysicsWorld;

/// Physics access errors
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("Rigid body {0:?} is not in the physics world")]
    MissingBody(RigidBodyHandle),
}

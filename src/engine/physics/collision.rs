use glam::Vec2;
use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Runner character
    Player = 0b0000_0010,

    /// Static platforms and floor tiles
    Platform = 0b0000_1000,

    /// Lethal zones (pits, spikes)
    Hazard = 0b0001_0000,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // The runner touches the level and its hazards, never other runners
            CollisionGroups::Player => Group::from_bits_truncate(
                CollisionGroups::Platform as u32 | CollisionGroups::Hazard as u32,
            ),

            CollisionGroups::Platform => Group::from_bits_truncate(
                CollisionGroups::Player as u32 | CollisionGroups::Platform as u32,
            ),

            CollisionGroups::Hazard => Group::from_bits_truncate(CollisionGroups::Player as u32),

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionEvent {
    /// Two colliders started touching (or overlapping, for sensors)
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        /// At least one of the colliders is a sensor (trigger volume)
        sensor: bool,
        /// World-space contact normals in reported order, pointing from
        /// `collider1` toward `collider2`. Empty for sensor overlaps.
        normals: Vec<Vec2>,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        sensor: bool,
    },
}

impl CollisionEvent {
    /// Check whether the event involves the given collider
    pub fn involves(&self, handle: ColliderHandle) -> bool {
        let (c1, c2) = self.colliders();
        c1 == handle || c2 == handle
    }

    /// Both colliders of the pair
    pub fn colliders(&self) -> (ColliderHandle, ColliderHandle) {
        match self {
            CollisionEvent::Started {
                collider1,
                collider2,
                ..
            }
            | CollisionEvent::Stopped {
                collider1,
                collider2,
                ..
            } => (*collider1, *collider2),
        }
    }

    /// The collider paired with `handle`, if the event involves it
    pub fn other(&self, handle: ColliderHandle) -> Option<ColliderHandle> {
        let (c1, c2) = self.colliders();
        if c1 == handle {
            Some(c2)
        } else if c2 == handle {
            Some(c1)
        } else {
            None
        }
    }

    /// Contact normals oriented so they point toward `handle`
    ///
    /// This is the surface normal of the *other* collider as seen from
    /// `handle`: standing on flat ground yields `(0, 1)`.
    pub fn normals_toward(&self, handle: ColliderHandle) -> Vec<Vec2> {
        match self {
            CollisionEvent::Started {
                collider2, normals, ..
            } => {
                if *collider2 == handle {
                    normals.clone()
                } else {
                    normals.iter().map(|n| -*n).collect()
                }
            }
            CollisionEvent::Stopped { .. } => Vec::new(),
        }
    }
}

/// Collect per-point normals from a contact pair, first manifold first
fn contact_normals(pair: &ContactPair) -> Vec<Vec2> {
    pair.manifolds
        .iter()
        .flat_map(|manifold| {
            let normal = Vec2::new(manifold.data.normal.x, manifold.data.normal.y);
            std::iter::repeat(normal).take(manifold.points.len())
        })
        .collect()
}

/// Queue for storing collision events during physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))), // Pre-allocate for common case
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this frame
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Add a collision event
    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// Implement rapier2d's EventHandler trait for our event queue
impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, flags) => {
                // Keep the pair's own ordering so the normals stay consistent with it
                let (collider1, collider2, normals) = match contact_pair {
                    Some(pair) => (pair.collider1, pair.collider2, contact_normals(pair)),
                    None => (h1, h2, Vec::new()),
                };
                self.push(CollisionEvent::Started {
                    collider1,
                    collider2,
                    sensor: flags.contains(CollisionEventFlags::SENSOR),
                    normals,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                    sensor: flags.contains(CollisionEventFlags::SENSOR),
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

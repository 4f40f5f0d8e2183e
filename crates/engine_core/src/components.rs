//! Common ECS components shared by gameplay entities.

use glam::Vec3;

/// Velocity component for moving entities.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity {
    pub linear: Vec3,
}

impl Velocity {
    pub fn new(linear: Vec3) -> Self {
        Self { linear }
    }
}

/// Age tracker for short-lived entities (projectiles, effects).
#[derive(Debug, Clone, Copy, Default)]
pub struct Lifetime {
    pub age: f32,
    pub max_age: f32,
}

impl Lifetime {
    pub fn new(max_age: f32) -> Self {
        Self { age: 0.0, max_age }
    }

    /// Advance the age. Returns true once the entity has outlived `max_age`.
    pub fn update(&mut self, dt: f32) -> bool {
        self.age += dt;
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.age > self.max_age
    }
}

/// Monotonic spawn order. Lower values were spawned earlier and win ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpawnSeq(pub u64);

/// Marker for entities scheduled for removal at the next compaction pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Retired;

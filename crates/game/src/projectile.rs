//! Projectile spawning, flight, hit detection and retirement.

use engine_core::{Lifetime, Retired, SpawnSeq, Transform, Velocity, Vec3};
use hecs::{Entity, World};
use std::collections::HashSet;

use crate::config::GameConfig;
use crate::enemy::Target;

/// Projectile component.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projectile;

/// A projectile that reached an enemy this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub projectile: Entity,
    pub enemy: Entity,
    pub position: Vec3,
}

/// What happened to projectiles during one update.
#[derive(Debug, Default)]
pub struct ProjectileReport {
    pub hits: Vec<Hit>,
    pub expired: Vec<Entity>,
}

/// Manages projectile firing and flight.
pub struct ProjectileManager {
    pub muzzle_speed: f32,
    pub lifetime: f32,
    pub max_range: f32,
    pub hit_radius: f32,
    next_seq: u64,
}

impl ProjectileManager {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            muzzle_speed: config.muzzle_speed,
            lifetime: config.projectile_lifetime,
            max_range: config.max_range,
            hit_radius: config.hit_radius,
            next_seq: 0,
        }
    }

    /// Spawn a projectile at `origin` travelling along `aim` at muzzle speed.
    pub fn fire(&mut self, world: &mut World, origin: Vec3, aim: Vec3) -> (Entity, Vec3) {
        let velocity = aim.normalize_or_zero() * self.muzzle_speed;
        let seq = SpawnSeq(self.next_seq);
        self.next_seq += 1;
        let entity = world.spawn((
            Transform::from_position(origin),
            Velocity::new(velocity),
            Lifetime::new(self.lifetime),
            seq,
            Projectile,
        ));
        (entity, velocity)
    }

    /// Advance projectiles, test them against `targets`, and mark spent ones retired.
    ///
    /// Projectiles are resolved in spawn order and `targets` are expected in
    /// spawn order too, so the earliest projectile claims an enemy and each
    /// projectile credits at most the earliest enemy within the hit radius.
    /// An enemy can only be claimed once per update.
    pub fn update(&mut self, world: &mut World, targets: &[Target], dt: f32) -> ProjectileReport {
        let mut flying: Vec<(SpawnSeq, Entity, Vec3, bool)> = Vec::new();
        for (entity, (transform, velocity, lifetime, seq, _, retired)) in world.query_mut::<(
            &mut Transform,
            &Velocity,
            &mut Lifetime,
            &SpawnSeq,
            &Projectile,
            Option<&Retired>,
        )>() {
            if retired.is_some() {
                continue;
            }
            transform.position += velocity.linear * dt;
            let timed_out = lifetime.update(dt);
            flying.push((*seq, entity, transform.position, timed_out));
        }
        flying.sort_by_key(|(seq, ..)| *seq);

        let mut report = ProjectileReport::default();
        let mut claimed: HashSet<Entity> = HashSet::new();
        for (_, projectile, position, timed_out) in flying {
            let hit = targets.iter().find(|t| {
                !claimed.contains(&t.entity) && t.position.distance(position) < self.hit_radius
            });
            if let Some(target) = hit {
                claimed.insert(target.entity);
                report.hits.push(Hit {
                    projectile,
                    enemy: target.entity,
                    position,
                });
            } else if timed_out || position.length() > self.max_range {
                report.expired.push(projectile);
            }
        }

        for entity in report.hits.iter().map(|h| h.projectile).chain(report.expired.iter().copied()) {
            world.insert_one(entity, Retired).ok();
        }
        report
    }

    /// Number of projectiles still in flight.
    pub fn live_count(&self, world: &World) -> usize {
        world
            .query::<(&Projectile, Option<&Retired>)>()
            .iter()
            .filter(|(_, (_, retired))| retired.is_none())
            .count()
    }
}

//! Enemy respawn and population upkeep.
//!
//! A hit enemy is either moved to a fresh random spot (the same entity keeps
//! hunting) or retired, with the population topped back up to a target count
//! at the end of the tick.

use engine_core::{Retired, Transform, Vec3};
use hecs::{Entity, World};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::enemy::{EnemyBehavior, EnemySet};

/// What happens to an enemy after it has been hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RespawnPolicy {
    /// Move it to a uniform random point in the square `±half_extent` on X/Z.
    RepositionInBox { half_extent: f32, height: f32 },
    /// Move it to a random point on a circle of `radius` around the origin.
    RepositionOnRing { radius: f32, height: f32 },
    /// Remove it, then spawn new enemies on the ring while fewer than
    /// `target_count` remain.
    Replenish {
        target_count: usize,
        radius: f32,
        height: f32,
    },
}

impl Default for RespawnPolicy {
    fn default() -> Self {
        RespawnPolicy::RepositionInBox {
            half_extent: 50.0,
            height: 2.5,
        }
    }
}

impl RespawnPolicy {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let (field, value, height) = match *self {
            RespawnPolicy::RepositionInBox { half_extent, height } => ("respawn.half_extent", half_extent, height),
            RespawnPolicy::RepositionOnRing { radius, height } => ("respawn.radius", radius, height),
            RespawnPolicy::Replenish { radius, height, .. } => ("respawn.radius", radius, height),
        };
        if !height.is_finite() {
            return Err(ConfigError::Invalid {
                field: "respawn.height",
                expected: "finite",
                value: height,
            });
        }
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Invalid {
                field,
                expected: "finite and >= 0",
                value,
            });
        }
        Ok(())
    }
}

/// Outcome of handing a hit enemy to the spawner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    Repositioned(Vec3),
    Removed,
}

/// Places enemies after hits and keeps the population topped up.
pub struct EnemySpawner {
    pub policy: RespawnPolicy,
    rng: StdRng,
}

impl EnemySpawner {
    /// Create a spawner. A seed makes every respawn position reproducible.
    pub fn new(policy: RespawnPolicy, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { policy, rng }
    }

    /// Apply the policy to an enemy that was just hit.
    pub fn on_enemy_hit(&mut self, world: &mut World, enemy: Entity) -> HitOutcome {
        let outcome = match self.policy {
            RespawnPolicy::RepositionInBox { half_extent, height } => {
                HitOutcome::Repositioned(self.point_in_box(half_extent, height))
            }
            RespawnPolicy::RepositionOnRing { radius, height } => {
                HitOutcome::Repositioned(self.point_on_ring(radius, height))
            }
            RespawnPolicy::Replenish { .. } => HitOutcome::Removed,
        };

        match outcome {
            HitOutcome::Repositioned(position) => {
                if let Ok(mut transform) = world.get::<&mut Transform>(enemy) {
                    transform.position = position;
                }
            }
            HitOutcome::Removed => {
                world.insert_one(enemy, Retired).ok();
            }
        }
        outcome
    }

    /// Spawn enemies until the target count is met. Only the `Replenish`
    /// policy has a target; the others keep a fixed population.
    pub fn replenish(
        &mut self,
        world: &mut World,
        enemies: &mut EnemySet,
        behavior: EnemyBehavior,
    ) -> Vec<(Entity, Vec3)> {
        let RespawnPolicy::Replenish {
            target_count,
            radius,
            height,
        } = self.policy
        else {
            return Vec::new();
        };

        let live = enemies.live_count(world);
        (live..target_count)
            .map(|_| {
                let position = self.point_on_ring(radius, height);
                (enemies.spawn(world, position, behavior), position)
            })
            .collect()
    }

    fn point_in_box(&mut self, half_extent: f32, height: f32) -> Vec3 {
        if half_extent <= 0.0 {
            return Vec3::new(0.0, height, 0.0);
        }
        Vec3::new(
            self.rng.gen_range(-half_extent..=half_extent),
            height,
            self.rng.gen_range(-half_extent..=half_extent),
        )
    }

    fn point_on_ring(&mut self, radius: f32, height: f32) -> Vec3 {
        let angle = self.rng.gen::<f32>() * std::f32::consts::TAU;
        Vec3::new(angle.cos() * radius, height, angle.sin() * radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHASE: EnemyBehavior = EnemyBehavior::Chase { speed: 1.0 };

    #[test]
    fn box_policy_moves_the_same_enemy_inside_the_box() {
        let mut world = World::new();
        let mut set = EnemySet::new();
        let enemy = set.spawn(&mut world, Vec3::new(30.0, 2.5, -30.0), CHASE);
        let mut spawner = EnemySpawner::new(RespawnPolicy::default(), Some(1));

        for _ in 0..50 {
            let HitOutcome::Repositioned(p) = spawner.on_enemy_hit(&mut world, enemy) else {
                panic!("box policy must reposition");
            };
            assert!(p.x.abs() <= 50.0 && p.z.abs() <= 50.0);
            assert_eq!(p.y, 2.5);
            assert_eq!(world.get::<&Transform>(enemy).unwrap().position, p);
        }
        assert_eq!(set.live_count(&world), 1);
    }

    #[test]
    fn ring_policy_keeps_fixed_radius() {
        let mut world = World::new();
        let mut set = EnemySet::new();
        let enemy = set.spawn(&mut world, Vec3::ZERO, CHASE);
        let mut spawner = EnemySpawner::new(
            RespawnPolicy::RepositionOnRing {
                radius: 25.0,
                height: 1.0,
            },
            Some(9),
        );
        let HitOutcome::Repositioned(p) = spawner.on_enemy_hit(&mut world, enemy) else {
            panic!("ring policy must reposition");
        };
        assert!((Vec3::new(p.x, 0.0, p.z).length() - 25.0).abs() < 1e-3);
    }

    #[test]
    fn replenish_retires_then_tops_up() {
        let mut world = World::new();
        let mut set = EnemySet::new();
        let policy = RespawnPolicy::Replenish {
            target_count: 3,
            radius: 20.0,
            height: 2.5,
        };
        let mut spawner = EnemySpawner::new(policy, Some(3));
        let first = set.spawn(&mut world, Vec3::ZERO, CHASE);

        assert_eq!(spawner.on_enemy_hit(&mut world, first), HitOutcome::Removed);
        assert_eq!(set.live_count(&world), 0);

        let spawned = spawner.replenish(&mut world, &mut set, CHASE);
        assert_eq!(spawned.len(), 3);
        assert_eq!(set.live_count(&world), 3);
        assert!(spawner.replenish(&mut world, &mut set, CHASE).is_empty());
    }

    #[test]
    fn same_seed_same_positions() {
        let mut a = EnemySpawner::new(RespawnPolicy::default(), Some(42));
        let mut b = EnemySpawner::new(RespawnPolicy::default(), Some(42));
        for _ in 0..10 {
            assert_eq!(a.point_in_box(50.0, 2.5), b.point_in_box(50.0, 2.5));
        }
    }
}

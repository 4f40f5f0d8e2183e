//! Enemy targets and their movement behaviours.

use engine_core::{Retired, SpawnSeq, Transform, Vec3};
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Which behaviour newly spawned enemies get.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorKind {
    /// Walk straight at the player.
    #[default]
    Chase,
    /// Sweep back and forth along the configured axis.
    Patrol,
}

/// World axis a patrol moves along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    fn component_mut(self, v: &mut Vec3) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
            Axis::Z => &mut v.z,
        }
    }
}

/// Per-enemy movement behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyBehavior {
    /// Move toward the player at `speed` units per second.
    Chase { speed: f32 },
    /// Move along `axis` at `speed`, turning around once past `±bound`.
    /// `direction` is +1 or -1.
    Patrol {
        axis: Axis,
        speed: f32,
        bound: f32,
        direction: f32,
    },
}

impl EnemyBehavior {
    /// Build the configured behaviour for a fresh enemy.
    pub fn from_config(config: &GameConfig) -> Self {
        match config.enemy_behavior {
            BehaviorKind::Chase => EnemyBehavior::Chase {
                speed: config.chase_speed,
            },
            BehaviorKind::Patrol => EnemyBehavior::Patrol {
                axis: config.patrol_axis,
                speed: config.patrol_speed,
                bound: config.patrol_bound,
                direction: 1.0,
            },
        }
    }

    /// Advance `position` by one step of length `dt`.
    pub fn advance(&mut self, position: &mut Vec3, player: Vec3, dt: f32) {
        match self {
            EnemyBehavior::Chase { speed } => {
                let to_player = player - *position;
                let distance = to_player.length();
                let dir = to_player.normalize_or_zero();
                // Never step past the player.
                let step = (*speed * dt).min(distance);
                *position += dir * step;
            }
            EnemyBehavior::Patrol {
                axis,
                speed,
                bound,
                direction,
            } => {
                let coord = axis.component_mut(position);
                if *coord > *bound {
                    *direction = -1.0;
                } else if *coord < -*bound {
                    *direction = 1.0;
                }
                *coord += *direction * *speed * dt;
            }
        }
    }
}

/// Enemy component.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub behavior: EnemyBehavior,
}

/// A live enemy as seen by hit detection.
#[derive(Debug, Clone, Copy)]
pub struct Target {
    pub entity: Entity,
    pub seq: SpawnSeq,
    pub position: Vec3,
}

/// Owns enemy spawning and per-tick movement.
#[derive(Debug, Default)]
pub struct EnemySet {
    next_seq: u64,
}

impl EnemySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an enemy into the world.
    pub fn spawn(&mut self, world: &mut World, position: Vec3, behavior: EnemyBehavior) -> Entity {
        let seq = SpawnSeq(self.next_seq);
        self.next_seq += 1;
        let entity = world.spawn((Transform::from_position(position), Enemy { behavior }, seq));
        log::debug!("Spawned enemy {:?} at {:?} ({:?})", entity, position, behavior);
        entity
    }

    /// Move every live enemy.
    pub fn update(&self, world: &mut World, player: Vec3, dt: f32) {
        for (_, (transform, enemy, retired)) in
            world.query_mut::<(&mut Transform, &mut Enemy, Option<&Retired>)>()
        {
            if retired.is_some() {
                continue;
            }
            enemy.behavior.advance(&mut transform.position, player, dt);
        }
    }

    /// Live enemies in spawn order.
    pub fn targets(&self, world: &World) -> Vec<Target> {
        let mut targets: Vec<Target> = world
            .query::<(&Transform, &SpawnSeq, Option<&Retired>)>()
            .with::<&Enemy>()
            .iter()
            .filter(|(_, (_, _, retired))| retired.is_none())
            .map(|(entity, (transform, seq, _))| Target {
                entity,
                seq: *seq,
                position: transform.position,
            })
            .collect();
        targets.sort_by_key(|t| t.seq);
        targets
    }

    /// Number of enemies not yet retired.
    pub fn live_count(&self, world: &World) -> usize {
        world
            .query::<(&Enemy, Option<&Retired>)>()
            .iter()
            .filter(|(_, (_, retired))| retired.is_none())
            .count()
    }
}

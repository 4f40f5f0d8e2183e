//! Gameplay events reported by each tick.

use engine_core::Vec3;
use hecs::Entity;

/// Something the host may want to react to (sound, effects, UI).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Fired {
        projectile: Entity,
        origin: Vec3,
        velocity: Vec3,
    },
    EnemyHit {
        projectile: Entity,
        enemy: Entity,
        position: Vec3,
        score: u32,
    },
    EnemyRepositioned {
        enemy: Entity,
        position: Vec3,
    },
    EnemyRemoved {
        enemy: Entity,
    },
    EnemySpawned {
        enemy: Entity,
        position: Vec3,
    },
    ProjectileExpired {
        projectile: Entity,
    },
    Landed {
        position: Vec3,
    },
    GameOver {
        final_score: u32,
    },
}

//! Gameplay tuning. Loaded from config.ron at startup.
//!
//! Every variant of the range (jumping or not, chasing or patrolling targets,
//! slow or fast rounds) is one set of values in this record.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::enemy::{Axis, BehaviorKind};
use crate::spawner::RespawnPolicy;

/// Errors raised while loading or validating a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config syntax: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("config field `{field}` must be {expected}, got {value}")]
    Invalid {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
}

/// Tuning for movement, weapons, targets and the round clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    // ── Movement ────────────────────────────────────────────────────────
    /// Horizontal velocity damping per second.
    #[serde(default = "default_damping")]
    pub damping: f32,
    /// Horizontal acceleration while a direction key is held (units/s²).
    #[serde(default = "default_acceleration")]
    pub acceleration: f32,
    /// Downward acceleration (units/s²). Zero disables falling and jumping arcs.
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    /// Vertical velocity added by a jump.
    #[serde(default = "default_jump_impulse")]
    pub jump_impulse: f32,
    /// Lowest eye height; the player is clamped here.
    #[serde(default = "default_floor_height")]
    pub floor_height: f32,
    /// Where the player rig starts.
    #[serde(default = "default_player_spawn")]
    pub player_spawn: Vec3,
    /// Radians of look rotation per unit of mouse delta.
    #[serde(default = "default_look_sensitivity")]
    pub look_sensitivity: f32,

    // ── Projectiles ─────────────────────────────────────────────────────
    /// Projectile speed along the aim direction (units/s).
    #[serde(default = "default_muzzle_speed")]
    pub muzzle_speed: f32,
    /// Seconds before an unspent projectile is retired.
    #[serde(default = "default_projectile_lifetime")]
    pub projectile_lifetime: f32,
    /// Distance from the world origin past which projectiles are retired.
    #[serde(default = "default_max_range")]
    pub max_range: f32,
    /// Projectile/enemy centre distance that counts as a hit.
    #[serde(default = "default_hit_radius")]
    pub hit_radius: f32,

    // ── Targets ─────────────────────────────────────────────────────────
    /// Behaviour given to every spawned enemy.
    #[serde(default)]
    pub enemy_behavior: BehaviorKind,
    /// Chase speed (units/s).
    #[serde(default = "default_chase_speed")]
    pub chase_speed: f32,
    /// Patrol speed (units/s).
    #[serde(default = "default_patrol_speed")]
    pub patrol_speed: f32,
    /// Patrol turns around past ±this coordinate.
    #[serde(default = "default_patrol_bound")]
    pub patrol_bound: f32,
    /// World axis patrolling enemies sweep along.
    #[serde(default)]
    pub patrol_axis: Axis,
    /// Enemies present when the round starts.
    #[serde(default = "default_enemy_spawns")]
    pub enemy_spawns: Vec<Vec3>,
    /// What happens to an enemy after it is hit.
    #[serde(default)]
    pub respawn: RespawnPolicy,

    // ── Round ───────────────────────────────────────────────────────────
    /// Countdown length in seconds. Zero disables the countdown.
    #[serde(default = "default_round_seconds")]
    pub round_seconds: u32,
    /// Fixed RNG seed for respawn positions. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_damping() -> f32 {
    10.0
}
fn default_acceleration() -> f32 {
    400.0
}
fn default_gravity() -> f32 {
    980.0
}
fn default_jump_impulse() -> f32 {
    350.0
}
fn default_floor_height() -> f32 {
    10.0
}
fn default_player_spawn() -> Vec3 {
    Vec3::new(0.0, 10.0, 50.0)
}
fn default_look_sensitivity() -> f32 {
    0.002
}
fn default_muzzle_speed() -> f32 {
    120.0
}
fn default_projectile_lifetime() -> f32 {
    10.0
}
fn default_max_range() -> f32 {
    500.0
}
fn default_hit_radius() -> f32 {
    3.0
}
fn default_chase_speed() -> f32 {
    3.0
}
fn default_patrol_speed() -> f32 {
    4.0
}
fn default_patrol_bound() -> f32 {
    8.0
}
fn default_enemy_spawns() -> Vec<Vec3> {
    vec![Vec3::new(30.0, 2.5, -30.0)]
}
fn default_round_seconds() -> u32 {
    60
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            acceleration: default_acceleration(),
            gravity: default_gravity(),
            jump_impulse: default_jump_impulse(),
            floor_height: default_floor_height(),
            player_spawn: default_player_spawn(),
            look_sensitivity: default_look_sensitivity(),
            muzzle_speed: default_muzzle_speed(),
            projectile_lifetime: default_projectile_lifetime(),
            max_range: default_max_range(),
            hit_radius: default_hit_radius(),
            enemy_behavior: BehaviorKind::default(),
            chase_speed: default_chase_speed(),
            patrol_speed: default_patrol_speed(),
            patrol_bound: default_patrol_bound(),
            patrol_axis: Axis::default(),
            enemy_spawns: default_enemy_spawns(),
            respawn: RespawnPolicy::default(),
            round_seconds: default_round_seconds(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            log::info!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&data)
    }

    /// Parse and validate RON text. Missing fields take their defaults.
    pub fn from_ron(data: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Pretty RON text for this config.
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Reject tuning values that would break the simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("damping", self.damping),
            ("acceleration", self.acceleration),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("look_sensitivity", self.look_sensitivity),
            ("muzzle_speed", self.muzzle_speed),
            ("chase_speed", self.chase_speed),
            ("patrol_speed", self.patrol_speed),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    expected: "finite and >= 0",
                    value,
                });
            }
        }

        let positive = [
            ("projectile_lifetime", self.projectile_lifetime),
            ("max_range", self.max_range),
            ("hit_radius", self.hit_radius),
            ("patrol_bound", self.patrol_bound),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    expected: "finite and > 0",
                    value,
                });
            }
        }

        if !self.floor_height.is_finite() {
            return Err(ConfigError::Invalid {
                field: "floor_height",
                expected: "finite",
                value: self.floor_height,
            });
        }

        self.respawn.validate()
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_ron() {
        let text = GameConfig::default().to_ron().unwrap();
        let back = GameConfig::from_ron(&text).unwrap();
        assert_eq!(back.muzzle_speed, 120.0);
        assert_eq!(back.enemy_spawns, vec![Vec3::new(30.0, 2.5, -30.0)]);
        assert_eq!(back.respawn, RespawnPolicy::default());
        assert_eq!(back.seed, None);
    }

    #[test]
    fn default_speeds_are_per_second() {
        let config = GameConfig::default();
        assert_eq!(config.muzzle_speed, 120.0);
        assert_eq!(config.chase_speed, 3.0);
        assert_eq!(config.patrol_axis, Axis::X);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config = GameConfig::from_ron("(muzzle_speed: 20.0, gravity: 0.0, seed: Some(7))").unwrap();
        assert_eq!(config.muzzle_speed, 20.0);
        assert_eq!(config.gravity, 0.0);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.damping, 10.0);
        assert_eq!(config.round_seconds, 60);
    }

    #[test]
    fn behaviour_and_policy_parse_by_name() {
        let config = GameConfig::from_ron(
            "(enemy_behavior: Patrol, respawn: Replenish(target_count: 4, radius: 40.0, height: 2.5))",
        )
        .unwrap();
        assert_eq!(config.enemy_behavior, BehaviorKind::Patrol);
        assert_eq!(
            config.respawn,
            RespawnPolicy::Replenish {
                target_count: 4,
                radius: 40.0,
                height: 2.5
            }
        );
    }

    #[test]
    fn patrol_axis_parses_by_name() {
        let config = GameConfig::from_ron("(enemy_behavior: Patrol, patrol_axis: Z)").unwrap();
        assert_eq!(config.patrol_axis, Axis::Z);
    }

    #[test]
    fn non_finite_respawn_height_is_rejected() {
        let mut config = GameConfig::default();
        config.respawn = RespawnPolicy::RepositionInBox {
            half_extent: 50.0,
            height: f32::NAN,
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "respawn.height", .. }));

        config.respawn = RespawnPolicy::Replenish {
            target_count: 2,
            radius: 10.0,
            height: f32::INFINITY,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_values_are_rejected() {
        let err = GameConfig::from_ron("(acceleration: -1.0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "acceleration", .. }));

        let err = GameConfig::from_ron("(hit_radius: 0.0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "hit_radius", .. }));
    }

    #[test]
    fn syntax_errors_surface_as_parse() {
        let err = GameConfig::from_ron("(damping: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::load_from(Path::new("/definitely/not/here/config.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

//! Target Range gameplay core.
//!
//! A first-person shooting gallery: damped WASD movement on a yaw/pitch rig,
//! projectiles fired along the aim, chasing or patrolling targets, and a
//! round countdown. Rendering and platform input live with the host; see
//! [`host`] for the seams and [`state::GameState`] for the frame driver.

pub mod clock;
pub mod config;
pub mod enemy;
pub mod events;
pub mod host;
pub mod player;
pub mod projectile;
pub mod spawner;
pub mod state;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, GameConfig};
pub use events::GameEvent;
pub use host::{FrameView, Headless, HudSurface, RenderSurface};
pub use state::{GamePhase, GameState};

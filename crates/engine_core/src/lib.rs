//! Core engine types and utilities for Target Range.
//!
//! This crate provides the foundational types used across the gameplay core:
//! - Transform and spatial components
//! - Frame timing and fixed-period intervals
//! - The first-person yaw/pitch look rig

pub mod components;
pub mod rig;
pub mod time;
pub mod transform;

pub use components::*;
pub use rig::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec2, Vec3};
pub use hecs::{Entity, World};

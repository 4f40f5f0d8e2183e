//! Player controller: damped WASD movement, gravity, jumping and ground clamp.

use engine_core::{LookRig, Vec3};
use input::InputSnapshot;

use crate::config::GameConfig;

/// Player controller handling movement and the look rig.
///
/// Horizontal velocity is kept in the rig's local frame (`x` right, `z`
/// forward) and applied through the rig's relative moves, so it always follows
/// the current facing. `y` is world vertical.
pub struct PlayerController {
    pub rig: LookRig,
    pub velocity: Vec3,
    pub is_grounded: bool,
    pub damping: f32,
    pub acceleration: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub floor_height: f32,
}

impl PlayerController {
    pub fn new(config: &GameConfig) -> Self {
        let mut rig = LookRig::new(config.player_spawn);
        rig.sensitivity = config.look_sensitivity;
        Self {
            rig,
            velocity: Vec3::ZERO,
            is_grounded: config.player_spawn.y <= config.floor_height,
            damping: config.damping,
            acceleration: config.acceleration,
            gravity: config.gravity,
            jump_impulse: config.jump_impulse,
            floor_height: config.floor_height,
        }
    }

    /// Advance one tick. Returns true if the player landed this tick.
    pub fn update(&mut self, input: &InputSnapshot, dt: f32) -> bool {
        // Mouse look
        if input.look_delta != glam::Vec2::ZERO {
            self.rig.process_mouse(input.look_delta.x, input.look_delta.y);
        }

        if input.jump && self.is_grounded {
            self.velocity.y += self.jump_impulse;
            self.is_grounded = false;
        }

        let damp = (1.0 - self.damping * dt).max(0.0);
        self.velocity.x *= damp;
        self.velocity.z *= damp;
        self.velocity.y -= self.gravity * dt;

        // Normalized so diagonals are no faster than straight lines.
        let dir = input.movement_axes().normalize_or_zero();
        self.velocity.x += dir.x * self.acceleration * dt;
        self.velocity.z += dir.y * self.acceleration * dt;

        self.rig.move_right(self.velocity.x * dt);
        self.rig.move_forward(self.velocity.z * dt);
        self.rig.transform.position.y += self.velocity.y * dt;

        // Ground clamp
        let mut landed = false;
        if self.rig.transform.position.y < self.floor_height {
            self.velocity.y = 0.0;
            self.rig.transform.position.y = self.floor_height;
            landed = !self.is_grounded;
            self.is_grounded = true;
        }
        landed
    }

    /// Get player position.
    pub fn position(&self) -> Vec3 {
        self.rig.position()
    }

    /// Horizontal speed in the rig's local frame.
    pub fn horizontal_speed(&self) -> f32 {
        glam::Vec2::new(self.velocity.x, self.velocity.z).length()
    }
}

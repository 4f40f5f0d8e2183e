//! First-person yaw/pitch look rig.
//!
//! The rig holds the eye position plus two rotations applied in order: yaw
//! around world up, then pitch around the yawed right axis. Relative moves
//! (`move_forward`, `move_right`) only use the yaw, so looking up or down
//! never changes walking speed.

use glam::{Quat, Vec3};

use crate::Transform;

/// Pitch stays just short of straight up/down to keep the basis well defined.
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Camera rig driven by mouse look and relative movement.
#[derive(Debug, Clone)]
pub struct LookRig {
    /// Rig transform (eye position and combined rotation).
    pub transform: Transform,
    /// Radians of rotation per unit of mouse delta.
    pub sensitivity: f32,
    /// Current pitch (up/down rotation) in radians.
    pitch: f32,
    /// Current yaw (left/right rotation) in radians.
    yaw: f32,
}

impl Default for LookRig {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            sensitivity: 0.002,
            pitch: 0.0,
            yaw: 0.0,
        }
    }
}

impl LookRig {
    /// Create a new rig at the given position, looking down -Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
            ..Default::default()
        }
    }

    /// Apply a relative mouse delta (positive x turns right, positive y looks down).
    pub fn process_mouse(&mut self, delta_x: f32, delta_y: f32) {
        let yaw = self.yaw - delta_x * self.sensitivity;
        let pitch = self.pitch - delta_y * self.sensitivity;
        self.set_yaw_pitch(yaw, pitch);
    }

    /// Set yaw and pitch directly (in radians) and rebuild rotation.
    pub fn set_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
        self.transform.rotation = Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch);
    }

    /// Aim the rig at a world-space point. No-op if the point is the eye position.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.transform.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        let pitch = dir.y.clamp(-1.0, 1.0).asin();
        let yaw = (-dir.x).atan2(-dir.z);
        self.set_yaw_pitch(yaw, pitch);
    }

    /// Horizontal forward direction (yaw only).
    pub fn forward_flat(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::NEG_Z
    }

    /// Horizontal right direction (yaw only).
    pub fn right_flat(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::X
    }

    /// Move along the horizontal forward direction. Negative distances move back.
    pub fn move_forward(&mut self, distance: f32) {
        let step = self.forward_flat() * distance;
        self.transform.translate(step);
    }

    /// Move along the horizontal right direction. Negative distances move left.
    pub fn move_right(&mut self, distance: f32) {
        let step = self.right_flat() * distance;
        self.transform.translate(step);
    }

    /// Full aim direction including pitch (unit length).
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    /// Get rig position.
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Get current yaw in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Get current pitch in radians.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn move_forward_follows_yaw() {
        let mut rig = LookRig::new(Vec3::ZERO);
        rig.move_forward(2.0);
        assert!(approx(rig.position(), Vec3::new(0.0, 0.0, -2.0)));

        // Quarter turn left: forward becomes -X.
        rig.set_yaw_pitch(std::f32::consts::FRAC_PI_2, 0.0);
        rig.move_forward(1.0);
        assert!(approx(rig.position(), Vec3::new(-1.0, 0.0, -2.0)));
    }

    #[test]
    fn move_right_is_perpendicular_to_forward() {
        let mut rig = LookRig::new(Vec3::ZERO);
        rig.set_yaw_pitch(0.7, 0.0);
        assert!(rig.forward_flat().dot(rig.right_flat()).abs() < 1e-6);
        rig.move_right(3.0);
        assert!((rig.position().length() - 3.0).abs() < 1e-4);
        assert_eq!(rig.position().y, 0.0);
    }

    #[test]
    fn pitch_does_not_affect_walking() {
        let mut rig = LookRig::new(Vec3::ZERO);
        rig.set_yaw_pitch(0.0, 1.2);
        rig.move_forward(1.0);
        assert!(approx(rig.position(), Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut rig = LookRig::new(Vec3::ZERO);
        rig.process_mouse(0.0, -100_000.0);
        assert!(rig.pitch() <= MAX_PITCH);
        assert!(rig.forward().y < 1.0);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut rig = LookRig::new(Vec3::ZERO);
        let target = Vec3::new(30.0, 2.5, -30.0);
        rig.look_at(target);
        assert!(approx(rig.forward(), target.normalize()));
    }
}

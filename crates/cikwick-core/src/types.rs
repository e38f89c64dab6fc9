//! Core types used throughout CikWick

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and rotation of a reference frame (camera, orientation pivot, ...)
///
/// Local axes follow the right-handed convention: forward is -Z, right is +X,
/// up is +Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Get the forward direction (negative Z in local space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X in local space)
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction (positive Y in local space)
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Rotate by the given quaternion
    pub fn rotate(&mut self, rotation: Quat) {
        self.rotation = rotation * self.rotation;
    }

    /// Look at a target position. Does nothing if the target coincides with
    /// the position or lies straight along `up`.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = (target - self.position).normalize_or_zero();
        let right = forward.cross(up).normalize_or_zero();
        if forward == Vec3::ZERO || right == Vec3::ZERO {
            return;
        }
        let up = right.cross(forward);

        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_axes() {
        let transform = Transform::default();
        assert_eq!(transform.forward(), Vec3::NEG_Z);
        assert_eq!(transform.right(), Vec3::X);
        assert_eq!(transform.up(), Vec3::Y);
    }

    #[test]
    fn test_look_at() {
        let mut transform = Transform::from_position(Vec3::new(0.0, 0.0, -5.0));
        transform.look_at(Vec3::ZERO, Vec3::Y);

        assert!(approx(transform.forward(), Vec3::Z));
        assert!(approx(transform.right(), Vec3::NEG_X));
        assert!(approx(transform.up(), Vec3::Y));
    }

    #[test]
    fn test_look_at_degenerate_keeps_rotation() {
        let mut transform = Transform::from_position(Vec3::ZERO);
        transform.look_at(Vec3::new(0.0, 3.0, 0.0), Vec3::Y);
        assert_eq!(transform.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_rotate_yaw() {
        let mut transform = Transform::default();
        transform.rotate(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(approx(transform.forward(), Vec3::NEG_X));
    }
}

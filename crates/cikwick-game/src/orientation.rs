//! Ground-relative movement basis
//!
//! The player moves relative to an orientation reference that is separate
//! from its own body, typically the camera yaw. A camera script owns the
//! reference and updates it through an [`OrientationHandle`]; the controller
//! reads it every fixed step.

use std::sync::Arc;

use cikwick_core::Transform;
use glam::Vec3;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Forward/right axes defining the horizontal movement basis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub forward: Vec3,
    pub right: Vec3,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::from_transform(&Transform::default())
    }
}

impl Orientation {
    pub const fn new(forward: Vec3, right: Vec3) -> Self {
        Self { forward, right }
    }

    /// Use the forward/right axes of a transform
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            forward: transform.forward(),
            right: transform.right(),
        }
    }

    /// Face from `eye` towards `target`, ignoring the height difference.
    ///
    /// Returns `None` when the eye is straight above or below the target.
    pub fn looking_from(eye: Vec3, target: Vec3) -> Option<Self> {
        let forward = Vec3::new(target.x - eye.x, 0.0, target.z - eye.z).try_normalize()?;
        Some(Self {
            forward,
            right: forward.cross(Vec3::Y),
        })
    }

    /// Linear combination `forward * vertical + right * horizontal`, not normalized
    pub fn project(&self, horizontal: f32, vertical: f32) -> Vec3 {
        self.forward * vertical + self.right * horizontal
    }
}

/// Shared, writable reference to an [`Orientation`]
#[derive(Debug, Clone, Default)]
pub struct OrientationHandle(Arc<RwLock<Orientation>>);

impl OrientationHandle {
    pub fn new(orientation: Orientation) -> Self {
        Self(Arc::new(RwLock::new(orientation)))
    }

    /// Current orientation
    pub fn get(&self) -> Orientation {
        *self.0.read()
    }

    pub fn set(&self, orientation: Orientation) {
        *self.0.write() = orientation;
    }

    /// Point the reference from `eye` towards `target`. Degenerate views leave
    /// it unchanged.
    pub fn follow(&self, eye: Vec3, target: Vec3) {
        if let Some(orientation) = Orientation::looking_from(eye, target) {
            self.set(orientation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_is_linear_combination() {
        let orientation = Orientation::new(Vec3::Z, Vec3::X);
        assert_eq!(orientation.project(0.0, 1.0), Vec3::Z);
        assert_eq!(orientation.project(-1.0, 1.0), Vec3::new(-1.0, 0.0, 1.0));
        assert_eq!(orientation.project(0.0, 0.0), Vec3::ZERO);
    }

    #[test]
    fn test_looking_from_flattens() {
        let orientation =
            Orientation::looking_from(Vec3::new(0.0, 4.0, 5.0), Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert!((orientation.forward - Vec3::NEG_Z).length() < 1e-6);
        assert!((orientation.right - Vec3::X).length() < 1e-6);

        assert!(Orientation::looking_from(Vec3::new(1.0, 5.0, 1.0), Vec3::new(1.0, 0.0, 1.0)).is_none());
    }

    #[test]
    fn test_handle_shares_updates() {
        let handle = OrientationHandle::default();
        let reader = handle.clone();
        assert_eq!(reader.get().forward, Vec3::NEG_Z);

        handle.follow(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0));
        assert!((reader.get().forward - Vec3::X).length() < 1e-6);

        // Straight-down view keeps the last orientation
        handle.follow(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO);
        assert!((reader.get().forward - Vec3::X).length() < 1e-6);
    }
}

//! Horizontal speed cap

use cikwick_physics::{PhysicsBackend, PhysicsError, RigidBodyHandle};
use glam::Vec3;

/// Clamps the horizontal (x, z) speed of a body, leaving y untouched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityLimiter {
    max_speed: f32,
}

impl VelocityLimiter {
    /// Negative or NaN caps are treated as zero
    pub fn new(max_speed: f32) -> Self {
        Self {
            max_speed: max_speed.max(0.0),
        }
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// The capped velocity, or `None` if `velocity` is already within the cap
    pub fn limit(&self, velocity: Vec3) -> Option<Vec3> {
        let flat = Vec3::new(velocity.x, 0.0, velocity.z);
        if flat.length() <= self.max_speed {
            return None;
        }
        let capped = flat.normalize_or_zero() * self.max_speed;
        Some(Vec3::new(capped.x, velocity.y, capped.z))
    }

    /// Cap the body's velocity. Returns whether it had to be rescaled.
    pub fn apply<P>(&self, physics: &mut P, body: RigidBodyHandle) -> Result<bool, PhysicsError>
    where
        P: PhysicsBackend + ?Sized,
    {
        let velocity = physics.velocity(body)?;
        match self.limit(velocity) {
            Some(capped) => {
                physics.set_velocity(body, capped)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

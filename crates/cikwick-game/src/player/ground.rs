//! Ground contact check

use cikwick_physics::{LayerMask, PhysicsBackend, PhysicsError, RigidBodyHandle};
use glam::Vec3;

use super::MovementConfig;

/// Casts a ray straight down from the body center to see if it stands on ground
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    pub body_height: f32,
    pub clearance: f32,
    pub layers: LayerMask,
}

impl GroundProbe {
    pub fn from_config(config: &MovementConfig) -> Self {
        Self {
            body_height: config.body_height,
            clearance: config.ground_clearance,
            layers: config.ground_layers,
        }
    }

    /// Ray length: half the body height plus the clearance margin
    pub fn max_distance(&self) -> f32 {
        self.body_height * 0.5 + self.clearance
    }

    /// Whether ground on the probed layers lies within reach below the body.
    /// The body's own colliders are ignored.
    pub fn is_grounded<P>(&self, physics: &P, body: RigidBodyHandle) -> Result<bool, PhysicsError>
    where
        P: PhysicsBackend + ?Sized,
    {
        let origin = physics.position(body)?;
        Ok(physics.raycast(
            origin,
            Vec3::NEG_Y,
            self.max_distance(),
            self.layers,
            Some(body),
        ))
    }
}

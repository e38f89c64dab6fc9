//! Mode-dependent linear drag

use cikwick_physics::{PhysicsBackend, PhysicsError, RigidBodyHandle};

use super::{MovementConfig, MovementMode};

/// Picks between the ground and slide drag. Switches are instantaneous.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocomotionDrag {
    pub ground_drag: f32,
    pub slide_drag: f32,
}

impl LocomotionDrag {
    pub fn from_config(config: &MovementConfig) -> Self {
        Self {
            ground_drag: config.ground_drag,
            slide_drag: config.slide_drag,
        }
    }

    pub fn coefficient(&self, mode: MovementMode) -> f32 {
        match mode {
            MovementMode::Walking => self.ground_drag,
            MovementMode::Sliding => self.slide_drag,
        }
    }

    /// Set the body's drag for `mode`, returning the coefficient applied
    pub fn apply<P>(
        &self,
        physics: &mut P,
        body: RigidBodyHandle,
        mode: MovementMode,
    ) -> Result<f32, PhysicsError>
    where
        P: PhysicsBackend + ?Sized,
    {
        let drag = self.coefficient(mode);
        physics.set_drag(body, drag)?;
        Ok(drag)
    }
}

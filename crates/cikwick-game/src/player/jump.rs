//! Jump gating, impulse and the jump gravity window

use cikwick_physics::{ForceMode, PhysicsBackend, PhysicsError, RigidBodyHandle};
use tracing::debug;

use super::MovementConfig;

/// Which vertical gravity the body is currently under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityMode {
    Normal,
    Jumping,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum JumpState {
    Ready,
    /// Jumped; ready again once the clock reaches `ready_at`
    Cooling { ready_at: f64 },
}

/// Two-state jump machine: Ready, then Cooling for `cooldown` seconds after a jump.
///
/// While cooling the body falls under the jump gravity; expiry restores the
/// normal gravity. Times are seconds on a monotonic clock supplied by the caller.
#[derive(Debug, Clone)]
pub struct JumpController {
    state: JumpState,
    pub jump_force: f32,
    pub cooldown: f64,
    pub normal_gravity_y: f32,
    pub jump_gravity_y: f32,
}

impl JumpController {
    pub fn from_config(config: &MovementConfig) -> Self {
        Self {
            state: JumpState::Ready,
            jump_force: config.jump_force,
            cooldown: config.jump_cooldown as f64,
            normal_gravity_y: config.normal_gravity_y,
            jump_gravity_y: config.jump_gravity_y,
        }
    }

    pub fn can_jump(&self) -> bool {
        self.state == JumpState::Ready
    }

    pub fn gravity_mode(&self) -> GravityMode {
        match self.state {
            JumpState::Ready => GravityMode::Normal,
            JumpState::Cooling { .. } => GravityMode::Jumping,
        }
    }

    /// When the current cooldown ends, if one is running
    pub fn ready_at(&self) -> Option<f64> {
        match self.state {
            JumpState::Ready => None,
            JumpState::Cooling { ready_at } => Some(ready_at),
        }
    }

    /// Jump if allowed. Returns `false` without touching the body when the
    /// cooldown is running or the body is not grounded.
    pub fn try_jump<P>(
        &mut self,
        physics: &mut P,
        body: RigidBodyHandle,
        grounded: bool,
        now: f64,
    ) -> Result<bool, PhysicsError>
    where
        P: PhysicsBackend + ?Sized,
    {
        if !self.can_jump() || !grounded {
            return Ok(false);
        }

        // Residual downward speed would eat into the jump height
        let velocity = physics.velocity(body)?;
        physics.set_velocity(body, velocity.with_y(0.0))?;
        physics.set_body_gravity(body, self.jump_gravity_y)?;

        let up = physics.up_axis(body)?;
        physics.apply_force(body, up * self.jump_force, ForceMode::Impulse)?;

        let ready_at = now + self.cooldown;
        self.state = JumpState::Cooling { ready_at };
        debug!(now, ready_at, "jump");
        Ok(true)
    }

    /// Expire the cooldown once `now` has reached it. Returns `true` on the
    /// tick the controller becomes ready again.
    pub fn tick<P>(
        &mut self,
        physics: &mut P,
        body: RigidBodyHandle,
        now: f64,
    ) -> Result<bool, PhysicsError>
    where
        P: PhysicsBackend + ?Sized,
    {
        let JumpState::Cooling { ready_at } = self.state else {
            return Ok(false);
        };
        if now < ready_at {
            return Ok(false);
        }

        physics.set_body_gravity(body, self.normal_gravity_y)?;
        self.state = JumpState::Ready;
        debug!(now, "jump cooldown expired");
        Ok(true)
    }
}

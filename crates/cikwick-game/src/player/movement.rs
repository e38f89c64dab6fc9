//! Movement configuration and constants

use cikwick_physics::LayerMask;
use serde::{Deserialize, Serialize};

use crate::input::KeyBindings;
use crate::LocomotionError;

use super::MovementMode;

/// Extra ray length below the body when probing for ground
pub const DEFAULT_GROUND_CLEARANCE: f32 = 0.2;

/// Movement configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Continuous force applied along the input direction, and the horizontal speed cap
    pub move_speed: f32,
    /// Impulse applied along the body's up axis when jumping
    pub jump_force: f32,
    /// Seconds after a jump before the next one is allowed
    pub jump_cooldown: f32,
    /// Force multiplier while sliding
    pub slide_multiplier: f32,
    /// Linear drag while walking
    pub ground_drag: f32,
    /// Linear drag while sliding
    pub slide_drag: f32,
    /// Vertical gravity acting on the body outside of a jump
    pub normal_gravity_y: f32,
    /// Vertical gravity during the jump cooldown, steeper for a snappier arc
    pub jump_gravity_y: f32,
    /// Layers that count as ground
    pub ground_layers: LayerMask,
    /// Full height of the body
    pub body_height: f32,
    /// Ray length beyond half the body height
    pub ground_clearance: f32,
    /// Key bindings for jump, slide and walk
    pub bindings: KeyBindings,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 20.0,
            jump_force: 8.0,
            jump_cooldown: 0.5,
            slide_multiplier: 2.0,
            ground_drag: 5.0,
            slide_drag: 3.0,
            normal_gravity_y: -9.81,
            jump_gravity_y: -20.0,
            ground_layers: LayerMask::GROUND,
            body_height: 2.0,
            ground_clearance: DEFAULT_GROUND_CLEARANCE,
            bindings: KeyBindings::default(),
        }
    }
}

impl MovementConfig {
    /// Magnitude of the movement force for a mode
    pub fn force_magnitude(&self, mode: MovementMode) -> f32 {
        match mode {
            MovementMode::Walking => self.move_speed,
            MovementMode::Sliding => self.move_speed * self.slide_multiplier,
        }
    }

    /// Reject values the controller cannot run with
    pub fn validate(&self) -> Result<(), LocomotionError> {
        positive("move_speed", self.move_speed)?;
        positive("body_height", self.body_height)?;
        non_negative("jump_force", self.jump_force)?;
        non_negative("jump_cooldown", self.jump_cooldown)?;
        non_negative("slide_multiplier", self.slide_multiplier)?;
        non_negative("ground_drag", self.ground_drag)?;
        non_negative("slide_drag", self.slide_drag)?;
        non_negative("ground_clearance", self.ground_clearance)?;
        finite("normal_gravity_y", self.normal_gravity_y)?;
        finite("jump_gravity_y", self.jump_gravity_y)?;
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), LocomotionError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LocomotionError::InvalidConfig {
            field,
            reason: "must be finite",
        })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), LocomotionError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(LocomotionError::InvalidConfig {
            field,
            reason: "must be greater than zero",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), LocomotionError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(LocomotionError::InvalidConfig {
            field,
            reason: "must not be negative",
        })
    }
}

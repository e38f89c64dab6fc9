//! CikWick Game - Character locomotion
//!
//! Provides the player movement controller, its input layer and the shared
//! orientation reference it moves relative to.

pub mod error;
pub mod input;
pub mod orientation;
pub mod player;

#[cfg(test)]
mod testing;

pub use error::LocomotionError;
pub use input::{InputAction, InputBindings, InputHandler, InputState, KeyBindings};
pub use orientation::{Orientation, OrientationHandle};
pub use player::{
    GravityMode, GroundProbe, JumpController, LocomotionDrag, MovementConfig, MovementMode,
    MovementState, PlayerController, PlayerControllerBuilder, VelocityLimiter,
};

//! Player locomotion
//!
//! A dynamic rigid body pushed around by continuous forces relative to a
//! ground orientation, with a cooldown-gated jump, a slide mode and a hard
//! horizontal speed cap.

mod controller;
mod drag;
mod ground;
mod jump;
mod limiter;
mod mode;
mod movement;

pub use controller::{PlayerController, PlayerControllerBuilder};
pub use drag::LocomotionDrag;
pub use ground::GroundProbe;
pub use jump::{GravityMode, JumpController};
pub use limiter::VelocityLimiter;
pub use mode::{MovementMode, MovementState};
pub use movement::{MovementConfig, DEFAULT_GROUND_CLEARANCE};

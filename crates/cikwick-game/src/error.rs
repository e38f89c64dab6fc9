use cikwick_physics::PhysicsError;

/// Errors raised while setting up or driving a player controller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocomotionError {
    #[error("player controller has no orientation reference")]
    MissingOrientation,

    #[error("player controller has no rigid body")]
    MissingBody,

    #[error("invalid movement config: `{field}` {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

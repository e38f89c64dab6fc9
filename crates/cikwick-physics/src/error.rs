use rapier3d::prelude::RigidBodyHandle;

/// Errors raised by the physics collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("rigid body {0:?} does not exist in the physics world")]
    BodyNotFound(RigidBodyHandle),
}

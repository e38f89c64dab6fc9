//! The rigid-body operations a locomotion controller is allowed to use
//!
//! [`PhysicsWorld`](crate::PhysicsWorld) implements this over rapier3d; tests
//! can substitute their own implementation.

use std::ops::BitOr;

use glam::Vec3;
use rapier3d::prelude::{Group, RigidBodyHandle};
use serde::{Deserialize, Serialize};

use crate::PhysicsError;

/// How a force vector is applied to a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceMode {
    /// Accumulated into acceleration over the next step, scaled by 1/mass
    Continuous,
    /// Instantaneous velocity change of `impulse / mass`
    Impulse,
}

/// Bit set of collision layers, 32 layers available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    /// Layer bodies are placed on unless told otherwise
    pub const DEFAULT: LayerMask = LayerMask(1 << 0);
    /// Walkable surfaces
    pub const GROUND: LayerMask = LayerMask(1 << 3);

    /// Mask containing only the given layer index (0..32)
    pub const fn layer(index: u32) -> Self {
        LayerMask(1 << (index & 31))
    }

    /// Check whether every layer of `other` is in this mask
    pub const fn contains(self, other: LayerMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether the masks share at least one layer
    pub const fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub(crate) fn group(self) -> Group {
        Group::from_bits_truncate(self.0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        LayerMask(self.0 | rhs.0)
    }
}

/// Rigid-body simulation as seen by a character controller
pub trait PhysicsBackend {
    /// Whether the body is (still) part of the simulation
    fn contains(&self, body: RigidBodyHandle) -> bool;

    /// World-space position of the body's center
    fn position(&self, body: RigidBodyHandle) -> Result<Vec3, PhysicsError>;

    /// The body's local up axis in world space
    fn up_axis(&self, body: RigidBodyHandle) -> Result<Vec3, PhysicsError>;

    fn velocity(&self, body: RigidBodyHandle) -> Result<Vec3, PhysicsError>;

    fn set_velocity(&mut self, body: RigidBodyHandle, velocity: Vec3) -> Result<(), PhysicsError>;

    fn apply_force(
        &mut self,
        body: RigidBodyHandle,
        force: Vec3,
        mode: ForceMode,
    ) -> Result<(), PhysicsError>;

    /// Set the linear drag coefficient
    fn set_drag(&mut self, body: RigidBodyHandle, drag: f32) -> Result<(), PhysicsError>;

    fn freeze_rotation(&mut self, body: RigidBodyHandle, frozen: bool) -> Result<(), PhysicsError>;

    /// World gravity applied to every body without an override
    fn gravity(&self) -> Vec3;

    fn set_gravity(&mut self, gravity: Vec3);

    /// Override the vertical gravitational acceleration of a single body
    fn set_body_gravity(&mut self, body: RigidBodyHandle, vertical: f32)
        -> Result<(), PhysicsError>;

    /// Cast a ray and report whether it hit anything on `layers`.
    /// Colliders attached to `exclude` are ignored.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
        exclude: Option<RigidBodyHandle>,
    ) -> bool;
}

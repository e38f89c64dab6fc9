//! Recording physics backend for unit tests

use std::cell::RefCell;

use cikwick_physics::{ForceMode, LayerMask, PhysicsBackend, PhysicsError, RigidBodyHandle};
use glam::Vec3;

/// A raycast issued against the backend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayQuery {
    pub origin: Vec3,
    pub direction: Vec3,
    pub max_distance: f32,
    pub layers: LayerMask,
    pub exclude: Option<RigidBodyHandle>,
}

/// Single-body backend that records every force and only "hits" ground when told to
#[derive(Debug)]
pub struct RecordingBackend {
    pub body: RigidBodyHandle,
    pub position: Vec3,
    pub velocity: Vec3,
    pub up: Vec3,
    pub mass: f32,
    pub drag: f32,
    pub frozen: bool,
    pub world_gravity: Vec3,
    pub body_gravity: f32,
    /// What raycasts report
    pub ground_below: bool,
    pub forces: Vec<(Vec3, ForceMode)>,
    pub rays: RefCell<Vec<RayQuery>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            body: RigidBodyHandle::from_raw_parts(0, 0),
            position: Vec3::new(0.0, 1.0, 0.0),
            velocity: Vec3::ZERO,
            up: Vec3::Y,
            mass: 1.0,
            drag: 0.0,
            frozen: false,
            world_gravity: Vec3::new(0.0, -9.81, 0.0),
            body_gravity: -9.81,
            ground_below: true,
            forces: Vec::new(),
            rays: RefCell::new(Vec::new()),
        }
    }

    pub fn impulses(&self) -> Vec<Vec3> {
        self.forces
            .iter()
            .filter(|(_, mode)| *mode == ForceMode::Impulse)
            .map(|(force, _)| *force)
            .collect()
    }

    pub fn continuous_forces(&self) -> Vec<Vec3> {
        self.forces
            .iter()
            .filter(|(_, mode)| *mode == ForceMode::Continuous)
            .map(|(force, _)| *force)
            .collect()
    }

    fn check(&self, body: RigidBodyHandle) -> Result<(), PhysicsError> {
        if body == self.body {
            Ok(())
        } else {
            Err(PhysicsError::BodyNotFound(body))
        }
    }
}

impl PhysicsBackend for RecordingBackend {
    fn contains(&self, body: RigidBodyHandle) -> bool {
        body == self.body
    }

    fn position(&self, body: RigidBodyHandle) -> Result<Vec3, PhysicsError> {
        self.check(body)?;
        Ok(self.position)
    }

    fn up_axis(&self, body: RigidBodyHandle) -> Result<Vec3, PhysicsError> {
        self.check(body)?;
        Ok(self.up)
    }

    fn velocity(&self, body: RigidBodyHandle) -> Result<Vec3, PhysicsError> {
        self.check(body)?;
        Ok(self.velocity)
    }

    fn set_velocity(&mut self, body: RigidBodyHandle, velocity: Vec3) -> Result<(), PhysicsError> {
        self.check(body)?;
        self.velocity = velocity;
        Ok(())
    }

    fn apply_force(
        &mut self,
        body: RigidBodyHandle,
        force: Vec3,
        mode: ForceMode,
    ) -> Result<(), PhysicsError> {
        self.check(body)?;
        if mode == ForceMode::Impulse {
            self.velocity += force / self.mass;
        }
        self.forces.push((force, mode));
        Ok(())
    }

    fn set_drag(&mut self, body: RigidBodyHandle, drag: f32) -> Result<(), PhysicsError> {
        self.check(body)?;
        self.drag = drag;
        Ok(())
    }

    fn freeze_rotation(&mut self, body: RigidBodyHandle, frozen: bool) -> Result<(), PhysicsError> {
        self.check(body)?;
        self.frozen = frozen;
        Ok(())
    }

    fn gravity(&self) -> Vec3 {
        self.world_gravity
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        self.world_gravity = gravity;
    }

    fn set_body_gravity(
        &mut self,
        body: RigidBodyHandle,
        vertical: f32,
    ) -> Result<(), PhysicsError> {
        self.check(body)?;
        self.body_gravity = vertical;
        Ok(())
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
        exclude: Option<RigidBodyHandle>,
    ) -> bool {
        self.rays.borrow_mut().push(RayQuery {
            origin,
            direction,
            max_distance,
            layers,
            exclude,
        });
        self.ground_below
    }
}

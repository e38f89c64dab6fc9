//! CikWick Physics - Rigid-body simulation using rapier3d
//!
//! Provides the physics world a character controller drives: dynamic bodies,
//! static level geometry, force/impulse application, per-body gravity and
//! layer-filtered raycasts.

mod backend;
mod error;

pub use backend::{ForceMode, LayerMask, PhysicsBackend};
pub use error::PhysicsError;
pub use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

use std::collections::HashMap;

use glam::Vec3;
use nalgebra::Unit;
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Physics world configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity vector (default: -9.81 on Y axis)
    pub gravity: Vec3,
    /// Physics timestep (default: 1/50)
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            timestep: 1.0 / 50.0,
        }
    }
}

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// The main physics world containing all simulation state
pub struct PhysicsWorld {
    /// Configuration
    pub config: PhysicsConfig,

    /// Rigid body storage
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Impulse joint storage
    pub impulse_joint_set: ImpulseJointSet,
    /// Multi-body joint storage
    pub multibody_joint_set: MultibodyJointSet,

    /// Integration parameters
    integration_parameters: IntegrationParameters,
    /// Physics pipeline
    physics_pipeline: PhysicsPipeline,
    /// Island manager
    island_manager: IslandManager,
    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,
    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,
    /// Continuous collision detection solver
    ccd_solver: CCDSolver,
    /// Query pipeline for raycasts
    query_pipeline: QueryPipeline,
    /// Bodies falling under their own vertical acceleration instead of the world's
    gravity_overrides: HashMap<RigidBodyHandle, f32>,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;

        Self {
            config,
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            gravity_overrides: HashMap::new(),
        }
    }

    /// Step the physics simulation by one fixed timestep.
    ///
    /// Continuous forces applied since the previous step are consumed here.
    pub fn step(&mut self) {
        let gravity = to_vector(self.config.gravity);

        // Overridden bodies have a zero gravity scale and get their own
        // vertical acceleration as a force; the horizontal world components still apply.
        for (&handle, &vertical) in &self.gravity_overrides {
            if let Some(body) = self.rigid_body_set.get_mut(handle) {
                let acceleration = vector![gravity.x, vertical, gravity.z];
                let force = acceleration * body.mass();
                body.add_force(force, true);
            }
        }

        self.physics_pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
        }

        self.update_queries();
    }

    /// Refresh the query pipeline so raycasts see newly inserted colliders
    pub fn update_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static collider (ground, walls, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.update_queries();
        handle
    }

    /// Add a dynamic rigid body with a collider
    pub fn add_dynamic_body(
        &mut self,
        rigid_body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let rb_handle = self.rigid_body_set.insert(rigid_body);
        let col_handle =
            self.collider_set
                .insert_with_parent(collider, rb_handle, &mut self.rigid_body_set);
        if let Some(body) = self.rigid_body_set.get_mut(rb_handle) {
            body.recompute_mass_properties_from_colliders(&self.collider_set);
        }
        self.update_queries();
        (rb_handle, col_handle)
    }

    /// Spawn an upright capsule body for a character.
    ///
    /// `position` is the capsule center; the collider is frictionless so the
    /// body slides along walls instead of sticking to them.
    pub fn create_character_body(
        &mut self,
        position: Vec3,
        height: f32,
        radius: f32,
        mass: f32,
        layers: LayerMask,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let half_height = (height - 2.0 * radius) / 2.0;
        let rigid_body = RigidBodyBuilder::dynamic()
            .translation(to_vector(position))
            .build();
        let collider = ColliderBuilder::capsule_y(half_height.max(0.01), radius)
            .mass(mass)
            .friction(0.0)
            .restitution(0.0)
            .collision_groups(InteractionGroups::new(layers.group(), Group::ALL))
            .build();

        let handles = self.add_dynamic_body(rigid_body, collider);
        debug!(?position, height, mass, "spawned character body");
        handles
    }

    /// Remove a rigid body and its colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
        self.gravity_overrides.remove(&handle);
        self.update_queries();
    }

    /// Get a rigid body by handle
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    fn body(&self, handle: RigidBodyHandle) -> Result<&RigidBody, PhysicsError> {
        self.rigid_body_set
            .get(handle)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    fn body_mut(&mut self, handle: RigidBodyHandle) -> Result<&mut RigidBody, PhysicsError> {
        self.rigid_body_set
            .get_mut(handle)
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Mass of a body, including its attached colliders
    pub fn mass(&self, handle: RigidBodyHandle) -> Result<f32, PhysicsError> {
        Ok(self.body(handle)?.mass())
    }

    /// Current linear drag of a body
    pub fn drag(&self, handle: RigidBodyHandle) -> Result<f32, PhysicsError> {
        Ok(self.body(handle)?.linear_damping())
    }

    pub fn angular_velocity(&self, handle: RigidBodyHandle) -> Result<Vec3, PhysicsError> {
        Ok(to_vec3(self.body(handle)?.angvel()))
    }

    /// Whether rotations of the body are locked
    pub fn is_rotation_frozen(&self, handle: RigidBodyHandle) -> Result<bool, PhysicsError> {
        Ok(self
            .body(handle)?
            .locked_axes()
            .contains(LockedAxes::ROTATION_LOCKED))
    }

    /// Vertical gravitational acceleration currently acting on a body
    pub fn body_gravity(&self, handle: RigidBodyHandle) -> Result<f32, PhysicsError> {
        let body = self.body(handle)?;
        Ok(match self.gravity_overrides.get(&handle) {
            Some(&vertical) => vertical,
            None => self.config.gravity.y * body.gravity_scale(),
        })
    }

    /// Cast a ray and return the first hit
    pub fn raycast_hit(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, f32)> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            to_vector(direction),
        );

        self.query_pipeline
            .cast_ray(&self.rigid_body_set, &self.collider_set, &ray, max_distance, true, filter)
    }

    /// Create a ground plane collider on the given layers
    pub fn create_ground(&mut self, y: f32, layers: LayerMask) -> ColliderHandle {
        let normal = Unit::new_normalize(vector![0.0, 1.0, 0.0]);
        let ground = ColliderBuilder::halfspace(normal)
            .translation(vector![0.0, y, 0.0])
            .friction(0.7)
            .restitution(0.0)
            .collision_groups(InteractionGroups::new(layers.group(), Group::ALL))
            .build();
        self.add_static_collider(ground)
    }

    /// Create a static box collider on the given layers
    pub fn create_static_box(
        &mut self,
        half_extents: Vec3,
        position: Vec3,
        layers: LayerMask,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(to_vector(position))
            .friction(0.7)
            .collision_groups(InteractionGroups::new(layers.group(), Group::ALL))
            .build();
        self.add_static_collider(collider)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsBackend for PhysicsWorld {
    fn contains(&self, body: RigidBodyHandle) -> bool {
        self.rigid_body_set.contains(body)
    }

    fn position(&self, body: RigidBodyHandle) -> Result<Vec3, PhysicsError> {
        Ok(to_vec3(self.body(body)?.translation()))
    }

    fn up_axis(&self, body: RigidBodyHandle) -> Result<Vec3, PhysicsError> {
        let up = self.body(body)?.rotation() * Vector::<Real>::y();
        Ok(to_vec3(&up))
    }

    fn velocity(&self, body: RigidBodyHandle) -> Result<Vec3, PhysicsError> {
        Ok(to_vec3(self.body(body)?.linvel()))
    }

    fn set_velocity(&mut self, body: RigidBodyHandle, velocity: Vec3) -> Result<(), PhysicsError> {
        self.body_mut(body)?.set_linvel(to_vector(velocity), true);
        Ok(())
    }

    fn apply_force(
        &mut self,
        body: RigidBodyHandle,
        force: Vec3,
        mode: ForceMode,
    ) -> Result<(), PhysicsError> {
        let rb = self.body_mut(body)?;
        match mode {
            ForceMode::Continuous => rb.add_force(to_vector(force), true),
            ForceMode::Impulse => rb.apply_impulse(to_vector(force), true),
        }
        Ok(())
    }

    fn set_drag(&mut self, body: RigidBodyHandle, drag: f32) -> Result<(), PhysicsError> {
        self.body_mut(body)?.set_linear_damping(drag);
        Ok(())
    }

    fn freeze_rotation(&mut self, body: RigidBodyHandle, frozen: bool) -> Result<(), PhysicsError> {
        self.body_mut(body)?.lock_rotations(frozen, true);
        Ok(())
    }

    fn gravity(&self) -> Vec3 {
        self.config.gravity
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        self.config.gravity = gravity;
    }

    /// Independent of the world gravity: changing that later leaves the
    /// override in place.
    fn set_body_gravity(
        &mut self,
        body: RigidBodyHandle,
        vertical: f32,
    ) -> Result<(), PhysicsError> {
        self.body_mut(body)?.set_gravity_scale(0.0, true);
        self.gravity_overrides.insert(body, vertical);
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
        let mut filter = QueryFilter::default()
            .groups(InteractionGroups::new(Group::ALL, layers.group()));
        if let Some(body) = exclude {
            filter = filter.exclude_rigid_body(body);
        }
        self.raycast_hit(origin, direction, max_distance, filter)
            .is_some()
    }
}

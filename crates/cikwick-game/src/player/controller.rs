//! Player controller driving a dynamic rigid body with forces

use cikwick_physics::{ForceMode, PhysicsBackend, RigidBodyHandle};
use glam::Vec3;
use tracing::{debug, info};

use crate::input::{InputAction, InputState};
use crate::orientation::OrientationHandle;
use crate::LocomotionError;

use super::{
    GravityMode, GroundProbe, JumpController, LocomotionDrag, MovementConfig, MovementMode,
    MovementState, VelocityLimiter,
};

/// Collects the mandatory pieces of a [`PlayerController`]
#[derive(Debug, Default)]
pub struct PlayerControllerBuilder {
    config: MovementConfig,
    body: Option<RigidBodyHandle>,
    orientation: Option<OrientationHandle>,
}

impl PlayerControllerBuilder {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The rigid body to drive
    pub fn body(mut self, body: RigidBodyHandle) -> Self {
        self.body = Some(body);
        self
    }

    /// The reference whose forward/right axes define the movement basis
    pub fn orientation(mut self, orientation: OrientationHandle) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Validate the setup and take control of the body: rotations are
    /// frozen, normal gravity and ground drag applied.
    pub fn build<P>(self, physics: &mut P) -> Result<PlayerController, LocomotionError>
    where
        P: PhysicsBackend + ?Sized,
    {
        self.config.validate()?;
        let body = self.body.ok_or(LocomotionError::MissingBody)?;
        let orientation = self.orientation.ok_or(LocomotionError::MissingOrientation)?;
        if !physics.contains(body) {
            return Err(cikwick_physics::PhysicsError::BodyNotFound(body).into());
        }

        let config = self.config;
        let drag = LocomotionDrag::from_config(&config);

        physics.freeze_rotation(body, true)?;
        physics.set_body_gravity(body, config.normal_gravity_y)?;
        drag.apply(physics, body, MovementMode::Walking)?;

        info!(move_speed = config.move_speed, "player controller ready");

        Ok(PlayerController {
            body,
            orientation,
            input: MovementState::default(),
            mode: MovementMode::Walking,
            movement_direction: Vec3::ZERO,
            grounded: false,
            probe: GroundProbe::from_config(&config),
            drag,
            limiter: VelocityLimiter::new(config.move_speed),
            jump: JumpController::from_config(&config),
            config,
        })
    }
}

/// Force-based character locomotion.
///
/// Call order per frame and per fixed step:
///
/// ```text
/// frame:       update(input, now)
/// fixed step:  fixed_update(now) -> physics.step() -> post_physics()
/// ```
///
/// `now` is monotonic time in seconds and drives the jump cooldown.
#[derive(Debug)]
pub struct PlayerController {
    config: MovementConfig,
    body: RigidBodyHandle,
    orientation: OrientationHandle,
    input: MovementState,
    mode: MovementMode,
    movement_direction: Vec3,
    /// Ground contact as of the last settled physics step
    grounded: bool,
    probe: GroundProbe,
    drag: LocomotionDrag,
    limiter: VelocityLimiter,
    jump: JumpController,
}

impl PlayerController {
    pub fn builder(config: MovementConfig) -> PlayerControllerBuilder {
        PlayerControllerBuilder::new(config)
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn orientation(&self) -> &OrientationHandle {
        &self.orientation
    }

    /// Axes sampled on the last frame
    pub fn movement_state(&self) -> MovementState {
        self.input
    }

    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    /// Un-normalized input direction computed on the last fixed step
    pub fn movement_direction(&self) -> Vec3 {
        self.movement_direction
    }

    pub fn can_jump(&self) -> bool {
        self.jump.can_jump()
    }

    pub fn gravity_mode(&self) -> GravityMode {
        self.jump.gravity_mode()
    }

    /// Ground contact recorded after the last physics step
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Probe the ground right now
    pub fn probe_ground<P>(&self, physics: &P) -> Result<bool, LocomotionError>
    where
        P: PhysicsBackend + ?Sized,
    {
        Ok(self.probe.is_grounded(physics, self.body)?)
    }

    /// Frame tick: sample axes, switch walk/slide, trigger jumps
    pub fn update<P>(
        &mut self,
        physics: &mut P,
        input: &InputState,
        now: f64,
    ) -> Result<(), LocomotionError>
    where
        P: PhysicsBackend + ?Sized,
    {
        self.jump.tick(physics, self.body, now)?;

        self.input = MovementState::from_axes(input.movement_axes());

        let mode = self.mode.next(
            input.is_just_pressed(InputAction::Slide),
            input.is_just_pressed(InputAction::Walk),
        );
        if mode != self.mode {
            debug!(?mode, "movement mode changed");
            self.mode = mode;
        }

        if input.is_just_pressed(InputAction::Jump) {
            self.jump.try_jump(physics, self.body, self.grounded, now)?;
        }
        Ok(())
    }

    /// Fixed tick before the physics step: drag and movement force
    pub fn fixed_update<P>(&mut self, physics: &mut P, now: f64) -> Result<(), LocomotionError>
    where
        P: PhysicsBackend + ?Sized,
    {
        self.jump.tick(physics, self.body, now)?;
        self.drag.apply(physics, self.body, self.mode)?;

        self.movement_direction = self.input.direction(&self.orientation.get());
        let force = self.movement_direction.normalize_or_zero()
            * self.config.force_magnitude(self.mode);
        physics.apply_force(self.body, force, ForceMode::Continuous)?;
        Ok(())
    }

    /// Fixed tick after the physics step: clamp horizontal speed, record ground contact
    pub fn post_physics<P>(&mut self, physics: &mut P) -> Result<(), LocomotionError>
    where
        P: PhysicsBackend + ?Sized,
    {
        self.limiter.apply(physics, self.body)?;
        self.grounded = self.probe.is_grounded(physics, self.body)?;
        Ok(())
    }
}

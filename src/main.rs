//! CikWick - physics-driven player locomotion
//!
//! Headless host: loads settings, builds a small world and drives one player
//! through a scripted sequence of key events on a simulated frame clock.

mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

use cikwick_core::GameTime;
use cikwick_game::{InputBindings, InputHandler, OrientationHandle, PlayerController};
use cikwick_physics::{LayerMask, PhysicsBackend, PhysicsWorld};

use settings::Settings;

/// Simulated frame rate of the host loop
const FRAME_DELTA: f32 = 1.0 / 60.0;
const RUN_SECONDS: f64 = 6.0;
const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 3.0, -6.0);

/// Key event at a point on the real-time clock
struct ScriptedKey {
    at: f64,
    key: KeyCode,
    state: ElementState,
}

const fn key(at: f64, key: KeyCode, state: ElementState) -> ScriptedKey {
    ScriptedKey { at, key, state }
}

fn script(bindings: &cikwick_game::KeyBindings) -> Vec<ScriptedKey> {
    use ElementState::{Pressed, Released};
    vec![
        key(0.5, KeyCode::KeyW, Pressed),
        key(1.5, bindings.jump, Pressed),
        key(1.6, bindings.jump, Released),
        key(2.5, bindings.slide, Pressed),
        key(2.6, bindings.slide, Released),
        key(3.0, KeyCode::KeyD, Pressed),
        key(3.8, KeyCode::KeyD, Released),
        key(4.0, bindings.walk, Pressed),
        key(4.1, bindings.walk, Released),
        // Held through the cooldown: only the first press jumps
        key(4.5, bindings.jump, Pressed),
        key(5.2, bindings.jump, Released),
        key(5.5, KeyCode::KeyW, Released),
    ]
}

/// Camera slowly orbiting behind the player
fn camera_eye(target: Vec3, time: f64) -> Vec3 {
    target + Quat::from_rotation_y(time as f32 * 0.2) * CAMERA_OFFSET
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Starting CikWick...");

    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let settings = Settings::load(settings_path.as_deref());

    let mut world = PhysicsWorld::with_config(settings.physics.clone());
    world.create_ground(0.0, LayerMask::GROUND);
    world.create_static_box(
        Vec3::new(2.0, 0.25, 2.0),
        Vec3::new(0.0, 0.25, 12.0),
        LayerMask::GROUND,
    );

    let movement = settings.movement.clone();
    let spawn = Vec3::new(0.0, movement.body_height * 0.5 + 0.05, 0.0);
    let (body, _) =
        world.create_character_body(spawn, movement.body_height, 0.5, 1.0, LayerMask::DEFAULT);

    let orientation = OrientationHandle::default();
    orientation.follow(camera_eye(spawn, 0.0), spawn);

    let mut input = InputHandler::new(InputBindings::from_keys(&movement.bindings));
    let mut pending = script(&movement.bindings).into_iter().peekable();

    let mut player = PlayerController::builder(movement)
        .body(body)
        .orientation(orientation.clone())
        .build(&mut world)
        .context("Failed to set up player")?;

    let mut time_config = settings.time.clone();
    time_config.fixed_timestep = settings.fixed_timestep();
    let mut time = GameTime::new(time_config);

    let mut next_report = 0.0;
    while time.real_time < RUN_SECONDS {
        time.update(FRAME_DELTA);
        let now = time.real_time;

        while let Some(event) = pending.next_if(|e| e.at <= now) {
            info!("{:?} {:?} at {:.2}s", event.key, event.state, now);
            input.handle_keyboard(PhysicalKey::Code(event.key), event.state);
        }

        player.update(&mut world, &input.state, now)?;

        for _ in 0..time.fixed_steps() {
            let position = world.position(body)?;
            orientation.follow(camera_eye(position, now), position);

            player.fixed_update(&mut world, now)?;
            world.step();
            player.post_physics(&mut world)?;
        }

        input.end_frame();

        if now >= next_report {
            let position = world.position(body)?;
            let velocity = world.velocity(body)?;
            info!(
                "t={:.2}s pos=({:.2}, {:.2}, {:.2}) speed={:.2} mode={:?} grounded={} can_jump={}",
                now,
                position.x,
                position.y,
                position.z,
                velocity.with_y(0.0).length(),
                player.mode(),
                player.is_grounded(),
                player.can_jump(),
            );
            next_report += 0.5;
        }
    }

    info!("Run complete after {} frames", time.frame_count);
    Ok(())
}

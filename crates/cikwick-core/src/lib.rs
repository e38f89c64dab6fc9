//! CikWick Core - Core types and utilities
//!
//! This crate provides the foundational types shared by the other crates:
//! - Mathematical primitives (re-exported from glam)
//! - Transform for positioning reference frames
//! - Game clock driving the frame tick and the fixed physics tick

pub mod time;
pub mod types;

pub use glam::{Mat3, Quat, Vec2, Vec3};
pub use time::{GameTime, TimeConfig};
pub use types::Transform;

//! Orca Hunt - A top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `web`: wasm-bindgen surface for the browser host (wasm32 only)

pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use tuning::{AimMode, SceneryLayout, TimeScaling, Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (logical units)
    pub const FIELD_WIDTH: f32 = 1200.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const SHOOT_COOLDOWN_MS: f64 = 250.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_SIZE: f32 = 5.0;

    /// Orca defaults
    pub const ORCA_SIZE: f32 = 40.0;
    pub const ORCA_SPEED: f32 = 2.0;
    pub const MAX_ORCAS: usize = 3;
    pub const ORCA_SPAWN_INTERVAL_MS: f64 = 5000.0;
    /// How far outside the field a fresh orca appears
    pub const ORCA_SPAWN_OFFSET: f32 = 50.0;
    /// Orcas further than this outside the field are culled
    pub const ORCA_CULL_MARGIN: f32 = 100.0;
    pub const ORCA_EMERGE_MS: f64 = 1000.0;
    pub const ORCA_SUBMERGE_AFTER_MS: f64 = 8000.0;

    /// Guts burst defaults
    pub const GUTS_PIECES: usize = 15;
    pub const GUTS_LIFETIME_MS: f64 = 3000.0;
    pub const GUTS_GRAVITY: f32 = 0.1;
    pub const GUTS_DRAG: f32 = 0.98;
    pub const GUTS_SPIN: f32 = 0.05;

    /// Points per orca kill
    pub const KILL_SCORE: u64 = 100;

    /// Nominal frame length for elapsed-time scaling (60 Hz)
    pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Longest frame honoured by elapsed-time scaling (tab switches etc.)
    pub const MAX_FRAME_MS: f64 = 100.0;
}

/// Unit vector pointing along `theta` (radians)
#[inline]
pub fn direction_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Clamp a point so a circle of `radius` stays inside a `width` x `height` field
#[inline]
pub fn clamp_to_field(pos: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        pos.x.min(width - radius).max(radius),
        pos.y.min(height - radius).max(radius),
    )
}

/// Whether `pos` lies inside the field grown by `margin` on every side
#[inline]
pub fn within_field(pos: Vec2, margin: f32, width: f32, height: f32) -> bool {
    pos.x >= -margin && pos.x <= width + margin && pos.y >= -margin && pos.y <= height + margin
}

//! GravTank - A rotating-gravity tank arcade game
//!
//! Core modules:
//! - `physics`: Axis-aligned rigid-body world (bodies, forces, contacts, gravity)
//! - `sim`: Deterministic gameplay (gravity camera, actors, projectiles, arena, collisions)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Errors raised at configuration boundaries

pub mod error;
pub mod physics;
pub mod settings;
pub mod sim;

pub use error::{ArenaError, SettingsError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed physics timestep (60 Hz, stepped once per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Solver iterations per step
    pub const VELOCITY_ITERATIONS: u32 = 6;
    pub const POSITION_ITERATIONS: u32 = 2;
    /// Frame rate the tuning values are authored for
    pub const BASE_FPS: f32 = 60.0;

    /// Gravity magnitude at the base frame rate
    pub const GRAVITY: f32 = 9.81;

    /// Gravity camera: per-frame rotation angle and snap margin
    pub const CAMERA_STEP: f32 = std::f32::consts::PI / 40.0;
    pub const CAMERA_MARGIN: f32 = 0.11;

    /// Arena grid
    pub const GRID_SIZE: usize = 15;
    pub const TILE_SIZE: f32 = 4.0;
    pub const TILE_HALF_SIZE: f32 = 2.0;
    /// Enemy roster capacity per level
    pub const MAX_ENEMIES: usize = 20;

    /// Player defaults
    pub const PLAYER_HALF_SIZE: f32 = 0.5;
    pub const PLAYER_SPEED: f32 = 6.0;
    pub const PLAYER_MAX_HEALTH: i32 = 6;
    /// Distance from actor centre to the muzzle / aim indicator
    pub const TURRET_OFFSET: f32 = 1.5;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 1.0;
    pub const ENEMY_SPEED: f32 = 3.0;
    pub const ENEMY_CHANGE_AT: u32 = 60;
    pub const ENEMY_SHOOT_RANGE: f32 = 16.0;
    pub const ENEMY_RELOAD_FRAMES: u32 = 45;

    /// Projectiles
    pub const BULLET_HALF_SIZE: f32 = 0.2;
    pub const BULLET_SPEED: f32 = 20.0;
    pub const ENEMY_BULLET_SPEED: f32 = 12.0;
    pub const EXPLOSION_HALF_SIZE: f32 = 1.5;
    pub const EXPLOSION_DENSITY: f32 = 10.0;
    /// Frames a blast stays alive
    pub const EXPLOSION_FRAMES: u32 = 8;

    /// Controller dead zone for the movement stick
    pub const STICK_THRESHOLD: f32 = 0.3;
    /// Speed below which the player counts as stopped against a wall
    pub const REST_SPEED: f32 = 0.01;
}

/// Rotate a vector by `angle` radians (counter-clockwise for positive angles)
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// Perpendicular "right" vector for a given "up" vector
#[inline]
pub fn right_of(up: Vec2) -> Vec2 {
    Vec2::new(up.y, -up.x)
}

/// Frame-time scale relative to the base frame rate (1.0 at 60 fps, 2.0 at 30 fps)
#[inline]
pub fn fps_scale(frame_time: f32) -> f32 {
    if frame_time <= 0.0 || !frame_time.is_finite() {
        return 1.0;
    }
    frame_time * consts::BASE_FPS
}

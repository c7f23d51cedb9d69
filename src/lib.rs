//! Orbit Path - a vertical gravity-slingshot arcade game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (bodies, orbits, world state, input mapping)
//! - `renderer`: Scene tessellation and WebGPU pipeline
//! - `session`: Session host plumbing (tick source, score events)
//! - `settings`: Per-session gameplay configuration

pub mod error;
pub mod highscores;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use highscores::HighScores;
pub use session::{ManualTicks, Session, SessionEvents, TickSource};
pub use settings::GameSettings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical playfield dimensions (all simulation math uses these units)
    pub const WORLD_WIDTH: f32 = 750.0;
    pub const WORLD_HEIGHT: f32 = 1334.0;

    /// Ship start position and the camera offset at reset
    pub const START_X: f32 = 375.0;
    pub const START_Y: f32 = 1200.0;
    pub const START_CAMERA_OFFSET: f32 = 1000.0;

    /// Camera trails the ship by this much and eases toward it
    pub const CAMERA_LEAD: f32 = 850.0;
    pub const CAMERA_SMOOTHING: f32 = 0.12;

    /// Body sizes are expressed relative to this reference radius
    pub const REFERENCE_RADIUS: f32 = 40.0;
    pub const INITIAL_BODY_RADIUS: f32 = 45.0;
    pub const MIN_BODY_RADIUS: f32 = 25.0;
    pub const MAX_BODY_RADIUS: f32 = 70.0;
    pub const SPAWN_MIN_X: f32 = 150.0;
    pub const SPAWN_MAX_X: f32 = 600.0;

    /// Initial run of bodies laid out above the start
    pub const INITIAL_BODY_COUNT: usize = 8;
    pub const INITIAL_BODY_GAP: f32 = 500.0;
    pub const INITIAL_BODY_SPACING: f32 = 420.0;

    /// Scroll spawning / culling
    pub const SPAWN_LOOKAHEAD: f32 = 400.0;
    pub const SPAWN_SPACING: f32 = 450.0;
    pub const MAX_BODIES: usize = 20;
    pub const CULL_DISTANCE: f32 = 2000.0;

    /// Gravity steering
    pub const PULL_STRENGTH: f32 = 0.35;
    pub const TANGENT_STRENGTH: f32 = 0.15;
    pub const INFLUENCE_EXPONENT: f32 = 1.5;

    /// Orbit drift per frame
    pub const SINGULARITY_DECAY: f32 = 0.45;
    pub const SINGULARITY_FLOOR_MARGIN: f32 = 15.0;
    pub const REPULSOR_GROWTH: f32 = 0.8;

    /// Per-frame body animation
    pub const PULSE_RATE: f32 = 0.03;
    pub const OSCILLATION_RATE: f32 = 0.02;
    pub const BINARY_AMPLITUDE: f32 = 3.0;

    /// Terminal conditions
    pub const COLLISION_MARGIN: f32 = 12.0;
    pub const BOUNDS_MIN_X: f32 = -150.0;
    pub const BOUNDS_MAX_X: f32 = 900.0;
    pub const FALL_BEHIND_PEAK: f32 = 800.0;
    pub const FALL_BEHIND_CAMERA: f32 = 1450.0;

    /// World units per scored kilometre
    pub const UNITS_PER_KM: f32 = 10.0;

    /// Touch-friendly hit buffer around a body's solid radius
    pub const TARGET_BUFFER: f32 = 15.0;

    /// Ship trail capacity
    pub const TRAIL_LENGTH: usize = 35;

    /// Vibration pulses (ms) on devices that support them
    pub const HAPTIC_TARGET_MS: u32 = 20;
    pub const HAPTIC_CAPTURE_MS: u32 = 30;
    pub const HAPTIC_RELEASE_MS: u32 = 15;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

/// Unit vector at the given angle
#[inline]
pub fn unit_at(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

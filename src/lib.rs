//! Breakout - A browser brick-breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddle, bricks, collisions, power-ups)
//! - `renderer`: Drawing surface abstraction and WebGPU presentation
//! - `platform`: Browser input folded into per-tick intents
//! - `config`: Data-driven game tuning

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{BrickLayout, CollisionMode, Config, ConfigError, canvas_size_for_viewport};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, velocities are pixels per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 700.0;
    /// Viewports narrower than this get a scaled canvas
    pub const MOBILE_BREAKPOINT: f32 = 768.0;
    /// Fraction of a narrow viewport the canvas occupies
    pub const MOBILE_WIDTH_FRACTION: f32 = 0.9;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 5.0;
    pub const BALL_LAUNCH_SPEED: f32 = 3.0;
    pub const BALL_MAX_SPEED: f32 = 10.0;
    /// Ball spawn height above the canvas bottom
    pub const BALL_START_OFFSET: f32 = 30.0;
    /// Speed multiplier applied per destroyed brick
    pub const SPEED_RAMP: f32 = 1.05;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Horizontal pixels per tick while a direction is held
    pub const PADDLE_STEP: f32 = 10.0;
    /// Maximum launch angle off vertical after a paddle hit (degrees)
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 60.0;

    /// Brick layout defaults
    pub const BRICK_WIDTH: f32 = 28.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 5.0;
    /// Grid used by the fixed layout
    pub const FIXED_COLUMNS: u32 = 18;
    pub const FIXED_ROWS: u32 = 10;

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const POWER_UP_COUNT: usize = 4;
    pub const POWER_UP_DURATION_SECS: f32 = 10.0;
    /// Paddle width / ball radius multiplier for yellow and green
    pub const POWER_UP_SCALE: f32 = 1.5;
    /// Velocity multiplier while red is active
    pub const SLOW_FACTOR: f32 = 0.5;

    /// Velocity components below this get a random nudge after a wall bounce
    pub const NUDGE_THRESHOLD: f32 = 0.1;
    /// Peak-to-peak size of the nudge
    pub const NUDGE_AMOUNT: f32 = 0.2;

    /// Horizontal drag distance that registers as a touch direction
    pub const TOUCH_THRESHOLD: f32 = 30.0;
}

/// Convert seconds to whole simulation ticks (at least one)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    ((secs * consts::TICKS_PER_SECOND).round() as u32).max(1)
}

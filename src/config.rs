//! Game tuning and canvas sizing
//!
//! Every gameplay constant the simulation reads comes from [`Config`]. Defaults
//! mirror `crate::consts`; hosts may override any subset from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`Config`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config text is not valid JSON for this schema
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    /// A numeric field is out of range
    #[error("config field `{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    /// Max speed cannot be below the launch speed
    #[error("ball_max_speed ({max}) is below ball_launch_speed ({launch})")]
    MaxBelowLaunch { max: f32, launch: f32 },

    /// Fixed layout with an empty grid
    #[error("fixed layout needs at least one column and row, got {columns}x{rows}")]
    EmptyFixedLayout { columns: u32, rows: u32 },
}

/// How the brick grid is sized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BrickLayout {
    /// Columns and rows derived from the canvas size (top half filled)
    #[default]
    Responsive,
    /// A fixed grid regardless of canvas size
    Fixed { columns: u32, rows: u32 },
}

impl BrickLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrickLayout::Responsive => "responsive",
            BrickLayout::Fixed { .. } => "fixed",
        }
    }

    /// The grid used by the procedural variant of the game
    pub fn classic_fixed() -> Self {
        BrickLayout::Fixed {
            columns: FIXED_COLUMNS,
            rows: FIXED_ROWS,
        }
    }
}

/// Ball vs brick collision strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    /// Point test of the ball centre against every active brick
    Naive,
    /// Sub-stepped motion with a spatial grid lookup
    #[default]
    Swept,
}

impl CollisionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionMode::Naive => "naive",
            CollisionMode::Swept => "swept",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "naive" => Some(CollisionMode::Naive),
            "swept" | "grid" => Some(CollisionMode::Swept),
            _ => None,
        }
    }
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Ball ===
    pub ball_radius: f32,
    pub ball_launch_speed: f32,
    pub ball_max_speed: f32,
    /// Spawn height above the canvas bottom
    pub ball_start_offset: f32,
    /// Multiplier applied to speed per destroyed brick
    pub speed_ramp: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_step: f32,
    pub max_bounce_angle_deg: f32,

    // === Bricks ===
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_padding: f32,
    pub brick_offset_top: f32,
    pub brick_offset_left: f32,
    pub layout: BrickLayout,
    pub collision: CollisionMode,

    // === Session ===
    pub starting_lives: u32,
    pub power_up_count: usize,
    pub power_up_duration_secs: f32,
    pub power_up_scale: f32,
    pub slow_factor: f32,

    // === Input ===
    pub touch_threshold: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            ball_launch_speed: BALL_LAUNCH_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            ball_start_offset: BALL_START_OFFSET,
            speed_ramp: SPEED_RAMP,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_step: PADDLE_STEP,
            max_bounce_angle_deg: MAX_BOUNCE_ANGLE_DEG,

            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_padding: BRICK_PADDING,
            brick_offset_top: BRICK_OFFSET_TOP,
            brick_offset_left: BRICK_OFFSET_LEFT,
            layout: BrickLayout::Responsive,
            collision: CollisionMode::Swept,

            starting_lives: STARTING_LIVES,
            power_up_count: POWER_UP_COUNT,
            power_up_duration_secs: POWER_UP_DURATION_SECS,
            power_up_scale: POWER_UP_SCALE,
            slow_factor: SLOW_FACTOR,

            touch_threshold: TOUCH_THRESHOLD,
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON config; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("ball_radius", self.ball_radius),
            ("ball_launch_speed", self.ball_launch_speed),
            ("ball_max_speed", self.ball_max_speed),
            ("speed_ramp", self.speed_ramp),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_step", self.paddle_step),
            ("max_bounce_angle_deg", self.max_bounce_angle_deg),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
            ("power_up_duration_secs", self.power_up_duration_secs),
            ("power_up_scale", self.power_up_scale),
            ("slow_factor", self.slow_factor),
            ("touch_threshold", self.touch_threshold),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.ball_max_speed < self.ball_launch_speed {
            return Err(ConfigError::MaxBelowLaunch {
                max: self.ball_max_speed,
                launch: self.ball_launch_speed,
            });
        }
        if let BrickLayout::Fixed { columns, rows } = self.layout {
            if columns == 0 || rows == 0 {
                return Err(ConfigError::EmptyFixedLayout { columns, rows });
            }
        }
        Ok(())
    }

    /// Timed power-up duration in ticks
    pub fn power_up_duration_ticks(&self) -> u32 {
        crate::secs_to_ticks(self.power_up_duration_secs)
    }

    /// Spatial grid cell edge (the larger brick dimension)
    pub fn grid_cell_size(&self) -> f32 {
        self.brick_width.max(self.brick_height)
    }

    /// Column and row counts of the brick field for a canvas
    pub fn brick_grid(&self, canvas_width: f32, canvas_height: f32) -> (u32, u32) {
        match self.layout {
            BrickLayout::Fixed { columns, rows } => (columns, rows),
            BrickLayout::Responsive => {
                let columns = ((canvas_width - self.brick_offset_left)
                    / (self.brick_width + self.brick_padding))
                    .floor();
                let rows = ((canvas_height / 2.0 - self.brick_offset_top)
                    / (self.brick_height + self.brick_padding))
                    .floor();
                (columns.max(0.0) as u32, rows.max(0.0) as u32)
            }
        }
    }
}

/// Canvas size for a browser viewport
///
/// Narrow viewports get 90% of their width with the 600:700 aspect ratio kept;
/// everything else gets the fixed 600x700 canvas.
pub fn canvas_size_for_viewport(viewport_width: f32, _viewport_height: f32) -> (f32, f32) {
    if viewport_width < MOBILE_BREAKPOINT {
        let width = viewport_width * MOBILE_WIDTH_FRACTION;
        (width, width * CANVAS_HEIGHT / CANVAS_WIDTH)
    } else {
        (CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_responsive_grid() {
        let config = Config::default();
        // (600 - 5) / 33 = 18.03, (350 - 30) / 25 = 12.8
        assert_eq!(config.brick_grid(600.0, 700.0), (18, 12));
    }

    #[test]
    fn test_fixed_grid_ignores_canvas() {
        let config = Config {
            layout: BrickLayout::classic_fixed(),
            ..Default::default()
        };
        assert_eq!(config.brick_grid(320.0, 200.0), (18, 10));
    }

    #[test]
    fn test_tiny_canvas_has_no_bricks() {
        let config = Config::default();
        assert_eq!(config.brick_grid(20.0, 40.0), (0, 0));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            Config::from_json(r#"{"ball_max_speed": 12.0, "collision": "naive"}"#).unwrap();
        assert_eq!(config.ball_max_speed, 12.0);
        assert_eq!(config.collision, CollisionMode::Naive);
        assert_eq!(config.paddle_width, PADDLE_WIDTH);
    }

    #[test]
    fn test_fixed_layout_json() {
        let config =
            Config::from_json(r#"{"layout": {"kind": "fixed", "columns": 18, "rows": 10}}"#)
                .unwrap();
        assert_eq!(config.layout, BrickLayout::classic_fixed());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Config::from_json(r#"{"brick_width": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                field: "brick_width",
                ..
            }
        ));

        let err = Config::from_json(r#"{"ball_max_speed": 1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MaxBelowLaunch { .. }));

        let err = Config::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_collision_mode_from_str() {
        assert_eq!(CollisionMode::from_str("Grid"), Some(CollisionMode::Swept));
        assert_eq!(CollisionMode::from_str("naive"), Some(CollisionMode::Naive));
        assert_eq!(CollisionMode::from_str("fast"), None);
    }

    #[test]
    fn test_canvas_size_for_viewport() {
        assert_eq!(canvas_size_for_viewport(1280.0, 800.0), (600.0, 700.0));
        let (w, h) = canvas_size_for_viewport(400.0, 800.0);
        assert!((w - 360.0).abs() < 1e-4);
        assert!((h - 420.0).abs() < 1e-3);
    }

    #[test]
    fn test_duration_ticks() {
        assert_eq!(Config::default().power_up_duration_ticks(), 600);
    }
}

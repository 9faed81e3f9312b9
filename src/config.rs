//! Game tuning
//!
//! Loaded from JSON handed over by the page script (or a file on native).
//! Missing fields fall back to the defaults below.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_COLLISION_ITERATIONS;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Ball ===
    /// Ball radius in pixels (also the Minkowski margin of every obstacle)
    pub ball_radius: f32,
    /// Launch speed on the first stage, pixels per second
    pub ball_speed: f32,
    /// Launch angle above the horizontal, degrees
    pub launch_angle_deg: f32,
    /// Bounces resolved per tick before the rest of the motion is dropped
    pub max_collision_iterations: u32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the viewport's left border and the paddle
    pub paddle_margin: f32,
    pub paddle_corner_radius: f32,

    // === Bricks ===
    /// Border radius used when the page did not report one
    pub default_border_radius: f32,
    pub light_brick_hp: u8,
    pub heavy_brick_hp: u8,
    /// Score per hit point when a brick is destroyed
    pub points_per_hp: u32,

    // === Session ===
    pub lives: u8,
    /// Ball speed multiplier applied on every new stage
    pub stage_speedup: f32,
    /// Pause after a lost ball, in ticks
    pub respawn_delay_ticks: u32,
    /// Pause between stages, in ticks
    pub stage_clear_delay_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ball_radius: 5.0,
            ball_speed: 300.0,
            launch_angle_deg: 45.0,
            max_collision_iterations: MAX_COLLISION_ITERATIONS,

            paddle_width: 12.0,
            paddle_height: 80.0,
            paddle_margin: 24.0,
            paddle_corner_radius: 4.0,

            default_border_radius: 4.0,
            light_brick_hp: 1,
            heavy_brick_hp: 3,
            points_per_hp: 10,

            lives: 3,
            stage_speedup: 1.1,
            respawn_delay_ticks: 120,
            stage_clear_delay_ticks: 240,
        }
    }
}

/// Error loading a [`GameConfig`] or a stage layout
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid config field {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the physics cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        };
        positive("ball_radius", self.ball_radius)?;
        positive("ball_speed", self.ball_speed)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("stage_speedup", self.stage_speedup)?;

        if !self.launch_angle_deg.is_finite() || self.launch_angle_deg.abs() >= 90.0 {
            return Err(ConfigError::Invalid {
                field: "launch_angle_deg",
                reason: "must point into the viewport (between -90 and 90)",
            });
        }
        if self.max_collision_iterations == 0 {
            return Err(ConfigError::Invalid {
                field: "max_collision_iterations",
                reason: "must be at least 1",
            });
        }
        if self.light_brick_hp == 0 || self.heavy_brick_hp == 0 {
            return Err(ConfigError::Invalid {
                field: "brick_hp",
                reason: "bricks need at least one hit point",
            });
        }
        let max_hp = u32::from(self.light_brick_hp.max(self.heavy_brick_hp));
        if max_hp.checked_mul(self.points_per_hp).is_none() {
            return Err(ConfigError::Invalid {
                field: "points_per_hp",
                reason: "brick value overflows",
            });
        }
        if self.lives == 0 {
            return Err(ConfigError::Invalid {
                field: "lives",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Ball speed for a 1-based stage number
    pub fn stage_speed(&self, stage: u32) -> f32 {
        let exponent = stage.saturating_sub(1).min(i32::MAX as u32) as i32;
        self.ball_speed * self.stage_speedup.powi(exponent)
    }

    /// Hit points of a brick by visual weight
    pub fn brick_hp(&self, heavy: bool) -> u8 {
        if heavy {
            self.heavy_brick_hp
        } else {
            self.light_brick_hp
        }
    }
}

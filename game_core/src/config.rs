use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use serde::Deserialize;

use crate::components::Side;
use crate::error::ConfigError;
use crate::params::Params;

/// Which way the ball heads after a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeDirection {
    /// Toward the side that just conceded
    #[default]
    TowardConceder,
    /// Coin flip
    Random,
}

/// Game configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_max: f32,
    pub ball_speed_increase: f32,
    pub paddle_english: f32,
    pub serve_max_angle: f32,
    pub serve_delay: f32,
    pub serve_direction: ServeDirection,
    pub win_score: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: Params::FIELD_WIDTH,
            field_height: Params::FIELD_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_margin: Params::PADDLE_MARGIN,
            paddle_speed: Params::PADDLE_SPEED,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_max: Params::BALL_SPEED_MAX,
            ball_speed_increase: Params::BALL_SPEED_INCREASE,
            paddle_english: Params::PADDLE_ENGLISH,
            serve_max_angle: Params::SERVE_MAX_ANGLE,
            serve_delay: Params::SERVE_DELAY,
            serve_direction: ServeDirection::TowardConceder,
            win_score: Params::WIN_SCORE,
        }
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing keys fall back to defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Check every value; the first violation is reported
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("field_width", self.field_width)?;
        require_positive("field_height", self.field_height)?;
        require_positive("paddle_width", self.paddle_width)?;
        require_positive("paddle_height", self.paddle_height)?;
        require_positive("paddle_speed", self.paddle_speed)?;
        require_positive("ball_radius", self.ball_radius)?;
        require_positive("ball_speed_initial", self.ball_speed_initial)?;
        require_positive("ball_speed_max", self.ball_speed_max)?;
        require_non_negative("paddle_margin", self.paddle_margin)?;
        require_non_negative("paddle_english", self.paddle_english)?;
        require_non_negative("serve_max_angle", self.serve_max_angle)?;
        require_non_negative("serve_delay", self.serve_delay)?;

        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }
        if !self.ball_speed_increase.is_finite() || self.ball_speed_increase < 1.0 {
            return Err(ConfigError::SpeedIncreaseBelowOne(self.ball_speed_increase));
        }
        if self.ball_speed_max < self.ball_speed_initial {
            return Err(ConfigError::MaxBelowInitial {
                initial: self.ball_speed_initial,
                max: self.ball_speed_max,
            });
        }
        if self.paddle_height > self.field_height {
            return Err(ConfigError::PaddleTooTall {
                paddle_height: self.paddle_height,
                field_height: self.field_height,
            });
        }
        if 2.0 * self.ball_radius >= self.field_height {
            return Err(ConfigError::BallTooLarge {
                ball_radius: self.ball_radius,
                field_height: self.field_height,
            });
        }
        if self.serve_max_angle >= FRAC_PI_2 {
            return Err(ConfigError::ServeAngleTooWide(self.serve_max_angle));
        }
        if self.paddle_x(Side::Left) + self.paddle_width >= self.paddle_x(Side::Right) {
            return Err(ConfigError::PaddlesOverlap {
                field_width: self.field_width,
            });
        }
        Ok(())
    }

    /// X of the paddle's left edge for the given side
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.paddle_margin,
            Side::Right => self.field_width - self.paddle_margin - self.paddle_width,
        }
    }
}

//! Error types
//!
//! Only two things can fail: building a configuration at startup and talking
//! to the display/input collaborators while the loop runs. The simulation
//! itself has no error paths.

use std::fmt;
use std::io;

/// Rejected configuration
#[derive(Debug)]
pub enum ConfigError {
    /// A dimension, size or speed that must be strictly positive (and finite)
    NotPositive { field: &'static str, value: f32 },
    /// A tuning value that may be zero but not negative (or NaN)
    Negative { field: &'static str, value: f32 },
    /// The win threshold must be at least 1
    ZeroWinScore,
    /// Paddle bounce factor below 1.0 would slow the ball down
    SpeedIncreaseBelowOne(f32),
    /// Speed cap lower than the serve speed
    MaxBelowInitial { initial: f32, max: f32 },
    /// Paddle does not fit vertically inside the field
    PaddleTooTall { paddle_height: f32, field_height: f32 },
    /// Ball diameter does not fit vertically inside the field
    BallTooLarge { ball_radius: f32, field_height: f32 },
    /// Serves at or past vertical would not head toward either side
    ServeAngleTooWide(f32),
    /// Both paddles (plus margins) do not fit horizontally
    PaddlesOverlap { field_width: f32 },
    /// Config file could not be read
    Io(io::Error),
    /// Config file is not valid TOML or has wrong types
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPositive { field, value } => {
                write!(f, "`{field}` must be a positive number, got {value}")
            }
            ConfigError::Negative { field, value } => {
                write!(f, "`{field}` must not be negative, got {value}")
            }
            ConfigError::ZeroWinScore => write!(f, "`win_score` must be at least 1"),
            ConfigError::SpeedIncreaseBelowOne(v) => {
                write!(f, "`ball_speed_increase` must be >= 1.0, got {v}")
            }
            ConfigError::MaxBelowInitial { initial, max } => write!(
                f,
                "`ball_speed_max` ({max}) must not be below `ball_speed_initial` ({initial})"
            ),
            ConfigError::PaddleTooTall {
                paddle_height,
                field_height,
            } => write!(
                f,
                "`paddle_height` ({paddle_height}) does not fit in `field_height` ({field_height})"
            ),
            ConfigError::BallTooLarge {
                ball_radius,
                field_height,
            } => write!(
                f,
                "ball of `ball_radius` {ball_radius} does not fit in `field_height` ({field_height})"
            ),
            ConfigError::ServeAngleTooWide(angle) => write!(
                f,
                "`serve_max_angle` must be below {:.4} radians, got {angle}",
                std::f32::consts::FRAC_PI_2
            ),
            ConfigError::PaddlesOverlap { field_width } => write!(
                f,
                "paddles and margins do not fit in `field_width` ({field_width})"
            ),
            ConfigError::Io(e) => write!(f, "failed to read config file: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Fatal failure of an external collaborator while the loop runs
#[derive(Debug)]
pub enum LoopError {
    Render(io::Error),
    Input(io::Error),
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopError::Render(e) => write!(f, "render failed: {e}"),
            LoopError::Input(e) => write!(f, "input polling failed: {e}"),
        }
    }
}

impl std::error::Error for LoopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoopError::Render(e) | LoopError::Input(e) => Some(e),
        }
    }
}

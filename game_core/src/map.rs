use glam::Vec2;

use crate::config::Config;
use crate::geometry::Rect;

/// The playfield: origin top-left, Y grows downward
#[derive(Debug, Clone, Copy)]
pub struct GameMap {
    pub width: f32,
    pub height: f32,
}

impl GameMap {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.field_width, config.field_height)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_position_size(Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    /// Where the ball is served from
    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a Y coordinate so an object of `half_height` stays inside
    pub fn clamp_y(&self, y: f32, half_height: f32) -> f32 {
        y.clamp(half_height, self.height - half_height)
    }
}

impl Default for GameMap {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

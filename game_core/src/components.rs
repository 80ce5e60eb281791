use glam::Vec2;
use rand::Rng;

use crate::config::Config;
use crate::geometry::{integrate, Rect};
use crate::resources::GameRng;

/// Which player a paddle (or a win) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Player name shown on the scoreboard
    pub fn name(self) -> &'static str {
        match self {
            Side::Left => "Green",
            Side::Right => "Red",
        }
    }

    /// Horizontal unit direction pointing at this side's goal line
    pub fn toward(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Requested paddle movement for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    Down,
    #[default]
    None,
}

impl Direction {
    /// Sign along Y (screen coordinates, up is negative)
    pub fn sign(self) -> f32 {
        match self {
            Direction::Up => -1.0,
            Direction::Down => 1.0,
            Direction::None => 0.0,
        }
    }
}

/// Paddle component - represents a player's paddle
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,  // Top-left corner
    pub size: Vec2, // (width, height)
    pub speed: f32, // Units per second
}

impl Paddle {
    pub fn new(side: Side, config: &Config) -> Self {
        let mut paddle = Self {
            side,
            pos: Vec2::new(config.paddle_x(side), 0.0),
            size: Vec2::new(config.paddle_width, config.paddle_height),
            speed: config.paddle_speed,
        };
        paddle.reset(config.field_height);
        paddle
    }

    /// Move along Y and keep the whole paddle inside [0, field_height]
    pub fn update(&mut self, dir: Direction, dt: f32, field_height: f32) {
        self.pos.y += dir.sign() * self.speed * dt;
        self.pos.y = self.pos.y.clamp(0.0, field_height - self.size.y);
    }

    /// Center vertically
    pub fn reset(&mut self, field_height: f32) {
        self.pos.y = (field_height - self.size.y) / 2.0;
    }

    pub fn rect(&self) -> Rect {
        Rect::from_position_size(self.pos, self.size)
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2, // Center
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Advance by velocity; collisions are resolved separately
    pub fn update(&mut self, dt: f32) {
        self.pos = integrate(self.pos, self.vel, dt);
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.pos, Vec2::splat(self.radius * 2.0))
    }

    /// Put the ball at `center` heading toward `toward` at a random angle
    pub fn serve(
        &mut self,
        center: Vec2,
        speed: f32,
        toward: Side,
        max_angle: f32,
        rng: &mut GameRng,
    ) {
        self.pos = center;
        let angle: f32 = rng.0.gen_range(-max_angle..=max_angle);
        self.vel = Vec2::new(angle.cos() * toward.toward(), angle.sin()) * speed;
    }
}

/// Movement intent for paddle
#[derive(Debug, Clone, Copy, Default)]
pub struct PaddleIntent {
    pub dir: Direction,
}

impl PaddleIntent {
    pub fn new() -> Self {
        Self::default()
    }
}

//! Draw-call list handed to the display collaborator each frame.

use std::io;

use glam::Vec2;

use crate::components::{Ball, Paddle, Side};
use crate::fsm::MatchState;
use crate::geometry::Rect;
use crate::map::GameMap;
use crate::resources::Score;

/// Height of the scoreboard strip along the top of the field
pub const BANNER_HEIGHT: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREY: Color = Color::rgb(40, 40, 40);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Left => Color::GREEN,
            Side::Right => Color::RED,
        }
    }
}

/// One drawing primitive in field coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect { rect: Rect, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    /// Text centered on `pos`
    Text { pos: Vec2, text: String, color: Color },
}

/// Everything to draw for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    /// All text drawn this frame, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Display collaborator; an error is fatal to the loop
pub trait Renderer {
    fn render(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Lay out the field, entities, scoreboard and the current screen message
pub fn compose(
    map: &GameMap,
    paddles: &[Paddle],
    ball: Option<&Ball>,
    score: &Score,
    state: MatchState,
) -> Frame {
    let mut commands = vec![
        DrawCommand::Clear(Color::BLACK),
        DrawCommand::Rect {
            rect: Rect::from_position_size(Vec2::ZERO, Vec2::new(map.width, BANNER_HEIGHT)),
            color: Color::GREY,
        },
        DrawCommand::Rect {
            rect: Rect::from_position_size(
                Vec2::new(map.width / 2.0 - 1.0, BANNER_HEIGHT),
                Vec2::new(2.0, map.height - BANNER_HEIGHT),
            ),
            color: Color::GREY,
        },
    ];

    for paddle in paddles {
        commands.push(DrawCommand::Rect {
            rect: paddle.rect(),
            color: Color::for_side(paddle.side),
        });
    }

    if let Some(ball) = ball {
        commands.push(DrawCommand::Circle {
            center: ball.pos,
            radius: ball.radius,
            color: Color::WHITE,
        });
    }

    for (side, x) in [(Side::Left, 100.0), (Side::Right, map.width - 100.0)] {
        commands.push(DrawCommand::Text {
            pos: Vec2::new(x, BANNER_HEIGHT / 2.0),
            text: format!("{}: {}", side.name(), score.get(side)),
            color: Color::WHITE,
        });
    }

    let message_y = map.height / 3.0;
    let mut message = |line: usize, text: String, color: Color| {
        commands.push(DrawCommand::Text {
            pos: Vec2::new(map.width / 2.0, message_y + line as f32 * 30.0),
            text,
            color,
        });
    };
    match state {
        MatchState::Start => {
            message(0, "PONG".to_string(), Color::WHITE);
            message(1, "Press any key to start".to_string(), Color::WHITE);
            message(2, "Green: W / S    Red: Up / Down".to_string(), Color::WHITE);
        }
        MatchState::Playing => {}
        MatchState::GameOver { winner } => {
            message(0, format!("{} wins!", winner.name()), Color::for_side(winner));
            message(
                1,
                "Press R to restart or Q to quit".to_string(),
                Color::WHITE,
            );
        }
    }

    Frame {
        width: map.width,
        height: map.height,
        commands,
    }
}

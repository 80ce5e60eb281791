/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Playfield
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_MARGIN: f32 = 20.0; // Gap between field edge and paddle
    pub const PADDLE_SPEED: f32 = 600.0; // units per second (10 px/frame at 60 Hz)

    // Ball
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SPEED_INITIAL: f32 = 340.0;
    pub const BALL_SPEED_MAX: f32 = 900.0;
    pub const BALL_SPEED_INCREASE: f32 = 1.05; // Multiply speed on paddle hit
    pub const PADDLE_ENGLISH: f32 = 0.5; // Vertical deflection from hit offset
    pub const MAX_BOUNCE_ANGLE: f32 = 1.047; // ~60 degrees off horizontal

    // Serve
    pub const SERVE_MAX_ANGLE: f32 = 0.785; // ~45 degrees
    pub const SERVE_DELAY: f32 = 0.7; // Pause after a point, seconds

    // Score
    pub const WIN_SCORE: u32 = 5; // First to 5 wins

    // Physics
    pub const FIXED_DT: f32 = 1.0 / 120.0; // Micro-step size
    pub const MAX_DT: f32 = 0.1; // Clamp to prevent large jumps

    // Loop
    pub const TARGET_FPS: u32 = 60;
}

//! Local two-player Pong: simulation, screen state machine and game loop.
//!
//! Platform pieces (drawing, keyboard) plug in through [`Renderer`] and
//! [`InputSource`].

pub mod components;
pub mod config;
pub mod error;
pub mod fsm;
pub mod game_loop;
pub mod geometry;
pub mod input;
pub mod map;
pub mod params;
pub mod render;
pub mod resources;
pub mod session;
pub mod systems;

pub use components::*;
pub use config::*;
pub use error::*;
pub use fsm::*;
pub use game_loop::*;
pub use geometry::*;
pub use input::*;
pub use map::*;
pub use params::*;
pub use render::*;
pub use resources::*;
pub use session::*;

use hecs::World;
use systems::{check_collisions, check_scoring, move_ball, move_paddles};

/// Run the Pong simulation for `time.dt` seconds
///
/// `dt` is clamped to `Params::MAX_DT` and split into fixed micro-steps.
/// Stepping stops early on a point so the win condition is evaluated right
/// after the score changes.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    map: &GameMap,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    serve: &mut ServeState,
    rng: &mut GameRng,
) {
    events.clear();

    // Clamp dt to prevent large jumps
    let clamped_dt = if time.dt.is_finite() {
        time.dt.clamp(0.0, Params::MAX_DT)
    } else {
        0.0
    };

    // Fixed micro-steps for stable physics
    let mut remaining_dt = clamped_dt;
    while remaining_dt > 0.0 {
        let step_dt = remaining_dt.min(Params::FIXED_DT);
        remaining_dt -= step_dt;

        let step_time = Time {
            dt: step_dt,
            now: time.now + (clamped_dt - remaining_dt),
        };

        let mut step_events = Events::new();

        // 1. Move paddles based on intents
        move_paddles(world, &step_time, map);

        // 2. Move ball (or count down the serve pause)
        move_ball(world, &step_time, serve);

        // 3. Check collisions (walls first, then paddles)
        check_collisions(world, map, config, &mut step_events);

        // 4. Check scoring (ball exited the field)
        check_scoring(world, map, config, score, &mut step_events, serve, rng);

        events.absorb(&step_events);
        if step_events.scored() {
            break;
        }
    }

    // Update time
    time.now += clamped_dt;
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, side: Side, config: &Config) -> hecs::Entity {
    world.spawn((Paddle::new(side, config), PaddleIntent::new()))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec2, vel: glam::Vec2, radius: f32) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel, radius),))
}

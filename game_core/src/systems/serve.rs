use hecs::World;
use rand::Rng;

use crate::{Ball, Config, GameMap, GameRng, ServeDirection, ServeState, Side};

/// Pick the side the next serve heads toward
///
/// `conceder` is `None` for the opening serve of a match, which goes to the
/// right like the classic game.
pub fn serve_target(config: &Config, conceder: Option<Side>, rng: &mut GameRng) -> Side {
    match (config.serve_direction, conceder) {
        (ServeDirection::TowardConceder, Some(side)) => side,
        (ServeDirection::TowardConceder, None) => Side::Right,
        (ServeDirection::Random, _) => {
            if rng.0.gen_bool(0.5) {
                Side::Left
            } else {
                Side::Right
            }
        }
    }
}

/// Re-center the ball with a fresh velocity and start the serve pause
pub fn serve_ball(
    world: &mut World,
    map: &GameMap,
    config: &Config,
    serve: &mut ServeState,
    rng: &mut GameRng,
    conceder: Option<Side>,
) {
    let toward = serve_target(config, conceder, rng);
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.serve(
            map.ball_spawn(),
            config.ball_speed_initial,
            toward,
            config.serve_max_angle,
            rng,
        );
    }
    serve.start_delay(config.serve_delay);
    log::debug!("Serving toward {:?}", toward);
}

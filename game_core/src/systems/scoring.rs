use crate::{Ball, Config, Events, GameMap, GameRng, Score, ServeState, Side};
use hecs::World;

use super::serve::serve_ball;

/// Check if ball left the arena (scoring)
///
/// The side opposite the exit edge gets exactly one point and the ball is
/// served again from the center after the serve pause.
pub fn check_scoring(
    world: &mut World,
    map: &GameMap,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    serve: &mut ServeState,
    rng: &mut GameRng,
) {
    let exited = world
        .query::<&Ball>()
        .iter()
        .next()
        .and_then(|(_e, ball)| {
            if map.bounds().contains(ball.pos) {
                None
            } else if ball.pos.x < 0.0 {
                Some(Side::Right) // Ball left through the left edge
            } else if ball.pos.x > map.width {
                Some(Side::Left)
            } else {
                None
            }
        });

    let Some(scorer) = exited else {
        return;
    };

    score.increment(scorer);
    match scorer {
        Side::Left => events.left_scored = true,
        Side::Right => events.right_scored = true,
    }
    log::info!(
        "{} scores ({} - {})",
        scorer.name(),
        score.left,
        score.right
    );

    serve_ball(world, map, config, serve, rng, Some(scorer.opponent()));
}

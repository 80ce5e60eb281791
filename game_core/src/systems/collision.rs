use crate::{Ball, Config, Events, GameMap, Paddle, Params, Side};
use glam::Vec2;
use hecs::World;

/// Check ball collisions with walls and paddles
///
/// Walls are resolved before paddles, so a ball touching both in the same
/// step is first pushed back inside the field and then reflected off the
/// paddle.
pub fn check_collisions(world: &mut World, map: &GameMap, config: &Config, events: &mut Events) {
    // First, collect ball data without holding borrows
    let ball_data = {
        let mut ball_query = world.query::<&Ball>();
        ball_query
            .iter()
            .next()
            .map(|(_e, ball)| (ball.pos, ball.vel, ball.radius))
    };

    let (mut ball_pos, mut ball_vel, radius) = match ball_data {
        Some(data) => data,
        None => return, // No ball in world
    };

    // Top/bottom walls: reflect only when heading into the wall, always clamp
    if ball_pos.y - radius <= 0.0 {
        if ball_vel.y < 0.0 {
            ball_vel.y = -ball_vel.y;
            events.ball_hit_wall = true;
            log::debug!("Ball bounced off top wall at x={:.1}", ball_pos.x);
        }
    } else if ball_pos.y + radius >= map.height {
        if ball_vel.y > 0.0 {
            ball_vel.y = -ball_vel.y;
            events.ball_hit_wall = true;
            log::debug!("Ball bounced off bottom wall at x={:.1}", ball_pos.x);
        }
    }
    ball_pos.y = map.clamp_y(ball_pos.y, radius);

    let paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, p)| *p)
        .collect();

    let ball_rect = Ball::new(ball_pos, ball_vel, radius).rect();

    for paddle in paddles {
        let paddle_rect = paddle.rect();
        if !ball_rect.overlaps(&paddle_rect) {
            continue;
        }

        // Only bounce when moving toward the paddle, so a ball that was just
        // pushed out cannot be captured again
        let toward = paddle.side.toward();
        if ball_vel.x * toward <= 0.0 {
            continue;
        }

        let new_speed = (ball_vel.length() * config.ball_speed_increase).min(config.ball_speed_max);

        // Relative hit position from -1 (top edge) to 1 (bottom edge)
        let half_height = paddle_rect.height() / 2.0;
        let hit_relative_y = ((ball_pos.y - paddle_rect.center().y) / half_height).clamp(-1.0, 1.0);

        // Mirror X, then bend Y by where the paddle was hit
        let speed_x = ball_vel.x.abs();
        let reflected = Vec2::new(
            speed_x,
            ball_vel.y + hit_relative_y * config.paddle_english * speed_x,
        );
        let angle = reflected
            .y
            .atan2(reflected.x)
            .clamp(-Params::MAX_BOUNCE_ANGLE, Params::MAX_BOUNCE_ANGLE);
        let away = paddle.side.opponent().toward();
        ball_vel = Vec2::new(angle.cos() * away, angle.sin()) * new_speed;

        // Push ball just outside the paddle's inner edge
        ball_pos.x = match paddle.side {
            Side::Left => paddle_rect.right() + radius,
            Side::Right => paddle_rect.left() - radius,
        };

        events.ball_hit_paddle = true;
        log::debug!(
            "Ball hit {:?} paddle, speed now {:.1}",
            paddle.side,
            new_speed
        );
        break;
    }

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos = ball_pos;
        ball.vel = ball_vel;
    }
}

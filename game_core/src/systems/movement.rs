use crate::{Ball, GameMap, Paddle, PaddleIntent, ServeState, Time};
use hecs::World;

/// Apply paddle movement based on intents
pub fn move_paddles(world: &mut World, time: &Time, map: &GameMap) {
    for (_entity, (paddle, intent)) in world.query_mut::<(&mut Paddle, &PaddleIntent)>() {
        paddle.update(intent.dir, time.dt, map.height);
    }
}

/// Move ball based on velocity, unless it is waiting to be served
pub fn move_ball(world: &mut World, time: &Time, serve: &mut ServeState) {
    if !serve.in_play() {
        serve.update(time.dt);
        return;
    }
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.update(time.dt);
    }
}

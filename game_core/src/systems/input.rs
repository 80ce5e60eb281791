use hecs::World;

use crate::components::{Direction, Paddle, PaddleIntent, Side};

/// Copy this tick's requested directions onto the paddle intents
pub fn apply_intents(world: &mut World, left: Direction, right: Direction) {
    for (_entity, (paddle, intent)) in world.query_mut::<(&Paddle, &mut PaddleIntent)>() {
        intent.dir = match paddle.side {
            Side::Left => left,
            Side::Right => right,
        };
    }
}

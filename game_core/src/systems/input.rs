use hecs::World;

use crate::{Arena, Paddle, PaddleIntent};

/// Store this tick's intent on the player paddle
pub fn ingest_intent(world: &mut World, intent: PaddleIntent) {
    for (_entity, current) in world.query_mut::<&mut PaddleIntent>() {
        *current = intent;
    }
}

/// Move intent-driven paddles one tick and clamp them to the arena
pub fn move_paddles(world: &mut World, arena: &Arena) {
    for (_entity, (paddle, intent)) in world.query_mut::<(&mut Paddle, &PaddleIntent)>() {
        let dir = intent.dir();
        if dir != 0 {
            paddle.y += dir as f32 * paddle.speed;
        }
        paddle.y = arena.clamp_y(paddle.y, paddle.height);
    }
}

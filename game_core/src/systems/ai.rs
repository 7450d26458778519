//! Predictive AI for the right-hand paddle.
//!
//! While the ball approaches, the AI projects its straight-line path to the
//! paddle's X, folds that projection back into the table to account for wall
//! bounces, and blurs it with noise scaled by the difficulty. While the ball
//! recedes, the paddle drifts back to the middle. Either way it only closes a
//! fraction (`reaction_speed`) of the gap each tick.

use hecs::World;
use rand::Rng;

use crate::{AiController, Arena, Ball, GameRng, MatchState, Paddle};

/// Where the ball will cross `paddle_x`, or `None` if it is moving away
pub fn predict_intercept_y(ball: &Ball, paddle_x: f32, arena: &Arena) -> Option<f32> {
    if ball.vel.x <= 0.0 {
        return None;
    }
    let time_to_impact = (paddle_x - ball.pos.x) / ball.vel.x;
    Some(arena.fold_y(ball.pos.y + ball.vel.y * time_to_impact))
}

/// Top-edge Y the AI paddle wants to reach this tick
pub fn ai_target_y(
    ball: &Ball,
    paddle: &Paddle,
    ai: &AiController,
    arena: &Arena,
    state: &MatchState,
    rng: &mut GameRng,
) -> f32 {
    match predict_intercept_y(ball, paddle.x, arena) {
        Some(predicted) => {
            let margin = ai.params.effective_error_margin(state);
            let noise = if margin > 0.0 {
                rng.0.gen_range(-margin..=margin)
            } else {
                0.0
            };
            predicted + noise - paddle.height / 2.0
        }
        None => (arena.height - paddle.height) / 2.0,
    }
}

/// Ease every AI paddle toward its target
pub fn update_ai_paddles(world: &mut World, arena: &Arena, state: &MatchState, rng: &mut GameRng) {
    let ball = match world.query::<&Ball>().iter().next().map(|(_e, ball)| *ball) {
        Some(ball) => ball,
        None => return,
    };

    for (_entity, (paddle, ai)) in world.query_mut::<(&mut Paddle, &mut AiController)>() {
        ai.target_y = ai_target_y(&ball, paddle, ai, arena, state, rng);
        paddle.y += (ai.target_y - paddle.y) * ai.params.reaction_speed;
        paddle.y = arena.clamp_y(paddle.y, paddle.height);

        tracing::trace!(target_y = ai.target_y, paddle_y = paddle.y, "ai paddle moved");
    }
}

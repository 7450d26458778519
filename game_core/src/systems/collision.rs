use crate::{Arena, Ball, Config, Events, MatchState, Paddle, Params};
use hecs::World;

/// Bounce the ball off the top or bottom wall, leaving it tangent to the wall.
/// Returns true if it bounced.
pub fn bounce_off_walls(ball: &mut Ball, arena: &Arena) -> bool {
    let r = ball.radius;
    if ball.pos.y - r < 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = r;
        true
    } else if ball.pos.y + r > arena.height {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = arena.height - r;
        true
    } else {
        false
    }
}

/// Ball's bounding square overlaps the paddle and the ball is heading
/// toward that paddle's goal line
pub fn touches_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let approaching = ball.vel.x * paddle.side.goal_direction() > 0.0;
    approaching && ball.bounds().intersects(&paddle.bounds())
}

/// Paddle hit response: reverse, re-aim by hit offset, speed up, push clear
pub fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, speed_increase: f32) {
    ball.vel.x = -ball.vel.x;

    // Where on the paddle the ball hit: center goes straight back, edges go steep
    let hit_offset = paddle.hit_offset(ball.pos.y);
    ball.vel.y = hit_offset * ball.vel.x.abs() * Params::DEFLECTION_FACTOR;

    let speed = (ball.vel.x.abs() + speed_increase).min(ball.max_speed);
    ball.vel.x = speed.copysign(ball.vel.x);

    // Flush against the face the ball is leaving from
    if ball.vel.x > 0.0 {
        ball.pos.x = paddle.x + paddle.width + ball.radius;
    } else {
        ball.pos.x = paddle.x - ball.radius;
    }
}

/// Check ball collisions with walls and paddles
pub fn check_collisions(
    world: &mut World,
    arena: &Arena,
    config: &Config,
    state: &mut MatchState,
    events: &mut Events,
) {
    // Collect paddle data without holding borrows
    let paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| *paddle)
        .collect();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if bounce_off_walls(ball, arena) {
            events.ball_hit_wall = true;
        }

        if let Some(paddle) = paddles.iter().find(|p| touches_paddle(ball, p)) {
            bounce_off_paddle(ball, paddle, config.ball_speed_increase);
            state.register_hit();
            events.paddle_hit = Some(paddle.side);

            tracing::debug!(
                side = ?paddle.side,
                vx = ball.vel.x,
                vy = ball.vel.y,
                rally = state.current_rally,
                "ball hit paddle"
            );
        }
    }
}

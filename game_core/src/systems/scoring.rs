use crate::{Arena, Ball, Config, Events, GameRng, MatchState, Side};
use hecs::World;

/// Side that wins the point if the ball has fully left the table
pub fn scorer_for(ball: &Ball, arena: &Arena) -> Option<Side> {
    if ball.pos.x + ball.radius < 0.0 {
        Some(Side::Ai)
    } else if ball.pos.x - ball.radius > arena.width {
        Some(Side::Player)
    } else {
        None
    }
}

/// Check if ball left the arena (scoring)
pub fn check_scoring(
    world: &mut World,
    arena: &Arena,
    config: &Config,
    state: &mut MatchState,
    events: &mut Events,
    rng: &mut GameRng,
) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let scorer = match scorer_for(ball, arena) {
            Some(side) => side,
            None => continue,
        };

        let match_over = state.award_point(scorer);
        events.scored = Some(scorer);

        tracing::info!(
            scorer = ?scorer,
            player = state.player_score,
            ai = state.ai_score,
            to_win = state.target_score.saturating_sub(state.score(scorer)),
            "point scored"
        );

        // The final point leaves the ball where it went out
        if !match_over {
            ball.launch(
                arena.center(),
                config.ball_speed_initial,
                Some(scorer.opponent()),
                rng,
            );
            tracing::debug!(vx = ball.vel.x, vy = ball.vel.y, "ball relaunched");
        }
    }
}

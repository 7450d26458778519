//! Headless match: a simple tracking bot plays the left paddle against the
//! AI until someone wins. Handy for eyeballing AI tuning from the logs.
//!
//! PONG_DIFFICULTY (easy|medium|hard), PONG_TARGET, PONG_SEED and RUST_LOG
//! are read from the environment.

use game_core::{
    Commentary, Config, Game, GameMode, MatchStats, PaddleIntent, Side, TickObserver,
};
use tracing::info;

const FRAME_SECS: f32 = 1.0 / 60.0;
const MAX_TICKS: u64 = 60 * 60 * 30; // half an hour of play

/// Follow the ball with a small deadzone
fn bot_intent(game: &Game) -> PaddleIntent {
    let ball = game.ball();
    let paddle = game.player_paddle();
    let diff = ball.pos.y - paddle.center_y();
    let deadzone = paddle.height / 6.0;
    PaddleIntent::new(diff < -deadzone, diff > deadzone)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let difficulty = std::env::var("PONG_DIFFICULTY").unwrap_or_else(|_| "medium".to_string());
    let target: u32 = std::env::var("PONG_TARGET")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    let seed: Option<u64> = std::env::var("PONG_SEED").ok().and_then(|s| s.parse().ok());

    let config = Config::default();
    let mut game = match seed {
        Some(seed) => Game::start_match_seeded(
            &config,
            GameMode::Classic,
            difficulty.parse()?,
            target,
            seed,
        )?,
        None => Game::start_match_from_keys(&config, "classic", &difficulty, target)?,
    };

    let mut commentary = Commentary::new(&config);
    let mut stats = MatchStats::new();

    while !game.is_over() && game.ticks() < MAX_TICKS {
        let intent = bot_intent(&game);
        let result = {
            let mut observers: [&mut dyn TickObserver; 2] = [&mut commentary, &mut stats];
            game.advance_observed(intent, &mut observers)
        };
        game.advance_clock(FRAME_SECS);

        while let Some(cue) = commentary.next_cue() {
            info!(tick = result.tick, ?cue, "commentary");
        }
    }

    let summary = game.summary();
    let winner = match summary.winner {
        Some(Side::Player) => "bot",
        Some(Side::Ai) => "ai",
        None => "nobody (tick limit)",
    };
    info!(
        winner,
        score = %format!("{} - {}", summary.player_score, summary.ai_score),
        time = %game.clock_display(),
        longest_rally = summary.longest_rally,
        paddle_hits = stats.paddle_hits,
        wall_bounces = stats.wall_bounces,
        fastest_ball = stats.fastest_ball,
        "match finished"
    );

    Ok(())
}

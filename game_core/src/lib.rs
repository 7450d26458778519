pub mod arena;
pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod observer;
pub mod params;
pub mod resources;
pub mod systems;

pub use arena::*;
pub use components::*;
pub use config::*;
pub use error::*;
pub use game::*;
pub use observer::*;
pub use params::*;
pub use resources::*;

use hecs::World;
use systems::*;

/// Run one tick of the Pong simulation.
///
/// Physics is frame-coupled: every call moves things by one tick of
/// velocity, regardless of how much wall-clock time has passed.
pub fn step(
    world: &mut World,
    arena: &Arena,
    config: &Config,
    state: &mut MatchState,
    events: &mut Events,
    rng: &mut GameRng,
    intent: PaddleIntent,
) {
    // Clear events at start of tick
    events.clear();

    // 1. Player paddle follows intent
    ingest_intent(world, intent);
    move_paddles(world, arena);

    // 2. AI paddle reacts to where the ball was at the end of last tick
    update_ai_paddles(world, arena, state, rng);

    // 3. Move ball, then walls and paddles
    move_ball(world);
    check_collisions(world, arena, config, state, events);

    // 4. Check scoring (ball exited arena)
    check_scoring(world, arena, config, state, events, rng);

    // 5. Terminal condition
    events.match_over = state.is_over();
}

/// Helper to create the player-controlled paddle entity
pub fn create_player_paddle(world: &mut World, config: &Config, y: f32) -> hecs::Entity {
    let paddle = Paddle {
        y,
        ..Paddle::spawn(config, Side::Player)
    };
    world.spawn((paddle, PaddleIntent::new(false, false)))
}

/// Helper to create the AI-controlled paddle entity
pub fn create_ai_paddle(world: &mut World, config: &Config, params: AiParams, y: f32) -> hecs::Entity {
    let paddle = Paddle {
        y,
        ..Paddle::spawn(config, Side::Ai)
    };
    world.spawn((paddle, AiController::new(params, y)))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, config: &Config, pos: glam::Vec2, vel: glam::Vec2) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel, config.ball_radius, config.ball_speed_max),))
}

//! One match of player vs AI.
//!
//! `Game` owns the entities and match state and is the only thing a render
//! loop talks to: it calls [`Game::advance`] once per animation frame with
//! the current paddle intent and draws from the returned [`TickResult`].

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use crate::{
    create_ai_paddle, create_ball, create_player_paddle, step, Arena, Ball, Config, ConfigError,
    Difficulty, Events, GameMode, GameRng, MatchState, Paddle, PaddleIntent, Side, Time,
    TickObserver,
};

/// Read-only snapshot of one tick for renderers, audio and other observers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickResult {
    pub tick: u64,
    pub ball: Ball,
    pub player_paddle: Paddle,
    pub ai_paddle: Paddle,
    pub events: Events,
    /// Paddle hits added to the rally this tick
    pub rally_delta: u32,
    pub state: MatchState,
    /// False when the tick was frozen (paused or match already over)
    pub advanced: bool,
    pub paused: bool,
}

impl TickResult {
    /// Side that scored this tick, if any
    pub fn score_delta(&self) -> Option<Side> {
        self.events.scored
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_over()
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }
}

/// End-of-match figures for the game-over screen and leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub winner: Option<Side>,
    pub player_score: u32,
    pub ai_score: u32,
    pub elapsed_secs: u64,
    pub longest_rally: u32,
    pub paddle_hits: u32,
    pub mode: GameMode,
    pub difficulty: Difficulty,
}

pub struct Game {
    world: World,
    arena: Arena,
    config: Config,
    mode: GameMode,
    difficulty: Difficulty,
    state: MatchState,
    time: Time,
    events: Events,
    rng: GameRng,
    paused: bool,
    /// Resized config waiting for the next match
    next_config: Option<Config>,
    ball: Entity,
    player: Entity,
    ai: Entity,
}

impl Game {
    /// Validate configuration and set up a fresh match
    pub fn start_match(
        config: &Config,
        mode: GameMode,
        difficulty: Difficulty,
        target_score: u32,
    ) -> Result<Self, ConfigError> {
        Self::build(config, mode, difficulty, target_score, GameRng::from_entropy())
    }

    /// Same as [`Game::start_match`] with a fixed RNG seed
    pub fn start_match_seeded(
        config: &Config,
        mode: GameMode,
        difficulty: Difficulty,
        target_score: u32,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::build(config, mode, difficulty, target_score, GameRng::new(seed))
    }

    /// Start a match from string keys, e.g. values read from a settings blob
    pub fn start_match_from_keys(
        config: &Config,
        mode: &str,
        difficulty: &str,
        target_score: u32,
    ) -> Result<Self, ConfigError> {
        Self::start_match(config, mode.parse()?, difficulty.parse()?, target_score)
    }

    fn build(
        config: &Config,
        mode: GameMode,
        difficulty: Difficulty,
        target_score: u32,
        mut rng: GameRng,
    ) -> Result<Self, ConfigError> {
        if target_score == 0 {
            return Err(ConfigError::NonPositiveTargetScore);
        }
        config.validate()?;

        let arena = Arena::from_config(config);
        let params = config.difficulty_table.get(difficulty);
        let rest_y = config.paddle_rest_y();

        let mut world = World::new();
        let player = create_player_paddle(&mut world, config, rest_y);
        let ai = create_ai_paddle(&mut world, config, params, rest_y);

        let mut ball = Ball::at_rest(config);
        ball.launch(arena.center(), config.ball_speed_initial, None, &mut rng);
        let ball = create_ball(&mut world, config, ball.pos, ball.vel);

        tracing::info!(
            %mode,
            %difficulty,
            target_score,
            width = arena.width,
            height = arena.height,
            "match started"
        );

        Ok(Self {
            world,
            arena,
            config: config.clone(),
            mode,
            difficulty,
            state: MatchState::new(target_score),
            time: Time::new(),
            events: Events::new(),
            rng,
            paused: false,
            next_config: None,
            ball,
            player,
            ai,
        })
    }

    /// Throw away this match and start a new one with the same settings,
    /// picking up any pending arena resize
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        let config = self.next_config.clone().unwrap_or_else(|| self.config.clone());
        config.validate()?;
        let rng = std::mem::take(&mut self.rng);
        *self = Self::build(
            &config,
            self.mode,
            self.difficulty,
            self.state.target_score,
            rng,
        )?;
        Ok(())
    }

    /// Record a new arena size. The running match keeps its table; the
    /// change applies from the next [`Game::restart`].
    pub fn resize_arena(&mut self, width: f32, height: f32) {
        let mut config = self.next_config.take().unwrap_or_else(|| self.config.clone());
        config.resize(width, height);
        tracing::debug!(width, height, "arena resize queued for next match");
        self.next_config = Some(config);
    }

    /// Run one tick. Frozen (no state change) while paused or after the
    /// match has ended.
    pub fn advance(&mut self, intent: PaddleIntent) -> TickResult {
        if self.paused || self.state.is_over() {
            return self.snapshot(Events::new(), 0, false);
        }

        let hits_before = self.state.paddle_hits;
        step(
            &mut self.world,
            &self.arena,
            &self.config,
            &mut self.state,
            &mut self.events,
            &mut self.rng,
            intent,
        );
        self.time.ticks += 1;

        if self.events.match_over {
            tracing::info!(
                winner = ?self.state.winner(),
                player = self.state.player_score,
                ai = self.state.ai_score,
                longest_rally = self.state.longest_rally,
                elapsed = %self.time.display(),
                "match over"
            );
        }

        let rally_delta = self.state.paddle_hits - hits_before;
        self.snapshot(self.events, rally_delta, true)
    }

    /// Run one tick and hand the result to every observer
    pub fn advance_observed(
        &mut self,
        intent: PaddleIntent,
        observers: &mut [&mut dyn TickObserver],
    ) -> TickResult {
        let result = self.advance(intent);
        for observer in observers.iter_mut() {
            observer.on_tick(&result);
        }
        result
    }

    fn snapshot(&self, events: Events, rally_delta: u32, advanced: bool) -> TickResult {
        TickResult {
            tick: self.time.ticks,
            ball: self.ball(),
            player_paddle: self.paddle(Side::Player),
            ai_paddle: self.paddle(Side::Ai),
            events,
            rally_delta,
            state: self.state,
            advanced,
            paused: self.paused,
        }
    }

    /// Accumulate wall-clock time for the match timer. Ignored while paused
    /// or after the match ended.
    pub fn advance_clock(&mut self, frame_secs: f32) {
        if !self.paused && !self.state.is_over() {
            self.time.advance_wall_clock(frame_secs);
        }
    }

    /// Pause the match. Returns false if it is already over.
    pub fn pause(&mut self) -> bool {
        if self.state.is_over() {
            return false;
        }
        self.paused = true;
        true
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flip the pause state, returning the new state
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn ticks(&self) -> u64 {
        self.time.ticks
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.time.elapsed
    }

    /// Match timer as MM:SS
    pub fn clock_display(&self) -> String {
        self.time.display()
    }

    pub fn ball(&self) -> Ball {
        self.world
            .get::<&Ball>(self.ball)
            .map(|ball| *ball)
            .unwrap_or_else(|_| Ball::at_rest(&self.config))
    }

    pub fn paddle(&self, side: Side) -> Paddle {
        let entity = match side {
            Side::Player => self.player,
            Side::Ai => self.ai,
        };
        self.world
            .get::<&Paddle>(entity)
            .map(|paddle| *paddle)
            .unwrap_or_else(|_| Paddle::spawn(&self.config, side))
    }

    pub fn player_paddle(&self) -> Paddle {
        self.paddle(Side::Player)
    }

    pub fn ai_paddle(&self) -> Paddle {
        self.paddle(Side::Ai)
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            winner: self.state.winner(),
            player_score: self.state.player_score,
            ai_score: self.state.ai_score,
            elapsed_secs: self.time.elapsed.max(0.0) as u64,
            longest_rally: self.state.longest_rally,
            paddle_hits: self.state.paddle_hits,
            mode: self.mode,
            difficulty: self.difficulty,
        }
    }

    /// Direct world access for tests and tools that stage positions
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Direct state access for tests and tools that stage scores
    pub fn state_mut(&mut self) -> &mut MatchState {
        &mut self.state
    }

    pub fn ball_entity(&self) -> Entity {
        self.ball
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn new_game() -> Game {
        Game::start_match_seeded(&Config::new(), GameMode::Classic, Difficulty::Medium, 10, 42)
            .expect("Default config should be valid")
    }

    fn stage_ball(game: &mut Game, pos: Vec2, vel: Vec2) {
        let entity = game.ball_entity();
        if let Ok(mut ball) = game.world_mut().get::<&mut Ball>(entity) {
            ball.pos = pos;
            ball.vel = vel;
        }
    }

    #[test]
    fn test_start_match_fresh_state() {
        let game = new_game();
        let state = game.state();
        assert_eq!(state.player_score, 0);
        assert_eq!(state.ai_score, 0);
        assert_eq!(state.current_rally, 0);
        assert_eq!(state.longest_rally, 0);
        assert_eq!(state.last_scorer, None);
        assert_eq!(state.target_score, 10);
        assert_eq!(game.ball().pos, game.arena().center());
        assert!((game.ball().vel.length() - 5.0).abs() < 1e-4);
        assert_eq!(game.player_paddle().y, game.config().paddle_rest_y());
        assert_eq!(game.ai_paddle().y, game.config().paddle_rest_y());
    }

    #[test]
    fn test_start_match_rejects_zero_target() {
        let result = Game::start_match(&Config::new(), GameMode::Classic, Difficulty::Easy, 0);
        assert!(matches!(result, Err(ConfigError::NonPositiveTargetScore)));
    }

    #[test]
    fn test_start_match_rejects_unknown_keys() {
        let config = Config::new();
        assert!(matches!(
            Game::start_match_from_keys(&config, "classic", "insane", 10),
            Err(ConfigError::UnknownDifficulty(_))
        ));
        assert!(matches!(
            Game::start_match_from_keys(&config, "arcade", "easy", 10),
            Err(ConfigError::UnknownMode(_))
        ));
        assert!(Game::start_match_from_keys(&config, "survival", "hard", 5).is_ok());
    }

    #[test]
    fn test_start_match_rejects_invalid_config() {
        let mut config = Config::new();
        config.arena_height = -1.0;
        assert!(Game::start_match(&config, GameMode::Classic, Difficulty::Easy, 10).is_err());

        let mut config = Config::new();
        config.difficulty_table.medium.error_margin = f32::INFINITY;
        assert!(matches!(
            Game::start_match(&config, GameMode::Classic, Difficulty::Medium, 10),
            Err(ConfigError::NegativeErrorMargin { .. })
        ));
    }

    #[test]
    fn test_advance_moves_ball_and_counts_ticks() {
        let mut game = new_game();
        stage_ball(&mut game, Vec2::new(400.0, 300.0), Vec2::new(5.0, 2.0));

        let result = game.advance(PaddleIntent::default());

        assert!(result.advanced);
        assert_eq!(result.tick, 1);
        assert_eq!(result.ball.pos, Vec2::new(405.0, 302.0));
        assert_eq!(result.rally_delta, 0);
        assert_eq!(result.score_delta(), None);
    }

    #[test]
    fn test_player_intent_moves_player_paddle() {
        let mut game = new_game();
        let start = game.player_paddle().y;

        let result = game.advance(PaddleIntent::up());

        assert_eq!(result.player_paddle.y, start - game.config().paddle_speed);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut game = new_game();
        let before = game.advance(PaddleIntent::default());

        assert!(game.pause());
        game.advance_clock(1.0);
        let frozen = game.advance(PaddleIntent::down());

        assert!(!frozen.advanced);
        assert!(frozen.paused);
        assert_eq!(frozen.ball, before.ball);
        assert_eq!(frozen.player_paddle, before.player_paddle);
        assert_eq!(frozen.tick, before.tick);
        assert_eq!(game.elapsed_secs(), 0.0, "Clock stops while paused");

        game.resume();
        assert!(game.advance(PaddleIntent::default()).advanced);
    }

    #[test]
    fn test_toggle_pause() {
        let mut game = new_game();
        assert!(game.toggle_pause());
        assert!(game.is_paused());
        assert!(!game.toggle_pause());
        assert!(!game.is_paused());
    }

    #[test]
    fn test_match_point_ends_match() {
        let mut game = new_game();
        game.state_mut().player_score = 9;
        game.state_mut().ai_score = 3;
        let out = Vec2::new(game.arena().width + 5.0, 300.0);
        stage_ball(&mut game, out, Vec2::new(15.0, 0.0));

        let result = game.advance(PaddleIntent::default());

        assert!(result.is_terminal());
        assert!(result.events.match_over);
        assert_eq!(result.state.player_score, 10);
        assert_eq!(result.winner(), Some(Side::Player));
        assert!(!game.pause(), "Cannot pause a finished match");

        let after = game.advance(PaddleIntent::up());
        assert!(!after.advanced, "No ticks after the match ends");
        assert_eq!(after.state.player_score, 10);
    }

    #[test]
    fn test_restart_resets_match() {
        let mut game = new_game();
        game.state_mut().ai_score = 4;
        game.advance(PaddleIntent::default());
        game.advance_clock(3.0);

        game.restart().expect("Restart with same config");

        assert_eq!(game.state().ai_score, 0);
        assert_eq!(game.ticks(), 0);
        assert_eq!(game.elapsed_secs(), 0.0);
        assert_eq!(game.difficulty(), Difficulty::Medium);
    }

    #[test]
    fn test_resize_waits_for_restart() {
        let mut game = new_game();
        game.resize_arena(1000.0, 750.0);

        let result = game.advance(PaddleIntent::default());
        assert_eq!(game.arena().width, 800.0, "Running match keeps its table");
        assert_eq!(game.config().paddle_width, 16.0);
        assert_eq!(result.ai_paddle.x, 752.0);

        game.restart().expect("Resized config is valid");

        assert_eq!(game.arena().width, 1000.0);
        assert_eq!(game.arena().height, 750.0);
        assert_eq!(game.config().paddle_height, 120.0);
        assert_eq!(game.ai_paddle().x, 940.0);
        assert_eq!(game.ball().pos, game.arena().center());
        assert_eq!(game.ball().radius, 12.0);
    }

    #[test]
    fn test_invalid_resize_keeps_current_match() {
        let mut game = new_game();
        game.state_mut().ai_score = 2;
        game.resize_arena(50.0, 600.0);

        assert!(matches!(
            game.restart(),
            Err(ConfigError::ArenaTooNarrow { .. })
        ));
        assert_eq!(game.arena().width, 800.0);
        assert_eq!(game.state().ai_score, 2);
    }

    #[test]
    fn test_summary() {
        let mut game = new_game();
        game.advance_clock(95.5);
        game.state_mut().player_score = 10;
        game.state_mut().ai_score = 7;
        game.state_mut().longest_rally = 12;
        game.advance_clock(30.0); // over, so ignored

        let summary = game.summary();

        assert_eq!(summary.winner, Some(Side::Player));
        assert_eq!(summary.player_score, 10);
        assert_eq!(summary.ai_score, 7);
        assert_eq!(summary.longest_rally, 12);
        assert_eq!(summary.elapsed_secs, 95);
        assert_eq!(summary.mode, GameMode::Classic);
    }
}

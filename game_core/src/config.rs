use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, MatchState, Params, Side};

/// AI difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownDifficulty(s.to_string()))
    }
}

/// Game mode. Only used to file results on the right leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Classic,
    Survival,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Survival => "survival",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(GameMode::Classic),
            "survival" => Ok(GameMode::Survival),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// AI tuning for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiParams {
    /// Fraction of the gap to the target closed per tick, in (0, 1]
    pub reaction_speed: f32,
    /// Targeting noise in pixels
    pub error_margin: f32,
}

impl AiParams {
    pub fn new(reaction_speed: f32, error_margin: f32) -> Self {
        Self {
            reaction_speed,
            error_margin,
        }
    }

    /// Error margin after rubber-banding: tightened when the score is close
    /// or either side is near the target score.
    pub fn effective_error_margin(&self, state: &MatchState) -> f32 {
        if state.is_under_pressure() {
            (self.error_margin * Params::AI_PRESSURE_FACTOR).max(Params::AI_MIN_ERROR_MARGIN)
        } else {
            self.error_margin
        }
    }

    fn validate(&self, difficulty: Difficulty) -> Result<(), ConfigError> {
        if self.reaction_speed.is_nan() || self.reaction_speed <= 0.0 || self.reaction_speed > 1.0 {
            return Err(ConfigError::ReactionSpeedOutOfRange {
                difficulty: difficulty.to_string(),
                value: self.reaction_speed,
            });
        }
        if !self.error_margin.is_finite() || self.error_margin < 0.0 {
            return Err(ConfigError::NegativeErrorMargin {
                difficulty: difficulty.to_string(),
                value: self.error_margin,
            });
        }
        Ok(())
    }
}

/// Difficulty -> AI parameter lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub easy: AiParams,
    pub medium: AiParams,
    pub hard: AiParams,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: AiParams::new(Params::AI_EASY.0, Params::AI_EASY.1),
            medium: AiParams::new(Params::AI_MEDIUM.0, Params::AI_MEDIUM.1),
            hard: AiParams::new(Params::AI_HARD.0, Params::AI_HARD.1),
        }
    }
}

impl DifficultyTable {
    pub fn get(&self, difficulty: Difficulty) -> AiParams {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    /// Look up parameters by string key
    pub fn lookup(&self, key: &str) -> Result<AiParams, ConfigError> {
        Ok(self.get(key.parse()?))
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_max: f32,
    pub ball_speed_increase: f32,
    pub difficulty_table: DifficultyTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_speed: Params::PADDLE_SPEED,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_max: Params::BALL_SPEED_MAX,
            ball_speed_increase: Params::BALL_SPEED_INCREASE,
            difficulty_table: DifficultyTable::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size paddles and ball for an arena of the given size
    pub fn for_arena(width: f32, height: f32) -> Self {
        Self {
            arena_width: width,
            arena_height: height,
            paddle_width: (width * 0.02).floor().max(10.0),
            paddle_height: (height * 0.16).floor().max(80.0),
            ball_radius: (width * 0.012).floor().max(5.0),
            ..Self::default()
        }
    }

    /// Apply an arena-size change. Only takes effect for the next match.
    pub fn resize(&mut self, width: f32, height: f32) {
        let resized = Self::for_arena(width, height);
        self.arena_width = resized.arena_width;
        self.arena_height = resized.arena_height;
        self.paddle_width = resized.paddle_width;
        self.paddle_height = resized.paddle_height;
        self.ball_radius = resized.ball_radius;
    }

    /// Get X position (left edge) for a paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Player => self.paddle_width * 2.0,
            Side::Ai => self.arena_width - self.paddle_width * 3.0,
        }
    }

    /// Clamp paddle Y (top edge) to arena bounds
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.arena_height - self.paddle_height)
    }

    /// Y (top edge) that centers a paddle vertically
    pub fn paddle_rest_y(&self) -> f32 {
        (self.arena_height - self.paddle_height) / 2.0
    }

    pub fn ai_paddle_speed(&self) -> f32 {
        self.paddle_speed * Params::AI_PADDLE_SPEED_FACTOR
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("ball_speed_initial", self.ball_speed_initial),
            ("ball_speed_max", self.ball_speed_max),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !self.ball_speed_increase.is_finite() || self.ball_speed_increase < 0.0 {
            return Err(ConfigError::NonPositive {
                name: "ball_speed_increase",
                value: self.ball_speed_increase,
            });
        }
        if self.paddle_height > self.arena_height {
            return Err(ConfigError::PaddleTallerThanArena {
                paddle: self.paddle_height,
                arena: self.arena_height,
            });
        }
        // Paddles sit one width in from each goal line and must not overlap
        let needed = self.paddle_width * Params::PADDLE_LAYOUT_WIDTHS;
        if self.arena_width < needed {
            return Err(ConfigError::ArenaTooNarrow {
                arena: self.arena_width,
                paddle: self.paddle_width,
                needed,
            });
        }
        if self.ball_radius * 2.0 > self.arena_height {
            return Err(ConfigError::BallLargerThanArena {
                diameter: self.ball_radius * 2.0,
                arena: self.arena_height,
            });
        }
        if self.ball_speed_initial > self.ball_speed_max {
            return Err(ConfigError::InitialSpeedAboveMax {
                initial: self.ball_speed_initial,
                max: self.ball_speed_max,
            });
        }
        for difficulty in Difficulty::ALL {
            self.difficulty_table.get(difficulty).validate(difficulty)?;
        }
        Ok(())
    }
}

use thiserror::Error;

/// Configuration rejected at match start
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("Unknown game mode '{0}' (expected classic or survival)")]
    UnknownMode(String),

    #[error("Target score must be positive")]
    NonPositiveTargetScore,

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("Paddle height {paddle} does not fit in arena height {arena}")]
    PaddleTallerThanArena { paddle: f32, arena: f32 },

    #[error("Arena width {arena} is too narrow for two paddles of width {paddle} (needs {needed})")]
    ArenaTooNarrow { arena: f32, paddle: f32, needed: f32 },

    #[error("Ball diameter {diameter} does not fit in arena height {arena}")]
    BallLargerThanArena { diameter: f32, arena: f32 },

    #[error("Initial ball speed {initial} exceeds max speed {max}")]
    InitialSpeedAboveMax { initial: f32, max: f32 },

    #[error("Reaction speed for {difficulty} must be in (0, 1], got {value}")]
    ReactionSpeedOutOfRange { difficulty: String, value: f32 },

    #[error("Error margin for {difficulty} must be finite and non-negative, got {value}")]
    NegativeErrorMargin { difficulty: String, value: f32 },
}

//! Persistent player-facing records for Pong
//!
//! Settings and the local leaderboard, stored as JSON blobs (the browser
//! shell keeps them in local storage).

pub mod leaderboard;
pub mod settings;

pub use leaderboard::*;
pub use settings::*;

use game_core::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings produce an invalid game config: {0}")]
    Config(#[from] ConfigError),
}

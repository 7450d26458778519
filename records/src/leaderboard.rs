//! Local high score table, one list per game mode

use chrono::NaiveDate;
use game_core::{Difficulty, GameMode, MatchSummary};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::RecordsError;

/// Entries kept per mode
pub const LEADERBOARD_SIZE: usize = 10;

pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub ai_score: u32,
    /// Serialized as YYYY-MM-DD
    pub date: NaiveDate,
    /// Match length in whole seconds
    pub time: u64,
    pub longest_rally: u32,
    pub difficulty: Difficulty,
}

impl LeaderboardEntry {
    pub fn from_summary(name: &str, summary: &MatchSummary, date: NaiveDate) -> Self {
        let name = name.trim();
        Self {
            name: if name.is_empty() {
                ANONYMOUS.to_string()
            } else {
                name.to_string()
            },
            score: summary.player_score,
            ai_score: summary.ai_score,
            date,
            time: summary.elapsed_secs,
            longest_rally: summary.longest_rally,
            difficulty: summary.difficulty,
        }
    }

    /// Match length as MM:SS
    pub fn time_display(&self) -> String {
        format!("{:02}:{:02}", self.time / 60, self.time % 60)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Leaderboard {
    #[serde(deserialize_with = "skip_bad_entries")]
    pub classic: Vec<LeaderboardEntry>,
    #[serde(deserialize_with = "skip_bad_entries")]
    pub survival: Vec<LeaderboardEntry>,
}

/// Keep the readable entries of a stored list, dropping the rest
fn skip_bad_entries<'de, D>(deserializer: D) -> Result<Vec<LeaderboardEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Dropping unreadable leaderboard entry");
                None
            }
        })
        .collect())
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, RecordsError> {
        let mut board: Self = serde_json::from_str(json)?;
        // Blobs edited by hand may be unsorted or oversized
        for mode in [GameMode::Classic, GameMode::Survival] {
            normalize(board.list_mut(mode));
        }
        Ok(board)
    }

    /// Parse a stored blob, falling back to an empty board. Nothing stored
    /// yet is not an error.
    pub fn load_or_default(json: &str) -> Self {
        if json.trim().is_empty() {
            return Self::default();
        }
        Self::from_json(json).unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unreadable leaderboard");
            Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String, RecordsError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn entries(&self, mode: GameMode) -> &[LeaderboardEntry] {
        match mode {
            GameMode::Classic => &self.classic,
            GameMode::Survival => &self.survival,
        }
    }

    /// Add a result. Returns its rank (0-based) if it made the table.
    pub fn record(&mut self, mode: GameMode, entry: LeaderboardEntry) -> Option<usize> {
        let list = self.list_mut(mode);
        // Ties go below existing entries
        let rank = list.partition_point(|e| e.score >= entry.score);
        if rank >= LEADERBOARD_SIZE {
            debug!(%mode, score = entry.score, "Score did not make the leaderboard");
            return None;
        }
        debug!(%mode, rank, name = %entry.name, score = entry.score, "Leaderboard entry recorded");
        list.insert(rank, entry);
        list.truncate(LEADERBOARD_SIZE);
        Some(rank)
    }

    /// Would this score make the table?
    pub fn qualifies(&self, mode: GameMode, score: u32) -> bool {
        let list = self.entries(mode);
        list.len() < LEADERBOARD_SIZE || list.iter().any(|e| score > e.score)
    }

    pub fn clear(&mut self, mode: GameMode) {
        self.list_mut(mode).clear();
    }

    fn list_mut(&mut self, mode: GameMode) -> &mut Vec<LeaderboardEntry> {
        match mode {
            GameMode::Classic => &mut self.classic,
            GameMode::Survival => &mut self.survival,
        }
    }
}

fn normalize(list: &mut Vec<LeaderboardEntry>) {
    list.sort_by(|a, b| b.score.cmp(&a.score));
    list.truncate(LEADERBOARD_SIZE);
}

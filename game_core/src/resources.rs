use serde::{Deserialize, Serialize};

use crate::{Params, Side};

/// Tick counter and wall-clock time for display.
/// Physics never reads `elapsed`; it moves a fixed amount per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    pub ticks: u64,
    pub elapsed: f32, // seconds of unpaused play
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_wall_clock(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    /// Whole seconds formatted as MM:SS
    pub fn display(&self) -> String {
        let secs = self.elapsed.max(0.0) as u64;
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Score, rally bookkeeping and terminal condition for one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub player_score: u32,
    pub ai_score: u32,
    pub current_rally: u32,
    pub longest_rally: u32,
    pub last_scorer: Option<Side>,
    pub target_score: u32,
    pub paddle_hits: u32,
}

impl MatchState {
    pub fn new(target_score: u32) -> Self {
        Self {
            player_score: 0,
            ai_score: 0,
            current_rally: 0,
            longest_rally: 0,
            last_scorer: None,
            target_score,
            paddle_hits: 0,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Ai => self.ai_score,
        }
    }

    /// Count a paddle exchange
    pub fn register_hit(&mut self) {
        self.current_rally += 1;
        self.paddle_hits += 1;
        self.longest_rally = self.longest_rally.max(self.current_rally);
    }

    /// Award a point. Returns true if this point ended the match.
    pub fn award_point(&mut self, scorer: Side) -> bool {
        match scorer {
            Side::Player => self.player_score += 1,
            Side::Ai => self.ai_score += 1,
        }
        self.last_scorer = Some(scorer);
        self.current_rally = 0;
        self.is_over()
    }

    pub fn winner(&self) -> Option<Side> {
        if self.player_score >= self.target_score {
            Some(Side::Player)
        } else if self.ai_score >= self.target_score {
            Some(Side::Ai)
        } else {
            None
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn score_gap(&self) -> u32 {
        self.player_score.abs_diff(self.ai_score)
    }

    /// Close game, or either side within reach of the target
    pub fn is_under_pressure(&self) -> bool {
        let window = Params::AI_PRESSURE_WINDOW;
        let near_target = self.target_score.saturating_sub(window);
        self.score_gap() <= window
            || self.player_score >= near_target
            || self.ai_score >= near_target
    }

    /// Either side one point away from winning
    pub fn is_game_point(&self) -> bool {
        let needed = self.target_score.saturating_sub(1);
        self.player_score == needed || self.ai_score == needed
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(Params::TARGET_SCORE)
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Events {
    pub ball_hit_wall: bool,
    pub paddle_hit: Option<Side>,
    pub scored: Option<Side>,
    pub match_over: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ball_hit_wall = false;
        self.paddle_hit = None;
        self.scored = None;
        self.match_over = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_point_player() {
        let mut state = MatchState::new(10);
        state.current_rally = 4;
        let over = state.award_point(Side::Player);
        assert!(!over);
        assert_eq!(state.player_score, 1);
        assert_eq!(state.ai_score, 0);
        assert_eq!(state.current_rally, 0, "Rally resets on score");
        assert_eq!(state.last_scorer, Some(Side::Player));
        assert_eq!(state.score(Side::Player), 1);
        assert_eq!(state.score(Side::Ai), 0);
    }

    #[test]
    fn test_award_point_ends_match_at_target() {
        let mut state = MatchState::new(10);
        state.player_score = 9;
        state.ai_score = 3;
        assert!(state.award_point(Side::Player), "Player should win at 10");
        assert_eq!(state.player_score, 10);
        assert_eq!(state.winner(), Some(Side::Player));
    }

    #[test]
    fn test_no_winner_below_target() {
        let mut state = MatchState::new(10);
        for _ in 0..9 {
            state.award_point(Side::Ai);
        }
        assert_eq!(state.winner(), None, "No winner below threshold");
        state.award_point(Side::Ai);
        assert_eq!(state.winner(), Some(Side::Ai));
    }

    #[test]
    fn test_register_hit_tracks_longest_rally() {
        let mut state = MatchState::new(10);
        for _ in 0..6 {
            state.register_hit();
        }
        state.award_point(Side::Ai);
        for _ in 0..3 {
            state.register_hit();
        }
        assert_eq!(state.current_rally, 3);
        assert_eq!(state.longest_rally, 6);
        assert_eq!(state.paddle_hits, 9);
    }

    #[test]
    fn test_pressure_rules() {
        let mut state = MatchState::new(10);
        assert!(state.is_under_pressure(), "0-0 is a close game");
        state.player_score = 5;
        state.ai_score = 1;
        assert!(!state.is_under_pressure());
        state.player_score = 8;
        assert!(state.is_under_pressure(), "Within 2 of target");
    }

    #[test]
    fn test_game_point() {
        let mut state = MatchState::new(10);
        state.ai_score = 9;
        assert!(state.is_game_point());
        state.ai_score = 8;
        assert!(!state.is_game_point());
    }

    #[test]
    fn test_time_display() {
        let mut time = Time::new();
        time.advance_wall_clock(125.7);
        assert_eq!(time.display(), "02:05");
        time.advance_wall_clock(-3.0);
        time.advance_wall_clock(f32::NAN);
        assert!((time.elapsed - 125.7).abs() < 1e-3);
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.ball_hit_wall = true;
        events.paddle_hit = Some(Side::Ai);
        events.scored = Some(Side::Player);
        events.match_over = true;

        events.clear();

        assert_eq!(events, Events::default());
    }
}

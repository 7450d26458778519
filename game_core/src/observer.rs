//! Consumers of tick results that sit outside the physics: commentary and
//! match statistics. Audio and rendering hook in the same way.

use std::collections::VecDeque;

use crate::{Config, Params, Side, TickResult};

/// Anything that wants to react to simulation ticks
pub trait TickObserver {
    fn on_tick(&mut self, result: &TickResult);
}

/// Commentary categories. Picking the actual line is up to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Kickoff,
    PlayerScored,
    AiScored,
    CloseGame,
    PlayerWinning,
    AiWinning,
    GamePoint,
    LongRally,
    FastBall,
}

/// Turns tick events into commentary cues
#[derive(Debug, Clone)]
pub struct Commentary {
    enabled: bool,
    fast_ball_speed: f32,
    pending: VecDeque<Cue>,
}

impl Commentary {
    pub fn new(config: &Config) -> Self {
        let mut commentary = Self {
            enabled: true,
            fast_ball_speed: config.ball_speed_initial * Params::FAST_BALL_FACTOR,
            pending: VecDeque::new(),
        };
        commentary.kickoff();
        commentary
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pending.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queue the opening line for a new match
    pub fn kickoff(&mut self) {
        self.push(Cue::Kickoff);
    }

    /// Next cue to show, oldest first
    pub fn next_cue(&mut self) -> Option<Cue> {
        self.pending.pop_front()
    }

    pub fn drain(&mut self) -> Vec<Cue> {
        self.pending.drain(..).collect()
    }

    fn push(&mut self, cue: Cue) {
        if self.enabled {
            self.pending.push_back(cue);
        }
    }

    fn on_paddle_hit(&mut self, result: &TickResult) {
        let rally = result.state.current_rally;
        if rally >= Params::LONG_RALLY_EVERY && rally % Params::LONG_RALLY_EVERY == 0 {
            self.push(Cue::LongRally);
        } else if result.ball.vel.x.abs() > self.fast_ball_speed {
            self.push(Cue::FastBall);
        }
    }

    fn on_score(&mut self, scorer: Side, result: &TickResult) {
        self.push(match scorer {
            Side::Player => Cue::PlayerScored,
            Side::Ai => Cue::AiScored,
        });

        let state = &result.state;
        if state.is_over() {
            return;
        }

        let (player, ai) = (state.player_score, state.ai_score);
        if state.is_game_point() {
            self.push(Cue::GamePoint);
        } else if state.score_gap() <= 2 && player >= 5 {
            self.push(Cue::CloseGame);
        } else if player >= ai + 3 {
            self.push(Cue::PlayerWinning);
        } else if ai >= player + 3 {
            self.push(Cue::AiWinning);
        }
    }
}

impl TickObserver for Commentary {
    fn on_tick(&mut self, result: &TickResult) {
        if result.events.paddle_hit.is_some() {
            self.on_paddle_hit(result);
        }
        if let Some(scorer) = result.score_delta() {
            self.on_score(scorer, result);
        }
    }
}

/// Running totals for the stats screen
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchStats {
    pub ticks: u64,
    pub wall_bounces: u32,
    pub paddle_hits: u32,
    pub points: u32,
    pub fastest_ball: f32, // max |vx| seen
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickObserver for MatchStats {
    fn on_tick(&mut self, result: &TickResult) {
        if !result.advanced {
            return;
        }
        self.ticks += 1;
        if result.events.ball_hit_wall {
            self.wall_bounces += 1;
        }
        self.paddle_hits += result.rally_delta;
        if result.events.scored.is_some() {
            self.points += 1;
        }
        self.fastest_ball = self.fastest_ball.max(result.ball.vel.x.abs());
    }
}

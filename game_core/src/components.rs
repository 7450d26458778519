use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{AiParams, Aabb, Config, GameRng, Params};

/// Which end of the table an entity or event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player, // left
    Ai,     // right
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// Horizontal direction pointing at this side's goal line
    pub fn goal_direction(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Ai => 1.0,
        }
    }
}

/// Paddle component
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub x: f32, // left edge
    pub y: f32, // top edge (clamped to arena)
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Paddle {
    pub fn new(side: Side, x: f32, y: f32, width: f32, height: f32, speed: f32) -> Self {
        Self {
            side,
            x,
            y,
            width,
            height,
            speed,
        }
    }

    /// Paddle at its resting position for the given side
    pub fn spawn(config: &Config, side: Side) -> Self {
        let speed = match side {
            Side::Player => config.paddle_speed,
            Side::Ai => config.ai_paddle_speed(),
        };
        Self::new(
            side,
            config.paddle_x(side),
            config.paddle_rest_y(),
            config.paddle_width,
            config.paddle_height,
            speed,
        )
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.y),
            Vec2::new(self.x + self.width, self.y + self.height),
        )
    }

    /// Normalized contact point: -1 at the top edge, 0 at the center, 1 at
    /// the bottom edge. Can fall outside [-1, 1] for corner hits.
    pub fn hit_offset(&self, ball_y: f32) -> f32 {
        (ball_y - self.center_y()) / (self.height / 2.0)
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub max_speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, max_speed: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            max_speed,
        }
    }

    /// Stationary ball at the center of the table
    pub fn at_rest(config: &Config) -> Self {
        Self::new(
            Vec2::new(config.arena_width / 2.0, config.arena_height / 2.0),
            Vec2::ZERO,
            config.ball_radius,
            config.ball_speed_max,
        )
    }

    /// Bounding square of the ball
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::splat(self.radius * 2.0))
    }

    /// Re-center the ball and launch it at a random angle within 45° of
    /// horizontal. `toward` picks the side it travels to; `None` flips a coin.
    pub fn launch(&mut self, center: Vec2, speed: f32, toward: Option<Side>, rng: &mut GameRng) {
        self.pos = center;

        let angle: f32 = rng
            .0
            .gen_range(-Params::BALL_LAUNCH_ANGLE..=Params::BALL_LAUNCH_ANGLE);
        let toward = toward.unwrap_or_else(|| {
            if rng.0.gen_bool(0.5) {
                Side::Ai
            } else {
                Side::Player
            }
        });

        self.vel = Vec2::new(
            angle.cos() * speed * toward.goal_direction(),
            angle.sin() * speed,
        );
    }
}

/// Normalized player input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleIntent {
    pub up: bool,
    pub down: bool,
}

impl PaddleIntent {
    pub fn new(up: bool, down: bool) -> Self {
        Self { up, down }
    }

    pub fn up() -> Self {
        Self::new(true, false)
    }

    pub fn down() -> Self {
        Self::new(false, true)
    }

    /// -1 = up, 0 = stop, 1 = down. Both pressed cancel out.
    pub fn dir(&self) -> i8 {
        match (self.up, self.down) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

/// Marks the AI-driven paddle and carries its tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiController {
    pub params: AiParams,
    pub target_y: f32,
}

impl AiController {
    pub fn new(params: AiParams, target_y: f32) -> Self {
        Self { params, target_y }
    }
}

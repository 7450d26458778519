use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Config;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Overlap test, touching edges count as overlap
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// The table. Fixed for the lifetime of a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.arena_width, config.arena_height)
    }

    /// Ball spawn point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a vertical span of `extent` starting at `y` to the arena
    pub fn clamp_y(&self, y: f32, extent: f32) -> f32 {
        y.clamp(0.0, (self.height - extent).max(0.0))
    }

    /// Fold a straight-line Y projection back into [0, height], mirroring
    /// across the walls as a bouncing ball would. Closed form, so the cost
    /// does not depend on how many bounces the projection spans.
    pub fn fold_y(&self, y: f32) -> f32 {
        if self.height <= 0.0 || !y.is_finite() {
            return self.height / 2.0;
        }
        let period = self.height * 2.0;
        let m = y.rem_euclid(period);
        if m > self.height {
            period - m
        } else {
            m
        }
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_single_bounce() {
        let arena = Arena::new(800.0, 600.0);
        assert!((arena.fold_y(-10.0) - 10.0).abs() < 1e-3);
        assert!((arena.fold_y(610.0) - 590.0).abs() < 1e-3);
    }

    #[test]
    fn test_fold_in_range_is_identity() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.fold_y(0.0), 0.0);
        assert_eq!(arena.fold_y(250.0), 250.0);
        assert_eq!(arena.fold_y(600.0), 600.0);
    }

    #[test]
    fn test_fold_multiple_bounces() {
        let arena = Arena::new(800.0, 600.0);
        // Down past the bottom, back up past the top
        assert!((arena.fold_y(1250.0) - 50.0).abs() < 1e-3);
        assert!((arena.fold_y(-650.0) - 550.0).abs() < 1e-3);
        // Huge projections stay bounded
        let far = arena.fold_y(1.0e7 + 123.0);
        assert!((0.0..=600.0).contains(&far));
    }

    #[test]
    fn test_clamp_y() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.clamp_y(-5.0, 96.0), 0.0);
        assert_eq!(arena.clamp_y(590.0, 96.0), 504.0);
        assert_eq!(arena.clamp_y(100.0, 96.0), 100.0);
    }

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let touching = Aabb::new(Vec2::new(10.0, 5.0), Vec2::new(20.0, 15.0));
        let apart = Aabb::new(Vec2::new(11.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
    }
}

//! Bricks

use serde::{Deserialize, Serialize};

use super::vector::{Rect, Vector2};
use crate::consts::*;

/// Brick variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickKind {
    /// Breaks in one hit
    Normal,
    /// Takes several hits depending on level tier
    Strong,
}

impl BrickKind {
    /// Points awarded per hit
    pub fn score_value(self) -> u32 {
        match self {
            BrickKind::Normal => 100,
            BrickKind::Strong => 200,
        }
    }
}

/// A static brick. `position` is the top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub kind: BrickKind,
    pub position: Vector2,
    pub width: f64,
    pub height: f64,
    hit_points: u32,
    max_hit_points: u32,
    pub score_value: u32,
    to_be_removed: bool,
}

impl Brick {
    pub fn normal(id: u32, position: Vector2) -> Self {
        Self::new(id, BrickKind::Normal, position, 1)
    }

    pub fn strong(id: u32, position: Vector2, hit_points: u32) -> Self {
        Self::new(id, BrickKind::Strong, position, hit_points)
    }

    fn new(id: u32, kind: BrickKind, position: Vector2, hit_points: u32) -> Self {
        let hit_points = hit_points.max(1);
        Self {
            id,
            kind,
            position,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            hit_points,
            max_hit_points: hit_points,
            score_value: kind.score_value(),
            to_be_removed: false,
        }
    }

    pub fn hit_points(&self) -> u32 {
        self.hit_points
    }

    pub fn max_hit_points(&self) -> u32 {
        self.max_hit_points
    }

    /// Set once hit points reach zero, never before
    pub fn is_to_be_removed(&self) -> bool {
        self.to_be_removed
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Take one hit. Returns true if this hit destroyed the brick.
    pub fn on_hit(&mut self) -> bool {
        if self.to_be_removed {
            return false;
        }
        self.hit_points = self.hit_points.saturating_sub(1);
        if self.hit_points == 0 {
            self.to_be_removed = true;
            log::debug!("Brick {} destroyed (+{})", self.id, self.score_value);
            true
        } else {
            log::debug!(
                "Brick {} hit, {}/{} HP left",
                self.id,
                self.hit_points,
                self.max_hit_points
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normal_brick_breaks_in_one_hit() {
        let mut brick = Brick::normal(1, Vector2::new(10.0, 10.0));
        assert_eq!(brick.score_value, 100);
        assert!(!brick.is_to_be_removed());
        assert!(brick.on_hit());
        assert!(brick.is_to_be_removed());
        assert_eq!(brick.hit_points(), 0);
    }

    #[test]
    fn test_strong_brick_needs_two_hits() {
        let mut brick = Brick::strong(1, Vector2::ZERO, 2);
        assert_eq!(brick.score_value, 200);
        assert!(!brick.on_hit());
        assert!(!brick.is_to_be_removed());
        assert_eq!(brick.hit_points(), 1);
        assert!(brick.on_hit());
        assert!(brick.is_to_be_removed());
    }

    #[test]
    fn test_destroyed_brick_ignores_further_hits() {
        let mut brick = Brick::normal(1, Vector2::ZERO);
        assert!(brick.on_hit());
        assert!(!brick.on_hit());
        assert_eq!(brick.hit_points(), 0);
    }

    #[test]
    fn test_rect_uses_top_left() {
        let brick = Brick::normal(1, Vector2::new(50.0, 200.0));
        let rect = brick.rect();
        assert_eq!(rect.left(), 50.0);
        assert_eq!(rect.right(), 50.0 + BRICK_WIDTH);
        assert_eq!(rect.bottom(), 200.0 + BRICK_HEIGHT);
    }

    proptest! {
        #[test]
        fn prop_hit_points_monotonic(hp in 1u32..6, hits in 0usize..10) {
            let mut brick = Brick::strong(1, Vector2::ZERO, hp);
            let mut last = brick.hit_points();
            for _ in 0..hits {
                brick.on_hit();
                prop_assert!(brick.hit_points() <= last);
                prop_assert_eq!(brick.is_to_be_removed(), brick.hit_points() == 0);
                last = brick.hit_points();
            }
        }
    }
}

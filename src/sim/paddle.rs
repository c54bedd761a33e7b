//! The player's paddle

use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use super::vector::{Rect, Vector2};
use crate::consts::*;

/// Discrete paddle intents decoded by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleIntent {
    Left,
    Right,
    Stop,
}

/// Player-controlled rectangle. `body.position` is the paddle centre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub body: KinematicBody,
    pub width: f64,
    pub height: f64,
    /// Width to revert to when a size effect ends
    pub original_width: f64,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            body: KinematicBody::at(Self::start_position()),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            original_width: PADDLE_WIDTH,
        }
    }
}

impl Paddle {
    /// Start-of-level centre position
    pub fn start_position() -> Vector2 {
        Vector2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - PADDLE_OFFSET_Y)
    }

    pub fn x(&self) -> f64 {
        self.body.position.x
    }

    pub fn y(&self) -> f64 {
        self.body.position.y
    }

    /// Y coordinate of the top edge
    pub fn top(&self) -> f64 {
        self.y() - self.height / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.body.position, self.width, self.height)
    }

    pub fn apply_intent(&mut self, intent: PaddleIntent, speed: f64) {
        let vx = match intent {
            PaddleIntent::Left => -speed,
            PaddleIntent::Right => speed,
            PaddleIntent::Stop => 0.0,
        };
        self.body.set_velocity(Vector2::new(vx, 0.0));
    }

    /// Integrate and keep the paddle between the side walls
    pub fn update(&mut self, dt: f64) {
        self.body.integrate(dt);
        self.clamp_to_walls();
    }

    /// Pin the paddle inside the play area, stopping it at a wall
    pub fn clamp_to_walls(&mut self) {
        let min_x = INSET + self.width / 2.0;
        let max_x = SCREEN_WIDTH - INSET - self.width / 2.0;
        if self.body.position.x < min_x {
            self.body.position.x = min_x;
            self.body.velocity.x = 0.0;
        }
        if self.body.position.x > max_x {
            self.body.position.x = max_x;
            self.body.velocity.x = 0.0;
        }
    }

    /// Scale width relative to the original (not cumulative)
    pub fn expand(&mut self, factor: f64) {
        self.width = self.original_width * factor;
        log::debug!("Paddle expanded to {:.1}", self.width);
    }

    pub fn reset_width(&mut self) {
        self.width = self.original_width;
        log::debug!("Paddle width reset to {:.1}", self.width);
    }

    /// Back to start-of-level position, stationary, original width
    pub fn reset(&mut self) {
        self.body = KinematicBody::at(Self::start_position());
        self.reset_width();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_with_intent() {
        let mut paddle = Paddle::default();
        let start_x = paddle.x();
        paddle.apply_intent(PaddleIntent::Right, 400.0);
        paddle.update(0.1);
        assert!((paddle.x() - (start_x + 40.0)).abs() < 1e-9);

        paddle.apply_intent(PaddleIntent::Stop, 400.0);
        paddle.update(0.1);
        assert!((paddle.x() - (start_x + 40.0)).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_at_left_wall() {
        let mut paddle = Paddle::default();
        paddle.apply_intent(PaddleIntent::Left, 400.0);
        for _ in 0..200 {
            paddle.update(1.0 / 60.0);
        }
        assert_eq!(paddle.x(), INSET + PADDLE_WIDTH / 2.0);
        assert_eq!(paddle.body.velocity.x, 0.0);
    }

    #[test]
    fn test_clamped_at_right_wall() {
        let mut paddle = Paddle::default();
        paddle.apply_intent(PaddleIntent::Right, 400.0);
        for _ in 0..200 {
            paddle.update(1.0 / 60.0);
        }
        assert_eq!(paddle.x(), SCREEN_WIDTH - INSET - PADDLE_WIDTH / 2.0);
    }

    #[test]
    fn test_expand_is_relative_to_original() {
        let mut paddle = Paddle::default();
        paddle.expand(1.5);
        paddle.expand(1.5);
        assert_eq!(paddle.width, PADDLE_WIDTH * 1.5);
        paddle.reset_width();
        assert_eq!(paddle.width, paddle.original_width);
    }

    #[test]
    fn test_rect_is_centred() {
        let paddle = Paddle::default();
        let rect = paddle.rect();
        assert_eq!(rect.center(), paddle.body.position);
        assert_eq!(rect.top(), paddle.top());
    }
}

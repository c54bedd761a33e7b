//! Collision detection and response
//!
//! Only axis-aligned rectangles and the ball's circle ever collide. Every
//! check both detects and resolves, leaving the ball outside the surface it
//! hit so the same contact cannot re-trigger next tick.

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::brick::Brick;
use super::paddle::Paddle;
use super::vector::{Vector2, is_finite};
use crate::consts::*;

/// Paddle bounce angle (radians) for a contact point.
///
/// The contact is expressed as a fraction of the paddle half-width and
/// clamped so the ball never leaves flatter than 48°.
pub fn bounce_angle(ball_x: f64, paddle_x: f64, paddle_width: f64) -> f64 {
    let hit_position = ((ball_x - paddle_x) / (paddle_width / 2.0))
        .clamp(-MAX_HIT_POSITION, MAX_HIT_POSITION);
    // NaN (zero-width paddle at its own centre) bounces straight up
    let hit_position = if hit_position.is_nan() { 0.0 } else { hit_position };
    (hit_position * MAX_BOUNCE_ANGLE_DEG).to_radians()
}

/// Outgoing velocity for a paddle bounce.
///
/// Speed boosts survive the bounce but the ball never leaves slower than
/// the floor; a degenerate incoming velocity falls back to the floor.
pub fn paddle_bounce_velocity(angle: f64, incoming: Vector2, base_speed: f64) -> Vector2 {
    let floor = base_speed * BALL_SPEED_FLOOR_FACTOR;
    let current = if is_finite(incoming) { incoming.length() } else { 0.0 };
    let speed = current.max(floor);
    Vector2::new(speed * angle.sin(), -(speed * angle.cos()).abs())
}

/// Ball vs paddle. Only a descending ball bounces.
pub fn ball_paddle_collision(ball: &mut Ball, paddle: &Paddle, base_speed: f64) -> bool {
    if !ball.active || ball.vel().y <= 0.0 {
        return false;
    }
    if !ball.bounds().overlaps(&paddle.rect()) {
        return false;
    }

    let angle = bounce_angle(ball.pos().x, paddle.x(), paddle.width);
    ball.body.velocity = paddle_bounce_velocity(angle, ball.vel(), base_speed);
    ball.body.position.y = paddle.top() - ball.radius - 1.0;
    log::debug!(
        "Paddle bounce at {:.1}° -> ({:.1}, {:.1})",
        angle.to_degrees(),
        ball.vel().x,
        ball.vel().y
    );
    true
}

/// How a brick contact was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickBounce {
    /// Piercing ball passed through
    Pierced,
    /// Side contact, x velocity inverted
    Horizontal,
    /// Top/bottom contact, y velocity inverted
    Vertical,
}

pub fn ball_brick_overlap(ball: &Ball, brick: &Brick) -> bool {
    ball.bounds().overlaps(&brick.rect())
}

/// Index of the first live brick the ball overlaps, in iteration order
pub fn first_brick_hit(ball: &Ball, bricks: &[Brick]) -> Option<usize> {
    bricks
        .iter()
        .position(|brick| !brick.is_to_be_removed() && ball_brick_overlap(ball, brick))
}

/// Reflect off the nearest brick edge.
///
/// Ties between a side edge and a top/bottom edge resolve horizontally.
pub fn resolve_brick_bounce(ball: &mut Ball, brick: &Brick) -> BrickBounce {
    if ball.pierce {
        return BrickBounce::Pierced;
    }

    let rect = brick.rect();
    let pos = ball.pos();
    let left = (pos.x - rect.left()).abs();
    let right = (pos.x - rect.right()).abs();
    let top = (pos.y - rect.top()).abs();
    let bottom = (pos.y - rect.bottom()).abs();
    let min = left.min(right).min(top).min(bottom);

    if min == left || min == right {
        ball.body.velocity.x = -ball.body.velocity.x;
        BrickBounce::Horizontal
    } else {
        ball.body.velocity.y = -ball.body.velocity.y;
        BrickBounce::Vertical
    }
}

/// Which walls a ball touched this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top
    }
}

/// Ball vs side walls and ceiling (the bottom is open)
pub fn ball_wall_collision(ball: &mut Ball) -> WallHits {
    let mut hits = WallHits::default();
    if !ball.active {
        return hits;
    }
    let r = ball.radius;

    if ball.pos().x - r <= INSET {
        ball.body.velocity.x = ball.body.velocity.x.abs();
        ball.body.position.x = INSET + r + 1.0;
        hits.left = true;
    }
    if ball.pos().x + r >= SCREEN_WIDTH - INSET {
        ball.body.velocity.x = -ball.body.velocity.x.abs();
        ball.body.position.x = SCREEN_WIDTH - INSET - r - 1.0;
        hits.right = true;
    }
    if ball.pos().y - r <= UPPER_INSET {
        ball.body.velocity.y = ball.body.velocity.y.abs();
        ball.body.position.y = UPPER_INSET + r + 1.0;
        hits.top = true;
    }
    hits
}

/// Ball has dropped past the bottom edge
pub fn ball_lost(ball: &Ball) -> bool {
    ball.pos().y + ball.radius >= SCREEN_HEIGHT
}

//! Balls and the session's ball collection

use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use super::paddle::Paddle;
use super::vector::{Rect, Vector2, with_min_magnitude};
use crate::consts::*;

/// Default ball colour (RGB)
pub const BALL_COLOR: u32 = 0xFF_FF_FF;
/// Colour of a piercing ball (RGB)
pub const PIERCE_COLOR: u32 = 0xFF_00_00;

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub body: KinematicBody,
    pub radius: f64,
    /// Free-flying (launched)
    pub active: bool,
    /// Attached to the paddle, waiting for launch
    pub on_paddle: bool,
    /// Damages bricks without bouncing off them
    pub pierce: bool,
    pub color: u32,
}

impl Ball {
    /// New ball attached to the paddle
    pub fn attached(id: u32, paddle: &Paddle) -> Self {
        let mut ball = Self {
            id,
            body: KinematicBody::default(),
            radius: BALL_RADIUS,
            active: false,
            on_paddle: true,
            pierce: false,
            color: BALL_COLOR,
        };
        ball.follow_paddle(paddle);
        ball
    }

    /// New free-flying ball
    pub fn free(id: u32, position: Vector2, velocity: Vector2) -> Self {
        Self {
            id,
            body: KinematicBody {
                position,
                velocity,
                acceleration: Vector2::ZERO,
            },
            radius: BALL_RADIUS,
            active: true,
            on_paddle: false,
            pierce: false,
            color: BALL_COLOR,
        }
    }

    pub fn pos(&self) -> Vector2 {
        self.body.position
    }

    pub fn vel(&self) -> Vector2 {
        self.body.velocity
    }

    /// Bounding box of the ball
    pub fn bounds(&self) -> Rect {
        Rect::around_circle(self.body.position, self.radius)
    }

    /// Slave position to the paddle while attached
    pub fn follow_paddle(&mut self, paddle: &Paddle) {
        if self.on_paddle {
            self.body.position = Vector2::new(paddle.x(), paddle.top() - self.radius - 1.0);
        }
    }

    /// Leave the paddle heading straight up
    pub fn launch(&mut self, speed: f64) {
        if !self.on_paddle {
            return;
        }
        self.on_paddle = false;
        self.active = true;
        self.body.set_velocity(Vector2::new(0.0, -speed));
    }

    /// Integrate a free ball and keep it from going purely vertical
    pub fn update(&mut self, dt: f64) {
        if !self.active {
            return;
        }
        self.body.integrate(dt);

        let vel = &mut self.body.velocity;
        if vel.x.abs() < BALL_MIN_HORIZONTAL_SPEED && vel.y.abs() > 0.0 {
            vel.x = with_min_magnitude(vel.x, BALL_MIN_HORIZONTAL_SPEED);
        }
    }

    pub fn set_pierce(&mut self, pierce: bool) {
        self.pierce = pierce;
        self.color = if pierce { PIERCE_COLOR } else { BALL_COLOR };
    }
}

/// The canonical ball list, owned by the session.
///
/// Effects get this narrow add/inspect interface rather than the raw `Vec`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BallSet {
    balls: Vec<Ball>,
    next_id: u32,
}

impl BallSet {
    pub fn new() -> Self {
        Self {
            balls: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ball> {
        self.balls.iter_mut()
    }

    pub fn first(&self) -> Option<&Ball> {
        self.balls.first()
    }

    pub fn first_mut(&mut self) -> Option<&mut Ball> {
        self.balls.first_mut()
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    pub fn as_slice(&self) -> &[Ball] {
        &self.balls
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    /// Add a ball attached to the paddle; returns its id
    pub fn spawn_attached(&mut self, paddle: &Paddle) -> u32 {
        let id = self.allocate_id();
        self.balls.push(Ball::attached(id, paddle));
        id
    }

    /// Add a free-flying ball; returns its id
    pub fn spawn_free(&mut self, position: Vector2, velocity: Vector2) -> u32 {
        let id = self.allocate_id();
        self.balls.push(Ball::free(id, position, velocity));
        id
    }

    /// Remove every ball whose id is listed
    pub fn remove_all(&mut self, ids: &[u32]) {
        if !ids.is_empty() {
            self.balls.retain(|b| !ids.contains(&b.id));
        }
    }

    pub fn clear(&mut self) {
        self.balls.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attached_ball_sits_above_paddle() {
        let paddle = Paddle::default();
        let ball = Ball::attached(1, &paddle);
        assert!(ball.on_paddle);
        assert!(!ball.active);
        assert_eq!(ball.pos().x, paddle.x());
        assert_eq!(ball.pos().y, paddle.top() - BALL_RADIUS - 1.0);
    }

    #[test]
    fn test_attached_ball_does_not_integrate() {
        let paddle = Paddle::default();
        let mut ball = Ball::attached(1, &paddle);
        ball.body.velocity = Vector2::new(0.0, -100.0);
        let before = ball.pos();
        ball.update(0.5);
        assert_eq!(ball.pos(), before);
    }

    #[test]
    fn test_launch() {
        let paddle = Paddle::default();
        let mut ball = Ball::attached(1, &paddle);
        ball.launch(350.0);
        assert!(ball.active);
        assert!(!ball.on_paddle);
        assert_eq!(ball.vel(), Vector2::new(0.0, -350.0));

        // Launching again is a no-op
        ball.body.velocity = Vector2::new(10.0, 10.0);
        ball.launch(350.0);
        assert_eq!(ball.vel(), Vector2::new(10.0, 10.0));
    }

    #[test]
    fn test_horizontal_speed_floor() {
        let mut ball = Ball::free(1, Vector2::new(200.0, 300.0), Vector2::new(0.0, -350.0));
        ball.update(1.0 / 60.0);
        assert_eq!(ball.vel().x, 50.0);

        let mut ball = Ball::free(2, Vector2::new(200.0, 300.0), Vector2::new(-10.0, 200.0));
        ball.update(1.0 / 60.0);
        assert_eq!(ball.vel().x, -50.0);

        // Stationary ball is left alone
        let mut ball = Ball::free(3, Vector2::new(200.0, 300.0), Vector2::ZERO);
        ball.update(1.0 / 60.0);
        assert_eq!(ball.vel(), Vector2::ZERO);
    }

    #[test]
    fn test_pierce_sets_color() {
        let mut ball = Ball::free(1, Vector2::ZERO, Vector2::ZERO);
        ball.set_pierce(true);
        assert_eq!(ball.color, PIERCE_COLOR);
        ball.set_pierce(false);
        assert_eq!(ball.color, BALL_COLOR);
    }

    #[test]
    fn test_ball_set_ids_and_removal() {
        let paddle = Paddle::default();
        let mut balls = BallSet::new();
        let a = balls.spawn_attached(&paddle);
        let b = balls.spawn_free(Vector2::new(100.0, 100.0), Vector2::new(50.0, -50.0));
        let c = balls.spawn_free(Vector2::new(120.0, 100.0), Vector2::new(50.0, -50.0));
        assert_eq!(balls.len(), 3);
        assert!(a != b && b != c);

        balls.remove_all(&[b]);
        assert_eq!(balls.len(), 2);
        assert!(balls.get_mut(b).is_none());
        assert_eq!(balls.first().map(|ball| ball.id), Some(a));
    }
}

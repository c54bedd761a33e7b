//! Kinematic body shared by the paddle and balls

use serde::{Deserialize, Serialize};

use super::vector::Vector2;

/// Position / velocity / acceleration integrator.
///
/// Forces accumulate into `acceleration` and are consumed by the next
/// [`KinematicBody::integrate`] call, so a force source must re-apply every
/// step to act continuously.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub position: Vector2,
    pub velocity: Vector2,
    pub acceleration: Vector2,
}

impl KinematicBody {
    pub fn at(position: Vector2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Semi-implicit Euler step: velocity first, then position
    pub fn integrate(&mut self, dt: f64) {
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.acceleration = Vector2::ZERO;
    }

    pub fn apply_force(&mut self, force: Vector2) {
        self.acceleration += force;
    }

    /// Direct velocity override, bypassing acceleration
    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_updates_before_position() {
        let mut body = KinematicBody::at(Vector2::ZERO);
        body.apply_force(Vector2::new(10.0, 0.0));
        body.integrate(0.5);
        // v = 0 + 10 * 0.5 = 5, p = 0 + 5 * 0.5 = 2.5
        assert_eq!(body.velocity, Vector2::new(5.0, 0.0));
        assert_eq!(body.position, Vector2::new(2.5, 0.0));
    }

    #[test]
    fn test_acceleration_consumed_each_step() {
        let mut body = KinematicBody::at(Vector2::ZERO);
        body.apply_force(Vector2::new(0.0, 4.0));
        body.integrate(1.0);
        assert_eq!(body.acceleration, Vector2::ZERO);
        body.integrate(1.0);
        // No new force: velocity unchanged
        assert_eq!(body.velocity, Vector2::new(0.0, 4.0));
        assert_eq!(body.position, Vector2::new(0.0, 8.0));
    }

    #[test]
    fn test_velocity_override() {
        let mut body = KinematicBody::at(Vector2::new(1.0, 1.0));
        body.set_velocity(Vector2::new(-3.0, 4.0));
        assert_eq!(body.speed(), 5.0);
        body.integrate(2.0);
        assert_eq!(body.position, Vector2::new(-5.0, 9.0));
    }
}

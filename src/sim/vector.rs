//! 2D vector helpers and axis-aligned rectangles
//!
//! Points and velocities are plain `glam::DVec2` values.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Position / velocity / acceleration value type
pub type Vector2 = DVec2;

/// Rotate a vector by `angle` radians (counter-clockwise in math coordinates)
#[inline]
pub fn rotate(v: Vector2, angle: f64) -> Vector2 {
    let (sin, cos) = angle.sin_cos();
    Vector2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Raise `value` to at least `min` in magnitude, keeping its sign.
/// Zero counts as positive.
#[inline]
pub fn with_min_magnitude(value: f64, min: f64) -> f64 {
    if value.abs() >= min {
        value
    } else if value >= 0.0 {
        min
    } else {
        -min
    }
}

#[inline]
pub fn is_finite(v: Vector2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w`×`h` centred on `center`
    pub fn from_center(center: Vector2, w: f64, h: f64) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    /// Bounding box of a circle
    pub fn around_circle(center: Vector2, radius: f64) -> Self {
        Self::from_center(center, radius * 2.0, radius * 2.0)
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Overlap test; touching edges count as overlapping
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && self.right() >= other.left()
            && self.top() <= other.bottom()
            && self.bottom() >= other.top()
    }

    pub fn contains(&self, p: Vector2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_quarter_turn() {
        let v = rotate(Vector2::new(1.0, 0.0), FRAC_PI_2);
        assert!(v.x.abs() < 1e-12);
        assert!((v.y - 1.0).abs() < 1e-12);
        // Length is preserved
        let w = rotate(Vector2::new(3.0, -4.0), 0.3);
        assert!((w.length() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_with_min_magnitude() {
        assert_eq!(with_min_magnitude(10.0, 50.0), 50.0);
        assert_eq!(with_min_magnitude(-10.0, 50.0), -50.0);
        assert_eq!(with_min_magnitude(0.0, 50.0), 50.0);
        assert_eq!(with_min_magnitude(-80.0, 50.0), -80.0);
    }

    #[test]
    fn test_rect_overlap_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Rect::new(10.1, 0.0, 5.0, 5.0)));
        assert!(a.overlaps(&Rect::new(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_rect_from_center() {
        let r = Rect::from_center(Vector2::new(100.0, 50.0), 80.0, 20.0);
        assert_eq!(r.left(), 60.0);
        assert_eq!(r.right(), 140.0);
        assert_eq!(r.top(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vector2::new(100.0, 50.0));
        assert!(r.contains(Vector2::new(60.0, 60.0)));
    }
}

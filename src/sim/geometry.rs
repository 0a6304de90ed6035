//! Axis-aligned geometry for the rectangular play field
//!
//! Everything in the field is either a rectangle (paddle, bricks, pickups) or
//! the ball, which collides as a point with bricks and as a circle with walls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, origin at the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build a rect of size `w`×`h` centered on `center`
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict interior containment: a point on an edge is outside
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.right() && p.y > self.y && p.y < self.bottom()
    }

    /// Strict horizontal containment (used for the paddle span)
    pub fn spans_x(&self, x: f32) -> bool {
        x > self.x && x < self.right()
    }

    /// Overlap test; touching edges count as intersecting
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }
}

/// Field axis a surface is perpendicular to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Side walls (normal along x)
    X,
    /// Ceiling, paddle and brick faces (normal along y)
    Y,
}

impl Axis {
    /// Unit surface normal for this axis
    #[inline]
    pub fn normal(self) -> Vec2 {
        match self {
            Axis::X => Vec2::X,
            Axis::Y => Vec2::Y,
        }
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n. With an axis normal this only flips
/// the sign of one component, so the magnitude is preserved exactly.
#[inline]
pub fn reflect_velocity(velocity: Vec2, axis: Axis) -> Vec2 {
    let normal = axis.normal();
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// True if a circle centered at `pos` would leave `[radius, extent - radius]`
#[inline]
pub fn leaves_span(pos: f32, radius: f32, extent: f32) -> bool {
    pos < radius || pos > extent - radius
}

/// Clamp a circle center so the whole circle stays inside a `w`×`h` field
pub fn clamp_circle(pos: Vec2, radius: f32, w: f32, h: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, (w - radius).max(radius)),
        pos.y.clamp(radius, (h - radius).max(radius)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_contains_point_is_strict() {
        let rect = Rect::new(30.0, 30.0, 75.0, 20.0);
        assert!(rect.contains_point(Vec2::new(60.0, 40.0)));
        // Edges are outside
        assert!(!rect.contains_point(Vec2::new(30.0, 40.0)));
        assert!(!rect.contains_point(Vec2::new(105.0, 40.0)));
        assert!(!rect.contains_point(Vec2::new(60.0, 30.0)));
        assert!(!rect.contains_point(Vec2::new(60.0, 50.0)));
    }

    #[test]
    fn test_intersects_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 5.0, 10.0, 10.0);
        let c = Rect::new(10.5, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_centered_rect() {
        let rect = Rect::centered(Vec2::new(50.0, 50.0), 16.0, 16.0);
        assert_eq!(rect.x, 42.0);
        assert_eq!(rect.y, 42.0);
        assert_eq!(rect.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_reflect_flips_one_component() {
        let v = Vec2::new(3.0, -3.0);
        assert_eq!(reflect_velocity(v, Axis::X), Vec2::new(-3.0, -3.0));
        assert_eq!(reflect_velocity(v, Axis::Y), Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_leaves_span() {
        assert!(leaves_span(7.0, 8.0, 800.0));
        assert!(leaves_span(793.0, 8.0, 800.0));
        assert!(!leaves_span(8.0, 8.0, 800.0));
        assert!(!leaves_span(400.0, 8.0, 800.0));
    }

    #[test]
    fn test_clamp_circle() {
        let p = clamp_circle(Vec2::new(-5.0, 900.0), 8.0, 800.0, 600.0);
        assert_eq!(p, Vec2::new(8.0, 592.0));
    }

    proptest! {
        #[test]
        fn reflection_preserves_magnitudes(vx in -50.0f32..50.0, vy in -50.0f32..50.0) {
            let v = Vec2::new(vx, vy);
            let rx = reflect_velocity(v, Axis::X);
            prop_assert_eq!(rx.x.abs(), vx.abs());
            prop_assert_eq!(rx.y, vy);
            let ry = reflect_velocity(v, Axis::Y);
            prop_assert_eq!(ry.x, vx);
            prop_assert_eq!(ry.y.abs(), vy.abs());
        }
    }
}

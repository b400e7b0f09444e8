//! Collision primitives shared by every game
//!
//! Screen-space convention: x grows to the right, y grows downward.
//! All overlap tests use open intervals, so shapes that merely touch
//! do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle from top-left corner and size
    pub fn from_origin(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    /// Rectangle centered on `center` with the given full size
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }

    /// Bounding box of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::from_center(center, Vec2::splat(radius * 2.0))
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Translate in place
    pub fn offset(&mut self, delta: Vec2) {
        self.left += delta.x;
        self.right += delta.x;
        self.top += delta.y;
        self.bottom += delta.y;
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        aabb_overlap(self, other)
    }
}

/// True iff the distance between centers is strictly less than `r1 + r2`
#[inline]
pub fn circles_overlap(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    let reach = r1 + r2;
    c1.distance_squared(c2) < reach * reach
}

/// Rectangle intersection with open intervals at the boundaries
#[inline]
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.left < b.right && b.left < a.right && a.top < b.bottom && b.top < a.bottom
}

/// Contact offset from the paddle center, normalized to the half-width
///
/// Returns a value in [-1, 1]: -1 at the left edge, 0 dead center, 1 at the
/// right edge. Callers scale this into the horizontal "spin" they impart.
#[inline]
pub fn paddle_spin(contact_x: f32, paddle_center_x: f32, half_width: f32) -> f32 {
    ((contact_x - paddle_center_x) / half_width).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_touching_circles_do_not_overlap() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!(!circles_overlap(a, 4.0, b, 6.0));
        assert!(circles_overlap(a, 4.0, b, 6.1));
    }

    #[test]
    fn test_concentric_circles_overlap() {
        let c = Vec2::new(3.0, -2.0);
        assert!(circles_overlap(c, 1.0, c, 1.0));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 20.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 20.0);
        assert!(!aabb_overlap(&a, &right));
        assert!(!aabb_overlap(&a, &below));

        let nudged = Rect::new(9.5, 9.5, 20.0, 20.0);
        assert!(aabb_overlap(&a, &nudged));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::from_center(Vec2::new(50.0, 50.0), Vec2::splat(4.0));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_rect_helpers() {
        let r = Rect::from_origin(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.width(), 30.0);
        assert_eq!(r.height(), 40.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));

        let mut moved = r;
        moved.offset(Vec2::new(-10.0, 5.0));
        assert_eq!(moved, Rect::new(0.0, 25.0, 30.0, 65.0));

        let ball = Rect::around_circle(Vec2::new(5.0, 5.0), 2.0);
        assert_eq!(ball, Rect::new(3.0, 3.0, 7.0, 7.0));
    }

    #[test]
    fn test_paddle_spin_is_normalized() {
        assert_eq!(paddle_spin(100.0, 100.0, 50.0), 0.0);
        assert_eq!(paddle_spin(150.0, 100.0, 50.0), 1.0);
        assert_eq!(paddle_spin(75.0, 100.0, 50.0), -0.5);
        // Grazing contacts past the edge are clamped
        assert_eq!(paddle_spin(400.0, 100.0, 50.0), 1.0);
    }

    proptest! {
        #[test]
        fn prop_circles_overlap_is_symmetric(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0, ar in 0.0f32..200.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0, br in 0.0f32..200.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(circles_overlap(a, ar, b, br), circles_overlap(b, br, a, ar));
        }

        #[test]
        fn prop_aabb_overlap_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, aw in 0.0f32..300.0, ah in 0.0f32..300.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, bw in 0.0f32..300.0, bh in 0.0f32..300.0,
        ) {
            let a = Rect::from_origin(ax, ay, aw, ah);
            let b = Rect::from_origin(bx, by, bw, bh);
            prop_assert_eq!(aabb_overlap(&a, &b), aabb_overlap(&b, &a));
        }
    }
}

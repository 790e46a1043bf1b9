//! Axis-aligned rectangle geometry
//!
//! Collision in Gemfall is pure AABB overlap: every entity presents a
//! position-centered square, so the whole collision story is two
//! rectangles and four comparisons.

use glam::Vec2;

/// An axis-aligned rectangle (top-left corner plus extent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `side` centered on `center`
    pub fn centered(center: Vec2, side: f32) -> Self {
        Self {
            x: center.x - side / 2.0,
            y: center.y - side / 2.0,
            w: side,
            h: side,
        }
    }

    /// True when the two rectangles share any interior area.
    /// Edge-touching rectangles do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_square() {
        let r = Aabb::centered(Vec2::new(100.0, 50.0), 20.0);
        assert_eq!(r.x, 90.0);
        assert_eq!(r.y, 40.0);
        assert_eq!(r.w, 20.0);
        assert_eq!(r.h, 20.0);
    }

    #[test]
    fn test_overlap_basic() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        let c = Aabb::new(20.0, 20.0, 5.0, 5.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_overlap_edge_touch_is_miss() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_overlap_containment() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::new(40.0, 40.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}

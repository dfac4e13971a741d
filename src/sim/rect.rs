//! Axis-aligned rectangles and the overlap test
//!
//! Every collidable thing in the game (walls, traps, hazards, exit, player)
//! is an axis-aligned rectangle, so this one test backs all collision logic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world space.
///
/// Dimensions are always explicit width/height; square entities expand their
/// side length once at construction via [`Rect::square`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w >= 0.0 && h >= 0.0);
        Self { x, y, w, h }
    }

    /// Square shorthand: width = height = size
    pub fn square(x: f32, y: f32, size: f32) -> Self {
        Self::new(x, y, size, size)
    }

    /// True iff the two rectangles intersect with positive area on both axes.
    /// Rectangles sharing only an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 10.0, 10.0);

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_shared_edge_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Touching on the right edge, zero-area contact
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        // Touching on the bottom edge
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);

        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_containment_is_overlap() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_square_shorthand_matches_explicit() {
        let sq = Rect::square(3.0, 4.0, 20.0);
        let wh = Rect::new(3.0, 4.0, 20.0, 20.0);
        assert_eq!(sq, wh);

        let probe = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert_eq!(sq.overlaps(&probe), wh.overlaps(&probe));
    }

    #[test]
    fn test_center() {
        let r = Rect::new(10.0, 20.0, 40.0, 80.0);
        assert_eq!(r.center(), glam::Vec2::new(30.0, 60.0));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            0.0f32..500.0,
            0.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_self_overlap_iff_positive_area(r in arb_rect()) {
            prop_assert_eq!(r.overlaps(&r), r.w > 0.0 && r.h > 0.0);
        }
    }
}

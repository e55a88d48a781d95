//! Axis-aligned bounding boxes and overlap tests
//!
//! Every entity in the arena collides as a rectangle anchored at its
//! top-left corner. Sizes come either from a loaded sprite or from the
//! geometric defaults in `consts`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Width and height of an entity box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    /// Create a size, raising either side to at least one unit
    pub fn new(w: i32, h: i32) -> Self {
        Self { w: w.max(1), h: h.max(1) }
    }

    pub const fn square(side: i32) -> Self {
        Self { w: side, h: side }
    }

    /// True when the box has no area
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// An axis-aligned box with a top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: IVec2,
    pub size: Size,
}

impl Aabb {
    pub fn new(pos: IVec2, size: Size) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> i32 {
        self.pos.x
    }

    pub fn top(&self) -> i32 {
        self.pos.y
    }

    pub fn right(&self) -> i32 {
        self.pos.x + self.size.w
    }

    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.h
    }

    /// Overlap test, see [`intersects`]
    pub fn intersects(&self, other: &Aabb) -> bool {
        intersects(self, other)
    }
}

/// Standard AABB overlap test.
///
/// Touching edges count as overlapping. A box with no area never overlaps
/// anything.
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    if a.size.is_empty() || b.size.is_empty() {
        return false;
    }
    a.left() <= b.right() && b.left() <= a.right() && a.top() <= b.bottom() && b.top() <= a.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn boxed(x: i32, y: i32, w: i32, h: i32) -> Aabb {
        Aabb::new(IVec2::new(x, y), Size::new(w, h))
    }

    #[test]
    fn test_overlapping_boxes() {
        assert!(intersects(&boxed(0, 0, 40, 40), &boxed(20, 20, 40, 40)));
        assert!(intersects(&boxed(10, 10, 5, 5), &boxed(0, 0, 40, 40)));
    }

    #[test]
    fn test_separated_boxes() {
        assert!(!intersects(&boxed(0, 0, 40, 40), &boxed(41, 0, 40, 40)));
        assert!(!intersects(&boxed(0, 0, 40, 40), &boxed(0, 41, 40, 40)));
    }

    #[test]
    fn test_touching_edges_overlap() {
        assert!(intersects(&boxed(0, 0, 40, 40), &boxed(40, 0, 40, 40)));
        assert!(intersects(&boxed(0, 0, 40, 40), &boxed(40, 40, 15, 15)));
    }

    #[test]
    fn test_size_new_enforces_minimum() {
        assert_eq!(Size::new(0, -3), Size { w: 1, h: 1 });
    }

    #[test]
    fn test_zero_area_box_never_hits() {
        let degenerate = Aabb::new(IVec2::new(10, 10), Size { w: 0, h: 0 });
        assert!(!intersects(&degenerate, &boxed(0, 0, 40, 40)));
        assert!(!intersects(&boxed(0, 0, 40, 40), &degenerate));
    }

    proptest! {
        #[test]
        fn intersects_is_symmetric(
            ax in -100i32..900, ay in -100i32..700, aw in 1i32..80, ah in 1i32..80,
            bx in -100i32..900, by in -100i32..700, bw in 1i32..80, bh in 1i32..80,
        ) {
            let a = boxed(ax, ay, aw, ah);
            let b = boxed(bx, by, bw, bh);
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn box_always_hits_itself(x in -100i32..900, y in -100i32..700, w in 1i32..80, h in 1i32..80) {
            let a = boxed(x, y, w, h);
            prop_assert!(intersects(&a, &a));
        }
    }
}

//! Axis-Aligned Bounding Boxes
//!
//! Integer rectangles in screen space (x grows right, y grows down) and
//! the mid-edge coordinates used by the collision engine.

use serde::{Serialize, Deserialize};

/// Axis-aligned rectangle with integer coordinates.
///
/// `x`/`y` is the top-left corner. Width and height are never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width (>= 0)
    pub width: i32,
    /// Height (>= 0)
    pub height: i32,
}

/// The four mid-edge scalar coordinates of a rectangle.
///
/// Each value is the coordinate of the midpoint of that side, so `top` is the
/// y of the top edge's midpoint, `right` the x of the right edge's midpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidEdges {
    /// Y of the midpoint of the top side
    pub top: i32,
    /// X of the midpoint of the right side
    pub right: i32,
    /// Y of the midpoint of the bottom side
    pub bottom: i32,
    /// X of the midpoint of the left side
    pub left: i32,
}

impl BoundingBox {
    /// Create a new box. Negative sizes are clamped to zero.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Mid-edge coordinates of this box.
    ///
    /// For an axis-aligned box the midpoint of a side shares that side's
    /// coordinate on the relevant axis.
    #[inline]
    pub const fn mid_edges(&self) -> MidEdges {
        MidEdges {
            top: self.y,
            right: self.right(),
            bottom: self.bottom(),
            left: self.x,
        }
    }

    /// Grow the box by `amount` on every side.
    pub const fn inflate(&self, amount: i32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + 2 * amount,
            self.height + 2 * amount,
        )
    }

    /// Return a copy moved by `(dx, dy)`.
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Strict interior overlap test.
    ///
    /// Boxes that only share an edge do not overlap, and empty boxes never
    /// overlap anything.
    #[inline]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// True when the box has no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

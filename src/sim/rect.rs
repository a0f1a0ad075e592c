//! Integer axis-aligned rectangles
//!
//! Positions are whole pixels. Overlap is strict: rectangles that only share
//! an edge do not collide, which is what lets a body rest on a platform top.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Horizontal center (integer division, like a pixel grid)
    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn center(&self) -> IVec2 {
        IVec2::new(self.center_x(), self.center_y())
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.w, self.h)
    }

    /// Move so the left edge sits at `x`
    #[inline]
    pub fn set_left(&mut self, x: i32) {
        self.x = x;
    }

    /// Move so the right edge sits at `x`
    #[inline]
    pub fn set_right(&mut self, x: i32) {
        self.x = x - self.w;
    }

    #[inline]
    pub fn set_top(&mut self, y: i32) {
        self.y = y;
    }

    #[inline]
    pub fn set_bottom(&mut self, y: i32) {
        self.y = y - self.h;
    }

    /// Strict overlap test. Empty rectangles never overlap anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

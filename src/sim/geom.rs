//! Rectangle and point primitives
//!
//! Screen space: `h` grows right, `v` grows down. Rectangles are half-open,
//! `left <= h < right` and `top <= v < bottom`.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// 2-D integer coordinate (`x` = h, `y` = v)
pub type Point = IVec2;

/// Axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const ZERO: Rect = Rect::new(0, 0, 0, 0);

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of the given size with its top-left corner at `(h, v)`
    pub const fn from_origin(h: i32, v: i32, width: i32, height: i32) -> Self {
        Self::new(h, v, h + width, v + height)
    }

    #[inline]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// True if the two rectangles share any area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// True if the horizontal spans overlap, ignoring `v`
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.left < other.right && other.left < self.right
    }

    /// Overlapping area, or `None` when disjoint
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let clipped = Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        (!clipped.is_empty()).then_some(clipped)
    }

    pub const fn offset(&self, dh: i32, dv: i32) -> Rect {
        Rect::new(self.left + dh, self.top + dv, self.right + dh, self.bottom + dv)
    }

    /// Shrink by `dh` on the left and right and `dv` on the top and bottom
    pub const fn inset(&self, dh: i32, dv: i32) -> Rect {
        Rect::new(self.left + dh, self.top + dv, self.right - dh, self.bottom - dv)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// True if the segment `a -> b` touches this rectangle.
    ///
    /// Liang-Barsky clip against the closed rectangle; degenerate segments
    /// fall back to a point test.
    pub fn intersects_segment(&self, a: Point, b: Point) -> bool {
        if self.is_empty() {
            return false;
        }
        let (x0, y0) = (a.x as f64, a.y as f64);
        let dx = (b.x - a.x) as f64;
        let dy = (b.y - a.y) as f64;

        let (xmin, xmax) = (self.left as f64, (self.right - 1) as f64);
        let (ymin, ymax) = (self.top as f64, (self.bottom - 1) as f64);

        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        let edges = [
            (-dx, x0 - xmin),
            (dx, xmax - x0),
            (-dy, y0 - ymin),
            (dy, ymax - y0),
        ];
        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return false;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return false;
                }
                t1 = t1.min(r);
            }
        }
        t0 <= t1
    }
}

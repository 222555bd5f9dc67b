//! Minimal screen geometry: points, sizes, rectangles, and lines.
//!
//! Coordinates are cell positions. Component rects are stored relative to
//! their parent's origin; translating to global space is a sum of ancestor
//! origins.

use std::ops::Add;

/// A point in cell coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl Point {
    /// The origin.
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl From<(u32, u32)> for Point {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

/// A width/height extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Expanse {
    /// Width in cells.
    pub w: u32,
    /// Height in cells.
    pub h: u32,
}

impl Expanse {
    /// Construct an extent.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// The zero extent.
    pub fn zero() -> Self {
        Self { w: 0, h: 0 }
    }

    /// True if either dimension is zero.
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// This extent as a rect at the origin.
    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.w, self.h)
    }
}

/// A one-row horizontal span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    /// Leftmost cell of the line.
    pub tl: Point,
    /// Width in cells.
    pub w: u32,
}

/// A rectangle located by its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width in cells.
    pub w: u32,
    /// Height in cells.
    pub h: u32,
}

impl Rect {
    /// Construct a rect from its corner and extent.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// The extent of this rect.
    pub fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// True if the rect covers no cells.
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Does this rect contain the point?
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.tl.x && p.x < self.tl.x + self.w && p.y >= self.tl.y && p.y < self.tl.y + self.h
    }

    /// The overlap between two rects, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x1 = self.tl.x.max(other.tl.x);
        let y1 = self.tl.y.max(other.tl.y);
        let x2 = (self.tl.x + self.w).min(other.tl.x + other.w);
        let y2 = (self.tl.y + self.h).min(other.tl.y + other.h);
        if x1 < x2 && y1 < y2 {
            Some(Self::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }

    /// This rect shifted by an offset.
    pub fn shift(&self, off: Point) -> Self {
        Self {
            tl: self.tl + off,
            w: self.w,
            h: self.h,
        }
    }

    /// The `n`th row of this rect as a line, clamped to the rect's height.
    pub fn line(&self, n: u32) -> Line {
        Line {
            tl: Point {
                x: self.tl.x,
                y: self.tl.y + n.min(self.h.saturating_sub(1)),
            },
            w: self.w,
        }
    }
}

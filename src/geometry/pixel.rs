//! Integer pixel-space primitives.
//!
//! A `PixelRect` is always stored standardized: non-negative size, origin at
//! the componentwise minimum of its defining corners. Continuous rects come
//! in via two deliberate roundings: `wrapping` (smallest enclosing integer
//! rect, for borders and grids) and `wrapped` (largest enclosed integer
//! rect, for strict containment tests).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelCoordinate {
    pub x: i32,
    pub y: i32,
}

impl PixelCoordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset_by(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Display for PixelCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: i32,
    pub height: i32,
}

impl PixelSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width >= 0 && self.height >= 0
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

impl std::fmt::Display for PixelSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub origin: PixelCoordinate,
    pub size: PixelSize,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: PixelCoordinate::new(x, y),
            size: PixelSize::new(width, height),
        }
        .standardized()
    }

    /// Bounding rect of two coordinates. Origin is the componentwise
    /// minimum, size the absolute difference.
    pub fn from_coordinates(a: PixelCoordinate, b: PixelCoordinate) -> Self {
        Self {
            origin: PixelCoordinate::new(a.x.min(b.x), a.y.min(b.y)),
            size: PixelSize::new((b.x - a.x).abs(), (b.y - a.y).abs()),
        }
    }

    /// Smallest integer rect enclosing a continuous pixel-space rect
    /// (floor the minimum corner, ceil the maximum).
    pub fn wrapping(rect: Rect) -> Self {
        let min_x = rect.min.x.floor() as i32;
        let min_y = rect.min.y.floor() as i32;
        let max_x = rect.max.x.ceil() as i32;
        let max_y = rect.max.y.ceil() as i32;
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Largest integer rect enclosed by a continuous pixel-space rect
    /// (ceil the minimum corner, floor the maximum). Degenerates to an
    /// empty rect when nothing whole fits.
    pub fn wrapped(rect: Rect) -> Self {
        let min_x = rect.min.x.ceil() as i32;
        let min_y = rect.min.y.ceil() as i32;
        let max_x = rect.max.x.floor() as i32;
        let max_y = rect.max.y.floor() as i32;
        Self {
            origin: PixelCoordinate::new(min_x, min_y),
            size: PixelSize::new((max_x - min_x).max(0), (max_y - min_y).max(0)),
        }
    }

    pub fn standardized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut width = self.size.width;
        let mut height = self.size.height;
        if width < 0 {
            x += width;
            width = -width;
        }
        if height < 0 {
            y += height;
            height = -height;
        }
        Self {
            origin: PixelCoordinate::new(x, y),
            size: PixelSize::new(width, height),
        }
    }

    pub fn min_x(&self) -> i32 {
        self.origin.x
    }

    pub fn min_y(&self) -> i32 {
        self.origin.y
    }

    pub fn max_x(&self) -> i32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> i32 {
        self.origin.y + self.size.height
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    pub fn is_empty(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    /// Corner diagonally opposite the origin.
    pub fn opposite(&self) -> PixelCoordinate {
        PixelCoordinate::new(self.max_x(), self.max_y())
    }

    /// Width over height. Zero heights yield an infinite ratio; callers
    /// guard against degenerate rects before dividing by this.
    pub fn ratio(&self) -> f32 {
        self.size.width as f32 / self.size.height as f32
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.origin.x as f32 + self.size.width as f32 / 2.0,
            self.origin.y as f32 + self.size.height as f32 / 2.0,
        )
    }

    pub fn offset_by(self, dx: i32, dy: i32) -> Self {
        Self {
            origin: self.origin.offset_by(dx, dy),
            size: self.size,
        }
    }

    pub fn contains_coordinate(&self, c: PixelCoordinate) -> bool {
        c.x >= self.min_x() && c.y >= self.min_y() && c.x < self.max_x() && c.y < self.max_y()
    }

    pub fn contains_rect(&self, other: PixelRect) -> bool {
        self.min_x() <= other.min_x()
            && self.min_y() <= other.min_y()
            && self.max_x() >= other.max_x()
            && self.max_y() >= other.max_y()
    }

    pub fn intersection(&self, other: PixelRect) -> Option<PixelRect> {
        let a = self.standardized();
        let b = other.standardized();
        let min_x = a.min_x().max(b.min_x());
        let min_y = a.min_y().max(b.min_y());
        let max_x = a.max_x().min(b.max_x());
        let max_y = a.max_y().min(b.max_y());
        if max_x <= min_x || max_y <= min_y {
            return None;
        }
        Some(PixelRect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Continuous pixel-space rect (y-down, same units).
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.min_x() as f32,
            self.min_y() as f32,
            self.max_x() as f32,
            self.max_y() as f32,
        )
    }
}

impl std::fmt::Display for PixelRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{x:{},y:{},w:{},h:{}}}",
            self.origin.x, self.origin.y, self.size.width, self.size.height
        )
    }
}

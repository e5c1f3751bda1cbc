//! Plain geometry shared by the interaction core and the path engine.
//!
//! Everything here is a pure function over `f64` diagram or screen units.

use crate::constants::{TABLE_FIELD_HEIGHT, TABLE_HEADER_HEIGHT};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point or vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A possibly partial coordinate.
///
/// Coordinate conversions map each present axis and pass missing axes
/// through untouched, so callers can convert a lone x or y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Coord {
    pub const fn new(x: Option<f64>, y: Option<f64>) -> Self {
        Self { x, y }
    }

    /// Both axes, if both are present.
    pub fn to_point(self) -> Option<Point> {
        Some(Point::new(self.x?, self.y?))
    }
}

impl From<Point> for Coord {
    fn from(p: Point) -> Self {
        Self {
            x: Some(p.x),
            y: Some(p.y),
        }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Normalize two arbitrary corners into a rectangle with non-negative size.
    pub fn from_endpoints(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True if `self` lies strictly inside `outer`. Touching an edge does not count.
    pub fn is_strictly_inside(&self, outer: &Rect) -> bool {
        self.x > outer.x
            && self.right() < outer.right()
            && self.y > outer.y
            && self.bottom() < outer.bottom()
    }

    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Grow by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Smallest rectangle covering every rectangle in the iterator.
    pub fn union_all<I: IntoIterator<Item = Rect>>(rects: I) -> Option<Rect> {
        let mut iter = rects.into_iter();
        let first = iter.next()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.right(), first.bottom());
        for r in iter {
            min_x = min_x.min(r.x);
            min_y = min_y.min(r.y);
            max_x = max_x.max(r.right());
            max_y = max_y.max(r.bottom());
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}

/// Height of a table with `field_count` rows.
#[inline]
pub fn table_height(field_count: usize) -> f64 {
    TABLE_HEADER_HEIGHT + field_count as f64 * TABLE_FIELD_HEIGHT
}

/// Round each axis to the nearest multiple of `grid_size`.
///
/// A projection: snapping an already snapped point returns it unchanged.
/// Non-positive or non-finite grid sizes disable snapping.
pub fn snap_to_grid(p: Point, grid_size: f64) -> Point {
    if !(grid_size.is_finite() && grid_size > 0.0) {
        return p;
    }
    Point::new(
        (p.x / grid_size).round() * grid_size,
        (p.y / grid_size).round() * grid_size,
    )
}

/// Midpoint of the min/max extents of a set of points.
pub fn center_of<I: IntoIterator<Item = Point>>(points: I) -> Option<Point> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in iter {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    Some(Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0))
}

//! Axis-aligned rectangles.

use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::span::Span;

/// An axis-aligned rectangle, specified by its top-left and bottom-right corners.
///
/// Since `y` grows downward, the top edge has the smaller y-coordinate.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    /// The top-left corner.
    p0: Point,
    /// The bottom-right corner.
    p1: Point,
}

impl Rect {
    /// Creates a new rectangle from two opposite corner points, in any order.
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            p0: Point::new(a.x.min(b.x), a.y.min(b.y)),
            p1: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a rectangle from its top-left corner, width, and height.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::from_xywh(10., 20., 100., 50.);
    /// assert_eq!(rect.left(), 10.);
    /// assert_eq!(rect.top(), 20.);
    /// assert_eq!(rect.right(), 110.);
    /// assert_eq!(rect.bot(), 70.);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `w` or `h` is negative.
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        assert!(
            w >= 0. && h >= 0.,
            "Rect::from_xywh requires non-negative dimensions, got {w} x {h}"
        );
        Self {
            p0: Point::new(x, y),
            p1: Point::new(x + w, y + h),
        }
    }

    /// Creates a rectangle from horizontal and vertical [`Span`]s.
    pub fn from_spans(h: Span, v: Span) -> Self {
        Self {
            p0: Point::new(h.start(), v.start()),
            p1: Point::new(h.stop(), v.stop()),
        }
    }

    /// The top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        self.p0
    }

    /// The left edge.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.p0.x
    }

    /// The right edge.
    #[inline]
    pub const fn right(&self) -> f64 {
        self.p1.x
    }

    /// The top edge.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.p0.y
    }

    /// The bottom edge.
    #[inline]
    pub const fn bot(&self) -> f64 {
        self.p1.y
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.p1.x - self.p0.x
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.p1.y - self.p0.y
    }

    /// The horizontal extent of the rectangle.
    #[inline]
    pub fn hspan(&self) -> Span {
        Span::new(self.p0.x, self.p1.x)
    }

    /// The vertical extent of the rectangle.
    #[inline]
    pub fn vspan(&self) -> Span {
        Span::new(self.p0.y, self.p1.y)
    }

    /// Returns `true` if the rectangle contains `p`, edges included.
    pub fn contains(&self, p: Point) -> bool {
        self.hspan().contains(p.x) && self.vspan().contains(p.y)
    }

    /// Returns `true` if the two rectangles share a region of positive area.
    ///
    /// Rectangles that only touch along an edge do not overlap.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let a = Rect::from_xywh(0., 0., 10., 10.);
    /// assert!(a.overlaps(&Rect::from_xywh(5., 5., 10., 10.)));
    /// assert!(!a.overlaps(&Rect::from_xywh(10., 0., 10., 10.)));
    /// ```
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bot()
            && other.top() < self.bot()
    }

    /// Returns a copy of this rectangle shifted by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            p0: self.p0.translate(dx, dy),
            p1: self.p1.translate(dx, dy),
        }
    }

    /// The smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Rect) -> Self {
        Self::from_spans(
            self.hspan().union(&other.hspan()),
            self.vspan().union(&other.vspan()),
        )
    }
}

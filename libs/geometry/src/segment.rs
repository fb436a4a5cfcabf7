//! Straight line segments.

use serde::{Deserialize, Serialize};

use crate::dir::Dir;
use crate::point::Point;
use crate::span::Span;
use crate::EPSILON;

/// A straight segment between two points.
#[derive(Debug, Copy, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    /// The starting point.
    pub p0: Point,
    /// The ending point.
    pub p1: Point,
}

/// The relationship between two parallel, side-by-side segments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Clearance {
    /// The direction both segments run in.
    pub dir: Dir,
    /// The perpendicular distance between the two segments.
    pub separation: f64,
    /// The shared extent of the two segments along `dir`.
    pub overlap: Span,
}

impl Segment {
    /// Creates a segment from `p0` to `p1`.
    pub const fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }

    /// The length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.p0.dist(self.p1)
    }

    /// The direction of an axis-aligned segment.
    ///
    /// Returns `None` for diagonal and zero-length segments.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let seg = Segment::new(Point::new(0., 5.), Point::new(10., 5.));
    /// assert_eq!(seg.dir(), Some(Dir::Horiz));
    /// let seg = Segment::new(Point::new(0., 0.), Point::new(10., 5.));
    /// assert_eq!(seg.dir(), None);
    /// ```
    pub fn dir(&self) -> Option<Dir> {
        let dx = (self.p1.x - self.p0.x).abs();
        let dy = (self.p1.y - self.p0.y).abs();
        match (dx < EPSILON, dy < EPSILON) {
            (false, true) => Some(Dir::Horiz),
            (true, false) => Some(Dir::Vert),
            _ => None,
        }
    }

    /// The extent of the segment along direction `dir`.
    pub fn span(&self, dir: Dir) -> Span {
        Span::new(self.p0.coord(dir), self.p1.coord(dir))
    }

    /// Measures the clearance between two parallel axis-aligned segments.
    ///
    /// Returns `None` unless both segments run in the same direction and
    /// share an extent of positive length along it.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let a = Segment::new(Point::new(10., 0.), Point::new(10., 50.));
    /// let b = Segment::new(Point::new(16., 20.), Point::new(16., 80.));
    /// let c = a.parallel_clearance(&b).unwrap();
    /// assert_eq!(c.separation, 6.);
    /// assert_eq!(c.overlap, Span::new(20., 50.));
    /// ```
    pub fn parallel_clearance(&self, other: &Segment) -> Option<Clearance> {
        let dir = self.dir()?;
        if other.dir()? != dir {
            return None;
        }
        let overlap = self.span(dir).overlap(&other.span(dir))?;
        if overlap.length() < EPSILON {
            return None;
        }
        let across = dir.other();
        Some(Clearance {
            dir,
            separation: (self.p0.coord(across) - other.p0.coord(across)).abs(),
            overlap,
        })
    }
}

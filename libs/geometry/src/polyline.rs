//! Measurements along open polylines.

use crate::point::Point;
use crate::segment::Segment;

/// An open path through an ordered sequence of points.
pub trait Polyline {
    /// The straight pieces between consecutive points.
    fn segments(&self) -> Vec<Segment>;

    /// The total length of the path.
    fn length(&self) -> f64 {
        self.segments().iter().map(Segment::length).sum()
    }

    /// The point at fraction `t` of the path's length.
    ///
    /// `t` is clamped to `[0, 1]`. Returns `None` for an empty path.
    fn point_at_fraction(&self, t: f64) -> Option<Point>;
}

impl Polyline for [Point] {
    fn segments(&self) -> Vec<Segment> {
        self.windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .collect()
    }

    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let path = [Point::new(0., 0.), Point::new(10., 0.), Point::new(10., 10.)];
    /// assert_eq!(path.point_at_fraction(0.25), Some(Point::new(5., 0.)));
    /// assert_eq!(path.point_at_fraction(0.75), Some(Point::new(10., 5.)));
    /// ```
    fn point_at_fraction(&self, t: f64) -> Option<Point> {
        let first = *self.first()?;
        let t = t.clamp(0., 1.);
        let total = self.length();
        if total <= 0. {
            return Some(first);
        }

        let mut remaining = total * t;
        for seg in self.segments() {
            let len = seg.length();
            if remaining <= len {
                if len <= 0. {
                    return Some(seg.p0);
                }
                return Some(seg.p0.lerp(seg.p1, remaining / len));
            }
            remaining -= len;
        }
        self.last().copied()
    }
}

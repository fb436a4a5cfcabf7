//! Bezier curve evaluation and sampling.

use crate::point::Point;

/// Evaluates the cubic Bezier curve `(p0, c1, c2, p3)` at parameter `t`.
pub fn cubic(p0: Point, c1: Point, c2: Point, p3: Point, t: f64) -> Point {
    let u = 1. - t;
    p0 * (u * u * u) + c1 * (3. * u * u * t) + c2 * (3. * u * t * t) + p3 * (t * t * t)
}

/// Samples a cubic Bezier curve into `segments` straight pieces.
///
/// The returned polyline has `segments + 1` points and starts and ends
/// exactly at `p0` and `p3`. A `segments` value of zero is treated as one.
///
/// # Example
///
/// ```
/// # use geometry::prelude::*;
/// let pts = sample_cubic(
///     Point::new(0., 0.),
///     Point::new(10., 0.),
///     Point::new(10., 20.),
///     Point::new(20., 20.),
///     8,
/// );
/// assert_eq!(pts.len(), 9);
/// assert_eq!(pts[0], Point::new(0., 0.));
/// assert_eq!(pts[8], Point::new(20., 20.));
/// ```
pub fn sample_cubic(p0: Point, c1: Point, c2: Point, p3: Point, segments: usize) -> Vec<Point> {
    let n = segments.max(1);
    let mut points = Vec::with_capacity(n + 1);
    points.push(p0);
    for i in 1..n {
        let t = i as f64 / n as f64;
        points.push(cubic(p0, c1, c2, p3, t));
    }
    points.push(p3);
    points
}

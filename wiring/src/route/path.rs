//! Path synthesis for each [`PathStyle`].

use geometry::prelude::*;

use crate::connection::PathStyle;

/// Builds the polyline of a wire from `source` to `dest` through the rail at `rail_x`.
///
/// When both endpoints sit at the same height, every style yields the direct
/// two-point path.
pub(crate) fn synthesize(
    style: PathStyle,
    source: Point,
    dest: Point,
    rail_x: f64,
    curve_samples: usize,
) -> Vec<Point> {
    if geometry::nearly_equal(source.y, dest.y) {
        return vec![source, dest];
    }

    match style {
        PathStyle::Orthogonal => vec![
            source,
            Point::new(rail_x, source.y),
            Point::new(rail_x, dest.y),
            dest,
        ],
        PathStyle::Straight => vec![
            source,
            Point::new(rail_x, (source.y + dest.y) / 2.),
            dest,
        ],
        PathStyle::Curved => sample_cubic(
            source,
            Point::new(rail_x, source.y),
            Point::new(rail_x, dest.y),
            dest,
            curve_samples,
        ),
    }
}

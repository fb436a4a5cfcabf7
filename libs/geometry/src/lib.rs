//! 2-D geometric primitives for wiring diagram layout.
//!
//! Coordinates are real-valued and follow drawing conventions:
//! `x` grows to the right and `y` grows downward.
//!
//! # Examples
//!
//! Create a [rectangle](crate::rect::Rect):
//!
//! ```
//! # use geometry::prelude::*;
//! let rect = Rect::from_xywh(10., 20., 30., 40.);
//! assert_eq!(rect.right(), 40.);
//! assert_eq!(rect.bot(), 60.);
//! ```
#![warn(missing_docs)]

pub mod curve;
pub mod dir;
pub mod point;
pub mod polyline;
pub mod prelude;
pub mod rect;
pub mod segment;
pub mod span;


/// Coordinates closer than this are treated as equal.
pub const EPSILON: f64 = 1e-9;

/// Returns `true` if `a` and `b` differ by less than [`EPSILON`].
///
/// # Examples
///
/// ```
/// use geometry::nearly_equal;
///
/// assert!(nearly_equal(1.0, 1.0 + 1e-12));
/// assert!(!nearly_equal(1.0, 1.001));
/// ```
#[inline]
pub fn nearly_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

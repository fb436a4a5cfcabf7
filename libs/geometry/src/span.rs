//! A one-dimensional span.
//!
//! A span represents the closed interval `[start, stop]`.
use serde::{Deserialize, Serialize};

/// A closed interval of coordinates in one dimension.
///
/// Represents the range `[start, stop]`.
#[derive(Debug, Default, Clone, Copy, PartialOrd, Serialize, Deserialize, PartialEq)]
pub struct Span {
    start: f64,
    stop: f64,
}

impl Span {
    /// Creates a new [`Span`] between two coordinates, in either order.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let span = Span::new(20., 10.);
    /// assert_eq!(span.start(), 10.);
    /// assert_eq!(span.stop(), 20.);
    /// ```
    pub fn new(start: f64, stop: f64) -> Self {
        Self {
            start: start.min(stop),
            stop: start.max(stop),
        }
    }

    /// Gets the start of the span.
    #[inline]
    pub const fn start(&self) -> f64 {
        self.start
    }

    /// Gets the stop of the span.
    #[inline]
    pub const fn stop(&self) -> f64 {
        self.stop
    }

    /// Gets the length of the span.
    #[inline]
    pub fn length(&self) -> f64 {
        self.stop - self.start
    }

    /// Returns `true` if `x` lies within the span, endpoints included.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.start <= x && x <= self.stop
    }

    /// Checks if the span intersects with the [`Span`] `other`.
    ///
    /// Spans that only touch at an endpoint intersect.
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        !(other.stop < self.start || self.stop < other.start)
    }

    /// Returns the overlapping portion of two spans, if any.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let a = Span::new(0., 10.);
    /// assert_eq!(a.overlap(&Span::new(5., 20.)), Some(Span::new(5., 10.)));
    /// assert_eq!(a.overlap(&Span::new(15., 20.)), None);
    /// ```
    pub fn overlap(&self, other: &Self) -> Option<Self> {
        if self.intersects(other) {
            Some(Self::new(
                self.start.max(other.start),
                self.stop.min(other.stop),
            ))
        } else {
            None
        }
    }

    /// Creates a new minimal [`Span`] that contains both spans.
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.start.min(other.start), self.stop.max(other.stop))
    }
}

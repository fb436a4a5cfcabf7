//! An import prelude that re-exports commonly used items.

pub use crate::curve::{cubic, sample_cubic};
pub use crate::dir::Dir;
pub use crate::point::Point;
pub use crate::polyline::Polyline;
pub use crate::rect::Rect;
pub use crate::segment::Segment;
pub use crate::span::Span;

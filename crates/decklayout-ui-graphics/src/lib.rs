//! Pure geometry for decklayout
//!
//! Points, sizes, padding insets and one-dimensional spans used
//! by the deck engine. Nothing here knows about cards or gestures.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{EdgeInsets, Point, Size, Span};
}

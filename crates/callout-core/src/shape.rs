//! Drawable shapes.
//!
//! Every shape draws its outline through a [`PathEmitter`] and reports the
//! rectangle that outline actually covers, which may be larger than its
//! nominal `width × height` (a tag's pointer sticks out of its body).

use crate::{draw::PathEmitter, geometry::Bounds};

pub mod circle;
pub mod tag;
pub mod text;

pub use circle::Circle;
pub use tag::{PointerDirection, Tag};
pub use text::{CosmicTextMeasure, FixedAdvanceMeasure, Text, TextMeasure};

/// A node that paints itself.
pub trait Shape {
    /// Issues this shape's path and paints it.
    fn draw(&self, emitter: &mut dyn PathEmitter);

    /// The drawn extent in the shape's own coordinates.
    fn self_rect(&self) -> Bounds;

    /// Attributes whose change alters the shape's size.
    fn attrs_affecting_size(&self) -> &'static [&'static str];

    /// Returns true if the shape is drawn around its origin rather than
    /// from its top-left corner.
    fn is_centroid(&self) -> bool {
        false
    }
}

//! Circles.

use std::f32::consts::PI;

use crate::{
    attr::{AttrDefault, AttrSpec, AttrValue, Validator, name},
    draw::{PathEmitter, ShapeStyle},
    error::AttrError,
    geometry::{Bounds, Point, Size},
    node::{Node, NodeClass, node_kind},
    shape::Shape,
};

pub(crate) const CIRCLE_ATTRS: &[AttrSpec] = &[AttrSpec::new(
    name::RADIUS,
    AttrDefault::Number(0.0),
    Validator::NonNegative,
)];

node_kind!(
    /// A circle centred on its position, sized by `radius`.
    ///
    /// Its width and height are both the diameter. Setting either one sets
    /// the radius to half of it.
    ///
    /// ```
    /// # use callout_core::shape::Circle;
    /// let circle = Circle::new();
    /// circle.set_radius(40.0).unwrap();
    /// assert_eq!(circle.width(), 80.0);
    ///
    /// circle.set_height(30.0).unwrap();
    /// assert_eq!(circle.radius(), 15.0);
    /// ```
    Circle
);

impl Circle {
    pub fn new() -> Self {
        Self::wrap(Node::alloc(NodeClass::Circle, None))
    }

    pub fn radius(&self) -> f32 {
        self.number(name::RADIUS)
    }

    /// # Errors
    ///
    /// Returns [`AttrError::Invalid`] for negative or non-finite radii.
    pub fn set_radius(&self, radius: f32) -> Result<(), AttrError> {
        self.set_attr(name::RADIUS, radius)
    }

    pub fn width(&self) -> f32 {
        self.radius() * 2.0
    }

    pub fn height(&self) -> f32 {
        self.radius() * 2.0
    }

    /// Sets the radius to `width / 2`. No change event fires when that is
    /// already the radius.
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::Invalid`] for negative or non-finite widths.
    pub fn set_width(&self, width: f32) -> Result<(), AttrError> {
        self.set_attr(name::WIDTH, width)
    }

    /// Sets the radius to `height / 2`, like [`Circle::set_width`].
    ///
    /// # Errors
    ///
    /// Returns [`AttrError::Invalid`] for negative or non-finite heights.
    pub fn set_height(&self, height: f32) -> Result<(), AttrError> {
        self.set_attr(name::HEIGHT, height)
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

impl Shape for Circle {
    fn draw(&self, emitter: &mut dyn PathEmitter) {
        emitter.begin_path();
        emitter.arc(Point::default(), self.radius(), 0.0, PI * 2.0, false);
        emitter.close_path();
        emitter.fill_stroke_shape(&ShapeStyle::from_node(self));
    }

    fn self_rect(&self) -> Bounds {
        let radius = self.radius();
        Bounds::new_from_top_left(
            Point::new(-radius, -radius),
            Size::new(radius * 2.0, radius * 2.0),
        )
    }

    fn attrs_affecting_size(&self) -> &'static [&'static str] {
        &[name::RADIUS]
    }

    fn is_centroid(&self) -> bool {
        true
    }
}

/// Validates a `width` or `height` value against `size` and turns it into
/// the matching radius.
pub(crate) fn radius_for_size(
    size: &AttrSpec,
    value: AttrValue,
) -> Result<(&'static str, AttrValue), AttrError> {
    let size = size.validator().coerce(size.name(), value)?;
    let radius = size.as_number().unwrap_or_default() / 2.0;
    Ok((name::RADIUS, AttrValue::Number(radius)))
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    /// Width and height always equal the diameter.
    fn check_size_is_diameter(radius: f32) -> Result<(), TestCaseError> {
        let circle = Circle::new();
        circle.set_radius(radius).unwrap();
        prop_assert!(approx_eq!(f32, circle.width(), 2.0 * radius));
        prop_assert!(approx_eq!(f32, circle.height(), 2.0 * radius));
        Ok(())
    }

    /// Setting the width and reading it back is lossless.
    fn check_width_round_trip(width: f32) -> Result<(), TestCaseError> {
        let circle = Circle::new();
        circle.set_width(width).unwrap();
        prop_assert!(approx_eq!(f32, circle.width(), width, epsilon = 1e-3));
        prop_assert!(approx_eq!(f32, circle.radius(), width / 2.0, epsilon = 1e-3));
        Ok(())
    }

    /// The self rect is square, centred on the origin.
    fn check_self_rect_centred(radius: f32) -> Result<(), TestCaseError> {
        let circle = Circle::new();
        circle.set_radius(radius).unwrap();
        let rect = Shape::self_rect(&circle);
        prop_assert!(approx_eq!(f32, rect.min_x(), -radius));
        prop_assert!(approx_eq!(f32, rect.min_y(), -radius));
        prop_assert!(approx_eq!(f32, rect.width(), 2.0 * radius, epsilon = 1e-3));
        prop_assert!(approx_eq!(f32, rect.height(), 2.0 * radius, epsilon = 1e-3));
        Ok(())
    }

    proptest! {
        #[test]
        fn size_is_diameter(radius in 0.0f32..10_000.0) {
            check_size_is_diameter(radius)?;
        }

        #[test]
        fn width_round_trip(width in 0.0f32..10_000.0) {
            check_width_round_trip(width)?;
        }

        #[test]
        fn self_rect_centred(radius in 0.0f32..10_000.0) {
            check_self_rect_centred(radius)?;
        }
    }
}

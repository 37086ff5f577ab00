//! Geometric primitives for node positioning and shape extents.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in a node's local or parent space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Callout uses the same coordinate system as SVG and the HTML canvas:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Angles are measured in radians from the positive X axis and grow
//! clockwise on screen, so `3π/2` points straight up.

/// A 2D point.
///
/// # Examples
///
/// ```
/// # use callout_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the point with both coordinates negated.
    pub fn negate(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }

    /// Returns the point at `angle` radians on a circle of `radius` around this point.
    pub fn on_circle(self, radius: f32, angle: f32) -> Self {
        Self {
            x: radius.mul_add(angle.cos(), self.x),
            y: radius.mul_add(angle.sin(), self.y),
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// A rectangular bounding box with minimum and maximum coordinates.
///
/// Shapes report their true drawn extent (their "self rect") as `Bounds`
/// in local coordinates; it may exceed the nominal `width × height`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use callout_core::geometry::{Bounds, Point, Size};
    /// let tag = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let dot = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = tag.merge(&dot);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Grows the bounds by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_default() {
        let point = Point::default();
        assert_eq!(point.x(), 0.0);
        assert_eq!(point.y(), 0.0);
    }

    #[test]
    fn test_point_negate() {
        assert_eq!(Point::new(60.0, -20.0).negate(), Point::new(-60.0, 20.0));
    }

    #[test]
    fn test_point_on_circle() {
        let center = Point::new(10.0, 10.0);

        let right = center.on_circle(5.0, 0.0);
        assert_approx_eq!(f32, right.x(), 15.0);
        assert_approx_eq!(f32, right.y(), 10.0);

        let up = center.on_circle(5.0, std::f32::consts::PI * 1.5);
        assert_approx_eq!(f32, up.x(), 10.0, epsilon = 1e-5);
        assert_approx_eq!(f32, up.y(), 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_bounds_new_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(-30.0, -10.0), Size::new(60.0, 40.0));
        assert_eq!(bounds.min_x(), -30.0);
        assert_eq!(bounds.min_y(), -10.0);
        assert_eq!(bounds.max_x(), 30.0);
        assert_eq!(bounds.max_y(), 30.0);
        assert_eq!(bounds.to_size(), Size::new(60.0, 40.0));
        assert_eq!(bounds.min_point(), Point::new(-30.0, -10.0));
    }

    #[test]
    fn test_bounds_translate_and_expand() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(50.0, 30.0));

        let moved = bounds.translate(Point::new(100.0, 50.0));
        assert_eq!(moved.min_x(), 110.0);
        assert_eq!(moved.min_y(), 70.0);
        assert_eq!(moved.to_size(), bounds.to_size());

        let grown = bounds.expand(5.0);
        assert_eq!(grown.min_point(), Point::new(5.0, 15.0));
        assert_eq!(grown.to_size(), Size::new(60.0, 40.0));
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            0.0f32..500.0,
            0.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    /// A merged bounds should contain both inputs.
    fn check_merge_contains_both(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        let merged = b1.merge(&b2);
        for b in [b1, b2] {
            prop_assert!(merged.min_x() <= b.min_x());
            prop_assert!(merged.min_y() <= b.min_y());
            prop_assert!(merged.max_x() >= b.max_x());
            prop_assert!(merged.max_y() >= b.max_y());
        }
        Ok(())
    }

    /// Translation must never change the size of the bounds.
    fn check_translate_preserves_size(b: Bounds, dx: f32, dy: f32) -> Result<(), TestCaseError> {
        let moved = b.translate(Point::new(dx, dy));
        prop_assert!(approx_eq!(f32, moved.width(), b.width(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, moved.height(), b.height(), epsilon = 0.001));
        Ok(())
    }

    proptest! {
        #[test]
        fn merge_contains_both(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_merge_contains_both(b1, b2)?;
        }

        #[test]
        fn translate_preserves_size(b in bounds_strategy(), dx in -500.0f32..500.0, dy in -500.0f32..500.0) {
            check_translate_preserves_size(b, dx, dy)?;
        }
    }
}

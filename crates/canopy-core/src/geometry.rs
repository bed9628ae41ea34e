//! Geometric primitives for diagram layout, hit-testing and rendering.
//!
//! This module provides the small set of 2D types Canopy uses in both model
//! space (where node geometry and layout live) and screen space (the pixel
//! space of a rendering surface).
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate or vector
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Canopy uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! The same types are used for model-space and screen-space values; the
//! [`Viewport`](crate::viewport::Viewport) converts between the two.

/// A 2D point, also used as a displacement vector.
///
/// # Examples
///
/// ```
/// # use canopy_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
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

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// # use canopy_core::geometry::Point;
    /// let pointer = Point::new(130.0, 95.0);
    /// let node = Point::new(100.0, 80.0);
    ///
    /// let offset = pointer.sub_point(node);
    /// assert_eq!(offset, Point::new(30.0, 15.0));
    /// ```
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the hypotenuse (Euclidean length of the vector)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns the unit vector pointing in the same direction.
    ///
    /// Returns `None` for a zero-length vector, which has no direction.
    ///
    /// # Examples
    ///
    /// ```
    /// # use canopy_core::geometry::Point;
    /// let dir = Point::new(3.0, 4.0).normalize().unwrap();
    /// assert!((dir.x() - 0.6).abs() < 1e-6);
    /// assert!((dir.y() - 0.8).abs() < 1e-6);
    ///
    /// assert!(Point::default().normalize().is_none());
    /// ```
    pub fn normalize(self) -> Option<Self> {
        let length = self.hypot();
        if length <= f32::EPSILON {
            return None;
        }
        Some(Self {
            x: self.x / length,
            y: self.y / length,
        })
    }

    /// Returns this vector rotated by 90 degrees (`(-y, x)`).
    pub fn perpendicular(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
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

/// An axis-aligned rectangle with minimum and maximum coordinates.
///
/// Node rectangles, clip regions and content extents are all expressed as
/// `Bounds`. Containment is inclusive on every edge.
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

    /// Creates a new bounds spanning two corner points, in any order.
    pub fn new_from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
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

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Midpoint of the left edge.
    pub fn left_mid(self) -> Point {
        Point::new(self.min_x, (self.min_y + self.max_y) / 2.0)
    }

    /// Midpoint of the right edge.
    pub fn right_mid(self) -> Point {
        Point::new(self.max_x, (self.min_y + self.max_y) / 2.0)
    }

    /// Midpoint of the top edge.
    pub fn top_mid(self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, self.min_y)
    }

    /// Midpoint of the bottom edge.
    pub fn bottom_mid(self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, self.max_y)
    }

    /// Returns true if the point lies inside the bounds or on an edge.
    ///
    /// # Examples
    ///
    /// ```
    /// # use canopy_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(100.0, 50.0));
    ///
    /// assert!(bounds.contains(Point::new(60.0, 30.0)));
    /// assert!(bounds.contains(Point::new(110.0, 60.0))); // corner is inside
    /// assert!(!bounds.contains(Point::new(5.0, 30.0)));
    /// ```
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use canopy_core::geometry::{Bounds, Point, Size};
    /// let header = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let content = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = header.merge(&content);
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

    /// Returns a copy with the maximum x-coordinate replaced.
    pub fn with_max_x(mut self, max_x: f32) -> Self {
        self.max_x = max_x;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let p = Point::new(1.5, -2.0);
        assert_eq!(p.x(), 1.5);
        assert_eq!(p.y(), -2.0);
    }

    #[test]
    fn test_point_default_is_zero() {
        assert!(Point::default().is_zero());
        assert!(!Point::new(0.0, 1.0).is_zero());
    }

    #[test]
    fn test_point_add_sub() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(3.0, 5.0);
        assert_eq!(a.add_point(b), Point::new(13.0, 25.0));
        assert_eq!(a.sub_point(b), Point::new(7.0, 15.0));
    }

    #[test]
    fn test_point_hypot() {
        assert_eq!(Point::new(3.0, 4.0).hypot(), 5.0);
    }

    #[test]
    fn test_point_scale() {
        assert_eq!(Point::new(10.0, -4.0).scale(0.5), Point::new(5.0, -2.0));
    }

    #[test]
    fn test_point_normalize() {
        let unit = Point::new(0.0, -12.0).normalize().unwrap();
        assert_eq!(unit, Point::new(0.0, -1.0));
        assert!(Point::new(0.0, 0.0).normalize().is_none());
    }

    #[test]
    fn test_point_perpendicular() {
        let p = Point::new(1.0, 0.0).perpendicular();
        assert_eq!(p, Point::new(-0.0, 1.0));
        // Perpendicular vectors have a zero dot product
        let v = Point::new(2.0, 3.0);
        let n = v.perpendicular();
        assert_eq!(v.x() * n.x() + v.y() * n.y(), 0.0);
    }

    #[test]
    fn test_bounds_new_from_top_left() {
        let b = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(30.0, 40.0));
        assert_eq!(b.min_x(), 10.0);
        assert_eq!(b.min_y(), 20.0);
        assert_eq!(b.max_x(), 40.0);
        assert_eq!(b.max_y(), 60.0);
        assert_eq!(b.width(), 30.0);
        assert_eq!(b.min_point(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_bounds_new_from_corners_any_order() {
        let b = Bounds::new_from_corners(Point::new(50.0, 5.0), Point::new(10.0, 25.0));
        assert_eq!(b.min_x(), 10.0);
        assert_eq!(b.min_y(), 5.0);
        assert_eq!(b.max_x(), 50.0);
        assert_eq!(b.max_y(), 25.0);
    }

    #[test]
    fn test_bounds_edge_midpoints() {
        let b = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
        assert_eq!(b.left_mid(), Point::new(0.0, 25.0));
        assert_eq!(b.right_mid(), Point::new(100.0, 25.0));
        assert_eq!(b.top_mid(), Point::new(50.0, 0.0));
        assert_eq!(b.bottom_mid(), Point::new(50.0, 50.0));
        assert_eq!(b.center(), Point::new(50.0, 25.0));
    }

    #[test]
    fn test_bounds_contains_edges_inclusive() {
        let b = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(b.contains(Point::new(10.0, 10.0)));
        assert!(b.contains(Point::new(5.0, 10.0)));
        assert!(!b.contains(Point::new(10.01, 5.0)));
        assert!(!b.contains(Point::new(5.0, -0.01)));
    }

    #[test]
    fn test_bounds_merge() {
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Bounds::new_from_top_left(Point::new(20.0, -5.0), Size::new(5.0, 5.0));
        let merged = a.merge(&b);
        assert_eq!(merged.min_y(), -5.0);
        assert_eq!(merged.max_x(), 25.0);
        assert_eq!(merged.min_point(), Point::new(0.0, -5.0));
    }

    #[test]
    fn test_bounds_with_max_x() {
        let b = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(20.0, 10.0));
        assert_eq!(b.with_max_x(12.0).width(), 12.0);
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..500.0,
            1.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    /// A normalized non-zero vector has unit length.
    fn check_normalize_has_unit_length(p: Point) -> Result<(), TestCaseError> {
        if let Some(unit) = p.normalize() {
            prop_assert!(approx_eq!(f32, unit.hypot(), 1.0, epsilon = 1e-4));
        }
        Ok(())
    }

    /// The center and all edge midpoints of a bounds lie inside it.
    fn check_bounds_contains_own_anchors(b: Bounds) -> Result<(), TestCaseError> {
        prop_assert!(b.contains(b.center()));
        prop_assert!(b.contains(b.left_mid()));
        prop_assert!(b.contains(b.right_mid()));
        prop_assert!(b.contains(b.top_mid()));
        prop_assert!(b.contains(b.bottom_mid()));
        Ok(())
    }

    /// Merged bounds contain both inputs' corners.
    fn check_merge_contains_both(a: Bounds, b: Bounds) -> Result<(), TestCaseError> {
        let merged = a.merge(&b);
        prop_assert!(merged.contains(a.min_point()));
        prop_assert!(merged.contains(b.min_point()));
        prop_assert!(merged.contains(Point::new(a.max_x(), a.max_y())));
        prop_assert!(merged.contains(Point::new(b.max_x(), b.max_y())));
        Ok(())
    }

    proptest! {
        #[test]
        fn normalize_has_unit_length(p in point_strategy()) {
            check_normalize_has_unit_length(p)?;
        }

        #[test]
        fn bounds_contains_own_anchors(b in bounds_strategy()) {
            check_bounds_contains_own_anchors(b)?;
        }

        #[test]
        fn merge_contains_both(a in bounds_strategy(), b in bounds_strategy()) {
            check_merge_contains_both(a, b)?;
        }
    }
}

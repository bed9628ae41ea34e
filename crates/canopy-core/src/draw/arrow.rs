//! Arrowhead geometry for connectors.

use crate::geometry::Point;

/// Dimensions of a filled triangular arrowhead.
///
/// The triangle's tip sits on the connector's end point; its base is
/// `length` back along the connector and `width` wide, centered on the line.
///
/// # Examples
///
/// ```
/// # use canopy_core::draw::Arrowhead;
/// # use canopy_core::geometry::Point;
/// let head = Arrowhead::new(10.0, 8.0);
/// let [tip, left, right] = head.triangle(Point::new(0.0, 0.0), Point::new(100.0, 0.0)).unwrap();
///
/// assert_eq!(tip, Point::new(100.0, 0.0));
/// assert_eq!(left, Point::new(90.0, 4.0));
/// assert_eq!(right, Point::new(90.0, -4.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    length: f32,
    width: f32,
}

impl Arrowhead {
    pub fn new(length: f32, width: f32) -> Self {
        Self { length, width }
    }

    /// Returns the arrowhead length along the connector.
    pub fn length(self) -> f32 {
        self.length
    }

    /// Returns the arrowhead base width.
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns a copy with both dimensions multiplied by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            length: self.length * factor,
            width: self.width * factor,
        }
    }

    /// Builds the triangle for a connector running from `from` to `tip`.
    ///
    /// Returns the three corners `[tip, base_left, base_right]`, or `None`
    /// when the connector has zero length and therefore no direction.
    pub fn triangle(self, from: Point, tip: Point) -> Option<[Point; 3]> {
        let direction = tip.sub_point(from).normalize()?;
        let base = tip.sub_point(direction.scale(self.length));
        let half_width = direction.perpendicular().scale(self.width / 2.0);

        Some([tip, base.add_point(half_width), base.sub_point(half_width)])
    }
}

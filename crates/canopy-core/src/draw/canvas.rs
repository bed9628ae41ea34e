//! The drawing-context trait shared by all rendering surfaces.

use crate::{
    color::Color,
    draw::StrokeDefinition,
    geometry::{Bounds, Point},
};

/// Font settings for a [`TextBlock`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    font_family: String,
    font_size: f32,
    color: Color,
}

impl TextStyle {
    pub fn new(font_family: impl Into<String>, font_size: f32, color: Color) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            color,
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns a copy whose font size is multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            font_size: self.font_size * factor,
            ..self.clone()
        }
    }
}

/// A left-aligned block of text lines.
///
/// `origin` is the top-left corner of the first line box; line `i` is
/// vertically centered on `origin.y + (i + 0.5) * line_height`. Anything
/// outside `clip` is not painted.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock<'a> {
    pub lines: Vec<&'a str>,
    pub origin: Point,
    pub line_height: f32,
    pub style: &'a TextStyle,
    pub clip: Bounds,
}

impl TextBlock<'_> {
    /// Returns the vertical center of line `index`.
    pub fn line_center_y(&self, index: usize) -> f32 {
        self.origin.y() + (index as f32 + 0.5) * self.line_height
    }
}

/// An immediate-mode 2D drawing context in surface pixel space.
///
/// Calls paint in order: a later call occludes what earlier calls drew.
pub trait Canvas {
    /// Discards everything drawn so far and fills the surface with `color`.
    fn clear(&mut self, color: Color);

    /// Draws a filled and stroked rectangle with rounded corners.
    fn rounded_rect(&mut self, bounds: Bounds, radius: f32, fill: Color, stroke: &StrokeDefinition);

    /// Draws a straight line segment.
    fn line(&mut self, from: Point, to: Point, stroke: &StrokeDefinition);

    /// Draws a filled polygon with no outline.
    fn polygon(&mut self, points: &[Point], fill: Color);

    /// Draws a filled and stroked circle.
    fn circle(&mut self, center: Point, radius: f32, fill: Color, stroke: &StrokeDefinition);

    /// Draws a multi-line text block clipped to its clip bounds.
    fn text(&mut self, block: &TextBlock<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_center_y() {
        let style = TextStyle::new("sans-serif", 12.0, Color::default());
        let block = TextBlock {
            lines: vec!["a", "b"],
            origin: Point::new(0.0, 100.0),
            line_height: 20.0,
            style: &style,
            clip: Bounds::default(),
        };
        assert_eq!(block.line_center_y(0), 110.0);
        assert_eq!(block.line_center_y(1), 130.0);
    }

    #[test]
    fn test_text_style_scaled() {
        let style = TextStyle::new("serif", 12.0, Color::default()).scaled(1.5);
        assert_eq!(style.font_size(), 18.0);
        assert_eq!(style.font_family(), "serif");
    }
}

//! A canvas that records draw calls instead of painting them.

use crate::{
    color::Color,
    draw::{Canvas, StrokeDefinition, TextBlock},
    geometry::{Bounds, Point},
};

/// One recorded [`Canvas`] call, with owned arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Color,
    },
    RoundedRect {
        bounds: Bounds,
        radius: f32,
        fill: Color,
        stroke: StrokeDefinition,
    },
    Line {
        from: Point,
        to: Point,
        stroke: StrokeDefinition,
    },
    Polygon {
        points: Vec<Point>,
        fill: Color,
    },
    Circle {
        center: Point,
        radius: f32,
        fill: Color,
        stroke: StrokeDefinition,
    },
    Text {
        lines: Vec<String>,
        origin: Point,
        line_height: f32,
        font_size: f32,
        clip: Bounds,
    },
}

/// Canvas that keeps every draw call as a [`DrawCommand`].
///
/// [`Canvas::clear`] drops previously recorded commands, mirroring how a real
/// surface discards earlier paint.
///
/// # Examples
///
/// ```
/// # use canopy_core::draw::{Canvas, DrawCommand, RecordingCanvas, StrokeDefinition};
/// # use canopy_core::color::Color;
/// # use canopy_core::geometry::Point;
/// let mut canvas = RecordingCanvas::new();
/// canvas.line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), &StrokeDefinition::default());
/// assert_eq!(canvas.commands().len(), 1);
///
/// canvas.clear(Color::new("white").unwrap());
/// assert!(matches!(canvas.commands(), [DrawCommand::Clear { .. }]));
/// ```
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded commands in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Consumes the canvas, returning the recorded commands.
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color });
    }

    fn rounded_rect(
        &mut self,
        bounds: Bounds,
        radius: f32,
        fill: Color,
        stroke: &StrokeDefinition,
    ) {
        self.commands.push(DrawCommand::RoundedRect {
            bounds,
            radius,
            fill,
            stroke: stroke.clone(),
        });
    }

    fn line(&mut self, from: Point, to: Point, stroke: &StrokeDefinition) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: stroke.clone(),
        });
    }

    fn polygon(&mut self, points: &[Point], fill: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            fill,
        });
    }

    fn circle(&mut self, center: Point, radius: f32, fill: Color, stroke: &StrokeDefinition) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke: stroke.clone(),
        });
    }

    fn text(&mut self, block: &TextBlock<'_>) {
        self.commands.push(DrawCommand::Text {
            lines: block.lines.iter().map(|line| line.to_string()).collect(),
            origin: block.origin,
            line_height: block.line_height,
            font_size: block.style.font_size(),
            clip: block.clip,
        });
    }
}

//! SVG rendering surface.

use log::debug;
use svg::{Document, node::element as svg_element};

use crate::{
    apply_stroke,
    color::Color,
    draw::{Canvas, StrokeDefinition, TextBlock},
    geometry::{Bounds, Point, Size},
};

/// Type alias for boxed SVG nodes.
type SvgNode = Box<dyn svg::Node>;

/// Canvas that accumulates drawing into an SVG document of a fixed size.
///
/// Each text block gets its own `<clipPath>` definition; elements are
/// emitted in paint order.
///
/// # Examples
///
/// ```
/// # use canopy_core::draw::{Canvas, StrokeDefinition, SvgCanvas};
/// # use canopy_core::color::Color;
/// # use canopy_core::geometry::{Bounds, Point, Size};
/// let mut canvas = SvgCanvas::new(Size::new(200.0, 100.0));
/// canvas.clear(Color::new("white").unwrap());
/// canvas.rounded_rect(
///     Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(80.0, 40.0)),
///     6.0,
///     Color::new("lightblue").unwrap(),
///     &StrokeDefinition::default(),
/// );
///
/// let svg = canvas.to_svg_string();
/// assert!(svg.contains("<svg"));
/// assert!(svg.contains("rx=\"6\""));
/// ```
#[derive(Debug)]
pub struct SvgCanvas {
    size: Size,
    nodes: Vec<SvgNode>,
    clip_paths: Vec<SvgNode>,
}

impl SvgCanvas {
    /// Creates an empty canvas with the given surface size in pixels.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            nodes: Vec::new(),
            clip_paths: Vec::new(),
        }
    }

    /// Returns the surface size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Builds the SVG document from everything drawn so far.
    pub fn to_document(&self) -> Document {
        let width = self.size.width();
        let height = self.size.height();
        debug!(width, height, elements = self.nodes.len(); "Building SVG document");

        let mut doc = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {width} {height}"));

        if !self.clip_paths.is_empty() {
            let defs = self
                .clip_paths
                .iter()
                .fold(svg_element::Definitions::new(), |defs, clip| {
                    defs.add(clip.clone())
                });
            doc = doc.add(defs);
        }

        self.nodes
            .iter()
            .fold(doc, |doc, node| doc.add(node.clone()))
    }

    /// Serializes the document to an SVG string.
    pub fn to_svg_string(&self) -> String {
        self.to_document().to_string()
    }

    fn push(&mut self, node: impl Into<SvgNode>) {
        self.nodes.push(node.into());
    }
}

fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x(), p.y()))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Canvas for SvgCanvas {
    fn clear(&mut self, color: Color) {
        self.nodes.clear();
        self.clip_paths.clear();

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set("fill", color.to_string())
            .set("fill-opacity", color.alpha());
        self.push(background);
    }

    fn rounded_rect(
        &mut self,
        bounds: Bounds,
        radius: f32,
        fill: Color,
        stroke: &StrokeDefinition,
    ) {
        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", radius)
            .set("ry", radius)
            .set("fill", fill.to_string())
            .set("fill-opacity", fill.alpha());
        let rect = apply_stroke!(rect, stroke);
        self.push(rect);
    }

    fn line(&mut self, from: Point, to: Point, stroke: &StrokeDefinition) {
        let line = svg_element::Line::new()
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y());
        let line = apply_stroke!(line, stroke);
        self.push(line);
    }

    fn polygon(&mut self, points: &[Point], fill: Color) {
        if points.is_empty() {
            return;
        }
        let polygon = svg_element::Polygon::new()
            .set("points", format_points(points))
            .set("fill", fill.to_string())
            .set("fill-opacity", fill.alpha())
            .set("stroke", "none");
        self.push(polygon);
    }

    fn circle(&mut self, center: Point, radius: f32, fill: Color, stroke: &StrokeDefinition) {
        let circle = svg_element::Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("r", radius)
            .set("fill", fill.to_string())
            .set("fill-opacity", fill.alpha());
        let circle = apply_stroke!(circle, stroke);
        self.push(circle);
    }

    fn text(&mut self, block: &TextBlock<'_>) {
        if block.lines.is_empty() {
            return;
        }

        let clip_id = format!("label-clip-{}", self.clip_paths.len());
        let clip_rect = svg_element::Rectangle::new()
            .set("x", block.clip.min_x())
            .set("y", block.clip.min_y())
            .set("width", block.clip.width())
            .set("height", block.clip.height());
        let clip_path = svg_element::ClipPath::new()
            .set("id", clip_id.as_str())
            .add(clip_rect);
        self.clip_paths.push(Box::new(clip_path));

        let style = block.style;
        let group = block.lines.iter().enumerate().fold(
            svg_element::Group::new().set("clip-path", format!("url(#{clip_id})")),
            |group, (index, line)| {
                let text = svg_element::Text::new(*line)
                    .set("x", block.origin.x())
                    .set("y", block.line_center_y(index))
                    .set("dominant-baseline", "central")
                    .set("text-anchor", "start")
                    .set("font-family", style.font_family())
                    .set("font-size", style.font_size())
                    .set("fill", style.color().to_string());
                group.add(text)
            },
        );
        self.push(group);
    }
}

#[cfg(test)]
mod tests {
    use crate::draw::TextStyle;

    use super::*;

    fn white() -> Color {
        Color::new("white").unwrap()
    }

    #[test]
    fn test_empty_canvas_is_valid_svg() {
        let canvas = SvgCanvas::new(Size::new(100.0, 50.0));
        let svg = canvas.to_svg_string();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("viewBox=\"0 0 100 50\""));
        assert!(!svg.contains("<defs"));
    }

    #[test]
    fn test_clear_discards_previous_drawing() {
        let mut canvas = SvgCanvas::new(Size::new(100.0, 50.0));
        canvas.line(Point::new(0.0, 0.0), Point::new(5.0, 5.0), &StrokeDefinition::default());
        canvas.clear(white());
        let svg = canvas.to_svg_string();
        assert!(!svg.contains("<line"));
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn test_polygon_points() {
        let mut canvas = SvgCanvas::new(Size::new(100.0, 50.0));
        canvas.polygon(
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 8.0)],
            Color::default(),
        );
        assert!(canvas.to_svg_string().contains("points=\"0,0 10,0 5,8\""));
    }

    #[test]
    fn test_text_is_clipped_per_block() {
        let mut canvas = SvgCanvas::new(Size::new(300.0, 200.0));
        let style = TextStyle::new("sans-serif", 12.0, Color::default());
        for top in [10.0, 60.0] {
            canvas.text(&TextBlock {
                lines: vec!["Harm", "Severity 4"],
                origin: Point::new(10.0, top),
                line_height: 15.0,
                style: &style,
                clip: Bounds::new_from_top_left(Point::new(10.0, top), Size::new(100.0, 30.0)),
            });
        }

        let svg = canvas.to_svg_string();
        assert!(svg.contains("id=\"label-clip-0\""));
        assert!(svg.contains("id=\"label-clip-1\""));
        assert!(svg.contains("url(#label-clip-1)"));
        assert!(svg.contains("Severity 4"));
    }

    #[test]
    fn test_empty_text_block_draws_nothing() {
        let mut canvas = SvgCanvas::new(Size::new(100.0, 50.0));
        let style = TextStyle::new("sans-serif", 12.0, Color::default());
        canvas.text(&TextBlock {
            lines: Vec::new(),
            origin: Point::default(),
            line_height: 15.0,
            style: &style,
            clip: Bounds::default(),
        });
        assert!(!canvas.to_svg_string().contains("clipPath"));
    }
}

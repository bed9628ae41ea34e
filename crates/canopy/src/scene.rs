//! Drawing a diagram onto a [`Canvas`].
//!
//! Rendering is a pure function of the node tree, the viewport, the current
//! selection and the [`Theme`]. Each frame is painted in three passes:
//!
//! 1. the background,
//! 2. one connector with an arrowhead per visible parent-child pair,
//! 3. every visible node with its toggle glyph and label.
//!
//! Nodes are painted after connectors so they cover connector endpoints.
//! All geometry is converted to screen space first; lengths such as corner
//! radii, stroke widths and the font size are scaled by the zoom factor.

use indexmap::IndexMap;
use log::trace;

use canopy_core::{
    color::Color,
    draw::{Arrowhead, Canvas, StrokeDefinition, TextBlock, TextStyle},
    geometry::{Bounds, Point},
    tree::{Node, NodeIndex, NodeKind, NodeTree},
    viewport::Viewport,
};

use crate::{CanopyError, config::StyleConfig};

/// The circular expand/collapse control in a node's top-right corner.
///
/// The same geometry is used for drawing and for hit-testing, in whichever
/// space the node bounds are given.
///
/// # Examples
///
/// ```
/// # use canopy::scene::ToggleGlyph;
/// # use canopy_core::geometry::{Bounds, Point, Size};
/// let glyph = ToggleGlyph::new(7.0, 5.0);
/// let node = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(180.0, 60.0));
///
/// assert_eq!(glyph.center(node), Point::new(168.0, 12.0));
/// assert!(glyph.contains(node, Point::new(170.0, 10.0)));
/// assert!(!glyph.contains(node, Point::new(90.0, 30.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleGlyph {
    radius: f32,
    inset: f32,
}

impl ToggleGlyph {
    pub fn new(radius: f32, inset: f32) -> Self {
        Self { radius, inset }
    }

    pub fn radius(self) -> f32 {
        self.radius
    }

    /// Returns a copy with radius and inset multiplied by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            radius: self.radius * factor,
            inset: self.inset * factor,
        }
    }

    /// Center of the glyph for a node occupying `bounds`.
    pub fn center(self, bounds: Bounds) -> Point {
        Point::new(
            bounds.max_x() - self.inset - self.radius,
            bounds.min_y() + self.inset + self.radius,
        )
    }

    /// Whether `point` lies within the glyph circle, edge included.
    pub fn contains(self, bounds: Bounds, point: Point) -> bool {
        point.sub_point(self.center(bounds)).hypot() <= self.radius
    }

    /// Horizontal space the glyph occupies at the right edge of a node.
    pub fn clearance(self) -> f32 {
        2.0 * (self.radius + self.inset)
    }
}

/// Fully resolved visual style, ready for rendering.
///
/// Built once per diagram from a [`StyleConfig`], so color strings are parsed
/// and validated up front rather than on every frame.
#[derive(Debug, Clone)]
pub struct Theme {
    background: Color,
    kind_colors: IndexMap<NodeKind, Color>,
    outline: StrokeDefinition,
    selected: StrokeDefinition,
    dragging: StrokeDefinition,
    connector: StrokeDefinition,
    glyph_stroke: StrokeDefinition,
    text: TextStyle,
    line_height: f32,
    text_padding: f32,
    corner_radius: f32,
    glyph: ToggleGlyph,
    arrowhead: Arrowhead,
}

impl Theme {
    /// Resolves a [`StyleConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Config`] for the first color string that fails
    /// to parse.
    pub fn new(style: &StyleConfig) -> Result<Self, CanopyError> {
        let kind_colors = NodeKind::ALL
            .into_iter()
            .map(|kind| style.kind_color(kind).map(|color| (kind, color)))
            .collect::<Result<IndexMap<_, _>, _>>()?;

        let selected_color = style.selected_color()?;

        Ok(Self {
            background: style.background_color()?,
            kind_colors,
            outline: StrokeDefinition::solid(style.outline_color()?, style.outline_width()),
            selected: StrokeDefinition::solid(selected_color, style.selected_width()),
            dragging: StrokeDefinition::dashed(selected_color, style.selected_width()),
            connector: StrokeDefinition::solid(style.connector_color()?, style.connector_width()),
            glyph_stroke: StrokeDefinition::solid(style.glyph_color()?, style.outline_width()),
            text: TextStyle::new(style.font_family(), style.font_size(), style.text_color()?),
            line_height: style.line_height(),
            text_padding: style.text_padding(),
            corner_radius: style.corner_radius(),
            glyph: ToggleGlyph::new(style.glyph_radius(), style.glyph_inset()),
            arrowhead: Arrowhead::new(style.arrow_length(), style.arrow_width()),
        })
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Fill color for nodes of `kind`.
    pub fn kind_color(&self, kind: NodeKind) -> Color {
        self.kind_colors.get(&kind).copied().unwrap_or_default()
    }

    pub fn glyph(&self) -> ToggleGlyph {
        self.glyph
    }

    pub fn arrowhead(&self) -> Arrowhead {
        self.arrowhead
    }
}

/// Picks the connector end points between two node rectangles.
///
/// When the centers are further apart horizontally than vertically the
/// connector joins the facing left/right edge midpoints, otherwise the facing
/// top/bottom edge midpoints. Returns `(start, end)` with `end` on the child.
///
/// # Examples
///
/// ```
/// # use canopy::scene::connector_endpoints;
/// # use canopy_core::geometry::{Bounds, Point, Size};
/// let size = Size::new(100.0, 40.0);
/// let parent = Bounds::new_from_top_left(Point::new(0.0, 0.0), size);
/// let child = Bounds::new_from_top_left(Point::new(200.0, 10.0), size);
///
/// let (start, end) = connector_endpoints(parent, child);
/// assert_eq!(start, Point::new(100.0, 20.0));
/// assert_eq!(end, Point::new(200.0, 30.0));
/// ```
pub fn connector_endpoints(parent: Bounds, child: Bounds) -> (Point, Point) {
    let delta = child.center().sub_point(parent.center());

    if delta.x().abs() > delta.y().abs() {
        if delta.x() > 0.0 {
            (parent.right_mid(), child.left_mid())
        } else {
            (parent.left_mid(), child.right_mid())
        }
    } else if delta.y() > 0.0 {
        (parent.bottom_mid(), child.top_mid())
    } else {
        (parent.top_mid(), child.bottom_mid())
    }
}

/// Splits a label on embedded line breaks (`\n` or `\r\n`).
pub fn label_lines(label: &str) -> Vec<&str> {
    if label.is_empty() {
        return Vec::new();
    }
    label.lines().collect()
}

/// Paints a node tree onto a [`Canvas`].
#[derive(Debug, Clone, Copy)]
pub struct SceneRenderer<'a> {
    theme: &'a Theme,
}

impl<'a> SceneRenderer<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Clears `canvas` and draws every visible connector and node.
    pub fn render<P>(
        &self,
        canvas: &mut dyn Canvas,
        tree: &NodeTree<P>,
        viewport: &Viewport,
        selected: Option<NodeIndex>,
    ) {
        canvas.clear(self.theme.background);

        let mut connectors = 0;
        for (parent, child) in tree.visible_edges() {
            self.draw_connector(canvas, parent, child, viewport);
            connectors += 1;
        }

        let mut nodes = 0;
        for (index, node) in tree.visible() {
            self.draw_node(canvas, node, viewport, selected == Some(index));
            nodes += 1;
        }

        trace!(nodes, connectors, zoom = viewport.zoom(); "Rendered scene");
    }

    fn draw_connector<P>(
        &self,
        canvas: &mut dyn Canvas,
        parent: &Node<P>,
        child: &Node<P>,
        viewport: &Viewport,
    ) {
        let zoom = viewport.zoom();
        let (start, end) = connector_endpoints(
            viewport.to_screen_bounds(parent.bounds()),
            viewport.to_screen_bounds(child.bounds()),
        );
        let stroke = self.theme.connector.scaled(zoom);

        canvas.line(start, end, &stroke);
        if let Some(triangle) = self.theme.arrowhead.scaled(zoom).triangle(start, end) {
            canvas.polygon(&triangle, stroke.color());
        }
    }

    fn draw_node<P>(
        &self,
        canvas: &mut dyn Canvas,
        node: &Node<P>,
        viewport: &Viewport,
        selected: bool,
    ) {
        let theme = self.theme;
        let zoom = viewport.zoom();
        let bounds = viewport.to_screen_bounds(node.bounds());

        let outline = if node.is_dragging() {
            &theme.dragging
        } else if selected {
            &theme.selected
        } else {
            &theme.outline
        };
        canvas.rounded_rect(
            bounds,
            theme.corner_radius * zoom,
            theme.kind_color(node.kind()),
            &outline.scaled(zoom),
        );

        let glyph = theme.glyph.scaled(zoom);
        if node.has_children() {
            self.draw_glyph(canvas, glyph, bounds, node.is_expanded(), zoom);
        }

        let lines = label_lines(node.label());
        if lines.is_empty() {
            return;
        }

        let padding = theme.text_padding * zoom;
        let text_style = theme.text.scaled(zoom);
        let line_height = text_style.font_size() * theme.line_height;
        let block_height = line_height * lines.len() as f32;

        let right_edge = if node.has_children() {
            bounds.max_x() - glyph.clearance()
        } else {
            bounds.max_x() - padding
        };
        let clip = bounds.with_max_x(right_edge.max(bounds.min_x()));

        canvas.text(&TextBlock {
            lines,
            origin: Point::new(bounds.min_x() + padding, bounds.center().y() - block_height / 2.0),
            line_height,
            style: &text_style,
            clip,
        });
    }

    fn draw_glyph(
        &self,
        canvas: &mut dyn Canvas,
        glyph: ToggleGlyph,
        bounds: Bounds,
        expanded: bool,
        zoom: f32,
    ) {
        let center = glyph.center(bounds);
        let stroke = self.theme.glyph_stroke.scaled(zoom);
        canvas.circle(center, glyph.radius(), self.theme.background, &stroke);

        let arm = glyph.radius() * 0.55;
        canvas.line(
            center.sub_point(Point::new(arm, 0.0)),
            center.add_point(Point::new(arm, 0.0)),
            &stroke,
        );
        if !expanded {
            canvas.line(
                center.sub_point(Point::new(0.0, arm)),
                center.add_point(Point::new(0.0, arm)),
                &stroke,
            );
        }
    }
}

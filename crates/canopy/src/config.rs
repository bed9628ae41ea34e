//! Configuration types for Canopy diagrams.
//!
//! All types implement [`serde::Deserialize`] so hosts can load them from
//! any serde format; every section and field falls back to its default when
//! absent.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Node size, spacing, margin and flow direction.
//! - [`ViewportConfig`] - Zoom range and step, and the rendering surface size.
//! - [`StyleConfig`] - Colors, stroke widths, glyph and font settings.
//!
//! # Example
//!
//! ```
//! # use canopy::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().node_width(), 180.0);
//! assert!(config.viewport().to_viewport().is_ok());
//! ```

use serde::Deserialize;

use canopy_core::{color::Color, tree::NodeKind, viewport::Viewport};

use crate::CanopyError;

/// Top-level configuration combining layout, viewport and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    viewport: ViewportConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, viewport: ViewportConfig, style: StyleConfig) -> Self {
        Self {
            layout,
            viewport,
            style,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Axis along which tree levels advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutDirection {
    /// Levels advance to the right; siblings stack vertically.
    #[default]
    LeftToRight,
    /// Levels advance downwards; siblings spread horizontally.
    TopToBottom,
}

/// Constants driving the initial placement of nodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Id of the synthetic root node.
    root_id: String,
    /// Label of the synthetic root node.
    root_label: String,
    node_width: f32,
    node_height: f32,
    /// Gap between neighboring siblings.
    sibling_spacing: f32,
    /// Gap between a parent and its children.
    level_spacing: f32,
    /// Distance of the root from the model-space origin on both axes.
    margin: f32,
    direction: LayoutDirection,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root_id: "canopy-root".to_string(),
            root_label: "Analysis".to_string(),
            node_width: 180.0,
            node_height: 60.0,
            sibling_spacing: 30.0,
            level_spacing: 90.0,
            margin: 50.0,
            direction: LayoutDirection::default(),
        }
    }
}

impl LayoutConfig {
    pub fn with_root(mut self, id: impl Into<String>, label: impl Into<String>) -> Self {
        self.root_id = id.into();
        self.root_label = label.into();
        self
    }

    pub fn with_node_size(mut self, width: f32, height: f32) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }

    pub fn with_spacing(mut self, sibling: f32, level: f32) -> Self {
        self.sibling_spacing = sibling;
        self.level_spacing = level;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    pub fn sibling_spacing(&self) -> f32 {
        self.sibling_spacing
    }

    pub fn level_spacing(&self) -> f32 {
        self.level_spacing
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }
}

/// Zoom behavior and the size of the rendering surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Factor applied per zoom step.
    zoom_step: f32,
    min_zoom: f32,
    max_zoom: f32,
    /// Surface width in pixels.
    width: f32,
    /// Surface height in pixels.
    height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_step: 1.1,
            min_zoom: 0.25,
            max_zoom: 4.0,
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl ViewportConfig {
    pub fn with_zoom(mut self, min_zoom: f32, max_zoom: f32, zoom_step: f32) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom_step = zoom_step;
        self
    }

    pub fn with_surface(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn zoom_step(&self) -> f32 {
        self.zoom_step
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Builds a [`Viewport`] from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Config`] when the zoom range is empty or not
    /// positive, the step does not grow the zoom, or the surface has no area.
    pub fn to_viewport(&self) -> Result<Viewport, CanopyError> {
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom && self.max_zoom.is_finite()) {
            return Err(CanopyError::Config(format!(
                "invalid zoom range [{}, {}]",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.zoom_step > 1.0 && self.zoom_step.is_finite()) {
            return Err(CanopyError::Config(format!(
                "zoom step must be greater than 1, got {}",
                self.zoom_step
            )));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(CanopyError::Config(format!(
                "invalid surface size {}x{}",
                self.width, self.height
            )));
        }
        Ok(Viewport::new(self.min_zoom, self.max_zoom, self.zoom_step))
    }
}

/// Fill colors per node kind, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KindColors {
    root: String,
    component: String,
    sequence: String,
    hazard: String,
    harm: String,
    control: String,
    detail: String,
}

impl Default for KindColors {
    fn default() -> Self {
        Self {
            root: "#eceff1".to_string(),
            component: "#bbdefb".to_string(),
            sequence: "#c8e6c9".to_string(),
            hazard: "#ffe0b2".to_string(),
            harm: "#ffcdd2".to_string(),
            control: "#d1c4e9".to_string(),
            detail: "#f5f5f5".to_string(),
        }
    }
}

impl KindColors {
    /// Returns the configured color string for `kind`.
    pub fn get(&self, kind: NodeKind) -> &str {
        match kind {
            NodeKind::Root => &self.root,
            NodeKind::Component => &self.component,
            NodeKind::Sequence => &self.sequence,
            NodeKind::Hazard => &self.hazard,
            NodeKind::Harm => &self.harm,
            NodeKind::Control => &self.control,
            NodeKind::Detail => &self.detail,
        }
    }

    /// Overrides the color of one kind.
    pub fn with(mut self, kind: NodeKind, color: impl Into<String>) -> Self {
        let color = color.into();
        match kind {
            NodeKind::Root => self.root = color,
            NodeKind::Component => self.component = color,
            NodeKind::Sequence => self.sequence = color,
            NodeKind::Hazard => self.hazard = color,
            NodeKind::Harm => self.harm = color,
            NodeKind::Control => self.control = color,
            NodeKind::Detail => self.detail = color,
        }
        self
    }
}

/// Visual styling of rendered diagrams.
///
/// Lengths are model-space units and scale with zoom when rendered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: String,
    outline_color: String,
    /// Outline color of the selected and the dragged node.
    selected_color: String,
    connector_color: String,
    text_color: String,
    glyph_color: String,
    kind_colors: KindColors,
    corner_radius: f32,
    outline_width: f32,
    selected_width: f32,
    connector_width: f32,
    glyph_radius: f32,
    /// Gap between the glyph circle and the node's top and right edges.
    glyph_inset: f32,
    arrow_length: f32,
    arrow_width: f32,
    font_family: String,
    font_size: f32,
    /// Line height as a multiple of the font size.
    line_height: f32,
    text_padding: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: "white".to_string(),
            outline_color: "#37474f".to_string(),
            selected_color: "#ff6f00".to_string(),
            connector_color: "#607d8b".to_string(),
            text_color: "#212121".to_string(),
            glyph_color: "#37474f".to_string(),
            kind_colors: KindColors::default(),
            corner_radius: 8.0,
            outline_width: 1.0,
            selected_width: 2.5,
            connector_width: 1.5,
            glyph_radius: 7.0,
            glyph_inset: 5.0,
            arrow_length: 10.0,
            arrow_width: 8.0,
            font_family: "sans-serif".to_string(),
            font_size: 12.0,
            line_height: 1.25,
            text_padding: 8.0,
        }
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, CanopyError> {
    Color::new(value).map_err(|err| CanopyError::Config(format!("{field}: {err}")))
}

impl StyleConfig {
    pub fn with_kind_colors(mut self, kind_colors: KindColors) -> Self {
        self.kind_colors = kind_colors;
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn with_glyph(mut self, radius: f32, inset: f32) -> Self {
        self.glyph_radius = radius;
        self.glyph_inset = inset;
        self
    }

    /// Returns the parsed background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns [`CanopyError::Config`] if the color string cannot be parsed.
    pub fn background_color(&self) -> Result<Color, CanopyError> {
        parse_color("background color", &self.background_color)
    }

    pub fn outline_color(&self) -> Result<Color, CanopyError> {
        parse_color("outline color", &self.outline_color)
    }

    pub fn selected_color(&self) -> Result<Color, CanopyError> {
        parse_color("selected color", &self.selected_color)
    }

    pub fn connector_color(&self) -> Result<Color, CanopyError> {
        parse_color("connector color", &self.connector_color)
    }

    pub fn text_color(&self) -> Result<Color, CanopyError> {
        parse_color("text color", &self.text_color)
    }

    pub fn glyph_color(&self) -> Result<Color, CanopyError> {
        parse_color("glyph color", &self.glyph_color)
    }

    /// Returns the parsed fill [`Color`] for `kind`.
    pub fn kind_color(&self, kind: NodeKind) -> Result<Color, CanopyError> {
        parse_color(&format!("{kind} color"), self.kind_colors.get(kind))
    }

    pub fn kind_colors(&self) -> &KindColors {
        &self.kind_colors
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn outline_width(&self) -> f32 {
        self.outline_width
    }

    pub fn selected_width(&self) -> f32 {
        self.selected_width
    }

    pub fn connector_width(&self) -> f32 {
        self.connector_width
    }

    pub fn glyph_radius(&self) -> f32 {
        self.glyph_radius
    }

    pub fn glyph_inset(&self) -> f32 {
        self.glyph_inset
    }

    pub fn arrow_length(&self) -> f32 {
        self.arrow_length
    }

    pub fn arrow_width(&self) -> f32 {
        self.arrow_width
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn text_padding(&self) -> f32 {
        self.text_padding
    }
}

//! Zoom and pan transform between model space and screen space.
//!
//! The transform is `screen = (model + pan) * zoom`. Pan is stored in model
//! units, so dragging the canvas by a fixed number of pixels pans less model
//! distance the further the view is zoomed in. Zoom is anchored at the
//! screen origin.

use log::trace;

use crate::geometry::{Bounds, Point};

/// Current zoom and pan of a diagram.
///
/// # Examples
///
/// ```
/// # use canopy_core::viewport::Viewport;
/// # use canopy_core::geometry::Point;
/// let mut viewport = Viewport::new(0.25, 4.0, 2.0);
/// viewport.zoom_in();
/// viewport.pan_by(Point::new(20.0, 0.0));
///
/// // 20 raw pixels at 2x zoom pan 10 model units
/// assert_eq!(viewport.pan(), Point::new(10.0, 0.0));
/// assert_eq!(viewport.to_screen(Point::new(0.0, 0.0)), Point::new(20.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f32,
    pan: Point,
    min_zoom: f32,
    max_zoom: f32,
    zoom_step: f32,
}

impl Viewport {
    /// Zoom factor restored by [`Viewport::reset`], clamped into range.
    pub const DEFAULT_ZOOM: f32 = 1.0;

    /// Creates a viewport at the default zoom with no pan.
    ///
    /// The caller is responsible for passing `0 < min_zoom <= max_zoom` and
    /// `zoom_step > 1`.
    pub fn new(min_zoom: f32, max_zoom: f32, zoom_step: f32) -> Self {
        let mut viewport = Self {
            zoom: Self::DEFAULT_ZOOM,
            pan: Point::default(),
            min_zoom,
            max_zoom,
            zoom_step,
        };
        viewport.reset();
        viewport
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Pan offset in model units.
    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    pub fn zoom_step(&self) -> f32 {
        self.zoom_step
    }

    /// Converts a model-space point to screen space.
    pub fn to_screen(&self, model: Point) -> Point {
        model.add_point(self.pan).scale(self.zoom)
    }

    /// Converts a screen-space point to model space.
    pub fn to_model(&self, screen: Point) -> Point {
        screen.scale(1.0 / self.zoom).sub_point(self.pan)
    }

    /// Converts model-space bounds to screen space.
    pub fn to_screen_bounds(&self, bounds: Bounds) -> Bounds {
        Bounds::new_from_corners(
            self.to_screen(bounds.min_point()),
            self.to_screen(Point::new(bounds.max_x(), bounds.max_y())),
        )
    }

    /// Converts a model-space length to screen pixels.
    pub fn scale_length(&self, length: f32) -> f32 {
        length * self.zoom
    }

    /// Multiplies the zoom by one step, up to the maximum.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * self.zoom_step);
    }

    /// Divides the zoom by one step, down to the minimum.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / self.zoom_step);
    }

    /// Sets the zoom, clamped into the configured range.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        trace!(zoom = self.zoom; "Viewport zoom changed");
    }

    /// Pans by a raw screen-space pointer delta.
    pub fn pan_by(&mut self, raw_delta: Point) {
        self.pan = self.pan.add_point(raw_delta.scale(1.0 / self.zoom));
    }

    /// Restores the default zoom and removes any pan.
    pub fn reset(&mut self) {
        self.set_zoom(Self::DEFAULT_ZOOM);
        self.pan = Point::default();
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.25, 4.0, 1.1)
    }
}

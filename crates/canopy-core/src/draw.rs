//! Drawing surfaces and visual primitives.
//!
//! Canopy renders through the [`Canvas`] trait, a small immediate-mode 2D
//! drawing context: calls are painted in the order they are made, so later
//! calls occlude earlier ones. Two surfaces ship with the crate:
//!
//! - [`SvgCanvas`] builds an SVG document
//! - [`RecordingCanvas`] records [`DrawCommand`]s, for tests and hosts that
//!   replay drawing onto their own backend
//!
//! Supporting types:
//!
//! - [`StrokeDefinition`] / [`StrokeStyle`] for outlines and lines
//! - [`TextStyle`] / [`TextBlock`] for multi-line clipped labels
//! - [`Arrowhead`] for connector arrowhead geometry

mod arrow;
mod canvas;
mod recording;
mod stroke;
mod svg_canvas;

pub use arrow::Arrowhead;
pub use canvas::{Canvas, TextBlock, TextStyle};
pub use recording::{DrawCommand, RecordingCanvas};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use svg_canvas::SvgCanvas;

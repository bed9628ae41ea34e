//! CSS colors for node fills, strokes and text.
//!
//! Configuration carries colors as CSS strings; they are parsed once into
//! [`Color`] when a theme is built so rendering never has to fail.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS color.
///
/// ```
/// use canopy_core::color::Color;
///
/// let harm: Color = "#ffcdd2".parse().unwrap();
/// assert_eq!(harm.alpha(), 1.0);
/// assert!(Color::new("rgba(0, 0, 0, 0.25)").unwrap().alpha() < 1.0);
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color(DynamicColor);

impl Color {
    /// Parses any CSS color: hex, `rgb()`/`hsl()` functions or a named color.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected input.
    pub fn new(css: &str) -> Result<Self, String> {
        DynamicColor::from_str(css)
            .map(Self)
            .map_err(|err| format!("invalid color `{css}`: {err}"))
    }

    /// Opacity in `0.0..=1.0`, emitted separately as `fill-opacity` and
    /// `stroke-opacity`.
    pub fn alpha(self) -> f32 {
        self.0.components[3]
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

//! Display-side model of the scope screen
//!
//! Everything the rendering layer reads on a redraw tick lives here: the
//! [`Cursor`] with its flag sets and [`Caption`]s, the screen-space
//! [`Point`] and the abstract [`Color`] together with its mapping to the
//! native `egui` color type.

pub mod caption;
pub mod cursor;

pub use caption::{AlignmentReference, Caption, CaptionSnapshot, HorizontalAlignment, VerticalAlignment};
pub use cursor::{Cursor, CursorLines, CursorMarkers, CursorSnapshot, LineWeight};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position in screen (or graph) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Backend-independent RGBA color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const ORANGE: Color = Color::rgb(1.0, 0.5, 0.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Map to the rendering backend's native color
    pub fn to_native(self) -> egui::Color32 {
        fn channel(value: f64) -> u8 {
            (value.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        egui::Color32::from_rgba_unmultiplied(
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<Color> for egui::Color32 {
    fn from(color: Color) -> Self {
        color.to_native()
    }
}

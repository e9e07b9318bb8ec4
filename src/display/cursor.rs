//! Scope cursor
//!
//! A cursor is a screen-space marker drawn as one or two lines through its
//! position, with optional edge markers and captions. Its position is an
//! [`ObservableProperty`] so bindings can keep it in sync with domain values
//! and so a drag on screen flows back to those values. A hidden cursor
//! draws nothing and ignores drags.

use serde::{Deserialize, Serialize};

use super::caption::{Caption, CaptionSnapshot};
use super::{Color, Point};
use crate::reactive::{Endpoint, ObservableProperty, ObservableSource};

bitflags::bitflags! {
    /// Cursor lines: `X` is the vertical line at the X position, `Y` the
    /// horizontal line at the Y position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct CursorLines: u8 {
        const NONE = 0;
        const X = 1 << 0;
        const Y = 1 << 1;
        const BOTH = Self::X.bits() | Self::Y.bits();
    }
}

bitflags::bitflags! {
    /// Edge markers drawn where a cursor line meets the graph border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct CursorMarkers: u8 {
        const NONE = 0;
        const X_LEFT = 1 << 0;
        const X_RIGHT = 1 << 1;
        const X_FULL = Self::X_LEFT.bits() | Self::X_RIGHT.bits();
        const Y_UPPER = 1 << 2;
        const Y_LOWER = 1 << 3;
        const Y_FULL = Self::Y_UPPER.bits() | Self::Y_LOWER.bits();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineWeight {
    #[default]
    Low,
    Medium,
    High,
}

/// A cursor on the scope screen.
#[derive(Debug)]
pub struct Cursor {
    pub position: ObservableProperty<Point>,
    pub visible: ObservableProperty<bool>,
    pub lines: CursorLines,
    pub selectable_lines: CursorLines,
    pub highlighted_lines: CursorLines,
    pub line_weight: LineWeight,
    pub markers: CursorMarkers,
    pub color: Color,
    pub captions: Vec<Caption>,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            position: ObservableProperty::new("position", Point::default()),
            visible: ObservableProperty::new("visible", true),
            lines: CursorLines::BOTH,
            selectable_lines: CursorLines::BOTH,
            highlighted_lines: CursorLines::NONE,
            line_weight: LineWeight::default(),
            markers: CursorMarkers::NONE,
            color: Color::WHITE,
            captions: Vec::new(),
        }
    }
}

impl Cursor {
    /// Visible cursor showing both lines, both selectable, white
    pub fn new() -> Self {
        Self::default()
    }

    /// Endpoint on the X coordinate of the position
    pub fn x_endpoint(&self) -> Endpoint<f64> {
        let (get, set) = (self.position.clone(), self.position.clone());
        Endpoint::new(
            format!("{}.x", self.position.label()),
            move || get.get().x,
            move |x| set.update(|p| p.x = x),
            self.position.clone(),
        )
    }

    /// Endpoint on the Y coordinate of the position
    pub fn y_endpoint(&self) -> Endpoint<f64> {
        let (get, set) = (self.position.clone(), self.position.clone());
        Endpoint::new(
            format!("{}.y", self.position.label()),
            move || get.get().y,
            move |y| set.update(|p| p.y = y),
            self.position.clone(),
        )
    }

    /// Move the cursor as a drag would: only the coordinates of selectable
    /// lines change. Returns whether anything was written.
    pub fn drag_to(&self, target: Point) -> bool {
        if !self.visible.get() || self.selectable_lines.is_empty() {
            return false;
        }
        let mut position = self.position.get();
        if self.selectable_lines.contains(CursorLines::X) {
            position.x = target.x;
        }
        if self.selectable_lines.contains(CursorLines::Y) {
            position.y = target.y;
        }
        self.position.set(position);
        true
    }

    /// Evaluate everything the renderer needs for one redraw.
    ///
    /// A hidden cursor reports no lines, no markers and hidden captions.
    pub fn snapshot(&self) -> CursorSnapshot {
        let visible = self.visible.get();
        let shown = |lines: CursorLines| if visible { lines } else { CursorLines::NONE };
        CursorSnapshot {
            position: self.position.get(),
            visible,
            lines: shown(self.lines),
            selectable_lines: shown(self.selectable_lines),
            highlighted_lines: shown(self.highlighted_lines),
            line_weight: self.line_weight,
            markers: if visible { self.markers } else { CursorMarkers::NONE },
            color: self.color,
            captions: self
                .captions
                .iter()
                .map(|caption| {
                    let mut snapshot = caption.snapshot();
                    snapshot.visible &= visible;
                    snapshot
                })
                .collect(),
        }
    }
}

/// Evaluated cursor state for one redraw tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CursorSnapshot {
    pub position: Point,
    pub visible: bool,
    pub lines: CursorLines,
    pub selectable_lines: CursorLines,
    pub highlighted_lines: CursorLines,
    pub line_weight: LineWeight,
    pub markers: CursorMarkers,
    pub color: Color,
    pub captions: Vec<CaptionSnapshot>,
}

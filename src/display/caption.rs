//! Cursor captions
//!
//! A caption's text is produced by a closure that is evaluated on every
//! read; nothing is cached, so a caption always reflects the current values
//! of whatever it closes over.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

/// What a caption's alignment is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignmentReference {
    /// Next to the cursor's vertical line, at the top or bottom edge of the
    /// graph area
    XPositionAndVerticalRangeEdge,
    /// Next to the cursor's horizontal line, at the left or right edge of
    /// the graph area
    YPositionAndHorizontalRangeEdge,
}

/// Text attached to a cursor.
#[derive(Clone)]
pub struct Caption {
    text: Rc<dyn Fn() -> String>,
    visible: Rc<dyn Fn() -> bool>,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
    pub reference: AlignmentReference,
    pub color: Color,
}

impl Caption {
    /// Create an always-visible caption
    pub fn new(
        text: impl Fn() -> String + 'static,
        horizontal_alignment: HorizontalAlignment,
        vertical_alignment: VerticalAlignment,
        reference: AlignmentReference,
        color: Color,
    ) -> Self {
        Self {
            text: Rc::new(text),
            visible: Rc::new(|| true),
            horizontal_alignment,
            vertical_alignment,
            reference,
            color,
        }
    }

    /// Make visibility follow `visible`
    pub fn with_visibility(mut self, visible: impl Fn() -> bool + 'static) -> Self {
        self.visible = Rc::new(visible);
        self
    }

    /// Evaluate the caption text
    pub fn text(&self) -> String {
        (self.text)()
    }

    pub fn is_visible(&self) -> bool {
        (self.visible)()
    }

    /// Evaluate text and visibility once
    pub fn snapshot(&self) -> CaptionSnapshot {
        CaptionSnapshot {
            text: self.text(),
            visible: self.is_visible(),
            horizontal_alignment: self.horizontal_alignment,
            vertical_alignment: self.vertical_alignment,
            reference: self.reference,
            color: self.color,
        }
    }
}

impl fmt::Debug for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Caption")
            .field("text", &self.text())
            .field("horizontal_alignment", &self.horizontal_alignment)
            .field("vertical_alignment", &self.vertical_alignment)
            .field("reference", &self.reference)
            .finish()
    }
}

/// Evaluated caption, as handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionSnapshot {
    pub text: String,
    pub visible: bool,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
    pub reference: AlignmentReference,
    pub color: Color,
}

//! Axis- and role-dependent cursor styling
//!
//! Measurement cursors differ only by axis and by whether they are the
//! reference cursor of a delta pair. Everything that varies between the four
//! combinations lives in [`MEASUREMENT_STYLES`].

use crate::display::{
    AlignmentReference, Cursor, CursorLines, CursorMarkers, HorizontalAlignment, LineWeight,
    VerticalAlignment,
};
use crate::reactive::Endpoint;

/// Axis a cursor measures along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorAxis {
    /// Time axis: the cursor is a vertical line at an X position
    Horizontal,
    /// Level axis: the cursor is a horizontal line at a Y position
    Vertical,
}

impl CursorAxis {
    /// The line drawn for a cursor on this axis
    pub fn lines(self) -> CursorLines {
        match self {
            CursorAxis::Horizontal => CursorLines::X,
            CursorAxis::Vertical => CursorLines::Y,
        }
    }

    /// Where captions of a cursor on this axis are anchored
    pub fn alignment_reference(self) -> AlignmentReference {
        match self {
            CursorAxis::Horizontal => AlignmentReference::XPositionAndVerticalRangeEdge,
            CursorAxis::Vertical => AlignmentReference::YPositionAndHorizontalRangeEdge,
        }
    }

    /// The cursor coordinate that moves along this axis
    pub fn endpoint(self, cursor: &Cursor) -> Endpoint<f64> {
        match self {
            CursorAxis::Horizontal => cursor.x_endpoint(),
            CursorAxis::Vertical => cursor.y_endpoint(),
        }
    }

    fn index(self) -> usize {
        match self {
            CursorAxis::Horizontal => 0,
            CursorAxis::Vertical => 1,
        }
    }
}

/// Whether a measurement cursor is the reference of a delta measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorRole {
    Reference,
    NonReference,
}

impl CursorRole {
    pub fn from_is_reference(is_reference: bool) -> Self {
        if is_reference {
            CursorRole::Reference
        } else {
            CursorRole::NonReference
        }
    }

    fn index(self) -> usize {
        match self {
            CursorRole::Reference => 0,
            CursorRole::NonReference => 1,
        }
    }
}

/// Visual configuration of one (axis, role) measurement cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasurementStyle {
    pub axis: CursorAxis,
    pub role: CursorRole,
    pub markers: CursorMarkers,
    pub caption_horizontal: HorizontalAlignment,
    pub caption_vertical: VerticalAlignment,
}

/// Indexed by `axis * 2 + role`
pub const MEASUREMENT_STYLES: [MeasurementStyle; 4] = [
    MeasurementStyle {
        axis: CursorAxis::Horizontal,
        role: CursorRole::Reference,
        markers: CursorMarkers::X_LEFT,
        caption_horizontal: HorizontalAlignment::Right,
        caption_vertical: VerticalAlignment::Top,
    },
    MeasurementStyle {
        axis: CursorAxis::Horizontal,
        role: CursorRole::NonReference,
        markers: CursorMarkers::X_RIGHT,
        caption_horizontal: HorizontalAlignment::Left,
        caption_vertical: VerticalAlignment::Top,
    },
    MeasurementStyle {
        axis: CursorAxis::Vertical,
        role: CursorRole::Reference,
        markers: CursorMarkers::Y_LOWER,
        caption_horizontal: HorizontalAlignment::Right,
        caption_vertical: VerticalAlignment::Top,
    },
    MeasurementStyle {
        axis: CursorAxis::Vertical,
        role: CursorRole::NonReference,
        markers: CursorMarkers::Y_UPPER,
        caption_horizontal: HorizontalAlignment::Right,
        caption_vertical: VerticalAlignment::Bottom,
    },
];

/// Line weight shared by all measurement cursors
pub const MEASUREMENT_LINE_WEIGHT: LineWeight = LineWeight::Medium;

/// Line weight of trigger cursors
pub const TRIGGER_LINE_WEIGHT: LineWeight = LineWeight::Low;

impl MeasurementStyle {
    pub fn lookup(axis: CursorAxis, role: CursorRole) -> &'static MeasurementStyle {
        &MEASUREMENT_STYLES[axis.index() * 2 + role.index()]
    }

    /// A bare cursor in this style, without position binding or captions
    pub fn cursor(&self) -> Cursor {
        Cursor {
            lines: self.axis.lines(),
            selectable_lines: self.axis.lines(),
            line_weight: MEASUREMENT_LINE_WEIGHT,
            markers: self.markers,
            ..Cursor::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_matches_table_keys() {
        for axis in [CursorAxis::Horizontal, CursorAxis::Vertical] {
            for role in [CursorRole::Reference, CursorRole::NonReference] {
                let style = MeasurementStyle::lookup(axis, role);
                assert_eq!((style.axis, style.role), (axis, role));
            }
        }
    }

    #[test]
    fn test_styled_cursor() {
        let cursor = MeasurementStyle::lookup(CursorAxis::Vertical, CursorRole::NonReference).cursor();
        assert_eq!(cursor.lines, CursorLines::Y);
        assert_eq!(cursor.selectable_lines, CursorLines::Y);
        assert_eq!(cursor.line_weight, LineWeight::Medium);
        assert_eq!(cursor.markers, CursorMarkers::Y_UPPER);
    }

    #[test]
    fn test_axis_anchoring() {
        assert_eq!(
            CursorAxis::Horizontal.alignment_reference(),
            AlignmentReference::XPositionAndVerticalRangeEdge
        );
        assert_eq!(
            CursorAxis::Vertical.alignment_reference(),
            AlignmentReference::YPositionAndHorizontalRangeEdge
        );
    }
}

//! Cursor assemblies
//!
//! Builds the four kinds of cursors shown on the scope screen and wires them
//! to their viewmodels:
//!
//! | Cursor | Axis | Bound value | Converter | Influencing objects |
//! |---|---|---|---|---|
//! | time measurement | horizontal | measurement value | graph-base scale, trigger position | graph base, trigger |
//! | level measurement | vertical | measurement value | channel scale, reference point Y | channel, reference point |
//! | trigger criteria | vertical | trigger level | channel scale, reference point Y | channel, reference point |
//! | trigger point | horizontal | trigger position | none | none |
//!
//! Measurement cursors come from one generic routine driven by the
//! [`style::MEASUREMENT_STYLES`] table.

pub mod assembly;
pub mod bound;
pub mod captions;
pub mod mapping;
pub mod style;

pub use assembly::CursorAssembly;
pub use bound::BoundCursor;
pub use mapping::LinearMapping;
pub use style::{CursorAxis, CursorRole, MeasurementStyle};

use std::rc::Rc;

/// Live reader of a numeric value
pub type ValueProvider = Rc<dyn Fn() -> f64>;

//! # ScopeView-RS: Reactive cursor bindings for oscilloscope displays
//!
//! Keeps on-screen cursors (measurement cursors, trigger markers) in sync
//! with the domain values they represent, in both directions: a viewmodel
//! change moves the cursor, and dragging the cursor writes the viewmodel.
//! Positions depend on further state (scale factors, reference positions,
//! trigger configuration), and any change there moves the cursor too.
//!
//! ## Architecture
//!
//! - **Reactive kernel** ([`reactive`]): observable properties, bidirectional
//!   value converters, two-way bindings and explicit dependency registration
//! - **Viewmodels** ([`viewmodels`]): channel, graph base, trigger and
//!   measurement cursor state as observable properties
//! - **Display model** ([`display`]): cursors, captions and render snapshots
//! - **Cursor assemblies** ([`cursors`]): the factory wiring viewmodels to
//!   cursors through converters and bindings
//!
//! Everything runs on one thread. A write returns only after every binding
//! it touches has settled.
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use scopeview_rs::{
//!     config::DisplayConfig,
//!     cursors::CursorAssembly,
//!     display::Color,
//!     viewmodels::{ChannelViewModel, MeasurementCursorViewModel},
//! };
//!
//! let assembly = CursorAssembly::from_config(&DisplayConfig::default());
//! let channel = ChannelViewModel::new("ch1", "V", Color::YELLOW);
//! let cursor_vm = MeasurementCursorViewModel::new("level 1");
//!
//! let bound = assembly.level_measurement_cursor(&cursor_vm, &channel, false, None, Rc::new(|| 0.0));
//! cursor_vm.value.set(1.5);
//! println!("{:?}", bound.snapshot());
//! ```

pub mod config;
pub mod cursors;
pub mod display;
pub mod error;
pub mod format;
pub mod reactive;
pub mod viewmodels;

// Re-export commonly used types
pub use config::{DisplayConfig, InvalidValuePolicy};
pub use cursors::{BoundCursor, CursorAssembly};
pub use display::{Color, Cursor, CursorSnapshot, Point};
pub use error::{Result, ScopeError};
pub use format::{SiUnitFormatter, UnitFormatter};
pub use reactive::{Binding, DependencyRegistrar, ObservableProperty, ValueConverter};

//! Measurement cursor viewmodel
//!
//! The value a measurement cursor reads off the graph and whether the cursor
//! is shown at all.

use std::rc::Rc;

use crate::reactive::{ChangeNotifier, ObservableProperty};

/// A user-movable measurement cursor
#[derive(Clone, Debug)]
pub struct MeasurementCursorViewModel {
    notifier: ChangeNotifier,
    /// Measured value in the axis' base unit
    pub value: ObservableProperty<f64>,
    pub visible: ObservableProperty<bool>,
}

impl MeasurementCursorViewModel {
    /// Hidden cursor at value 0
    pub fn new(label: impl Into<String>) -> Self {
        let notifier = ChangeNotifier::new(label);
        Self {
            value: ObservableProperty::owned_by(&notifier, "value", 0.0),
            visible: ObservableProperty::owned_by(&notifier, "visible", false),
            notifier,
        }
    }

    /// Live reader of the value, for use as another cursor's delta reference
    pub fn value_provider(&self) -> Rc<dyn Fn() -> f64> {
        let value = self.value.clone();
        Rc::new(move || value.get())
    }
}

impl_observable_viewmodel!(MeasurementCursorViewModel);

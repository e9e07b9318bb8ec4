//! Graph base (time axis) viewmodel
//!
//! Horizontal scale and unit of the scope graph. The level trigger is a
//! nested viewmodel; its changes do not raise the graph base's notifier.

use super::LevelTriggerViewModel;
use crate::display::Color;
use crate::error::{validate_scale_factor, Result};
use crate::reactive::{ChangeNotifier, ObservableProperty};

/// Horizontal (time base) configuration of the graph
#[derive(Clone, Debug)]
pub struct GraphbaseViewModel {
    notifier: ChangeNotifier,
    /// Screen units per base unit
    pub scale_factor: ObservableProperty<f64>,
    pub base_unit: ObservableProperty<String>,
    pub color: ObservableProperty<Color>,
    pub trigger: LevelTriggerViewModel,
}

impl GraphbaseViewModel {
    pub fn new(base_unit: impl Into<String>, color: Color, trigger: LevelTriggerViewModel) -> Self {
        let notifier = ChangeNotifier::new("graphbase");
        Self {
            scale_factor: ObservableProperty::owned_by(&notifier, "scale_factor", 1.0),
            base_unit: ObservableProperty::owned_by(&notifier, "base_unit", base_unit.into()),
            color: ObservableProperty::owned_by(&notifier, "color", color),
            trigger,
            notifier,
        }
    }

    /// Set the horizontal scale factor, rejecting zero and non-finite values
    pub fn try_set_scale_factor(&self, value: f64) -> Result<()> {
        self.scale_factor.set(validate_scale_factor(value)?);
        Ok(())
    }
}

impl_observable_viewmodel!(GraphbaseViewModel);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::ObservableSource;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_trigger_changes_do_not_raise_graphbase() {
        let graphbase = GraphbaseViewModel::new("s", Color::ORANGE, LevelTriggerViewModel::default());
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let _sub = graphbase.watch(Rc::new(move || c.set(c.get() + 1)));

        graphbase.trigger.horizontal_position.set(3.0);
        assert_eq!(count.get(), 0);
        graphbase.scale_factor.set(2.0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_try_set_scale_factor_rejects_infinity() {
        let graphbase = GraphbaseViewModel::new("s", Color::ORANGE, LevelTriggerViewModel::default());
        assert!(graphbase.try_set_scale_factor(f64::INFINITY).is_err());
        assert_eq!(graphbase.scale_factor.get(), 1.0);
        graphbase.try_set_scale_factor(1e3).unwrap();
        assert_eq!(graphbase.scale_factor.get(), 1e3);
    }
}

//! Channel viewmodels
//!
//! Vertical configuration of a scope channel: its scale factor, the screen
//! position of its reference level, its unit and its color. The reference
//! point is a viewmodel of its own and notifies separately.

use crate::display::{Color, Point};
use crate::error::{validate_scale_factor, Result};
use crate::reactive::{ChangeNotifier, ObservableProperty};

/// Observable 2D point, e.g. a channel's reference-point position
#[derive(Clone, Debug)]
pub struct PointViewModel {
    notifier: ChangeNotifier,
    pub x: ObservableProperty<f64>,
    pub y: ObservableProperty<f64>,
}

impl PointViewModel {
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        let notifier = ChangeNotifier::new(label);
        Self {
            x: ObservableProperty::owned_by(&notifier, "x", x),
            y: ObservableProperty::owned_by(&notifier, "y", y),
            notifier,
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x.get(), self.y.get())
    }

    /// Set both coordinates (two change events)
    pub fn set_point(&self, point: Point) {
        self.x.set(point.x);
        self.y.set(point.y);
    }
}

impl_observable_viewmodel!(PointViewModel);

/// Vertical configuration of one scope channel
#[derive(Clone, Debug)]
pub struct ChannelViewModel {
    notifier: ChangeNotifier,
    /// Screen units per base unit
    pub y_scale_factor: ObservableProperty<f64>,
    /// Screen position the reference level is drawn at
    pub reference_point_position: PointViewModel,
    pub base_unit: ObservableProperty<String>,
    pub color: ObservableProperty<Color>,
}

impl ChannelViewModel {
    pub fn new(label: impl Into<String>, base_unit: impl Into<String>, color: Color) -> Self {
        let label = label.into();
        let notifier = ChangeNotifier::new(label.clone());
        Self {
            y_scale_factor: ObservableProperty::owned_by(&notifier, "y_scale_factor", 1.0),
            reference_point_position: PointViewModel::new(
                format!("{label}.reference_point_position"),
                0.0,
                0.0,
            ),
            base_unit: ObservableProperty::owned_by(&notifier, "base_unit", base_unit.into()),
            color: ObservableProperty::owned_by(&notifier, "color", color),
            notifier,
        }
    }

    /// Set the vertical scale factor, rejecting zero and non-finite values
    pub fn try_set_y_scale_factor(&self, value: f64) -> Result<()> {
        self.y_scale_factor.set(validate_scale_factor(value)?);
        Ok(())
    }
}

impl_observable_viewmodel!(ChannelViewModel);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScopeError;
    use crate::reactive::ObservableSource;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_channel_raises_property_names() {
        let channel = ChannelViewModel::new("ch1", "V", Color::YELLOW);
        let names = Rc::new(RefCell::new(Vec::new()));
        let n = Rc::clone(&names);
        let _sub = channel.notifier().subscribe(move |name| n.borrow_mut().push(name.to_string()));

        channel.y_scale_factor.set(20.0);
        channel.base_unit.set("A".into());
        assert_eq!(*names.borrow(), vec!["y_scale_factor", "base_unit"]);
    }

    #[test]
    fn test_reference_point_is_a_separate_source() {
        let channel = ChannelViewModel::new("ch1", "V", Color::YELLOW);
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let _sub = channel.watch(Rc::new(move || *c.borrow_mut() += 1));

        channel.reference_point_position.y.set(100.0);
        assert_eq!(*count.borrow(), 0);
        assert_eq!(channel.reference_point_position.label(), "ch1.reference_point_position");
        assert_eq!(channel.reference_point_position.point(), Point::new(0.0, 100.0));
    }

    #[test]
    fn test_try_set_y_scale_factor() {
        let channel = ChannelViewModel::new("ch1", "V", Color::YELLOW);
        assert!(channel.try_set_y_scale_factor(12.5).is_ok());
        assert_eq!(channel.y_scale_factor.get(), 12.5);

        assert!(matches!(
            channel.try_set_y_scale_factor(0.0),
            Err(ScopeError::InvalidScaleFactor(_))
        ));
        assert!(channel.try_set_y_scale_factor(f64::NAN).is_err());
        assert_eq!(channel.y_scale_factor.get(), 12.5);
    }
}

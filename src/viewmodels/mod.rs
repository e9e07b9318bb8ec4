//! Domain viewmodels
//!
//! Each viewmodel is a cheap-to-clone handle whose fields are
//! [`ObservableProperty`](crate::reactive::ObservableProperty) values owned
//! by the viewmodel's [`ChangeNotifier`](crate::reactive::ChangeNotifier).
//! Writing any field therefore notifies the field's own subscribers and then
//! everyone watching the viewmodel as a whole, which is how the viewmodels
//! act as influencing objects for cursor converters.
//!
//! | Viewmodel | Fields |
//! |---|---|
//! | [`PointViewModel`] | `x`, `y` |
//! | [`ChannelViewModel`] | `y_scale_factor`, `reference_point_position`, `base_unit`, `color` |
//! | [`LevelTriggerViewModel`] | `horizontal_position`, `state`, `mode`, `level` |
//! | [`GraphbaseViewModel`] | `scale_factor`, `base_unit`, `color`, `trigger` |
//! | [`MeasurementCursorViewModel`] | `value`, `visible` |

/// Implements `ObservableSource` for a viewmodel by delegating to its
/// `notifier` field, and exposes that notifier.
macro_rules! impl_observable_viewmodel {
    ($vm:ty) => {
        impl $vm {
            /// The object-level change notifier
            pub fn notifier(&self) -> &$crate::reactive::ChangeNotifier {
                &self.notifier
            }
        }

        impl $crate::reactive::ObservableSource for $vm {
            fn label(&self) -> String {
                self.notifier.name().to_string()
            }

            fn watch(&self, callback: std::rc::Rc<dyn Fn()>) -> $crate::reactive::Subscription {
                $crate::reactive::ObservableSource::watch(&self.notifier, callback)
            }
        }
    };
}

mod channel;
mod graphbase;
mod measurement;
mod trigger;

pub use channel::{ChannelViewModel, PointViewModel};
pub use graphbase::GraphbaseViewModel;
pub use measurement::MeasurementCursorViewModel;
pub use trigger::{LevelTriggerMode, LevelTriggerViewModel, TriggerState};

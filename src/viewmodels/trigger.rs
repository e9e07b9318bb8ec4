//! Level trigger viewmodel
//!
//! Trigger level, edge and state, plus the horizontal screen position the
//! trigger point is drawn at.

use serde::{Deserialize, Serialize};

use crate::reactive::{ChangeNotifier, ObservableProperty};

/// Edge a level trigger fires on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelTriggerMode {
    #[default]
    RisingEdge,
    FallingEdge,
}

/// Acquisition state of the trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriggerState {
    #[default]
    Idle,
    Armed,
    Triggered,
}

/// Level-based trigger configuration and state
#[derive(Clone, Debug)]
pub struct LevelTriggerViewModel {
    notifier: ChangeNotifier,
    /// Horizontal screen position of the trigger point
    pub horizontal_position: ObservableProperty<f64>,
    pub state: ObservableProperty<TriggerState>,
    pub mode: ObservableProperty<LevelTriggerMode>,
    /// Trigger level in the trigger channel's base unit
    pub level: ObservableProperty<f64>,
}

impl LevelTriggerViewModel {
    pub fn new(label: impl Into<String>, mode: LevelTriggerMode, level: f64) -> Self {
        let notifier = ChangeNotifier::new(label);
        Self {
            horizontal_position: ObservableProperty::owned_by(&notifier, "horizontal_position", 0.0),
            state: ObservableProperty::owned_by(&notifier, "state", TriggerState::Idle),
            mode: ObservableProperty::owned_by(&notifier, "mode", mode),
            level: ObservableProperty::owned_by(&notifier, "level", level),
            notifier,
        }
    }
}

impl Default for LevelTriggerViewModel {
    fn default() -> Self {
        Self::new("trigger", LevelTriggerMode::RisingEdge, 0.0)
    }
}

impl_observable_viewmodel!(LevelTriggerViewModel);

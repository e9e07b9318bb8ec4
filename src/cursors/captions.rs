//! Caption text rules
//!
//! Pure functions from values to caption text. The cursor assembly wraps
//! them in closures over live viewmodel properties.

use crate::format::UnitFormatter;
use crate::viewmodels::{LevelTriggerMode, TriggerState};

pub const DELTA_SYMBOL: char = 'Δ';
pub const TRIGGER_SYMBOL: char = 'T';
pub const RISING_EDGE_SYMBOL: char = '↑';
pub const FALLING_EDGE_SYMBOL: char = '↓';
pub const ARMED_CAPTION: &str = "A'd";
pub const TRIGGERED_CAPTION: &str = "T'd";

/// `"{value}"`, or `"{value} / Δ = {value - reference}"` with a delta reference
pub fn measurement_text(
    formatter: &dyn UnitFormatter,
    unit: &str,
    value: f64,
    delta_reference: Option<f64>,
) -> String {
    let text = formatter.format_value(unit, value);
    match delta_reference {
        None => text,
        Some(reference) => format!(
            "{} / {} = {}",
            text,
            DELTA_SYMBOL,
            formatter.format_value(unit, value - reference)
        ),
    }
}

pub fn trigger_mode_symbol(mode: LevelTriggerMode) -> char {
    match mode {
        LevelTriggerMode::RisingEdge => RISING_EDGE_SYMBOL,
        LevelTriggerMode::FallingEdge => FALLING_EDGE_SYMBOL,
    }
}

/// Trigger symbol followed by the edge glyph, e.g. `"T↑"`
pub fn trigger_caption(mode: LevelTriggerMode) -> String {
    format!("{}{}", TRIGGER_SYMBOL, trigger_mode_symbol(mode))
}

pub fn trigger_state_caption(state: TriggerState) -> &'static str {
    match state {
        TriggerState::Idle => "",
        TriggerState::Armed => ARMED_CAPTION,
        TriggerState::Triggered => TRIGGERED_CAPTION,
    }
}

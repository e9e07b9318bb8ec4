//! Test data builders for creating viewmodels

use scopeview_rs::display::Color;
use scopeview_rs::viewmodels::{
    ChannelViewModel, GraphbaseViewModel, LevelTriggerMode, LevelTriggerViewModel,
};

/// Builder for channel viewmodels
pub struct ChannelBuilder {
    label: String,
    unit: String,
    scale: f64,
    reference_y: f64,
    color: Color,
}

impl ChannelBuilder {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            unit: "V".to_string(),
            scale: 1.0,
            reference_y: 0.0,
            color: Color::YELLOW,
        }
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn reference_y(mut self, reference_y: f64) -> Self {
        self.reference_y = reference_y;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn build(self) -> ChannelViewModel {
        let channel = ChannelViewModel::new(self.label, self.unit, self.color);
        channel.y_scale_factor.set(self.scale);
        channel.reference_point_position.y.set(self.reference_y);
        channel
    }
}

/// Builder for graph-base viewmodels with their level trigger
pub struct GraphbaseBuilder {
    unit: String,
    scale: f64,
    trigger_position: f64,
    mode: LevelTriggerMode,
    level: f64,
    color: Color,
}

impl GraphbaseBuilder {
    pub fn new() -> Self {
        Self {
            unit: "s".to_string(),
            scale: 1.0,
            trigger_position: 0.0,
            mode: LevelTriggerMode::RisingEdge,
            level: 0.0,
            color: Color::ORANGE,
        }
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn trigger_position(mut self, position: f64) -> Self {
        self.trigger_position = position;
        self
    }

    pub fn trigger_mode(mut self, mode: LevelTriggerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn trigger_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    pub fn build(self) -> GraphbaseViewModel {
        let trigger = LevelTriggerViewModel::new("trigger", self.mode, self.level);
        let graphbase = GraphbaseViewModel::new(self.unit, self.color, trigger);
        graphbase.scale_factor.set(self.scale);
        graphbase.trigger.horizontal_position.set(self.trigger_position);
        graphbase
    }
}

impl Default for GraphbaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_builder() {
        let channel = ChannelBuilder::new("ch2")
            .unit("A")
            .scale(25.0)
            .reference_y(120.0)
            .build();

        assert_eq!(channel.base_unit.get(), "A");
        assert_eq!(channel.y_scale_factor.get(), 25.0);
        assert_eq!(channel.reference_point_position.y.get(), 120.0);
    }

    #[test]
    fn test_graphbase_builder() {
        let graphbase = GraphbaseBuilder::new()
            .scale(500.0)
            .trigger_position(64.0)
            .trigger_level(1.25)
            .build();

        assert_eq!(graphbase.scale_factor.get(), 500.0);
        assert_eq!(graphbase.trigger.horizontal_position.get(), 64.0);
        assert_eq!(graphbase.trigger.level.get(), 1.25);
    }
}

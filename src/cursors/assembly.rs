//! Cursor factory
//!
//! [`CursorAssembly`] composes cursors, converters, bindings and dependency
//! registrations into [`BoundCursor`]s. It owns the collaborators every
//! cursor needs: the unit formatter for captions, the policy for non-finite
//! converter results and optional color overrides.

use std::rc::Rc;

use super::bound::BoundCursor;
use super::captions;
use super::mapping::LinearMapping;
use super::style::{CursorAxis, CursorRole, MeasurementStyle, TRIGGER_LINE_WEIGHT};
use super::ValueProvider;
use crate::config::{CursorColors, DisplayConfig, InvalidValuePolicy};
use crate::display::{
    Caption, Color, Cursor, CursorMarkers, HorizontalAlignment, VerticalAlignment,
};
use crate::format::{SiUnitFormatter, UnitFormatter};
use crate::reactive::{
    Binding, Constraint, DependencyRegistrar, Endpoint, ObservableProperty, ObservableSource,
};
use crate::viewmodels::{
    ChannelViewModel, GraphbaseViewModel, LevelTriggerViewModel, MeasurementCursorViewModel,
};

/// Everything that distinguishes one measurement cursor from another
struct MeasurementParts<'a> {
    label: String,
    axis: CursorAxis,
    role: CursorRole,
    vm: &'a MeasurementCursorViewModel,
    delta_reference: Option<ValueProvider>,
    mapping: LinearMapping,
    base_unit: ObservableProperty<String>,
    color: Color,
    influencing: &'a [&'a dyn ObservableSource],
}

/// Builds bound cursors for the scope screen.
#[derive(Clone)]
pub struct CursorAssembly {
    formatter: Rc<dyn UnitFormatter>,
    policy: InvalidValuePolicy,
    cursor_colors: Option<CursorColors>,
}

impl CursorAssembly {
    pub fn new(formatter: Rc<dyn UnitFormatter>) -> Self {
        Self {
            formatter,
            policy: InvalidValuePolicy::default(),
            cursor_colors: None,
        }
    }

    /// Assembly with an SI formatter and the configured policy and colors
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            formatter: Rc::new(SiUnitFormatter::new(config.significant_digits)),
            policy: config.invalid_value_policy,
            cursor_colors: config.cursor_colors,
        }
    }

    pub fn with_policy(mut self, policy: InvalidValuePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use fixed measurement cursor colors instead of the axis viewmodel's
    pub fn with_cursor_colors(mut self, colors: CursorColors) -> Self {
        self.cursor_colors = Some(colors);
        self
    }

    pub fn policy(&self) -> InvalidValuePolicy {
        self.policy
    }

    /// Cursor measuring time on the horizontal axis.
    ///
    /// The position is `(value - reference_value) * scale_factor +
    /// trigger.horizontal_position`; any change on the graph base or its
    /// trigger moves the cursor.
    pub fn time_measurement_cursor(
        &self,
        cursor_vm: &MeasurementCursorViewModel,
        graphbase: &GraphbaseViewModel,
        is_reference: bool,
        delta_reference: Option<ValueProvider>,
        reference_value: ValueProvider,
    ) -> BoundCursor {
        let scale = graphbase.scale_factor.clone();
        let position = graphbase.trigger.horizontal_position.clone();
        let mapping = LinearMapping::from_providers(
            Rc::new(move || scale.get()),
            Rc::new(move || position.get()),
            reference_value,
        );

        self.measurement_cursor(MeasurementParts {
            label: format!("time cursor {}", cursor_vm.label()),
            axis: CursorAxis::Horizontal,
            role: CursorRole::from_is_reference(is_reference),
            vm: cursor_vm,
            delta_reference,
            mapping,
            base_unit: graphbase.base_unit.clone(),
            color: graphbase.color.get(),
            influencing: &[graphbase, &graphbase.trigger],
        })
    }

    /// Cursor measuring a level on the vertical axis of `channel`.
    pub fn level_measurement_cursor(
        &self,
        cursor_vm: &MeasurementCursorViewModel,
        channel: &ChannelViewModel,
        is_reference: bool,
        delta_reference: Option<ValueProvider>,
        reference_value: ValueProvider,
    ) -> BoundCursor {
        self.measurement_cursor(MeasurementParts {
            label: format!("level cursor {}", cursor_vm.label()),
            axis: CursorAxis::Vertical,
            role: CursorRole::from_is_reference(is_reference),
            vm: cursor_vm,
            delta_reference,
            mapping: channel_mapping(channel, reference_value),
            base_unit: channel.base_unit.clone(),
            color: channel.color.get(),
            influencing: &[channel, &channel.reference_point_position],
        })
    }

    /// Cursor showing the level and edge of a level trigger.
    pub fn trigger_criteria_cursor(
        &self,
        trigger: &LevelTriggerViewModel,
        channel: &ChannelViewModel,
        reference_level: ValueProvider,
    ) -> BoundCursor {
        let label = format!("trigger criteria {}", trigger.label());
        let axis = CursorAxis::Vertical;
        let reference = axis.alignment_reference();
        let color = channel.color.get();

        let mode = trigger.mode.clone();
        let trigger_text = move || captions::trigger_caption(mode.get());
        let level_text = self.value_text(trigger.level.clone(), channel.base_unit.clone(), None);

        let cursor = Cursor {
            lines: axis.lines(),
            selectable_lines: axis.lines(),
            line_weight: TRIGGER_LINE_WEIGHT,
            markers: CursorMarkers::Y_FULL,
            color,
            captions: vec![
                Caption::new(
                    trigger_text.clone(),
                    HorizontalAlignment::Left,
                    VerticalAlignment::Bottom,
                    reference,
                    color,
                ),
                Caption::new(
                    trigger_text,
                    HorizontalAlignment::Right,
                    VerticalAlignment::Bottom,
                    reference,
                    color,
                ),
                Caption::new(
                    level_text,
                    HorizontalAlignment::Right,
                    VerticalAlignment::Top,
                    reference,
                    color,
                ),
            ],
            ..Cursor::new()
        };

        let (binding, dependencies) = self.bind_through_converter(
            &label,
            &cursor,
            axis,
            &trigger.level,
            channel_mapping(channel, reference_level),
            &[channel, &channel.reference_point_position],
        );
        tracing::debug!(cursor = %label, "Assembled trigger criteria cursor");
        BoundCursor::new(label, cursor, vec![binding], dependencies)
    }

    /// Cursor marking the trigger point on the time axis.
    ///
    /// The trigger position is already a screen coordinate, so the cursor is
    /// bound to it directly.
    pub fn trigger_point_cursor(&self, graphbase: &GraphbaseViewModel) -> BoundCursor {
        let trigger = &graphbase.trigger;
        let label = format!("trigger point {}", trigger.label());
        let axis = CursorAxis::Horizontal;
        let reference = axis.alignment_reference();
        let color = graphbase.color.get();

        let state = trigger.state.clone();
        let state_text = move || captions::trigger_state_caption(state.get()).to_string();

        let formatter = Rc::clone(&self.formatter);
        let (position, scale, unit) = (
            trigger.horizontal_position.clone(),
            graphbase.scale_factor.clone(),
            graphbase.base_unit.clone(),
        );
        let position_text =
            move || formatter.format_value(&unit.get(), position.get() / scale.get());

        let cursor = Cursor {
            lines: axis.lines(),
            selectable_lines: axis.lines(),
            line_weight: TRIGGER_LINE_WEIGHT,
            markers: CursorMarkers::X_FULL,
            color,
            captions: vec![
                Caption::new(
                    state_text.clone(),
                    HorizontalAlignment::Left,
                    VerticalAlignment::Top,
                    reference,
                    color,
                ),
                Caption::new(
                    state_text,
                    HorizontalAlignment::Left,
                    VerticalAlignment::Bottom,
                    reference,
                    color,
                ),
                Caption::new(
                    position_text,
                    HorizontalAlignment::Right,
                    VerticalAlignment::Top,
                    reference,
                    color,
                ),
            ],
            ..Cursor::new()
        };

        let binding = Binding::equate(
            label.clone(),
            axis.endpoint(&cursor),
            Endpoint::property(&trigger.horizontal_position),
        );
        tracing::debug!(cursor = %label, "Assembled trigger point cursor");
        BoundCursor::new(label, cursor, vec![binding], DependencyRegistrar::new())
    }

    fn measurement_cursor(&self, parts: MeasurementParts<'_>) -> BoundCursor {
        let style = MeasurementStyle::lookup(parts.axis, parts.role);
        let color = self
            .cursor_colors
            .map(|colors| colors.for_role(parts.role == CursorRole::Reference))
            .unwrap_or(parts.color);

        let text = self.value_text(parts.vm.value.clone(), parts.base_unit, parts.delta_reference);
        let caption = Caption::new(
            text,
            style.caption_horizontal,
            style.caption_vertical,
            parts.axis.alignment_reference(),
            color,
        );

        let cursor = Cursor {
            color,
            captions: vec![caption],
            ..style.cursor()
        };

        let (binding, dependencies) = self.bind_through_converter(
            &parts.label,
            &cursor,
            parts.axis,
            &parts.vm.value,
            parts.mapping,
            parts.influencing,
        );
        let visibility = Binding::equate(
            format!("{} visibility", parts.label),
            Endpoint::property(&cursor.visible),
            Endpoint::property(&parts.vm.visible),
        );
        tracing::debug!(
            cursor = %parts.label,
            axis = ?parts.axis,
            role = ?parts.role,
            "Assembled measurement cursor"
        );
        BoundCursor::new(parts.label, cursor, vec![binding, visibility], dependencies)
    }

    /// `cursor.<axis> == converter.derived && converter.original == value`,
    /// with the converter invalidated by every influencing object.
    fn bind_through_converter(
        &self,
        label: &str,
        cursor: &Cursor,
        axis: CursorAxis,
        value: &ObservableProperty<f64>,
        mapping: LinearMapping,
        influencing: &[&dyn ObservableSource],
    ) -> (Binding, DependencyRegistrar) {
        let converter = mapping.into_converter(self.policy);
        let binding = Binding::create(
            label,
            vec![
                Constraint::equal(axis.endpoint(cursor), Endpoint::derived(&converter)),
                Constraint::equal(Endpoint::original(&converter), Endpoint::property(value)),
            ],
        );

        let mut dependencies = DependencyRegistrar::new();
        dependencies.register(&converter, influencing);
        (binding, dependencies)
    }

    fn value_text(
        &self,
        value: ObservableProperty<f64>,
        unit: ObservableProperty<String>,
        delta_reference: Option<ValueProvider>,
    ) -> impl Fn() -> String + Clone + 'static {
        let formatter = Rc::clone(&self.formatter);
        move || {
            captions::measurement_text(
                formatter.as_ref(),
                &unit.get(),
                value.get(),
                delta_reference.as_ref().map(|reference| reference()),
            )
        }
    }
}

/// Vertical mapping of a channel: its scale factor and reference-point Y
fn channel_mapping(channel: &ChannelViewModel, reference_value: ValueProvider) -> LinearMapping {
    let scale = channel.y_scale_factor.clone();
    let position = channel.reference_point_position.y.clone();
    LinearMapping::from_providers(
        Rc::new(move || scale.get()),
        Rc::new(move || position.get()),
        reference_value,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{AlignmentReference, CursorLines, LineWeight, Point};
    use crate::format::MockUnitFormatter;
    use crate::viewmodels::{LevelTriggerMode, TriggerState};

    fn assembly() -> CursorAssembly {
        CursorAssembly::new(Rc::new(SiUnitFormatter::default()))
    }

    fn zero() -> ValueProvider {
        Rc::new(|| 0.0)
    }

    fn graphbase() -> GraphbaseViewModel {
        GraphbaseViewModel::new("s", Color::ORANGE, LevelTriggerViewModel::default())
    }

    #[test]
    fn test_time_cursor_position_follows_value() {
        let graphbase = graphbase();
        graphbase.scale_factor.set(100.0);
        graphbase.trigger.horizontal_position.set(50.0);
        let vm = MeasurementCursorViewModel::new("t1");
        vm.value.set(0.5);

        let bound = assembly().time_measurement_cursor(&vm, &graphbase, false, None, zero());
        assert_eq!(bound.cursor().position.get().x, 100.0);

        vm.value.set(-0.25);
        assert_eq!(bound.cursor().position.get().x, 25.0);
    }

    #[test]
    fn test_level_cursor_drag_writes_value() {
        let channel = ChannelViewModel::new("ch1", "V", Color::YELLOW);
        channel.y_scale_factor.set(20.0);
        channel.reference_point_position.y.set(200.0);
        let vm = MeasurementCursorViewModel::new("l1");
        vm.visible.set(true);

        let bound = assembly().level_measurement_cursor(&vm, &channel, true, None, zero());
        assert_eq!(bound.cursor().position.get().y, 200.0);

        assert!(bound.cursor().drag_to(Point::new(999.0, 260.0)));
        assert_eq!(vm.value.get(), 3.0);
        assert_eq!(bound.cursor().position.get(), Point::new(0.0, 260.0));
    }

    #[test]
    fn test_measurement_cursor_visibility_follows_viewmodel() {
        let vm = MeasurementCursorViewModel::new("t1");
        let bound = assembly().time_measurement_cursor(&vm, &graphbase(), true, None, zero());
        let hidden = bound.snapshot();
        assert!(!hidden.visible);
        assert_eq!(hidden.lines, CursorLines::NONE);
        assert_eq!(hidden.markers, CursorMarkers::NONE);
        assert!(!hidden.captions[0].visible);
        assert!(!bound.cursor().drag_to(Point::new(10.0, 0.0)));
        assert_eq!(vm.value.get(), 0.0);

        vm.visible.set(true);
        let shown = bound.snapshot();
        assert!(shown.visible);
        assert_eq!(shown.lines, CursorLines::X);
        assert_eq!(shown.markers, CursorMarkers::X_LEFT);
        assert!(shown.captions[0].visible);

        // Hiding the cursor from the display side reaches the viewmodel
        bound.cursor().visible.set(false);
        assert!(!vm.visible.get());
    }

    #[test]
    fn test_color_override() {
        let vm = MeasurementCursorViewModel::new("t1");
        let plain = assembly().time_measurement_cursor(&vm, &graphbase(), true, None, zero());
        assert_eq!(plain.cursor().color, Color::ORANGE);

        let colors = CursorColors::default();
        let overridden = assembly()
            .with_cursor_colors(colors)
            .time_measurement_cursor(&vm, &graphbase(), true, None, zero());
        assert_eq!(overridden.cursor().color, colors.reference);
        assert_eq!(overridden.cursor().captions[0].color, colors.reference);
    }

    #[test]
    fn test_trigger_criteria_cursor_layout() {
        let channel = ChannelViewModel::new("ch1", "V", Color::YELLOW);
        let trigger = LevelTriggerViewModel::new("trigger", LevelTriggerMode::FallingEdge, 1.5);
        let bound = assembly().trigger_criteria_cursor(&trigger, &channel, zero());

        let snapshot = bound.snapshot();
        assert_eq!(snapshot.lines, CursorLines::Y);
        assert_eq!(snapshot.line_weight, LineWeight::Low);
        assert_eq!(snapshot.markers, CursorMarkers::Y_FULL);
        assert_eq!(snapshot.position.y, 1.5);
        let texts: Vec<_> = snapshot.captions.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["T↓", "T↓", "1.5 V"]);
        assert!(snapshot
            .captions
            .iter()
            .all(|c| c.reference == AlignmentReference::YPositionAndHorizontalRangeEdge));
    }

    #[test]
    fn test_trigger_point_position_text() {
        let mut formatter = MockUnitFormatter::new();
        formatter
            .expect_format_value()
            .withf(|unit, value| unit.to_string() == "s" && *value == 0.25)
            .returning(|_, _| "250 ms".to_string());
        let graphbase = graphbase();
        graphbase.scale_factor.set(400.0);
        graphbase.trigger.horizontal_position.set(100.0);
        graphbase.trigger.state.set(TriggerState::Armed);

        let bound = CursorAssembly::new(Rc::new(formatter)).trigger_point_cursor(&graphbase);
        let snapshot = bound.snapshot();
        assert_eq!(snapshot.position.x, 100.0);
        assert_eq!(snapshot.markers, CursorMarkers::X_FULL);
        let texts: Vec<_> = snapshot.captions.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["A'd", "A'd", "250 ms"]);
        assert!(bound.dependencies().is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = DisplayConfig {
            invalid_value_policy: InvalidValuePolicy::HoldLast,
            significant_digits: 2,
            ..DisplayConfig::default()
        };
        let assembly = CursorAssembly::from_config(&config);
        assert_eq!(assembly.policy(), InvalidValuePolicy::HoldLast);

        let channel = ChannelViewModel::new("ch1", "V", Color::YELLOW);
        let vm = MeasurementCursorViewModel::new("l1");
        vm.value.set(3.14159);
        let bound = assembly.level_measurement_cursor(&vm, &channel, false, None, zero());
        assert_eq!(bound.snapshot().captions[0].text, "3.1 V");
    }
}

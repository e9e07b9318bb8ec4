//! ScopeView-RS demo
//!
//! Builds a small scope screen (one channel, a time base with a level
//! trigger, two time and two level measurement cursors), changes a few
//! viewmodel values, drags a cursor and prints the render snapshots as JSON.
//!
//! Usage: `scopeview-rs [CONFIG]` (defaults to the platform config path).

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use scopeview_rs::{
    config::{default_config_path, DisplayConfig},
    cursors::{BoundCursor, CursorAssembly},
    display::{Color, Point},
    viewmodels::{
        ChannelViewModel, GraphbaseViewModel, LevelTriggerMode, LevelTriggerViewModel,
        MeasurementCursorViewModel, TriggerState,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let config_path: Option<PathBuf> = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(default_config_path);
    let config = config_path
        .as_deref()
        .map(|path| DisplayConfig::load_or_default(path))
        .unwrap_or_default();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting ScopeView-RS demo");
    if let Some(path) = &config_path {
        tracing::info!("Using config {:?}", path);
    }

    let assembly = CursorAssembly::from_config(&config);

    let channel = ChannelViewModel::new("ch1", "V", Color::YELLOW);
    channel.try_set_y_scale_factor(40.0).context("channel scale")?;
    channel.reference_point_position.y.set(240.0);

    let trigger = LevelTriggerViewModel::new("trigger", LevelTriggerMode::RisingEdge, 0.5);
    let graphbase = GraphbaseViewModel::new("s", Color::ORANGE, trigger);
    graphbase.try_set_scale_factor(1000.0).context("time scale")?;
    graphbase.trigger.horizontal_position.set(320.0);

    let time_ref = MeasurementCursorViewModel::new("time ref");
    let time_cursor = MeasurementCursorViewModel::new("time");
    let level_ref = MeasurementCursorViewModel::new("level ref");
    let level_cursor = MeasurementCursorViewModel::new("level");
    for vm in [&time_ref, &time_cursor, &level_ref, &level_cursor] {
        vm.visible.set(true);
    }
    time_cursor.value.set(0.05);
    level_ref.value.set(-1.0);
    level_cursor.value.set(2.0);

    let zero: Rc<dyn Fn() -> f64> = Rc::new(|| 0.0);
    let mut cursors: Vec<BoundCursor> = vec![
        assembly.trigger_point_cursor(&graphbase),
        assembly.trigger_criteria_cursor(&graphbase.trigger, &channel, Rc::clone(&zero)),
        assembly.time_measurement_cursor(&time_ref, &graphbase, true, None, Rc::clone(&zero)),
        assembly.time_measurement_cursor(
            &time_cursor,
            &graphbase,
            false,
            Some(time_ref.value_provider()),
            Rc::clone(&zero),
        ),
        assembly.level_measurement_cursor(&level_ref, &channel, true, None, Rc::clone(&zero)),
        assembly.level_measurement_cursor(
            &level_cursor,
            &channel,
            false,
            Some(level_ref.value_provider()),
            zero,
        ),
    ];
    print_snapshots("initial", &cursors)?;

    // Zoom and re-arm: every dependent cursor follows
    channel.y_scale_factor.set(20.0);
    graphbase.scale_factor.set(2000.0);
    graphbase.trigger.state.set(TriggerState::Armed);
    print_snapshots("after rescale", &cursors)?;

    // Drag the time cursor on screen: the value follows through the inverse path
    cursors[3].cursor().drag_to(Point::new(520.0, 0.0));
    tracing::info!("Dragged time cursor, value is now {}", time_cursor.value.get());
    print_snapshots("after drag", &cursors)?;

    tracing::info!("Shutting down...");
    for cursor in &mut cursors {
        cursor.dispose();
    }
    Ok(())
}

fn print_snapshots(stage: &str, cursors: &[BoundCursor]) -> anyhow::Result<()> {
    let snapshots: Vec<_> = cursors
        .iter()
        .map(|bound| (bound.label(), bound.snapshot()))
        .collect();
    let json = serde_json::to_string_pretty(&snapshots).context("serialize snapshots")?;
    println!("== {stage} ==\n{json}");
    Ok(())
}

//! Benchmarks for binding propagation and converter invalidation
//!
//! Run with: cargo bench

use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scopeview_rs::cursors::CursorAssembly;
use scopeview_rs::display::{Color, Point};
use scopeview_rs::reactive::{Binding, Constraint, Endpoint, ObservableProperty, ValueConverter};
use scopeview_rs::viewmodels::{ChannelViewModel, MeasurementCursorViewModel};
use scopeview_rs::SiUnitFormatter;

fn bench_property_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("property_chain");

    for length in [4, 32, 256].iter() {
        group.throughput(Throughput::Elements(*length as u64));
        group.bench_with_input(BenchmarkId::new("settle", length), length, |b, &length| {
            let props: Vec<_> = (0..=length)
                .map(|i| ObservableProperty::new(format!("p{i}"), 0.0))
                .collect();
            let _bindings: Vec<_> = props
                .windows(2)
                .map(|pair| {
                    Binding::equate("chain", Endpoint::property(&pair[1]), Endpoint::property(&pair[0]))
                })
                .collect();

            let mut value = 0.0;
            b.iter(|| {
                value += 1.0;
                props[0].set(black_box(value));
                black_box(props[length].get())
            });
        });
    }

    group.finish();
}

fn bench_converter_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("converter_chain");

    for length in [4, 32].iter() {
        group.bench_with_input(BenchmarkId::new("forward", length), length, |b, &length| {
            let props: Vec<_> = (0..=length)
                .map(|i| ObservableProperty::new(format!("p{i}"), 0.0))
                .collect();
            let _bindings: Vec<_> = (0..length)
                .map(|i| {
                    let converter = ValueConverter::new(|v: &f64| v * 1.5, |d: &f64| d / 1.5);
                    Binding::create(
                        "stage",
                        vec![
                            Constraint::equal(Endpoint::property(&props[i + 1]), Endpoint::derived(&converter)),
                            Constraint::equal(Endpoint::original(&converter), Endpoint::property(&props[i])),
                        ],
                    )
                })
                .collect();

            b.iter(|| {
                props[0].set(black_box(1.0));
                black_box(props[length].get())
            });
        });
    }

    group.finish();
}

fn bench_cursor_invalidation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cursor_invalidation");

    for cursors in [1, 8, 64].iter() {
        group.throughput(Throughput::Elements(*cursors as u64));
        group.bench_with_input(BenchmarkId::new("rescale", cursors), cursors, |b, &cursors| {
            let assembly = CursorAssembly::new(Rc::new(SiUnitFormatter::default()));
            let channel = ChannelViewModel::new("ch1", "V", Color::YELLOW);
            let vms: Vec<_> = (0..cursors)
                .map(|i| {
                    let vm = MeasurementCursorViewModel::new(format!("level {i}"));
                    vm.value.set(i as f64 * 0.1);
                    vm
                })
                .collect();
            let bound: Vec<_> = vms
                .iter()
                .map(|vm| assembly.level_measurement_cursor(vm, &channel, false, None, Rc::new(|| 0.0)))
                .collect();

            let mut scale = 1.0;
            b.iter(|| {
                scale += 0.5;
                channel.y_scale_factor.set(black_box(scale));
                black_box(bound[cursors - 1].cursor().position.get())
            });
        });
    }

    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let assembly = CursorAssembly::new(Rc::new(SiUnitFormatter::default()));
    let channel = ChannelViewModel::new("ch1", "V", Color::YELLOW);
    channel.y_scale_factor.set(25.0);
    let vm = MeasurementCursorViewModel::new("level");
    vm.visible.set(true);
    let bound = assembly.level_measurement_cursor(&vm, &channel, false, None, Rc::new(|| 0.0));

    c.bench_function("drag_level_cursor", |b| {
        let mut y = 0.0;
        b.iter(|| {
            y += 1.0;
            bound.cursor().drag_to(black_box(Point::new(0.0, y)));
            black_box(vm.value.get())
        });
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let assembly = CursorAssembly::new(Rc::new(SiUnitFormatter::default()));
    let channel = ChannelViewModel::new("ch1", "V", Color::YELLOW);
    let reference = MeasurementCursorViewModel::new("reference");
    let vm = MeasurementCursorViewModel::new("level");
    vm.value.set(3.3);
    let bound = assembly.level_measurement_cursor(
        &vm,
        &channel,
        false,
        Some(reference.value_provider()),
        Rc::new(|| 0.0),
    );

    c.bench_function("cursor_snapshot", |b| b.iter(|| black_box(bound.snapshot())));
}

criterion_group!(
    benches,
    bench_property_chain,
    bench_converter_chain,
    bench_cursor_invalidation,
    bench_drag,
    bench_snapshot,
);

criterion_main!(benches);

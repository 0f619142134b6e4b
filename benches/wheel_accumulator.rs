//! Pointer Input Benchmarks
//!
//! Measures the per-event cost of wheel accumulation, position resolution
//! and full coordinator dispatch for high-rate trackpad input.

use std::sync::Arc;
use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lamco_pointer_input::input::coordinates::resolve;
use lamco_pointer_input::input::event::{ClientPoint, DeltaMode};
use lamco_pointer_input::input::{
    HostEvent, MouseCoordinator, MouseOptions, Position, RawPointerEvent, RawWheelEvent, Rect,
    WheelAccumulator,
};

/// Trackpad-like burst: many small deltas with occasional large flicks
fn generate_deltas(count: usize) -> Vec<(f64, f64)> {
    (0..count)
        .map(|i| {
            let dy = if i % 16 == 0 { 24.0 } else { 1.5 };
            let dx = if i % 3 == 0 { -0.75 } else { 0.0 };
            (dx, dy)
        })
        .collect()
}

fn bench_wheel_accumulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("wheel_accumulate");

    for count in [64usize, 1024, 16384] {
        let deltas = generate_deltas(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("pixel", count), &deltas, |b, deltas| {
            b.iter(|| {
                let mut wheel = WheelAccumulator::new();
                let start = Instant::now();
                let mut steps = 0usize;
                for (i, (dx, dy)) in deltas.iter().enumerate() {
                    let now = start + Duration::from_millis(i as u64);
                    steps += wheel
                        .on_wheel(*dx, *dy, DeltaMode::Pixel, Position::new(10, 10), now)
                        .len();
                }
                black_box(steps)
            })
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let bounds = Rect::new(120.0, 80.0, 1920.0, 1080.0);
    let points: Vec<ClientPoint> = (0..1024)
        .map(|i| ClientPoint::new((i * 7 % 2400) as f64 - 100.0, (i * 13 % 1400) as f64 + 0.5))
        .collect();

    let mut group = c.benchmark_group("resolve");
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("clipped_1024", |b| {
        b.iter(|| {
            for point in &points {
                black_box(resolve(black_box(*point), &bounds));
            }
        })
    });
    group.finish();
}

fn bench_coordinator_dispatch(c: &mut Criterion) {
    let events: Vec<HostEvent> = (0..1024)
        .map(|i| match i % 4 {
            0 => HostEvent::Wheel(RawWheelEvent::pixels(400.0, 300.0, 0.0, 3.0)),
            1 => HostEvent::ButtonDown(RawPointerEvent::mouse(400.0, 300.0, 0)),
            2 => HostEvent::ButtonUp(RawPointerEvent::mouse(400.0, 300.0, 0)),
            _ => HostEvent::Move(RawPointerEvent::at(f64::from(i), 300.0)),
        })
        .collect();

    let mut group = c.benchmark_group("coordinator_dispatch");
    group.throughput(Throughput::Elements(events.len() as u64));
    group.bench_function("mixed_1024", |b| {
        let mut coordinator = MouseCoordinator::new(
            Arc::new(Rect::new(0.0, 0.0, 1920.0, 1080.0)),
            MouseOptions::default(),
        );
        coordinator.set_on_button(|x, y, down, mask| {
            black_box((x, y, down, mask));
        });
        coordinator.set_on_move(|x, y| {
            black_box((x, y));
        });

        b.iter(|| {
            let now = Instant::now();
            for event in &events {
                black_box(coordinator.handle_event(event, now));
            }
            coordinator.poll_timers(now + Duration::from_secs(1));
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_wheel_accumulate,
    bench_resolve,
    bench_coordinator_dispatch
);
criterion_main!(benches);

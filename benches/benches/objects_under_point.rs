// Copyright 2026 the Limelight Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use limelight_graphics::{Color, Paint};
use limelight_scene::{Content, EventType, PickMode, Shape, Stage};

/// An `n` x `n` grid of filled 20x20 chips grouped into per-row
/// containers, roughly the shape of a sprite-heavy scene.
fn build_grid(n: usize, with_listeners: bool) -> Stage {
    let mut stage = Stage::new(1024.0, 1024.0);
    for row in 0..n {
        let container = stage.add_child(stage.root(), Content::Container).unwrap();
        stage.set_position(container, 0.0, row as f64 * 24.0);
        for col in 0..n {
            let mut chip = Shape::new();
            chip.graphics
                .begin_fill(Paint::Solid(Color::BLACK))
                .rect(0.0, 0.0, 20.0, 20.0);
            let id = stage
                .add_child(container, Content::Leaf(Box::new(chip)))
                .unwrap();
            stage.set_position(id, col as f64 * 24.0, 0.0);
            if with_listeners {
                stage.add_listener(id, EventType::Click, false, |_| {});
            }
        }
    }
    stage
}

fn bench_object_under_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick/object_under_point");
    for n in [8_usize, 16, 32] {
        let stage = build_grid(n, false);
        group.throughput(Throughput::Elements(1));
        // Deep in the scan order: bottom-left chip.
        let y = (n - 1) as f64 * 24.0 + 10.0;
        group.bench_function(format!("grid_{n}x{n}"), |b| {
            b.iter(|| black_box(stage.object_under_point(10.0, y, PickMode::All)));
        });
    }
    group.finish();
}

fn bench_pointer_mode_with_listeners(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick/pointer_mode");
    let stage = build_grid(16, true);
    group.bench_function("require_listener", |b| {
        b.iter(|| {
            black_box(stage.object_under_point(
                100.0,
                100.0,
                PickMode::Pointer {
                    require_listener: true,
                },
            ))
        });
    });
    group.bench_function("any_target", |b| {
        b.iter(|| {
            black_box(stage.object_under_point(
                100.0,
                100.0,
                PickMode::Pointer {
                    require_listener: false,
                },
            ))
        });
    });
    group.finish();
}

fn bench_objects_under_point_all(c: &mut Criterion) {
    // Overlapping stack: every chip covers the query point.
    let mut stage = Stage::new(1024.0, 1024.0);
    for i in 0..128 {
        let mut chip = Shape::new();
        chip.graphics
            .begin_fill(Paint::Solid(Color::BLACK))
            .rect(0.0, 0.0, 400.0, 400.0);
        let id = stage
            .add_child(stage.root(), Content::Leaf(Box::new(chip)))
            .unwrap();
        stage.set_position(id, f64::from(i), f64::from(i));
    }
    c.bench_function("pick/objects_under_point_stack_128", |b| {
        b.iter(|| black_box(stage.objects_under_point(300.0, 300.0, PickMode::All)));
    });
}

criterion_group!(
    benches,
    bench_object_under_point,
    bench_pointer_mode_with_listeners,
    bench_objects_under_point_all
);
criterion_main!(benches);

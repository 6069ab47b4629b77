// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use trellis_geometry::{Tolerance, objects_collide};
use trellis_slots::cell_span;

fn bench_collision_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/collide");

    // A month view hit-tests the drag rectangle against every visible cell
    // per move event: 6 rows x 7 cells.
    let cells: Vec<Rect> = (0..42)
        .map(|i| {
            let row = (i / 7) as f64;
            let col = (i % 7) as f64;
            Rect::new(col * 100.0, row * 80.0, (col + 1.0) * 100.0, (row + 1.0) * 80.0)
        })
        .collect();
    let drag = Rect::new(150.0, 90.0, 420.0, 310.0);

    group.throughput(Throughput::Elements(cells.len() as u64));
    group.bench_function("month_grid", |b| {
        b.iter(|| {
            let hits = cells
                .iter()
                .filter(|cell| objects_collide(black_box(drag), **cell, Tolerance::ZERO))
                .count();
            black_box(hits);
        });
    });

    group.finish();
}

fn bench_cell_span(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/cell_span");

    let row = Rect::new(0.0, 100.0, 700.0, 200.0);
    let initial = Point::new(550.0, 50.0);
    let pointer = Point::new(250.0, 150.0);
    let rect = Rect::new(250.0, 50.0, 550.0, 150.0);

    group.bench_function("multi_row", |b| {
        b.iter(|| {
            black_box(cell_span(
                black_box(initial),
                row,
                rect,
                black_box(pointer),
                7,
                false,
            ));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_collision_sweep, bench_cell_span);
criterion_main!(benches);

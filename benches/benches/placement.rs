// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use imprint_geometry::{
    BoundaryMode, clamp_box_to_area, constrain_move, from_percent, resolve_scale, to_percent,
};
use kurbo::{Point, Rect, Size};

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/projection");
    let unscaled = Size::new(120.0, 80.0);
    let before = Rect::new(40.0, 30.0, 440.0, 330.0);
    let after = Rect::new(80.0, 60.0, 880.0, 660.0);

    // One re-anchor: capture against the old print area, project into the new.
    group.bench_function("reanchor", |b| {
        b.iter(|| {
            let position = black_box(Point::new(150.0, 90.0));
            let scale = black_box(1.25);
            let percent = to_percent(position, unscaled, scale, before);
            let factor = resolve_scale(after.size(), before.size());
            percent.and_then(|p| from_percent(p, unscaled, scale * factor, after))
        });
    });

    group.finish();
}

fn bench_drag_constraint(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement/constrain_move");
    let element = Size::new(60.0, 40.0);
    let container = Size::new(400.0, 300.0);

    for mode in [BoundaryMode::None, BoundaryMode::Clamp, BoundaryMode::Reject] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{mode:?}")),
            &mode,
            |b, &mode| {
                b.iter(|| {
                    constrain_move(
                        black_box(Point::new(100.0, 100.0)),
                        black_box(Point::new(390.0, -20.0)),
                        element,
                        container,
                        4.0,
                        mode,
                    )
                });
            },
        );
    }

    group.bench_function("settle", |b| {
        let area = Rect::new(50.0, 50.0, 250.0, 250.0);
        b.iter(|| {
            clamp_box_to_area(
                black_box(Point::new(240.0, 100.0)),
                element,
                black_box(1.5),
                area,
                0.0,
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_projection, bench_drag_constraint);
criterion_main!(benches);

// Copyright 2026 the Imprint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use imprint_layers::{ElementKind, LayerEntry, LayerRegistry, ZIndexScale};

fn stack(len: u32) -> LayerRegistry<u32> {
    let mut layers = LayerRegistry::new();
    for id in 0..len {
        layers.add_element_layer(id, ElementKind::Sticker);
    }
    layers
}

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("layers/reorder");

    // Designs rarely exceed a few dozen elements; the larger sizes show the
    // linear rank lookup.
    for len in [16_u32, 64, 256, 1_024] {
        group.throughput(Throughput::Elements(1));

        group.bench_with_input(BenchmarkId::new("to_back", len), &len, |b, &len| {
            b.iter_batched(
                || stack(len),
                |mut layers| {
                    layers.update_element_layer_index(&(len - 1), 0);
                    black_box(layers);
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("bring_forward", len), &len, |b, &len| {
            b.iter_batched(
                || stack(len),
                |mut layers| {
                    layers.bring_forward(&0);
                    black_box(layers);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_restore(c: &mut Criterion) {
    let mut group = c.benchmark_group("layers/restore");

    for len in [16_u32, 64, 256, 1_024] {
        // Saved z-indices arrive in reverse paint order.
        let entries: Vec<(LayerEntry<u32>, i32)> = (0..len)
            .map(|id| {
                let z = ZIndexScale::default().z_index((len - id) as usize);
                (LayerEntry::new(id, ElementKind::PrintedImage), z)
            })
            .collect();
        group.throughput(Throughput::Elements(u64::from(len)));

        group.bench_with_input(BenchmarkId::new("on_restore", len), &entries, |b, entries| {
            b.iter_batched(
                LayerRegistry::<u32>::new,
                |mut layers| {
                    layers.add_element_layers_on_restore(entries.iter().copied());
                    black_box(layers);
                },
                BatchSize::SmallInput,
            );
        });

        let half: Vec<u32> = (0..len).step_by(2).collect();
        group.bench_with_input(BenchmarkId::new("remove_half", len), &half, |b, half| {
            b.iter_batched(
                || stack(len),
                |mut layers| {
                    layers.remove_element_layers(half.iter());
                    black_box(layers);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reorder, bench_restore);
criterion_main!(benches);

//! Read path benchmarks: transient cell versus store subscription.
//!
//! A frame loop reads the position every frame while gestures write it only
//! on input. These benchmarks compare the per-frame cost of each read path
//! and the write cost with a growing number of subscribers attached.
//!
//! Run with: cargo bench --bench read_path_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use snapscroll::model::SectionCount;
use snapscroll::store::{ScrollStore, Subscription, TransientReader};

fn store_with_sections() -> ScrollStore {
    let store = ScrollStore::new();
    store.set_section_count(SectionCount::new(8).unwrap());
    store.apply_delta(3.25);
    store
}

fn bench_frame_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_read");
    let store = store_with_sections();
    let reader = TransientReader::new(&store);

    group.bench_function("transient", |b| b.iter(|| black_box(reader.get())));
    group.bench_function("store_get", |b| b.iter(|| black_box(store.get().position)));

    group.finish();
}

fn bench_writes_with_subscribers(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_delta_with_subscribers");

    for subscribers in [0usize, 1, 8, 64] {
        let store = store_with_sections();
        let _guards: Vec<Subscription> = (0..subscribers)
            .map(|_| store.subscribe(|state| state.position, |_, _| {}))
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &subscribers,
            |b, _| {
                let mut flip = 1.0;
                b.iter(|| {
                    flip = -flip;
                    store.apply_delta(black_box(flip * 0.01));
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_frame_reads, bench_writes_with_subscribers);
criterion_main!(benches);

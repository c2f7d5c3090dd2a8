//! Performance benchmarks for change detection
//!
//! Measures snapshot comparison and collection tree mapping at account
//! sizes from a handful of sets to several thousand photos.
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flickr_watch::models::{Collection, PhotoSummary};
use flickr_watch::watch::{has_changed, map_leaf_timestamps, map_set_collections, WatchStore};

/// Photos with sequential ids and update times
fn generate_photos(count: usize, offset: i64) -> Vec<PhotoSummary> {
    (0..count)
        .map(|i| {
            let updated = (1_500_000_000 + i as i64 + offset).to_string();
            PhotoSummary::new(format!("{}", 10_000 + i), Some(updated.as_str()))
        })
        .collect()
}

/// Collection tree `depth` levels deep with `width` children per node and
/// three sets per node
fn generate_tree(depth: usize, width: usize, prefix: &str) -> Vec<Collection> {
    (0..width)
        .map(|i| {
            let id = format!("{}{}", prefix, i);
            let sets = (0..3).map(|s| format!("set-{}-{}", id, s)).collect::<Vec<_>>();
            let children = if depth > 1 {
                generate_tree(depth - 1, width, &format!("{}-", id))
            } else {
                Vec::new()
            };
            Collection::new(id).with_sets(sets).with_children(children)
        })
        .collect()
}

/// Benchmark comparison of identical photo snapshots, the common poll outcome
fn bench_has_changed_unchanged(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_changed_unchanged");

    for size in [10, 100, 500, 2_000].iter() {
        let older = map_leaf_timestamps(&generate_photos(*size, 0));
        let newer = older.clone();
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_photos", size)),
            &(older, newer),
            |b, (older, newer)| {
                b.iter(|| black_box(has_changed(black_box(older), black_box(newer))));
            },
        );
    }

    group.finish();
}

/// Benchmark projecting a photo listing into a snapshot
fn bench_map_leaf_timestamps(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_leaf_timestamps");

    for size in [10, 100, 500, 2_000].iter() {
        let photos = generate_photos(*size, 0);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_photos", size)),
            &photos,
            |b, photos| {
                b.iter(|| black_box(map_leaf_timestamps(black_box(photos))));
            },
        );
    }

    group.finish();
}

/// Benchmark flattening collection trees of increasing depth
fn bench_map_set_collections(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_set_collections");

    for depth in [1, 2, 3, 4].iter() {
        let tree = generate_tree(*depth, 4, "c");

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("depth_{}", depth)),
            &tree,
            |b, tree| {
                b.iter(|| black_box(map_set_collections(black_box(tree))));
            },
        );
    }

    group.finish();
}

/// Benchmark recording an unchanged tree against a seeded registry
fn bench_update_collections(c: &mut Criterion) {
    let tree = generate_tree(3, 4, "c");
    let mut store = WatchStore::new();
    store.update_collections(&tree);

    c.bench_function("update_collections_unchanged", |b| {
        b.iter(|| black_box(store.update_collections(black_box(&tree))));
    });
}

criterion_group!(
    benches,
    bench_has_changed_unchanged,
    bench_map_leaf_timestamps,
    bench_map_set_collections,
    bench_update_collections,
);
criterion_main!(benches);

use bstree::{BSTreeMap, BSTreeSet};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::{BTreeMap, BTreeSet};

const N: usize = 10_000;

/// Sorted input degenerates the tree into a chain, so keep it small.
const N_ORDERED: usize = 1_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert");

    for (label, keys) in [("random", random_keys(N)), ("ordered", ordered_keys(N_ORDERED))] {
        group.bench_function(BenchmarkId::new("BSTreeMap", label), |b| {
            b.iter(|| {
                let mut map = BSTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", label), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });
    }

    group.finish();
}

fn bench_map_get(c: &mut Criterion) {
    let keys = random_keys(N);
    let bs_map: BSTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("BSTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = bs_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = bt_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_map_remove(c: &mut Criterion) {
    let keys = random_keys(N);
    let bs_map: BSTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_remove_random");

    group.bench_function(BenchmarkId::new("BSTreeMap", N), |b| {
        b.iter_batched(
            || bs_map.clone(),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || bt_map.clone(),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_map_iter(c: &mut Criterion) {
    let keys = random_keys(N);
    let bs_map: BSTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_iter");

    group.bench_function(BenchmarkId::new("BSTreeMap", N), |b| {
        b.iter(|| bs_map.iter().fold(0i64, |acc, (_, &v)| acc.wrapping_add(v)));
    });

    group.bench_function(BenchmarkId::new("BSTreeMap/cursor", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            let mut cursor = bs_map.end();
            cursor.move_prev();
            while let Some(&v) = cursor.value() {
                sum = sum.wrapping_add(v);
                cursor.move_prev();
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| bt_map.iter().fold(0i64, |acc, (_, &v)| acc.wrapping_add(v)));
    });

    group.finish();
}

fn bench_map_clone_and_merge(c: &mut Criterion) {
    let keys = random_keys(N);
    let (evens, odds): (Vec<i64>, Vec<i64>) = keys.iter().partition(|&&k| k % 2 == 0);
    let bs_evens: BSTreeMap<i64, i64> = evens.iter().map(|&k| (k, k)).collect();
    let bs_odds: BSTreeMap<i64, i64> = odds.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_clone_merge");

    group.bench_function(BenchmarkId::new("clone", N / 2), |b| {
        b.iter(|| bs_evens.clone());
    });

    group.bench_function(BenchmarkId::new("merge", N), |b| {
        b.iter_batched(
            || (bs_evens.clone(), bs_odds.clone()),
            |(mut target, mut source)| {
                target.merge(&mut source);
                (target, source)
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ─── Set Benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert_contains(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("set_insert_contains");

    group.bench_function(BenchmarkId::new("BSTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BSTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            keys.iter().filter(|k| set.contains(*k)).count()
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            keys.iter().filter(|k| set.contains(*k)).count()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_map_insert,
    bench_map_get,
    bench_map_remove,
    bench_map_iter,
    bench_map_clone_and_merge,
    bench_set_insert_contains,
);
criterion_main!(benches);

use bst_map::BstMap;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;

/// Entry count for shapes that stay shallow.
const N: usize = 10_000;

/// Entry count for sorted loads, which make the unbalanced tree a linked list.
const SPINE_N: usize = 2_000;

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

/// Fisher-Yates shuffle of `0..n` driven by the same LCG, so every key is looked up once.
fn shuffled_keys(n: usize) -> Vec<i64> {
    let mut keys = ordered_keys(n);
    let mut x: u64 = 54321;
    for i in (1..n).rev() {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        let j = (x >> 33) as usize % (i + 1);
        keys.swap(i, j);
    }
    keys
}

fn sum_lookups(map: &BstMap<i64, i64>, keys: &[i64]) -> i64 {
    keys.iter().filter_map(|k| map.get(k)).sum()
}

// ─── Insert Benchmarks ──────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("BstMap", SPINE_N), |b| {
        b.iter(|| {
            let mut map = BstMap::new();
            for i in 0..SPINE_N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", SPINE_N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for i in 0..SPINE_N as i64 {
                map.insert(i, i);
            }
            map
        });
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("insert_random");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter(|| {
            let mut map = BstMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

// ─── Lookup Benchmarks ──────────────────────────────────────────────────────

/// Sorted load: the unbalanced tree is a spine, the balanced one is minimal.
fn bench_lookup_after_sorted_load(c: &mut Criterion) {
    let keys = shuffled_keys(SPINE_N);
    let unbalanced: BstMap<i64, i64> = ordered_keys(SPINE_N).into_iter().map(|k| (k, k)).collect();
    let mut balanced = unbalanced.clone();
    balanced.balance();
    let bt_map: BTreeMap<i64, i64> = ordered_keys(SPINE_N).into_iter().map(|k| (k, k)).collect();

    let mut group = c.benchmark_group("lookup_after_sorted_load");

    group.bench_function(BenchmarkId::new("BTreeMap", SPINE_N), |b| {
        b.iter(|| black_box(keys.iter().filter_map(|k| bt_map.get(k)).sum::<i64>()));
    });

    group.bench_function(BenchmarkId::new("BstMap/unbalanced", SPINE_N), |b| {
        b.iter(|| black_box(sum_lookups(&unbalanced, &keys)));
    });

    group.bench_function(BenchmarkId::new("BstMap/balanced", SPINE_N), |b| {
        b.iter(|| black_box(sum_lookups(&balanced, &keys)));
    });

    group.finish();
}

/// Shuffled load: the unbalanced tree is already shallow on average.
fn bench_lookup_after_random_load(c: &mut Criterion) {
    let keys = shuffled_keys(N);
    let unbalanced: BstMap<i64, i64> = shuffled_keys(N).into_iter().rev().map(|k| (k, k)).collect();
    let mut balanced = unbalanced.clone();
    balanced.balance();
    let bt_map: BTreeMap<i64, i64> = ordered_keys(N).into_iter().map(|k| (k, k)).collect();

    let mut group = c.benchmark_group("lookup_after_random_load");

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| black_box(keys.iter().filter_map(|k| bt_map.get(k)).sum::<i64>()));
    });

    group.bench_function(BenchmarkId::new("BstMap/unbalanced", N), |b| {
        b.iter(|| black_box(sum_lookups(&unbalanced, &keys)));
    });

    group.bench_function(BenchmarkId::new("BstMap/balanced", N), |b| {
        b.iter(|| black_box(sum_lookups(&balanced, &keys)));
    });

    group.finish();
}

// ─── Rebalance Benchmarks ───────────────────────────────────────────────────

fn bench_balance(c: &mut Criterion) {
    let spine: BstMap<i64, i64> = ordered_keys(SPINE_N).into_iter().map(|k| (k, k)).collect();
    let mut group = c.benchmark_group("balance");

    group.bench_function(BenchmarkId::new("BstMap/spine", SPINE_N), |b| {
        b.iter_batched(|| spine.clone(), |mut map| {
            map.balance();
            map
        }, criterion::BatchSize::LargeInput);
    });

    group.finish();
}

criterion_group!(insert_benches, bench_insert_ordered, bench_insert_random,);

criterion_group!(lookup_benches, bench_lookup_after_sorted_load, bench_lookup_after_random_load,);

criterion_group!(balance_benches, bench_balance,);

criterion_main!(insert_benches, lookup_benches, balance_benches);

//! Benchmarks for the Standard Library's [`BTreeMap`].

use std::collections::BTreeMap;

use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, black_box};
use rand::prelude::*;

/// Benchmarking sizes
const SIZES: [usize; 6] = [1, 10, 100, 1000, 10_000, 100_000];

/// A map of `size` random keys, and the keys themselves.
fn filled(rng: &mut StdRng, size: usize) -> (BTreeMap<i64, i64>, Vec<i64>) {
    let keys: Vec<i64> = std::iter::repeat_with(|| rng.random()).take(size).collect();
    (keys.iter().map(|&k| (k, k)).collect(), keys)
}

/// Benchmarking insertion
pub fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let (mut bm, _) = filled(&mut rng, size);

            b.iter(|| {
                bm.insert(rng.random(), rng.random());
            });
        });
    }
}

/// Benchmarking random lookups
pub fn get(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Get");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let (bm, mut keys) = filled(&mut rng, size);
            keys.shuffle(&mut rng);
            keys.truncate(10);

            b.iter(|| {
                for key in &keys {
                    black_box(bm.get(key));
                }
            });
        });
    }
}

/// Benchmarking removal followed by re-insertion
pub fn remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("BTreeMap Remove");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let (mut bm, keys) = filled(&mut rng, size);

            b.iter(|| {
                let key = keys[rng.random_range(0..keys.len())];
                black_box(bm.remove(&key));
                bm.insert(key, key);
            });
        });
    }
}

//! Benchmarks for the [`SkipMap`].

use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, black_box};
use rand::prelude::*;
use skipmap_arena::{DEFAULT_MAX_LEVEL, IntCmp, SkipMap};

/// Benchmarking sizes
const SIZES: [usize; 6] = [1, 10, 100, 1000, 10_000, 100_000];

/// A map of `size` random keys, and the keys themselves.
fn filled(rng: &mut StdRng, size: usize) -> (SkipMap<i64, i64, IntCmp>, Vec<i64>) {
    let mut sm = SkipMap::new(DEFAULT_MAX_LEVEL, IntCmp).unwrap();
    let keys: Vec<i64> = std::iter::repeat_with(|| rng.random()).take(size).collect();
    for &key in &keys {
        sm.put(key, key);
    }
    (sm, keys)
}

/// Benchmarking insertion
pub fn put(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipMap Put");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let (mut sm, _) = filled(&mut rng, size);

            b.iter(|| {
                sm.put(rng.random(), rng.random());
            });
        });
    }
}

/// Benchmarking random lookups
pub fn get(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipMap Get");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let (sm, mut keys) = filled(&mut rng, size);
            keys.shuffle(&mut rng);
            keys.truncate(10);

            b.iter(|| {
                for key in &keys {
                    black_box(sm.get(key));
                }
            });
        });
    }
}

/// Benchmarking removal followed by re-insertion
pub fn remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipMap Remove");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let (mut sm, keys) = filled(&mut rng, size);

            b.iter(|| {
                let key = keys[rng.random_range(0..keys.len())];
                black_box(sm.remove(&key));
                sm.put(key, key);
            });
        });
    }
}

/// Benchmarking full ordered listing
pub fn list(c: &mut Criterion) {
    c.bench_function("SkipMap List", |b| {
        let mut rng = StdRng::seed_from_u64(0x1234_abcd);
        let (sm, _) = filled(&mut rng, 100_000);

        b.iter(|| black_box(sm.list()));
    });
}

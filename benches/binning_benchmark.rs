//! Benchmark of the binning driver and the DataFrame-level analysis
//!
//! Run with: cargo bench --bench binning_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use ivbin::pipeline::{analyze_features, bin, BinningOptions, Monotonicity};

/// Predictor with `levels` distinct values and an event rate rising with it
fn generate_sample(n_rows: usize, levels: u32, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut x = Vec::with_capacity(n_rows);
    let mut y = Vec::with_capacity(n_rows);

    for _ in 0..n_rows {
        let level = rng.gen_range(0..levels);
        let p = 0.1 + 0.8 * level as f64 / levels as f64;
        x.push(level as f64);
        y.push(if rng.gen_bool(p) { 1.0 } else { 0.0 });
    }

    (x, y)
}

/// Generate synthetic data with a binary target and continuous features
fn generate_test_dataframe(n_rows: usize, n_features: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let target: Vec<i32> = (0..n_rows)
        .map(|_| if rng.gen::<f64>() > 0.7 { 1 } else { 0 })
        .collect();

    let mut columns: Vec<Column> = vec![Column::new("target".into(), target.clone())];

    for i in 0..n_features {
        let values: Vec<f64> = if i % 2 == 0 {
            (0..n_rows).map(|_| (rng.gen::<f64>() * 1000.0).round()).collect()
        } else {
            // shifted by class so splits carry signal
            target
                .iter()
                .map(|&t| {
                    let base = if t == 1 { 70.0 } else { 30.0 };
                    (base + rng.gen::<f64>() * 40.0 - 20.0).round()
                })
                .collect()
        };
        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }

    DataFrame::new(columns).expect("Failed to create DataFrame")
}

/// Single-predictor binning as the number of distinct values grows
fn benchmark_distinct_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("bin_distinct_values");
    let n_rows = 50_000;

    for levels in [100u32, 1_000, 10_000] {
        let (x, y) = generate_sample(n_rows, levels, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::from_parameter(levels), &levels, |b, _| {
            b.iter(|| bin(black_box(&x), black_box(&y), &BinningOptions::default()))
        });
    }

    group.finish();
}

/// Effect of the constraints on search depth
fn benchmark_constraints(c: &mut Criterion) {
    let mut group = c.benchmark_group("bin_constraints");
    let (x, y) = generate_sample(50_000, 2_000, 7);

    let cases = [
        ("unconstrained", BinningOptions::default()),
        (
            "increasing",
            BinningOptions::default().with_monotonicity(Monotonicity::Increasing),
        ),
        ("min_cnt_5pct", BinningOptions::default().with_min_cnt(2_500.0)),
        ("max_bin_20", BinningOptions::default().with_max_bin(20)),
    ];

    for (name, options) in cases {
        group.bench_function(name, |b| {
            b.iter(|| bin(black_box(&x), black_box(&y), &options))
        });
    }

    group.finish();
}

/// Parallel binning of every feature in a DataFrame
fn benchmark_analyze_features(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_features");
    group.sample_size(10);

    for n_features in [10usize, 50] {
        let df = generate_test_dataframe(20_000, n_features, 42);
        group.bench_with_input(
            BenchmarkId::from_parameter(n_features),
            &n_features,
            |b, _| {
                b.iter(|| {
                    analyze_features(
                        black_box(&df),
                        "target",
                        None,
                        &BinningOptions::default(),
                        None,
                    )
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_distinct_values,
    benchmark_constraints,
    benchmark_analyze_features
);
criterion_main!(benches);

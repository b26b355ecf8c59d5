//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

/// Twenty distinct values with an event rate that rises with x
///
/// With default options the breakpoints are `[-inf, 6, 9, 12, 18]`.
pub fn rising_event_rate() -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (1..=20).map(|v| v as f64).collect();
    let y = vec![
        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0,
        0.0, 1.0,
    ];
    (x, y)
}

/// Random predictor with ties and an event probability increasing in x
///
/// Values are drawn from `0..levels` so most values repeat; the seed makes
/// the sample reproducible.
pub fn random_sample(n: usize, levels: u32, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);

    for _ in 0..n {
        let level = rng.gen_range(0..levels);
        let p = 0.1 + 0.8 * level as f64 / levels as f64;
        x.push(level as f64);
        y.push(if rng.gen_bool(p) { 1.0 } else { 0.0 });
    }

    (x, y)
}

/// A small dataset with a binary target, a predictive feature, a constant
/// feature, a feature with nulls and a string column
pub fn create_test_dataframe() -> DataFrame {
    let (x, y) = rising_event_rate();
    let target: Vec<i32> = y.iter().map(|&v| v as i32).collect();
    let with_nulls: Vec<Option<f64>> = x
        .iter()
        .enumerate()
        .map(|(i, &v)| if i % 5 == 0 { None } else { Some(v) })
        .collect();

    df! {
        "target" => target,
        "feature_good" => x,
        "feature_constant" => [3.0f64; 20],
        "feature_nulls" => with_nulls,
        "label" => (0..20).map(|i| if i % 2 == 0 { "a" } else { "b" }).collect::<Vec<_>>(),
    }
    .unwrap()
}

/// Same data as [`create_test_dataframe`] with a string target of "B"/"G"
pub fn create_string_target_dataframe() -> DataFrame {
    let (x, y) = rising_event_rate();
    let target: Vec<&str> = y.iter().map(|&v| if v == 1.0 { "B" } else { "G" }).collect();

    df! {
        "target" => target,
        "feature_good" => x,
    }
    .unwrap()
}

/// [`create_string_target_dataframe`] followed by twenty rows whose target
/// is "X", which maps to neither class
pub fn create_partially_mapped_dataframe() -> DataFrame {
    let (x, y) = rising_event_rate();
    let mut target: Vec<&str> = y.iter().map(|&v| if v == 1.0 { "B" } else { "G" }).collect();
    target.extend(std::iter::repeat("X").take(20));
    let mut feature = x.clone();
    feature.extend(x.iter().copied());

    df! {
        "target" => target,
        "feature_good" => feature,
    }
    .unwrap()
}

/// Create a larger random DataFrame for performance tests
pub fn create_large_test_dataframe(rows: usize, cols: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut columns: Vec<Column> = Vec::with_capacity(cols + 1);

    let target: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
    columns.push(Column::new("target".into(), target));

    for i in 0..cols {
        let values: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>()).collect();
        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert breakpoints start with -inf and are strictly increasing
pub fn assert_valid_breaks(breaks: &[f64]) {
    assert!(!breaks.is_empty(), "breaks must never be empty");
    assert_eq!(breaks[0], f64::NEG_INFINITY, "first break must be -inf");
    for pair in breaks.windows(2) {
        assert!(
            pair[0] < pair[1],
            "breaks not strictly increasing: {:?}",
            breaks
        );
    }
}

//! Binning of every numeric feature in a dataset
//!
//! Each feature is an independent binning run with its own crosstab, queue
//! and bin budget, so features are processed in parallel. Nothing is shared
//! between runs apart from the progress counter.

use anyhow::Result;
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{info, warn};

use super::binner::{bin, Binning, BinningOptions};
use super::error::BinningError;
use super::loader::{extract_feature, numeric_columns};
use super::target::{extract_target, TargetMapping};
use super::woe_table::WoeTable;
use crate::utils::create_progress_bar;

/// Binning result for one feature
#[derive(Debug, Clone, Serialize)]
pub struct FeatureBinning {
    /// Name of the binned feature
    pub feature_name: String,
    /// Breakpoints and accepted splits
    pub binning: Binning,
    /// Per-bin statistics for the breakpoints
    pub table: WoeTable,
    /// Total Information Value of the final bins
    pub iv: f64,
}

/// A feature that could not be binned
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFeature {
    pub feature_name: String,
    pub reason: String,
}

/// Outcome of binning a set of features
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeatureAnalysis {
    /// Binned features, sorted by IV descending
    pub features: Vec<FeatureBinning>,
    /// Features whose run failed, with the error message
    pub skipped: Vec<SkippedFeature>,
}

/// Bin one feature and summarize its bins.
pub fn bin_feature(
    feature_name: &str,
    x: &[f64],
    y: &[f64],
    options: &BinningOptions,
) -> Result<FeatureBinning, BinningError> {
    let binning = bin(x, y, options)?;
    let table = WoeTable::from_breaks(x, y, &binning.breaks)?;
    let iv = table.iv;

    Ok(FeatureBinning {
        feature_name: feature_name.to_string(),
        binning,
        table,
        iv,
    })
}

/// Bin numeric features of a DataFrame against a binary target
///
/// # Arguments
/// * `df` - Reference to the DataFrame
/// * `target` - Name of the target column (0/1, or mapped via `mapping`)
/// * `features` - Features to bin; `None` bins every numeric column except the target
/// * `options` - Split constraints shared by every run
/// * `mapping` - Optional event/non-event mapping for non-binary targets
///
/// # Returns
/// Binned and skipped features. Rows with a null or unmapped target are
/// dropped from every run; null feature values are treated as missing.
pub fn analyze_features(
    df: &DataFrame,
    target: &str,
    features: Option<&[String]>,
    options: &BinningOptions,
    mapping: Option<&TargetMapping>,
) -> Result<FeatureAnalysis> {
    options.validate()?;

    let outcomes = extract_target(df, target, mapping)?;

    let feature_names: Vec<String> = match features {
        Some(names) => {
            if let Some(name) = names.iter().find(|name| name.as_str() == target) {
                anyhow::bail!("Target column '{}' cannot be binned as a feature", name);
            }
            names.to_vec()
        }
        None => numeric_columns(df, &[target]),
    };

    if feature_names.is_empty() {
        return Ok(FeatureAnalysis::default());
    }

    info!(
        features = feature_names.len(),
        rows = df.height(),
        max_bin = options.max_bin,
        min_cnt = options.min_cnt,
        min_iv = options.min_iv,
        monotonicity = %options.monotonicity,
        "binning features"
    );

    let total = feature_names.len() as u64;
    let pb = create_progress_bar(total, "   Binning");
    let progress_counter = AtomicU64::new(0);

    let results: Vec<(String, Result<FeatureBinning>)> = feature_names
        .par_iter()
        .map(|name| {
            let result = extract_feature(df, name).and_then(|values| {
                let (x, y): (Vec<f64>, Vec<f64>) = values
                    .iter()
                    .zip(outcomes.iter())
                    .filter_map(|(&v, t)| t.map(|t| (v, t)))
                    .unzip();
                bin_feature(name, &x, &y, options).map_err(anyhow::Error::from)
            });

            let count = progress_counter.fetch_add(1, Ordering::Relaxed);
            if count % 10 == 0 || count + 1 == total {
                pb.set_position(count + 1);
            }

            (name.clone(), result)
        })
        .collect();

    pb.finish_and_clear();

    let mut analysis = FeatureAnalysis::default();
    for (feature_name, result) in results {
        match result {
            Ok(binned) => analysis.features.push(binned),
            Err(e) => {
                warn!(feature = %feature_name, error = %e, "feature skipped");
                analysis.skipped.push(SkippedFeature {
                    feature_name,
                    reason: e.to_string(),
                });
            }
        }
    }

    analysis
        .features
        .sort_by(|a, b| b.iv.partial_cmp(&a.iv).unwrap_or(std::cmp::Ordering::Equal));

    info!(
        binned = analysis.features.len(),
        skipped = analysis.skipped.len(),
        "feature binning complete"
    );

    Ok(analysis)
}

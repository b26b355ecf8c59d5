//! JSON export of binning results

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{BinningOptions, FeatureAnalysis, MissingBin, SkippedFeature, WoeBin};

/// Metadata about the binning run
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    pub ivbin_version: String,
    pub input_file: String,
    pub target_column: String,
    /// Options shared by every feature's run
    pub options: BinningOptions,
}

/// Summary statistics of the run
#[derive(Serialize)]
pub struct ExportSummary {
    pub features_binned: usize,
    pub features_skipped: usize,
    /// Average IV across binned features
    pub avg_iv: f64,
}

/// One feature's breakpoints and bins
#[derive(Serialize)]
pub struct FeatureExport {
    pub feature_name: String,
    /// Breakpoints; the leading -inf serializes as null
    pub breaks: Vec<f64>,
    pub num_bins: usize,
    pub iv: f64,
    pub bins: Vec<WoeBin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_bin: Option<MissingBin>,
}

/// Complete export document
#[derive(Serialize)]
pub struct BinningExport {
    pub metadata: ExportMetadata,
    pub summary: ExportSummary,
    pub features: Vec<FeatureExport>,
    pub skipped: Vec<SkippedFeature>,
}

/// Assemble the export document from an analysis
pub fn build_export(
    analysis: &FeatureAnalysis,
    input_file: &str,
    target_column: &str,
    options: &BinningOptions,
) -> BinningExport {
    let features: Vec<FeatureExport> = analysis
        .features
        .iter()
        .map(|f| FeatureExport {
            feature_name: f.feature_name.clone(),
            breaks: f.binning.breaks.clone(),
            num_bins: f.binning.num_bins,
            iv: f.iv,
            bins: f.table.bins.clone(),
            missing_bin: f.table.missing_bin.clone(),
        })
        .collect();

    let avg_iv = if features.is_empty() {
        0.0
    } else {
        features.iter().map(|f| f.iv).sum::<f64>() / features.len() as f64
    };

    BinningExport {
        metadata: ExportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            ivbin_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input_file.to_string(),
            target_column: target_column.to_string(),
            options: *options,
        },
        summary: ExportSummary {
            features_binned: features.len(),
            features_skipped: analysis.skipped.len(),
            avg_iv,
        },
        features,
        skipped: analysis.skipped.clone(),
    }
}

/// Write the analysis as pretty-printed JSON
///
/// # Arguments
/// * `analysis` - Binned and skipped features
/// * `output_path` - Path to write the JSON file
/// * `input_file` - Dataset path recorded in the metadata
/// * `target_column` - Target column recorded in the metadata
/// * `options` - Binning options recorded in the metadata
pub fn export_binning(
    analysis: &FeatureAnalysis,
    output_path: &Path,
    input_file: &str,
    target_column: &str,
    options: &BinningOptions,
) -> Result<()> {
    let export = build_export(analysis, input_file, target_column, options);

    let json =
        serde_json::to_string_pretty(&export).context("Failed to serialize binning results to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write binning results to {}", output_path.display()))?;

    Ok(())
}

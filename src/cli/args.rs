//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{BinningOptions, Monotonicity, TargetMapping};

/// ivbin - Bin numeric features by Information Value against a binary target
#[derive(Parser, Debug)]
#[command(name = "ivbin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target column name (binary 0/1, or mapped with --event-value/--non-event-value).
    /// If not provided, will be selected interactively from available columns.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Value in target column that represents EVENT (maps to 1).
    #[arg(long, requires = "non_event_value")]
    pub event_value: Option<String>,

    /// Value in target column that represents NON-EVENT (maps to 0).
    #[arg(long, requires = "event_value")]
    pub non_event_value: Option<String>,

    /// Features to bin (comma-separated). Defaults to every numeric column except the target.
    #[arg(short, long, value_delimiter = ',')]
    pub features: Vec<String>,

    /// Maximum number of bins per feature
    #[arg(long, default_value = "10", value_parser = validate_max_bin)]
    pub max_bin: usize,

    /// Minimum number of observations on each side of a split
    #[arg(long, default_value = "0", value_parser = validate_min_cnt)]
    pub min_cnt: f64,

    /// Minimum observations on each side of a split, as a percentage of rows (0-100).
    /// Overrides --min-cnt.
    #[arg(long, value_parser = validate_pct)]
    pub min_cnt_pct: Option<f64>,

    /// Minimum Information Value of an accepted split
    #[arg(long, default_value = "0.0")]
    pub min_iv: f64,

    /// Monotonicity constraint on the WoE trend.
    /// Options: "none" (default), "increasing", "decreasing", or the codes 0, 1, -1
    #[arg(long, default_value = "none", allow_negative_numbers = true)]
    pub monotonicity: Monotonicity,

    /// Write binning results as JSON. Without a path, defaults to '<input>_bins.json'.
    #[arg(short, long)]
    pub export: Option<Option<PathBuf>>,

    /// Skip interactive prompts (target must then be given with -t)
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Print only the IV ranking, not every feature's bin table
    #[arg(long, default_value = "false")]
    pub summary_only: bool,

    /// Number of rows to use for schema inference (CSV only). Use 0 for a full scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Binning options for `rows` rows with a usable target
    pub fn binning_options(&self, rows: usize) -> BinningOptions {
        let min_cnt = match self.min_cnt_pct {
            Some(pct) => (pct / 100.0 * rows as f64).ceil(),
            None => self.min_cnt,
        };

        BinningOptions::default()
            .with_max_bin(self.max_bin)
            .with_min_cnt(min_cnt)
            .with_min_iv(self.min_iv)
            .with_monotonicity(self.monotonicity)
    }

    /// Target mapping, when both event and non-event values were given
    pub fn target_mapping(&self) -> Option<TargetMapping> {
        match (&self.event_value, &self.non_event_value) {
            (Some(event), Some(non_event)) => {
                Some(TargetMapping::new(event.clone(), non_event.clone()))
            }
            _ => None,
        }
    }

    /// Features selected on the command line, or `None` for all numeric columns
    pub fn feature_selection(&self) -> Option<&[String]> {
        if self.features.is_empty() {
            None
        } else {
            Some(self.features.as_slice())
        }
    }

    /// Export path, deriving '<stem>_bins.json' next to the input when none was given
    pub fn export_path(&self) -> Option<PathBuf> {
        if let Some(path) = self.export.as_ref()? {
            return Some(path.clone());
        }
        let parent = self
            .input
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."));
        let stem = self
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        Some(parent.join(format!("{}_bins.json", stem)))
    }
}

/// Validator for max_bin parameter
fn validate_max_bin(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid bin count", s))?;

    if value == 0 {
        Err("max_bin must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Validator for min_cnt parameter
fn validate_min_cnt(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !value.is_finite() || value < 0.0 {
        Err(format!("min_cnt must be a finite value >= 0, got {}", value))
    } else {
        Ok(value)
    }
}

/// Validator for min_cnt_pct parameter
fn validate_pct(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=100.0).contains(&value) {
        Err(format!(
            "min_cnt_pct must be between 0.0 and 100.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}

//! Target column validation and mapping
//!
//! Binning needs the outcome as 0/1. A target column is either already
//! binary, or a mapping names the event (1) and non-event (0) values and
//! every other value is left out of the analysis.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Tolerance for floating point comparison when checking binary 0/1 values
const TOLERANCE: f64 = 1e-9;

/// Mapping from target column values to the binary outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetMapping {
    /// Value that maps to 1 (event)
    pub event_value: String,
    /// Value that maps to 0 (non-event)
    pub non_event_value: String,
}

impl TargetMapping {
    pub fn new(event_value: String, non_event_value: String) -> Self {
        Self {
            event_value,
            non_event_value,
        }
    }
}

/// Result of inspecting a target column
#[derive(Debug, Clone)]
pub enum TargetAnalysis {
    /// Numeric column holding only 0 and 1
    AlreadyBinary,
    /// Column needs a mapping; these are its distinct values
    NeedsMapping { unique_values: Vec<String> },
}

/// Decide whether a target column can be used as-is or needs a mapping
pub fn analyze_target_column(df: &DataFrame, target: &str) -> Result<TargetAnalysis> {
    let target_col = non_empty_target(df, target)?;

    if target_col.dtype().is_primitive_numeric() && distinct_values_are_binary(target_col)? {
        return Ok(TargetAnalysis::AlreadyBinary);
    }

    let unique_values = unique_values_as_strings(target_col)?;
    if unique_values.is_empty() {
        anyhow::bail!("Target column '{}' has no valid (non-null) values", target);
    }

    Ok(TargetAnalysis::NeedsMapping { unique_values })
}

/// Extract the outcome of every row as `Some(0.0)`, `Some(1.0)` or `None`.
///
/// Without a mapping the column must be numeric 0/1; nulls become `None`.
/// With a mapping, values matching neither side become `None`.
pub fn extract_target(
    df: &DataFrame,
    target: &str,
    mapping: Option<&TargetMapping>,
) -> Result<Vec<Option<f64>>> {
    let target_col = non_empty_target(df, target)?;

    if let Some(mapping) = mapping {
        let outcomes = column_to_string_vec(target_col)?
            .into_iter()
            .map(|v| match v {
                Some(s) if s == mapping.event_value => Some(1.0),
                Some(s) if s == mapping.non_event_value => Some(0.0),
                _ => None,
            })
            .collect();
        return Ok(outcomes);
    }

    if !target_col.dtype().is_primitive_numeric() || !distinct_values_are_binary(target_col)? {
        anyhow::bail!(
            "Target column '{}' must be binary (0/1). Use --event-value and --non-event-value to map other values.",
            target
        );
    }

    let float_col = target_col.cast(&DataType::Float64)?;
    let outcomes = float_col
        .f64()?
        .into_iter()
        .map(|v| v.map(|n| if (n - 1.0).abs() < TOLERANCE { 1.0 } else { 0.0 }))
        .collect();

    Ok(outcomes)
}

/// Count (events, non-events, ignored) rows under a mapping
pub fn count_mapped_records(
    df: &DataFrame,
    target: &str,
    mapping: &TargetMapping,
) -> Result<(usize, usize, usize)> {
    let outcomes = extract_target(df, target, Some(mapping))?;

    let events = outcomes.iter().filter(|v| **v == Some(1.0)).count();
    let non_events = outcomes.iter().filter(|v| **v == Some(0.0)).count();
    let ignored = outcomes.iter().filter(|v| v.is_none()).count();

    Ok((events, non_events, ignored))
}

/// Number of rows with a usable outcome: non-null, and matching either side
/// of the mapping when one is given
pub fn count_target_rows(
    df: &DataFrame,
    target: &str,
    mapping: Option<&TargetMapping>,
) -> Result<usize> {
    let outcomes = extract_target(df, target, mapping)?;
    Ok(outcomes.iter().filter(|v| v.is_some()).count())
}

fn non_empty_target<'a>(df: &'a DataFrame, target: &str) -> Result<&'a Column> {
    let target_col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;

    if target_col.len() == 0 {
        anyhow::bail!("Target column '{}' is empty", target);
    }
    if target_col.null_count() == target_col.len() {
        anyhow::bail!("Target column '{}' contains only null values", target);
    }

    Ok(target_col)
}

fn distinct_values_are_binary(col: &Column) -> Result<bool> {
    let unique = col.cast(&DataType::Float64)?.unique()?;
    let values: Vec<f64> = unique.f64()?.into_iter().flatten().collect();

    Ok(!values.is_empty()
        && values
            .iter()
            .all(|&v| v.abs() < TOLERANCE || (v - 1.0).abs() < TOLERANCE))
}

fn unique_values_as_strings(col: &Column) -> Result<Vec<String>> {
    let unique = col.unique()?;
    let mut values: Vec<String> = column_to_string_vec(&unique)?.into_iter().flatten().collect();
    values.sort();
    Ok(values)
}

/// Render every value of a column as a string, keeping nulls
fn column_to_string_vec(col: &Column) -> Result<Vec<Option<String>>> {
    let values: Vec<Option<String>> = match col.dtype() {
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => col
            .cast(&DataType::Int64)?
            .i64()?
            .into_iter()
            .map(|v| v.map(|n| n.to_string()))
            .collect(),
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => col
            .cast(&DataType::UInt64)?
            .u64()?
            .into_iter()
            .map(|v| v.map(|n| n.to_string()))
            .collect(),
        DataType::Float32 | DataType::Float64 => col
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|v| v.map(|n| format!("{}", n)))
            .collect(),
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(|b| b.to_string()))
            .collect(),
        _ => col
            .cast(&DataType::String)?
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
    };

    Ok(values)
}

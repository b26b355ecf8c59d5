//! Per-bin WoE statistics for a set of breakpoints
//!
//! Turns the breakpoints of a binning run back into a table of bins with
//! their class counts, WoE and IV contribution, and encodes predictor
//! values with the WoE of the bin they fall into.

use serde::Serialize;

use super::crosstab::{ClassTotals, Crosstab};
use super::error::BinningError;
use super::woe::{segment_woe, segment_woe_iv};

/// A single bin with WoE statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WoeBin {
    /// Lower bound (exclusive)
    pub lower_bound: f64,
    /// Upper bound (inclusive; +inf for the last bin)
    pub upper_bound: f64,
    /// Count of observations with outcome 0
    pub zeros: f64,
    /// Count of observations with outcome 1
    pub ones: f64,
    /// Total observations in this bin
    pub count: f64,
    /// Weight of Evidence, ln(%zeros / %ones)
    pub woe: f64,
    /// Contribution to total IV from this bin
    pub iv_contribution: f64,
    /// Percentage of all observations (missing included) in this bin
    pub population_pct: f64,
    /// Event rate (ones / count)
    pub event_rate: f64,
}

/// Observations whose predictor value is NaN or infinite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingBin {
    pub zeros: f64,
    pub ones: f64,
    pub count: f64,
    /// WoE against the grand totals of finite predictor values
    pub woe: f64,
    pub iv_contribution: f64,
    pub population_pct: f64,
    pub event_rate: f64,
}

/// Bins defined by a breakpoint sequence, summarized over a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WoeTable {
    /// Breakpoints the table was built from, starting with -inf
    pub breaks: Vec<f64>,
    /// One entry per bin, in value order
    pub bins: Vec<WoeBin>,
    /// Present when some predictor values were missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_bin: Option<MissingBin>,
    /// Sum of the bins' IV contributions (missing bin excluded)
    pub iv: f64,
}

impl WoeTable {
    /// Summarize the bins `(breaks[k], breaks[k + 1]]` over `x` and `y`.
    ///
    /// `breaks` must start with `-inf` and be strictly increasing; the last
    /// bin is open above.
    pub fn from_breaks(x: &[f64], y: &[f64], breaks: &[f64]) -> Result<Self, BinningError> {
        validate_breaks(breaks)?;

        let crosstab = Crosstab::build(x, y)?;
        let grand = crosstab.grand_totals();
        if grand.zeros <= 0.0 || grand.ones <= 0.0 {
            return Err(BinningError::DegenerateTarget {
                zeros: grand.zeros,
                ones: grand.ones,
            });
        }

        let missing = crosstab.missing();
        let total_samples = grand.population() + missing.population();

        let mut counts = vec![ClassTotals::default(); breaks.len()];
        for row in crosstab.rows() {
            counts[locate(breaks, row.value)] += row.totals();
        }

        let bins: Vec<WoeBin> = counts
            .iter()
            .enumerate()
            .map(|(k, &segment)| {
                let upper_bound = breaks.get(k + 1).copied().unwrap_or(f64::INFINITY);
                let (woe, iv_contribution) = if segment.population() > 0.0 {
                    segment_woe_iv(segment, grand)
                } else {
                    (0.0, 0.0)
                };
                let count = segment.population();

                WoeBin {
                    lower_bound: breaks[k],
                    upper_bound,
                    zeros: segment.zeros,
                    ones: segment.ones,
                    count,
                    woe,
                    iv_contribution,
                    population_pct: count / total_samples * 100.0,
                    event_rate: if count > 0.0 { segment.ones / count } else { 0.0 },
                }
            })
            .collect();

        let missing_bin = if missing.population() > 0.0 {
            let (woe, iv_contribution) = segment_woe_iv(missing, grand);
            let count = missing.population();
            Some(MissingBin {
                zeros: missing.zeros,
                ones: missing.ones,
                count,
                woe,
                iv_contribution,
                population_pct: count / total_samples * 100.0,
                event_rate: missing.ones / count,
            })
        } else {
            None
        };

        let iv = bins.iter().map(|b| b.iv_contribution).sum();

        Ok(Self {
            breaks: breaks.to_vec(),
            bins,
            missing_bin,
            iv,
        })
    }

    /// Index of the bin containing `value`, or `None` for NaN/infinite values
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        value.is_finite().then(|| locate(&self.breaks, value))
    }

    /// Replace each value by the WoE of its bin.
    ///
    /// Missing values take the missing bin's WoE, or NaN when the table was
    /// built without missing values.
    pub fn transform(&self, x: &[f64]) -> Vec<f64> {
        let missing_woe = self.missing_bin.as_ref().map_or(f64::NAN, |m| m.woe);
        x.iter()
            .map(|&value| match self.bin_index(value) {
                Some(k) => self.bins[k].woe,
                None => missing_woe,
            })
            .collect()
    }
}

/// WoE of the observations whose predictor equals `value` exactly.
///
/// Returns `Ok(None)` when `value` was never observed.
pub fn woe_for_value(x: &[f64], y: &[f64], value: f64) -> Result<Option<f64>, BinningError> {
    let crosstab = Crosstab::build(x, y)?;
    let grand = crosstab.grand_totals();
    if grand.zeros <= 0.0 || grand.ones <= 0.0 {
        return Err(BinningError::DegenerateTarget {
            zeros: grand.zeros,
            ones: grand.ones,
        });
    }

    let rows = crosstab.rows();
    let idx = rows.partition_point(|row| row.value < value);
    Ok(rows
        .get(idx)
        .filter(|row| row.value == value)
        .map(|row| segment_woe(row.totals(), grand)))
}

/// Bin of a finite value: the number of interior breaks strictly below it
fn locate(breaks: &[f64], value: f64) -> usize {
    breaks[1..].partition_point(|&b| b < value)
}

fn validate_breaks(breaks: &[f64]) -> Result<(), BinningError> {
    match breaks.first() {
        Some(first) if *first == f64::NEG_INFINITY => {}
        _ => {
            return Err(BinningError::InvalidBreaks {
                reason: "breakpoints must start with -inf".to_string(),
            })
        }
    }
    if let Some(bad) = breaks[1..].iter().find(|b| !b.is_finite()) {
        return Err(BinningError::InvalidBreaks {
            reason: format!("interior breakpoint {} is not finite", bad),
        });
    }
    if breaks.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(BinningError::InvalidBreaks {
            reason: "breakpoints must be strictly increasing".to_string(),
        });
    }
    Ok(())
}

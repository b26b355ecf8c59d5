//! Queue-driven IV binning
//!
//! The driver seeds a FIFO work queue with the full crosstab range, then
//! repeatedly takes the oldest range, searches it for the best valid cut
//! and, while the bin budget allows, marks the cut and queues both halves.
//! Breakpoints are assembled from the marked rows in value order.

use serde::Serialize;
use tracing::debug;

use super::crosstab::{ClassTotals, Crosstab};
use super::error::BinningError;
use super::monotonicity::Monotonicity;
use super::queue::{WorkItem, WorkQueue};
use super::split::find_best_split;

/// Default cap on the number of bins
pub const DEFAULT_MAX_BIN: usize = 10;

/// Constraints applied to every split of a binning run
///
/// Construct via [`BinningOptions::default`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter      | Default |
/// |----------------|---------|
/// | `max_bin`      | 10      |
/// | `min_cnt`      | 0       |
/// | `min_iv`       | 0.0     |
/// | `monotonicity` | `None`  |
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BinningOptions {
    /// Maximum number of resulting bins
    pub max_bin: usize,
    /// Minimum population (zeros + ones) required on each side of a split
    pub min_cnt: f64,
    /// Minimum IV of an accepted split
    pub min_iv: f64,
    /// WoE trend every accepted split must follow
    pub monotonicity: Monotonicity,
}

impl Default for BinningOptions {
    fn default() -> Self {
        Self {
            max_bin: DEFAULT_MAX_BIN,
            min_cnt: 0.0,
            min_iv: 0.0,
            monotonicity: Monotonicity::None,
        }
    }
}

impl BinningOptions {
    #[must_use]
    pub fn with_max_bin(mut self, max_bin: usize) -> Self {
        self.max_bin = max_bin;
        self
    }

    #[must_use]
    pub fn with_min_cnt(mut self, min_cnt: f64) -> Self {
        self.min_cnt = min_cnt;
        self
    }

    #[must_use]
    pub fn with_min_iv(mut self, min_iv: f64) -> Self {
        self.min_iv = min_iv;
        self
    }

    #[must_use]
    pub fn with_monotonicity(mut self, monotonicity: Monotonicity) -> Self {
        self.monotonicity = monotonicity;
        self
    }

    /// Check the options before any computation
    pub fn validate(&self) -> Result<(), BinningError> {
        if self.max_bin == 0 {
            return Err(BinningError::InvalidMaxBin {
                max_bin: self.max_bin,
            });
        }
        if !self.min_cnt.is_finite() || self.min_cnt < 0.0 {
            return Err(BinningError::InvalidMinCount {
                min_cnt: self.min_cnt,
            });
        }
        if self.min_iv.is_nan() {
            return Err(BinningError::InvalidMinIv {
                min_iv: self.min_iv,
            });
        }
        Ok(())
    }
}

/// A split accepted by the driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcceptedSplit {
    /// Crosstab row after which the bin boundary sits
    pub index: usize,
    /// Predictor value of that row; the boundary is inclusive on its left
    pub value: f64,
    /// IV of the split at the time it was accepted
    pub iv: f64,
    /// WoE of the lower side
    pub asc_woe: f64,
    /// WoE of the upper side
    pub dsc_woe: f64,
    /// Population of the lower side
    pub asc_count: f64,
    /// Population of the upper side
    pub dsc_count: f64,
}

impl AcceptedSplit {
    /// `+1` when the lower side has the larger WoE, `-1` otherwise
    pub fn trend(&self) -> i32 {
        if self.asc_woe > self.dsc_woe {
            1
        } else {
            -1
        }
    }
}

/// Result of a binning run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Binning {
    /// `[-inf, b1, .., bk]`; bin `k` covers `(breaks[k], breaks[k + 1]]`
    /// and the last bin is open above
    pub breaks: Vec<f64>,
    /// Accepted splits in acceptance order
    pub splits: Vec<AcceptedSplit>,
    /// Final bin count; equals `breaks.len()` since the last bin is open above
    pub num_bins: usize,
    /// Grand totals over finite predictor values
    pub totals: ClassTotals,
    /// Class tallies of non-finite predictor values
    pub missing: ClassTotals,
}

/// Bin a predictor against a binary outcome.
///
/// # Arguments
/// * `x` - Predictor values; NaN and infinite values are left out of the crosstab
/// * `y` - Outcome values, each 0 or 1
/// * `options` - Split constraints and bin budget
///
/// # Returns
/// The breakpoints and the accepted splits, or an error for invalid input.
/// When no valid split exists the result is the single bin `[-inf]`.
pub fn bin(x: &[f64], y: &[f64], options: &BinningOptions) -> Result<Binning, BinningError> {
    options.validate()?;

    let crosstab = Crosstab::build(x, y)?;
    let grand = crosstab.grand_totals();
    if grand.zeros <= 0.0 || grand.ones <= 0.0 {
        return Err(BinningError::DegenerateTarget {
            zeros: grand.zeros,
            ones: grand.ones,
        });
    }

    let mut queue = WorkQueue::new();
    queue.enqueue(WorkItem::new(0, crosstab.len() - 1));

    let mut breaks = vec![false; crosstab.len()];
    let mut splits: Vec<AcceptedSplit> = Vec::new();
    let mut num_bins = 1usize;

    while let Some(item) = queue.dequeue() {
        // Budget exhausted: the remaining ranges become terminal bins
        if num_bins >= options.max_bin {
            continue;
        }

        let Some(candidate) = find_best_split(item, &crosstab, grand, options) else {
            continue;
        };

        num_bins += 1;
        breaks[candidate.index] = true;

        let accepted = AcceptedSplit {
            index: candidate.index,
            value: crosstab.row(candidate.index).value,
            iv: candidate.stats.iv,
            asc_woe: candidate.stats.asc_woe,
            dsc_woe: candidate.stats.dsc_woe,
            asc_count: candidate.asc.population(),
            dsc_count: candidate.dsc.population(),
        };
        debug!(
            start = item.start,
            stop = item.stop,
            index = accepted.index,
            value = accepted.value,
            iv = accepted.iv,
            num_bins,
            "split accepted"
        );
        splits.push(accepted);

        let (lower, upper) = item.split_at(candidate.index);
        queue.enqueue(lower);
        queue.enqueue(upper);
    }

    let breakpoints: Vec<f64> = std::iter::once(f64::NEG_INFINITY)
        .chain(
            crosstab
                .rows()
                .iter()
                .zip(breaks.iter())
                .filter(|(_, &marked)| marked)
                .map(|(row, _)| row.value),
        )
        .collect();

    debug!(
        distinct_values = crosstab.len(),
        num_bins,
        max_bin = options.max_bin,
        "binning complete"
    );

    Ok(Binning {
        breaks: breakpoints,
        splits,
        num_bins,
        totals: grand,
        missing: crosstab.missing(),
    })
}

/// Bin with the flat, integer-coded parameter list.
///
/// `monotonicity` is `-1`, `0` (unconstrained) or `1`. Returns only the
/// breakpoints.
pub fn bin_with(
    x: &[f64],
    y: &[f64],
    min_iv: f64,
    min_cnt: f64,
    max_bin: usize,
    monotonicity: i32,
) -> Result<Vec<f64>, BinningError> {
    let options = BinningOptions {
        max_bin,
        min_cnt,
        min_iv,
        monotonicity: Monotonicity::try_from(monotonicity)?,
    };
    bin(x, y, &options).map(|binning| binning.breaks)
}

//! Best-split search over a contiguous range of crosstab rows

use super::binner::BinningOptions;
use super::crosstab::{ClassTotals, Crosstab};
use super::queue::WorkItem;
use super::woe::{cut_statistics, CutStatistics};

/// The best valid cut found in a range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCandidate {
    /// Row index after which the cut is placed
    pub index: usize,
    /// WoE and IV of the cut
    pub stats: CutStatistics,
    /// Class totals of the lower side `[start, index]`
    pub asc: ClassTotals,
    /// Class totals of the upper side `[index + 1, stop]`
    pub dsc: ClassTotals,
}

/// Find the cut in `item` with the strictly greatest IV that passes every
/// constraint in `options`.
///
/// # Arguments
/// * `item` - Inclusive row range to scan
/// * `crosstab` - Sorted aggregate counts
/// * `grand` - Grand totals of the run (denominator of every WoE)
/// * `options` - Population, IV and monotonicity constraints
///
/// # Returns
/// The best candidate, or `None` when no cut in the range is valid.
/// Ties keep the lowest index.
///
/// # Panics
/// Panics if `item.stop` is not a row of `crosstab`.
pub fn find_best_split(
    item: WorkItem,
    crosstab: &Crosstab,
    grand: ClassTotals,
    options: &BinningOptions,
) -> Option<SplitCandidate> {
    let range_totals = crosstab.totals(item.start, item.stop);

    let mut asc = ClassTotals::default();
    let mut best: Option<SplitCandidate> = None;

    for i in item.start..=item.stop {
        asc += crosstab.row(i).totals();
        let dsc = range_totals - asc;

        let stats = cut_statistics(asc, dsc, grand);

        if !is_valid_cut(asc, dsc, &stats, options) {
            continue;
        }

        let improves = best.map_or(true, |b| stats.iv > b.stats.iv);
        if improves {
            best = Some(SplitCandidate {
                index: i,
                stats,
                asc,
                dsc,
            });
        }
    }

    best
}

/// A cut is rejected on any failed population floor, an IV below the
/// floor, a non-finite IV (pure or empty side), or a trend that breaks the
/// monotonicity constraint.
fn is_valid_cut(
    asc: ClassTotals,
    dsc: ClassTotals,
    stats: &CutStatistics,
    options: &BinningOptions,
) -> bool {
    if asc.population() < options.min_cnt || dsc.population() < options.min_cnt {
        return false;
    }
    if !stats.iv.is_finite() || stats.iv < options.min_iv {
        return false;
    }
    options.monotonicity.admits(stats.trend())
}

//! Weight of Evidence (WoE) and Information Value (IV) arithmetic
//!
//! WoE uses the ln(%zeros / %ones) convention: each segment's share of the
//! class-0 population over its share of the class-1 population, where the
//! shares are taken against the grand totals of the whole run. No smoothing
//! is applied, so a segment missing one class yields an infinite WoE and
//! an empty segment yields NaN.

use super::crosstab::ClassTotals;

/// WoE of a segment against the grand totals
pub fn segment_woe(segment: ClassTotals, grand: ClassTotals) -> f64 {
    ((segment.zeros / grand.zeros) / (segment.ones / grand.ones)).ln()
}

/// WoE and IV contribution of a segment against the grand totals
pub fn segment_woe_iv(segment: ClassTotals, grand: ClassTotals) -> (f64, f64) {
    let dist_zeros = segment.zeros / grand.zeros;
    let dist_ones = segment.ones / grand.ones;

    let woe = (dist_zeros / dist_ones).ln();
    let iv_contrib = woe * (dist_zeros - dist_ones);

    (woe, iv_contrib)
}

/// Statistics of a two-sided cut
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutStatistics {
    /// WoE of the lower (ascending) side
    pub asc_woe: f64,
    /// WoE of the upper (descending) side
    pub dsc_woe: f64,
    /// Sum of both sides' IV contributions
    pub iv: f64,
}

impl CutStatistics {
    /// `+1` when the lower side has the larger WoE, `-1` otherwise
    pub fn trend(&self) -> i32 {
        if self.asc_woe > self.dsc_woe {
            1
        } else {
            -1
        }
    }
}

/// Compute WoE of both sides and the IV of a cut
pub fn cut_statistics(asc: ClassTotals, dsc: ClassTotals, grand: ClassTotals) -> CutStatistics {
    let (asc_woe, asc_iv) = segment_woe_iv(asc, grand);
    let (dsc_woe, dsc_iv) = segment_woe_iv(dsc, grand);

    CutStatistics {
        asc_woe,
        dsc_woe,
        iv: asc_iv + dsc_iv,
    }
}

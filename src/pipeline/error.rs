//! Error types for the binning core.
//!
//! Every variant is raised before any split search starts, so a failed
//! run never returns partial breakpoints.

/// Errors that can occur when binning a predictor against a binary outcome.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BinningError {
    /// Returned when the predictor and outcome slices are empty.
    #[error("input arrays are empty")]
    EmptyInput,

    /// Returned when the predictor and outcome slices differ in length.
    #[error("predictor has {x_len} values but outcome has {y_len}")]
    LengthMismatch {
        /// Length of the predictor slice.
        x_len: usize,
        /// Length of the outcome slice.
        y_len: usize,
    },

    /// Returned when an outcome value is neither 0 nor 1.
    #[error("outcome value {value} at index {index} is not binary (0/1)")]
    NonBinaryTarget {
        /// Zero-based position of the offending value.
        index: usize,
        /// The value found.
        value: f64,
    },

    /// Returned when every predictor value is NaN or infinite.
    #[error("predictor contains no finite values")]
    NoFiniteValues,

    /// Returned when one outcome class is absent, which leaves WOE undefined.
    #[error("outcome has no variation: {zeros} zeros and {ones} ones among finite predictor values")]
    DegenerateTarget {
        /// Count of class-0 observations.
        zeros: f64,
        /// Count of class-1 observations.
        ones: f64,
    },

    /// Returned when max_bin is zero.
    #[error("max_bin must be at least 1, got {max_bin}")]
    InvalidMaxBin {
        /// The invalid max_bin value provided.
        max_bin: usize,
    },

    /// Returned when min_cnt is negative or not finite.
    #[error("min_cnt must be a finite value >= 0, got {min_cnt}")]
    InvalidMinCount {
        /// The invalid min_cnt value provided.
        min_cnt: f64,
    },

    /// Returned when min_iv is NaN.
    #[error("min_iv must be a number, got {min_iv}")]
    InvalidMinIv {
        /// The invalid min_iv value provided.
        min_iv: f64,
    },

    /// Returned when an integer monotonicity code is outside {-1, 0, 1}.
    #[error("monotonicity must be -1, 0 or 1, got {code}")]
    InvalidMonotonicity {
        /// The invalid code provided.
        code: i32,
    },

    /// Returned when a breakpoint sequence does not start with -inf or is not increasing.
    #[error("invalid breakpoints: {reason}")]
    InvalidBreaks {
        /// Human-readable description of the problem.
        reason: String,
    },
}

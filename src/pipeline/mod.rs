//! Pipeline module - crosstab, split search, binning driver and dataset analysis

pub mod analysis;
pub mod binner;
pub mod crosstab;
pub mod error;
pub mod loader;
pub mod monotonicity;
pub mod queue;
pub mod split;
pub mod target;
pub mod woe;
pub mod woe_table;

pub use analysis::*;
pub use binner::*;
pub use crosstab::{AggregateRow, ClassTotals, Crosstab};
pub use error::BinningError;
pub use loader::*;
pub use monotonicity::Monotonicity;
pub use queue::{WorkItem, WorkQueue};
pub use split::{find_best_split, SplitCandidate};
pub use target::*;
pub use woe::{cut_statistics, segment_woe, segment_woe_iv, CutStatistics};
pub use woe_table::*;

//! ivbin: Information Value binning library
//!
//! Supervised, monotonicity-aware discretization of numeric features
//! against a binary target, plus the dataset loading and reporting used by
//! the `ivbin` command-line tool.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;

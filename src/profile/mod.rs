//! Profiling of numeric columns: summary statistics and histograms.

mod histogram;
mod summary;

pub use histogram::{histogram, Histogram, DEFAULT_BINS};
pub use summary::{describe, quantile_sorted, SummaryStats};

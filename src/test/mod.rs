//! Independence testing for two-way tables.

pub mod expected;

pub use chi_squared::{
    cramers_v, test_chi_squared, test_chi_squared_with_config, ChiSquaredConfig,
    ChiSquaredResult, IndependenceDecision, MIN_EXPECTED_COUNT,
};
pub use expected::expected_counts;

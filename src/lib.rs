//! Crosstab: tabulation and missing-data handling for categorical records
//!
//! This library loads delimited records, handles missing values under
//! explicit policies, and builds frequency and contingency tables with the
//! derived quantities used to study association between two variables.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (Table, Column, CountTable, ExpectedTable)
//! - **missing**: Missing-value policies (drop rows, drop values, interpolate)
//! - **tabulate**: One-way and two-way frequency tables with margins
//! - **test**: Expected counts and the chi-squared test of independence
//! - **normalize**: Row and column proportions
//! - **profile**: Summary statistics and histograms of numeric columns
//! - **pipeline**: Pipeline composition and execution
//!
//! # Example
//!
//! ```no_run
//! use crosstab::prelude::*;
//!
//! let records = Table::from_csv("titanic.csv").unwrap();
//! let complete = drop_rows_missing(&records, "Embarked").unwrap();
//!
//! let counts = crosstab(&complete, "Survived", "Embarked", &TwoWayConfig::default()).unwrap();
//! let expected = expected_counts(&counts).unwrap();
//! let result = test_chi_squared(&counts).unwrap();
//!
//! println!("{}\n{}\n{}", counts, expected, result);
//! println!("{}", row_proportions(&counts));
//! ```

pub mod data;
pub mod error;
pub mod missing;
pub mod normalize;
pub mod pipeline;
pub mod profile;
pub mod tabulate;
pub mod test;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::data::{
        Axis, Column, ColumnType, Contingency, CountTable, ExpectedTable, Margins, OneWayTable,
        ProportionTable, Table, Value, COLUMN_TOTAL_LABEL, ROW_TOTAL_LABEL,
    };
    pub use crate::error::{Result, TabError};
    pub use crate::missing::{
        apply_missing_strategy, drop_missing_values, drop_rows_missing, interpolate_linear,
        MissingStrategy,
    };
    pub use crate::normalize::{column_proportions, row_proportions};
    pub use crate::pipeline::{
        titanic_pipeline, AnalysisReport, Pipeline, PipelineConfig, PipelineStep, ReportSection,
    };
    pub use crate::profile::{describe, histogram, Histogram, SummaryStats};
    pub use crate::tabulate::{
        crosstab, tabulate_one_way, tabulate_one_way_with_order, tabulate_two_way,
        tabulate_two_way_with_config, LevelOrder, TwoWayConfig,
    };
    pub use crate::test::{
        expected_counts, test_chi_squared, test_chi_squared_with_config, ChiSquaredConfig,
        ChiSquaredResult, IndependenceDecision,
    };
}

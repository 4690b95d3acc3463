//! Missing-value handling strategies.
//!
//! Three policies are available, each a pure function returning a new
//! structure:
//!
//! - **Drop rows**: remove records missing a value in a given column
//! - **Drop values**: remove missing values from a single column (not row-aligned)
//! - **Interpolate**: fill interior gaps of a numeric column linearly

mod drop_missing;
mod interpolate;

pub use drop_missing::{drop_missing_values, drop_rows_missing};
pub use interpolate::{interpolate_linear, interpolate_series};

use crate::data::{Column, Table};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// How missing values in a column are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingStrategy {
    /// Drop whole records missing the value (row-aligned).
    DropRows,
    /// Drop the missing values of the column only (not row-aligned).
    DropValues,
    /// Fill interior gaps by linear interpolation.
    InterpolateLinear,
}

impl MissingStrategy {
    /// Get the descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DropRows => "drop_rows",
            Self::DropValues => "drop_values",
            Self::InterpolateLinear => "interpolate_linear",
        }
    }
}

/// Apply a strategy to one column of a table and return the handled column.
///
/// `DropRows` returns the column of the filtered table, which equals the
/// `DropValues` result but was produced by a row-aligned operation.
pub fn apply_missing_strategy(
    table: &Table,
    column: &str,
    strategy: MissingStrategy,
) -> Result<Column> {
    match strategy {
        MissingStrategy::DropRows => {
            let filtered = drop_rows_missing(table, column)?;
            Ok(filtered.column(column)?.clone())
        }
        MissingStrategy::DropValues => Ok(drop_missing_values(table.column(column)?)),
        MissingStrategy::InterpolateLinear => interpolate_linear(table.column(column)?),
    }
}

//! Dropping missing values.

use crate::data::{Column, Table};
use crate::error::Result;

/// Drop records whose value in `column` is missing.
///
/// Returns a new table; the relative order of the kept records is preserved.
///
/// # Arguments
/// * `table` - Source table
/// * `column` - Name of the column that must be present
///
/// # Returns
/// A new Table containing only records where `column` is present.
pub fn drop_rows_missing(table: &Table, column: &str) -> Result<Table> {
    let target = table.column(column)?;
    let keep: Vec<usize> = target
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_present())
        .map(|(i, _)| i)
        .collect();

    tracing::debug!(
        column,
        before = table.n_rows(),
        after = keep.len(),
        "dropped records with missing values"
    );

    table.subset_rows(&keep)
}

/// Drop the missing values of a single column.
///
/// The result is NOT aligned with any other column of the source table:
/// positions shift as values are removed. Use [`drop_rows_missing`] when
/// row alignment matters.
pub fn drop_missing_values(column: &Column) -> Column {
    let present: Vec<usize> = column
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_present())
        .map(|(i, _)| i)
        .collect();
    column.subset(&present)
}

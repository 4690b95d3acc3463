//! Common view over two-way tables (observed or expected counts).

use serde::{Deserialize, Serialize};

/// Direction of a table operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Along rows: each row is normalized by its row total.
    Row,
    /// Along columns: each column is normalized by its column total.
    Column,
}

impl Axis {
    /// Get the descriptive name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Column => "column",
        }
    }
}

/// Read access to the cells and totals of a two-way table.
///
/// Implemented by [`CountTable`](super::CountTable) and
/// [`ExpectedTable`](super::ExpectedTable) so that proportions can be
/// computed from either.
pub trait Contingency {
    /// Variable name on an axis (the row variable for `Axis::Row`).
    fn variable(&self, axis: Axis) -> &str;

    /// Labels along an axis.
    fn labels(&self, axis: Axis) -> &[String];

    /// Non-margin cell value.
    fn value(&self, row: usize, col: usize) -> f64;

    /// Total of row `idx` (for `Axis::Row`) or column `idx` (for `Axis::Column`).
    ///
    /// Uses the table's margin when it carries one, otherwise the cell sum.
    fn total(&self, axis: Axis, idx: usize) -> f64;

    /// Grand total.
    fn overall_total(&self) -> f64;

    /// Whether margins are part of the table.
    fn shows_margins(&self) -> bool;

    /// Number of rows (excluding margins).
    fn n_rows(&self) -> usize {
        self.labels(Axis::Row).len()
    }

    /// Number of columns (excluding margins).
    fn n_cols(&self) -> usize {
        self.labels(Axis::Column).len()
    }
}

//! Expected counts under independence.

use super::contingency::{Axis, Contingency};
use super::count_table::{COLUMN_TOTAL_LABEL, ROW_TOTAL_LABEL};
use super::render::{format_real, write_grid};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Table of expected counts with the shape of its observed table.
///
/// Each cell is `row_total[i] * col_total[j] / grand_total`, so row and
/// column sums reproduce the observed totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedTable {
    pub(crate) row_variable: String,
    pub(crate) col_variable: String,
    pub(crate) row_labels: Vec<String>,
    pub(crate) col_labels: Vec<String>,
    pub(crate) data: DMatrix<f64>,
    pub(crate) row_totals: Vec<f64>,
    pub(crate) col_totals: Vec<f64>,
    pub(crate) grand_total: f64,
    pub(crate) margins: bool,
}

impl ExpectedTable {
    /// Expected count at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[(row, col)]
    }

    /// Expected count for a pair of labels.
    pub fn get_by_label(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.row_labels.iter().position(|l| l == row)?;
        let j = self.col_labels.iter().position(|l| l == col)?;
        Some(self.get(i, j))
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.data.ncols()
    }

    /// Row labels.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Column labels.
    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// Get reference to the underlying matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Observed row totals the table was built from.
    pub fn row_totals(&self) -> &[f64] {
        &self.row_totals
    }

    /// Observed column totals the table was built from.
    pub fn col_totals(&self) -> &[f64] {
        &self.col_totals
    }

    /// Observed grand total.
    pub fn grand_total(&self) -> f64 {
        self.grand_total
    }

    /// Sum of expected counts per row.
    pub fn row_sums(&self) -> Vec<f64> {
        self.data.row_iter().map(|r| r.sum()).collect()
    }

    /// Sum of expected counts per column.
    pub fn col_sums(&self) -> Vec<f64> {
        self.data.column_iter().map(|c| c.sum()).collect()
    }

    /// Smallest expected count.
    pub fn min_expected(&self) -> f64 {
        self.data.iter().cloned().fold(f64::INFINITY, f64::min)
    }

    /// Cells whose expected count is below `threshold`, as (row, col, value).
    ///
    /// The chi-squared approximation is usually considered unreliable when
    /// expected counts fall below 5.
    pub fn cells_below(&self, threshold: f64) -> Vec<(usize, usize, f64)> {
        let mut cells = Vec::new();
        for i in 0..self.n_rows() {
            for j in 0..self.n_cols() {
                let v = self.get(i, j);
                if v < threshold {
                    cells.push((i, j, v));
                }
            }
        }
        cells
    }

    /// Check if margins are shown.
    pub fn has_margins(&self) -> bool {
        self.margins
    }
}

impl Contingency for ExpectedTable {
    fn variable(&self, axis: Axis) -> &str {
        match axis {
            Axis::Row => &self.row_variable,
            Axis::Column => &self.col_variable,
        }
    }

    fn labels(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::Row => &self.row_labels,
            Axis::Column => &self.col_labels,
        }
    }

    fn value(&self, row: usize, col: usize) -> f64 {
        self.get(row, col)
    }

    fn total(&self, axis: Axis, idx: usize) -> f64 {
        match axis {
            Axis::Row => self.row_totals[idx],
            Axis::Column => self.col_totals[idx],
        }
    }

    fn overall_total(&self) -> f64 {
        self.grand_total
    }

    fn shows_margins(&self) -> bool {
        self.margins
    }
}

impl std::fmt::Display for ExpectedTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut header = vec![format!("{} \\ {}", self.row_variable, self.col_variable)];
        header.extend(self.col_labels.iter().cloned());
        if self.margins {
            header.push(ROW_TOTAL_LABEL.to_string());
        }

        let mut rows: Vec<Vec<String>> = self
            .row_labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let mut row = vec![label.clone()];
                row.extend((0..self.n_cols()).map(|j| format_real(self.get(i, j), 2)));
                if self.margins {
                    row.push(format_real(self.row_totals[i], 2));
                }
                row
            })
            .collect();

        if self.margins {
            let mut total_row = vec![COLUMN_TOTAL_LABEL.to_string()];
            total_row.extend(self.col_totals.iter().map(|&t| format_real(t, 2)));
            total_row.push(format_real(self.grand_total, 2));
            rows.push(total_row);
        }

        write_grid(f, &header, &rows)
    }
}

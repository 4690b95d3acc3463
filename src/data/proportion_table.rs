//! Row- or column-normalized proportions of a two-way table.

use super::contingency::Axis;
use super::count_table::{COLUMN_TOTAL_LABEL, ROW_TOTAL_LABEL};
use super::render::{format_real, write_grid};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Proportions of a two-way table along one axis.
///
/// For `Axis::Row` every row sums to 1.0; rows whose total is zero hold
/// `NaN`. `Axis::Column` is the same over columns.
///
/// When the source table had margins, `total_column` holds the "Row Total"
/// margin and `total_row` the "Column Total" margin, both divided like any
/// other cell: the margin along the normalized axis is 1.0 and the other one
/// is each total's share of the grand total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProportionTable {
    /// Axis along which cells were normalized.
    pub axis: Axis,
    pub(crate) row_variable: String,
    pub(crate) col_variable: String,
    pub(crate) row_labels: Vec<String>,
    pub(crate) col_labels: Vec<String>,
    pub(crate) data: DMatrix<f64>,
    /// Normalized "Row Total" margin, one entry per row.
    pub total_column: Option<Vec<f64>>,
    /// Normalized "Column Total" margin, one entry per column.
    pub total_row: Option<Vec<f64>>,
    /// Normalized grand total.
    pub corner: Option<f64>,
}

impl ProportionTable {
    /// Proportion at (row, col).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[(row, col)]
    }

    /// Proportion for a pair of labels.
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

    /// Get a row as a vector.
    pub fn row(&self, row: usize) -> Vec<f64> {
        self.data.row(row).iter().cloned().collect()
    }

    /// Get a column as a vector.
    pub fn col(&self, col: usize) -> Vec<f64> {
        self.data.column(col).iter().cloned().collect()
    }

    /// Check if margins are included.
    pub fn has_margins(&self) -> bool {
        self.total_column.is_some()
    }
}

impl std::fmt::Display for ProportionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut header = vec![format!("{} \\ {}", self.row_variable, self.col_variable)];
        header.extend(self.col_labels.iter().cloned());
        if self.total_column.is_some() {
            header.push(ROW_TOTAL_LABEL.to_string());
        }

        let mut rows: Vec<Vec<String>> = self
            .row_labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let mut row = vec![label.clone()];
                row.extend((0..self.n_cols()).map(|j| format_real(self.get(i, j), 4)));
                if let Some(totals) = &self.total_column {
                    row.push(format_real(totals[i], 4));
                }
                row
            })
            .collect();

        if let Some(totals) = &self.total_row {
            let mut total_row = vec![COLUMN_TOTAL_LABEL.to_string()];
            total_row.extend(totals.iter().map(|&t| format_real(t, 4)));
            if let Some(corner) = self.corner {
                total_row.push(format_real(corner, 4));
            }
            rows.push(total_row);
        }

        write_grid(f, &header, &rows)
    }
}

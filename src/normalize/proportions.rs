//! Row and column proportions of two-way tables.
//!
//! Each cell is divided by the total of its row (or column), turning counts
//! into conditional distributions. A line whose total is zero has no
//! distribution and is filled with `NaN`.

use crate::data::{Axis, Contingency, ProportionTable};
use nalgebra::DMatrix;

/// Divide each cell by its row total.
///
/// The row total is the table's "Row Total" margin when present, otherwise
/// the row sum.
pub fn row_proportions<T: Contingency>(table: &T) -> ProportionTable {
    proportions(table, Axis::Row)
}

/// Divide each cell by its column total.
pub fn column_proportions<T: Contingency>(table: &T) -> ProportionTable {
    proportions(table, Axis::Column)
}

/// Normalize a table along an axis.
pub fn proportions<T: Contingency>(table: &T, axis: Axis) -> ProportionTable {
    let (n_rows, n_cols) = (table.n_rows(), table.n_cols());
    let row_totals: Vec<f64> = (0..n_rows).map(|i| table.total(Axis::Row, i)).collect();
    let col_totals: Vec<f64> = (0..n_cols).map(|j| table.total(Axis::Column, j)).collect();
    let grand_total = table.overall_total();

    let data = DMatrix::from_fn(n_rows, n_cols, |i, j| {
        let total = match axis {
            Axis::Row => row_totals[i],
            Axis::Column => col_totals[j],
        };
        ratio(table.value(i, j), total)
    });

    let (total_column, total_row, corner) = if table.shows_margins() {
        let (total_column, total_row): (Vec<f64>, Vec<f64>) = match axis {
            Axis::Row => (
                row_totals.iter().map(|&t| ratio(t, t)).collect(),
                col_totals.iter().map(|&t| ratio(t, grand_total)).collect(),
            ),
            Axis::Column => (
                row_totals.iter().map(|&t| ratio(t, grand_total)).collect(),
                col_totals.iter().map(|&t| ratio(t, t)).collect(),
            ),
        };
        (
            Some(total_column),
            Some(total_row),
            Some(ratio(grand_total, grand_total)),
        )
    } else {
        (None, None, None)
    };

    let n_empty = match axis {
        Axis::Row => row_totals.iter().filter(|&&t| t == 0.0).count(),
        Axis::Column => col_totals.iter().filter(|&&t| t == 0.0).count(),
    };
    if n_empty > 0 {
        tracing::debug!(axis = axis.name(), n_empty, "zero totals produce NaN proportions");
    }

    ProportionTable {
        axis,
        row_variable: table.variable(Axis::Row).to_string(),
        col_variable: table.variable(Axis::Column).to_string(),
        row_labels: table.labels(Axis::Row).to_vec(),
        col_labels: table.labels(Axis::Column).to_vec(),
        data,
        total_column,
        total_row,
        corner,
    }
}

#[inline]
fn ratio(value: f64, total: f64) -> f64 {
    if total == 0.0 {
        f64::NAN
    } else {
        value / total
    }
}

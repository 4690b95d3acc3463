//! Two-way contingency table of observed counts.

use super::contingency::{Axis, Contingency};
use super::render::write_grid;
use crate::error::{Result, TabError};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Label of the margin column holding each row's total.
pub const ROW_TOTAL_LABEL: &str = "Row Total";
/// Label of the margin row holding each column's total.
pub const COLUMN_TOTAL_LABEL: &str = "Column Total";

/// Row, column and grand totals of a two-way table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    /// Total per row.
    pub row_totals: Vec<u64>,
    /// Total per column.
    pub col_totals: Vec<u64>,
    /// Sum of all cells.
    pub grand_total: u64,
}

impl Margins {
    /// Derive margins from the cells.
    pub fn from_counts(counts: &DMatrix<u64>) -> Self {
        let row_totals: Vec<u64> = counts.row_iter().map(|r| r.iter().sum()).collect();
        let col_totals: Vec<u64> = counts.column_iter().map(|c| c.iter().sum()).collect();
        let grand_total = row_totals.iter().sum();
        Self {
            row_totals,
            col_totals,
            grand_total,
        }
    }
}

/// Cross-tabulated counts of two categorical variables.
///
/// Rows are levels of the row variable, columns are levels of the column
/// variable. Margins are optional; when built by tabulation they are always
/// derived from the cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountTable {
    row_variable: String,
    col_variable: String,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    counts: DMatrix<u64>,
    margins: Option<Margins>,
}

impl CountTable {
    /// Create a table from a matrix of counts (rows × columns).
    pub fn from_matrix(
        row_variable: &str,
        col_variable: &str,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
        counts: DMatrix<u64>,
        include_margins: bool,
    ) -> Result<Self> {
        check_shape(&counts, row_labels.len(), col_labels.len())?;
        let margins = include_margins.then(|| Margins::from_counts(&counts));
        Ok(Self {
            row_variable: row_variable.to_string(),
            col_variable: col_variable.to_string(),
            row_labels,
            col_labels,
            counts,
            margins,
        })
    }

    /// Create a table from row vectors of counts.
    pub fn from_rows(
        row_labels: &[&str],
        col_labels: &[&str],
        rows: &[Vec<u64>],
        include_margins: bool,
    ) -> Result<Self> {
        let n_cols = col_labels.len();
        for row in rows {
            if row.len() != n_cols {
                return Err(TabError::DimensionMismatch {
                    expected: n_cols,
                    actual: row.len(),
                });
            }
        }
        let counts = DMatrix::from_fn(rows.len(), n_cols, |i, j| rows[i][j]);
        Self::from_matrix(
            "rows",
            "columns",
            row_labels.iter().map(|s| s.to_string()).collect(),
            col_labels.iter().map(|s| s.to_string()).collect(),
            counts,
            include_margins,
        )
    }

    /// Create a table from a matrix that already carries a margin row and
    /// column (the last row and last column).
    ///
    /// The supplied margins are kept as given; use
    /// [`verify_margins`](Self::verify_margins) to check them against the
    /// cells.
    pub fn from_matrix_with_margins(
        row_variable: &str,
        col_variable: &str,
        row_labels: Vec<String>,
        col_labels: Vec<String>,
        full: DMatrix<u64>,
    ) -> Result<Self> {
        let (n_rows, n_cols) = (row_labels.len(), col_labels.len());
        check_shape(&full, n_rows + 1, n_cols + 1)?;

        let counts = full.view((0, 0), (n_rows, n_cols)).into_owned();
        let margins = Margins {
            row_totals: (0..n_rows).map(|i| full[(i, n_cols)]).collect(),
            col_totals: (0..n_cols).map(|j| full[(n_rows, j)]).collect(),
            grand_total: full[(n_rows, n_cols)],
        };

        Ok(Self {
            row_variable: row_variable.to_string(),
            col_variable: col_variable.to_string(),
            row_labels,
            col_labels,
            counts,
            margins: Some(margins),
        })
    }

    /// Check that the margins agree with the cells.
    ///
    /// Tables without margins always pass.
    pub fn verify_margins(&self) -> Result<()> {
        let Some(margins) = &self.margins else {
            return Ok(());
        };
        let derived = Margins::from_counts(&self.counts);

        for (i, (&given, &actual)) in margins
            .row_totals
            .iter()
            .zip(derived.row_totals.iter())
            .enumerate()
        {
            if given != actual {
                return Err(TabError::DegenerateTable(format!(
                    "Row total for '{}' is {} but its cells sum to {}",
                    self.row_labels[i], given, actual
                )));
            }
        }
        for (j, (&given, &actual)) in margins
            .col_totals
            .iter()
            .zip(derived.col_totals.iter())
            .enumerate()
        {
            if given != actual {
                return Err(TabError::DegenerateTable(format!(
                    "Column total for '{}' is {} but its cells sum to {}",
                    self.col_labels[j], given, actual
                )));
            }
        }
        if margins.grand_total != derived.grand_total {
            return Err(TabError::DegenerateTable(format!(
                "Grand total is {} but the cells sum to {}",
                margins.grand_total, derived.grand_total
            )));
        }
        Ok(())
    }

    /// Return a copy with derived margins added (or removed).
    pub fn with_margins(&self, include: bool) -> Self {
        Self {
            margins: include.then(|| Margins::from_counts(&self.counts)),
            ..self.clone()
        }
    }

    /// Return a copy with new row labels.
    pub fn with_row_labels(&self, labels: Vec<String>) -> Result<Self> {
        if labels.len() != self.n_rows() {
            return Err(TabError::DimensionMismatch {
                expected: self.n_rows(),
                actual: labels.len(),
            });
        }
        Ok(Self {
            row_labels: labels,
            ..self.clone()
        })
    }

    /// Return a copy with new column labels.
    pub fn with_col_labels(&self, labels: Vec<String>) -> Result<Self> {
        if labels.len() != self.n_cols() {
            return Err(TabError::DimensionMismatch {
                expected: self.n_cols(),
                actual: labels.len(),
            });
        }
        Ok(Self {
            col_labels: labels,
            ..self.clone()
        })
    }

    /// Count at (row, col), excluding margins.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.counts[(row, col)]
    }

    /// Count for a pair of labels.
    pub fn get_by_label(&self, row: &str, col: &str) -> Option<u64> {
        let i = self.row_labels.iter().position(|l| l == row)?;
        let j = self.col_labels.iter().position(|l| l == col)?;
        Some(self.get(i, j))
    }

    /// Number of rows (excluding margins).
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.counts.nrows()
    }

    /// Number of columns (excluding margins).
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.counts.ncols()
    }

    /// Row variable name.
    pub fn row_variable(&self) -> &str {
        &self.row_variable
    }

    /// Column variable name.
    pub fn col_variable(&self) -> &str {
        &self.col_variable
    }

    /// Row labels.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Column labels.
    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// Underlying counts (excluding margins).
    pub fn matrix(&self) -> &DMatrix<u64> {
        &self.counts
    }

    /// Counts as floating point.
    pub fn to_f64(&self) -> DMatrix<f64> {
        self.counts.map(|c| c as f64)
    }

    /// Margins, if the table carries them.
    pub fn margins(&self) -> Option<&Margins> {
        self.margins.as_ref()
    }

    /// Check if margins are included.
    pub fn has_margins(&self) -> bool {
        self.margins.is_some()
    }

    /// Row totals: the margin column when present, else the row sums.
    pub fn row_totals(&self) -> Vec<u64> {
        match &self.margins {
            Some(m) => m.row_totals.clone(),
            None => Margins::from_counts(&self.counts).row_totals,
        }
    }

    /// Column totals: the margin row when present, else the column sums.
    pub fn col_totals(&self) -> Vec<u64> {
        match &self.margins {
            Some(m) => m.col_totals.clone(),
            None => Margins::from_counts(&self.counts).col_totals,
        }
    }

    /// Grand total: the margin corner when present, else the cell sum.
    pub fn grand_total(&self) -> u64 {
        match &self.margins {
            Some(m) => m.grand_total,
            None => self.counts.iter().sum(),
        }
    }

    /// Counts of one row (excluding margins).
    pub fn row(&self, row: usize) -> Vec<u64> {
        self.counts.row(row).iter().copied().collect()
    }

    /// Write the table as TSV, margins included when present.
    pub fn write_tsv<W: Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{}", self.row_variable)?;
        for label in &self.col_labels {
            write!(writer, "\t{}", label)?;
        }
        if self.has_margins() {
            write!(writer, "\t{}", ROW_TOTAL_LABEL)?;
        }
        writeln!(writer)?;

        let row_totals = self.row_totals();
        for (i, label) in self.row_labels.iter().enumerate() {
            write!(writer, "{}", label)?;
            for j in 0..self.n_cols() {
                write!(writer, "\t{}", self.get(i, j))?;
            }
            if self.has_margins() {
                write!(writer, "\t{}", row_totals[i])?;
            }
            writeln!(writer)?;
        }

        if self.has_margins() {
            write!(writer, "{}", COLUMN_TOTAL_LABEL)?;
            for total in self.col_totals() {
                write!(writer, "\t{}", total)?;
            }
            writeln!(writer, "\t{}", self.grand_total())?;
        }
        Ok(())
    }

    /// Write the table to a TSV file.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_tsv(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn check_shape(matrix: &DMatrix<u64>, n_rows: usize, n_cols: usize) -> Result<()> {
    if matrix.nrows() != n_rows {
        return Err(TabError::DimensionMismatch {
            expected: n_rows,
            actual: matrix.nrows(),
        });
    }
    if matrix.ncols() != n_cols {
        return Err(TabError::DimensionMismatch {
            expected: n_cols,
            actual: matrix.ncols(),
        });
    }
    Ok(())
}

impl Contingency for CountTable {
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
        self.get(row, col) as f64
    }

    fn total(&self, axis: Axis, idx: usize) -> f64 {
        match (&self.margins, axis) {
            (Some(m), Axis::Row) => m.row_totals[idx] as f64,
            (Some(m), Axis::Column) => m.col_totals[idx] as f64,
            (None, Axis::Row) => self.counts.row(idx).iter().sum::<u64>() as f64,
            (None, Axis::Column) => self.counts.column(idx).iter().sum::<u64>() as f64,
        }
    }

    fn overall_total(&self) -> f64 {
        self.grand_total() as f64
    }

    fn shows_margins(&self) -> bool {
        self.has_margins()
    }
}

impl std::fmt::Display for CountTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut header = vec![format!("{} \\ {}", self.row_variable, self.col_variable)];
        header.extend(self.col_labels.iter().cloned());
        if self.has_margins() {
            header.push(ROW_TOTAL_LABEL.to_string());
        }

        let row_totals = self.row_totals();
        let mut rows: Vec<Vec<String>> = self
            .row_labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let mut row = vec![label.clone()];
                row.extend((0..self.n_cols()).map(|j| self.get(i, j).to_string()));
                if self.has_margins() {
                    row.push(row_totals[i].to_string());
                }
                row
            })
            .collect();

        if self.has_margins() {
            let mut total_row = vec![COLUMN_TOTAL_LABEL.to_string()];
            total_row.extend(self.col_totals().iter().map(|t| t.to_string()));
            total_row.push(self.grand_total().to_string());
            rows.push(total_row);
        }

        write_grid(f, &header, &rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survival_by_port() -> CountTable {
        CountTable::from_rows(
            &["Died", "Survived"],
            &["Cherbourg", "Queenstown", "Southampton"],
            &[vec![75, 47, 427], vec![93, 30, 217]],
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_margins_are_derived() {
        let table = survival_by_port();

        assert_eq!(table.row_totals(), vec![549, 340]);
        assert_eq!(table.col_totals(), vec![168, 77, 644]);
        assert_eq!(table.grand_total(), 889);
        assert!(table.verify_margins().is_ok());
    }

    #[test]
    fn test_margin_sums_agree() {
        let table = survival_by_port();
        let row_sum: u64 = table.row_totals().iter().sum();
        let col_sum: u64 = table.col_totals().iter().sum();
        assert_eq!(row_sum, table.grand_total());
        assert_eq!(col_sum, table.grand_total());
    }

    #[test]
    fn test_get_by_label() {
        let table = survival_by_port();
        assert_eq!(table.get_by_label("Survived", "Cherbourg"), Some(93));
        assert_eq!(table.get_by_label("Survived", "Belfast"), None);
    }

    #[test]
    fn test_from_matrix_with_corrupt_margins() {
        let full = DMatrix::from_row_slice(3, 3, &[10, 20, 30, 5, 5, 10, 15, 25, 41]);
        let table = CountTable::from_matrix_with_margins(
            "a",
            "b",
            vec!["x".into(), "y".into()],
            vec!["p".into(), "q".into()],
            full,
        )
        .unwrap();

        assert_eq!(table.get(1, 1), 5);
        assert!(matches!(
            table.verify_margins(),
            Err(TabError::DegenerateTable(_))
        ));
    }

    #[test]
    fn test_from_matrix_with_consistent_margins() {
        let full = DMatrix::from_row_slice(3, 3, &[10, 20, 30, 5, 5, 10, 15, 25, 40]);
        let table = CountTable::from_matrix_with_margins(
            "a",
            "b",
            vec!["x".into(), "y".into()],
            vec!["p".into(), "q".into()],
            full,
        )
        .unwrap();
        assert!(table.verify_margins().is_ok());
        assert_eq!(table.grand_total(), 40);
    }

    #[test]
    fn test_shape_mismatch() {
        let result = CountTable::from_rows(&["a"], &["x", "y"], &[vec![1, 2, 3]], false);
        assert!(matches!(result, Err(TabError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_relabel() {
        let table = survival_by_port();
        let relabeled = table
            .with_row_labels(vec!["No".into(), "Yes".into()])
            .unwrap();
        assert_eq!(relabeled.row_labels(), &["No", "Yes"]);
        assert!(table.with_col_labels(vec!["only one".into()]).is_err());
    }

    #[test]
    fn test_with_margins_toggle() {
        let table = survival_by_port().with_margins(false);
        assert!(!table.has_margins());
        assert_eq!(table.grand_total(), 889);
        assert!(table.with_margins(true).has_margins());
    }

    #[test]
    fn test_write_tsv() {
        let table = survival_by_port();
        let mut buf = Vec::new();
        table.write_tsv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "rows\tCherbourg\tQueenstown\tSouthampton\tRow Total");
        assert_eq!(lines[1], "Died\t75\t47\t427\t549");
        assert_eq!(lines[3], "Column Total\t168\t77\t644\t889");
    }

    #[test]
    fn test_display_contains_totals() {
        let rendered = survival_by_port().to_string();
        assert!(rendered.contains("Row Total"));
        assert!(rendered.contains("Column Total"));
        assert!(rendered.contains("889"));
    }
}

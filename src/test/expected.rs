//! Expected counts under the hypothesis of independence.

use crate::data::{CountTable, ExpectedTable};
use crate::error::{Result, TabError};
use nalgebra::DMatrix;

/// Compute expected counts for an observed two-way table.
///
/// Each cell is `row_total[i] * col_total[j] / grand_total`. Supplied
/// margins are checked against the cells first.
///
/// # Errors
/// `DegenerateTable` if the grand total is zero or the margins disagree
/// with the cells.
pub fn expected_counts(observed: &CountTable) -> Result<ExpectedTable> {
    observed.verify_margins()?;

    let grand_total = observed.grand_total() as f64;
    if grand_total == 0.0 {
        return Err(TabError::DegenerateTable(format!(
            "Table of {} by {} has no observations",
            observed.row_variable(),
            observed.col_variable()
        )));
    }

    let row_totals: Vec<f64> = observed.row_totals().iter().map(|&t| t as f64).collect();
    let col_totals: Vec<f64> = observed.col_totals().iter().map(|&t| t as f64).collect();

    let data = DMatrix::from_fn(observed.n_rows(), observed.n_cols(), |i, j| {
        row_totals[i] * col_totals[j] / grand_total
    });

    Ok(ExpectedTable {
        row_variable: observed.row_variable().to_string(),
        col_variable: observed.col_variable().to_string(),
        row_labels: observed.row_labels().to_vec(),
        col_labels: observed.col_labels().to_vec(),
        data,
        row_totals,
        col_totals,
        grand_total,
        margins: observed.has_margins(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

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
    fn test_expected_queenstown() {
        let expected = expected_counts(&survival_by_port()).unwrap();

        let died = expected.get_by_label("Died", "Queenstown").unwrap();
        let survived = expected.get_by_label("Survived", "Queenstown").unwrap();
        assert!((died - 47.55).abs() < 0.1);
        assert!((survived - 29.45).abs() < 0.1);
        assert!(expected.has_margins());
    }

    #[test]
    fn test_expected_preserves_totals() {
        let observed = survival_by_port();
        let expected = expected_counts(&observed).unwrap();

        for (sum, total) in expected.row_sums().iter().zip(observed.row_totals()) {
            assert_relative_eq!(*sum, total as f64, epsilon = 1e-9);
        }
        for (sum, total) in expected.col_sums().iter().zip(observed.col_totals()) {
            assert_relative_eq!(*sum, total as f64, epsilon = 1e-9);
        }
        assert_relative_eq!(expected.matrix().sum(), 889.0, epsilon = 1e-9);
    }

    #[test]
    fn test_expected_without_margins() {
        let observed = survival_by_port().with_margins(false);
        let expected = expected_counts(&observed).unwrap();
        assert!(!expected.has_margins());
        assert_relative_eq!(expected.get(0, 0), 549.0 * 168.0 / 889.0, epsilon = 1e-10);
    }

    #[test]
    fn test_empty_table_is_degenerate() {
        let observed = CountTable::from_rows(&["a"], &["x", "y"], &[vec![0, 0]], false).unwrap();
        assert!(matches!(
            expected_counts(&observed),
            Err(TabError::DegenerateTable(_))
        ));
    }

    #[test]
    fn test_inconsistent_margins_are_degenerate() {
        // last row and column carry the margins; the first row total is off by one
        let full = DMatrix::from_row_slice(3, 3, &[1, 2, 4, 3, 4, 7, 4, 6, 10]);
        let observed = CountTable::from_matrix_with_margins(
            "a",
            "b",
            vec!["r1".into(), "r2".into()],
            vec!["c1".into(), "c2".into()],
            full,
        )
        .unwrap();

        assert!(matches!(
            expected_counts(&observed),
            Err(TabError::DegenerateTable(_))
        ));
    }
}

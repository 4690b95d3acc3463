//! Two-way contingency tables (cross-tabulation).

use super::order::{level_index, LevelOrder};
use crate::data::{Column, CountTable, Table};
use crate::error::{Result, TabError};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Configuration for cross-tabulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoWayConfig {
    /// Attach "Row Total" / "Column Total" margins.
    pub include_margins: bool,
    /// Level ordering of the row variable.
    #[serde(default)]
    pub row_order: LevelOrder,
    /// Level ordering of the column variable.
    #[serde(default)]
    pub col_order: LevelOrder,
}

impl Default for TwoWayConfig {
    fn default() -> Self {
        Self {
            include_margins: true,
            row_order: LevelOrder::FirstAppearance,
            col_order: LevelOrder::FirstAppearance,
        }
    }
}

/// Cross-tabulate two row-aligned columns.
///
/// Records missing either value are excluded. Levels appear in order of
/// first appearance among the complete pairs.
pub fn tabulate_two_way(rows: &Column, cols: &Column, include_margins: bool) -> Result<CountTable> {
    let config = TwoWayConfig {
        include_margins,
        ..Default::default()
    };
    tabulate_two_way_with_config(rows, cols, &config)
}

/// Cross-tabulate two row-aligned columns with custom configuration.
pub fn tabulate_two_way_with_config(
    rows: &Column,
    cols: &Column,
    config: &TwoWayConfig,
) -> Result<CountTable> {
    if rows.len() != cols.len() {
        return Err(TabError::DimensionMismatch {
            expected: rows.len(),
            actual: cols.len(),
        });
    }

    let (row_keys, col_keys): (Vec<Option<String>>, Vec<Option<String>>) = rows
        .categories()
        .into_iter()
        .zip(cols.categories())
        .filter(|(r, c)| r.is_some() && c.is_some())
        .unzip();
    let n_excluded = rows.len() - row_keys.len();

    let row_levels = config.row_order.resolve(&row_keys)?;
    let col_levels = config.col_order.resolve(&col_keys)?;

    let mut counts = DMatrix::<u64>::zeros(row_levels.len(), col_levels.len());
    {
        let row_index = level_index(&row_levels);
        let col_index = level_index(&col_levels);
        for (r, c) in row_keys.iter().flatten().zip(col_keys.iter().flatten()) {
            if let (Some(&i), Some(&j)) = (row_index.get(r.as_str()), col_index.get(c.as_str())) {
                counts[(i, j)] += 1;
            }
        }
    }

    if n_excluded > 0 {
        tracing::debug!(
            rows = rows.name(),
            cols = cols.name(),
            n_excluded,
            "excluded records missing a value"
        );
    }
    tracing::debug!(
        rows = rows.name(),
        cols = cols.name(),
        n_rows = row_levels.len(),
        n_cols = col_levels.len(),
        "built two-way table"
    );

    CountTable::from_matrix(
        rows.name(),
        cols.name(),
        row_levels,
        col_levels,
        counts,
        config.include_margins,
    )
}

/// Cross-tabulate two named columns of a table.
pub fn crosstab(
    table: &Table,
    row_column: &str,
    col_column: &str,
    config: &TwoWayConfig,
) -> Result<CountTable> {
    let rows = table.column(row_column)?;
    let cols = table.column(col_column)?;
    tabulate_two_way_with_config(rows, cols, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_table() -> Table {
        let survived = Column::from_numbers(
            "Survived",
            &[Some(0.0), Some(1.0), Some(1.0), Some(0.0), Some(0.0), Some(1.0)],
        );
        let embarked = Column::from_text(
            "Embarked",
            &[Some("S"), Some("C"), None, Some("S"), Some("Q"), Some("S")],
        );
        Table::new(vec![survived, embarked]).unwrap()
    }

    #[test]
    fn test_crosstab_counts() {
        let table = create_test_table();
        let counts = crosstab(&table, "Survived", "Embarked", &TwoWayConfig::default()).unwrap();

        assert_eq!(counts.row_variable(), "Survived");
        assert_eq!(counts.col_variable(), "Embarked");
        assert_eq!(counts.row_labels(), &["0", "1"]);
        assert_eq!(counts.col_labels(), &["S", "C", "Q"]);
        assert_eq!(counts.get_by_label("0", "S"), Some(2));
        assert_eq!(counts.get_by_label("1", "C"), Some(1));
        assert_eq!(counts.get_by_label("1", "Q"), Some(0));
        // the record with a missing port is excluded
        assert_eq!(counts.grand_total(), 5);
    }

    #[test]
    fn test_margins_match_cells() {
        let table = create_test_table();
        let counts = crosstab(&table, "Survived", "Embarked", &TwoWayConfig::default()).unwrap();

        let margins = counts.margins().unwrap();
        assert_eq!(margins.row_totals, vec![3, 2]);
        assert_eq!(margins.col_totals, vec![3, 1, 1]);
        assert_eq!(margins.grand_total, 5);
        assert!(counts.verify_margins().is_ok());
    }

    #[test]
    fn test_without_margins() {
        let table = create_test_table();
        let counts = tabulate_two_way(
            table.column("Survived").unwrap(),
            table.column("Embarked").unwrap(),
            false,
        )
        .unwrap();
        assert!(!counts.has_margins());
        assert_eq!(counts.row_totals(), vec![3, 2]);
    }

    #[test]
    fn test_sorted_levels() {
        let table = create_test_table();
        let config = TwoWayConfig {
            include_margins: false,
            row_order: LevelOrder::Sorted,
            col_order: LevelOrder::Sorted,
        };
        let counts = crosstab(&table, "Survived", "Embarked", &config).unwrap();
        assert_eq!(counts.col_labels(), &["C", "Q", "S"]);
        assert_eq!(counts.row(0), vec![0, 1, 2]);
    }

    #[test]
    fn test_length_mismatch() {
        let a = Column::from_text("a", &[Some("x"), Some("y")]);
        let b = Column::from_text("b", &[Some("x")]);
        assert!(matches!(
            tabulate_two_way(&a, &b, true),
            Err(TabError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_column() {
        let table = create_test_table();
        assert!(matches!(
            crosstab(&table, "Survived", "Pclass", &TwoWayConfig::default()),
            Err(TabError::ColumnNotFound(_))
        ));
    }
}

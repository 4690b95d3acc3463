//! One-way frequency tables.

use super::order::{first_appearance, level_index, LevelOrder};
use crate::data::{Column, OneWayTable};
use crate::error::Result;

/// Count each distinct present value of a column.
///
/// Levels are listed in order of first appearance. Missing values are not
/// counted and never form a category.
pub fn tabulate_one_way(column: &Column) -> OneWayTable {
    let keys = column.categories();
    let levels = first_appearance(&keys);
    count_levels(column.name(), &keys, levels)
}

/// Count each distinct present value of a column using a level ordering.
pub fn tabulate_one_way_with_order(column: &Column, order: &LevelOrder) -> Result<OneWayTable> {
    let keys = column.categories();
    let levels = order.resolve(&keys)?;
    Ok(count_levels(column.name(), &keys, levels))
}

fn count_levels(variable: &str, keys: &[Option<String>], levels: Vec<String>) -> OneWayTable {
    let mut counts = vec![0u64; levels.len()];
    {
        let index = level_index(&levels);
        for key in keys.iter().flatten() {
            if let Some(&i) = index.get(key.as_str()) {
                counts[i] += 1;
            }
        }
    }

    tracing::debug!(variable, levels = levels.len(), "built one-way table");
    OneWayTable::from_parts(variable, levels, counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_way_counts() {
        let ports = Column::from_text(
            "Embarked",
            &[Some("Q"), Some("Q"), Some("S"), Some("S"), Some("S"), Some("C")],
        );
        let table = tabulate_one_way(&ports);

        assert_eq!(table.get("Q"), Some(2));
        assert_eq!(table.get("S"), Some(3));
        assert_eq!(table.get("C"), Some(1));
        assert_eq!(table.grand_total(), 6);
        assert_eq!(table.labels(), &["Q", "S", "C"]);
    }

    #[test]
    fn test_one_way_excludes_missing() {
        let ports = Column::from_text("Embarked", &[Some("S"), None, Some("C"), None]);
        let table = tabulate_one_way(&ports);

        assert_eq!(table.len(), 2);
        assert_eq!(table.grand_total(), 2);
    }

    #[test]
    fn test_one_way_numeric_labels() {
        let survived = Column::from_numbers("Survived", &[Some(0.0), Some(1.0), Some(0.0)]);
        let table = tabulate_one_way(&survived);
        assert_eq!(table.get("0"), Some(2));
        assert_eq!(table.get("1"), Some(1));
    }

    #[test]
    fn test_one_way_explicit_order() {
        let ports = Column::from_text("Embarked", &[Some("S"), Some("C"), Some("S")]);
        let order = LevelOrder::Explicit(vec!["C".into(), "Q".into(), "S".into()]);
        let table = tabulate_one_way_with_order(&ports, &order).unwrap();

        assert_eq!(table.counts(), &[1, 0, 2]);
    }

    #[test]
    fn test_one_way_explicit_order_unknown_value() {
        let ports = Column::from_text("Embarked", &[Some("S"), Some("X")]);
        let order = LevelOrder::Explicit(vec!["S".into()]);
        assert!(tabulate_one_way_with_order(&ports, &order).is_err());
    }
}

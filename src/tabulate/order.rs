//! Ordering of category levels in frequency tables.

use crate::error::{Result, TabError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How the levels of a variable are ordered in a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelOrder {
    /// Order in which each level first appears in the data.
    #[default]
    FirstAppearance,
    /// Ascending; numerically when every level is a number.
    Sorted,
    /// Caller-supplied order. Listed levels absent from the data get zero
    /// counts; a value not in the list is an error.
    Explicit(Vec<String>),
}

impl LevelOrder {
    /// Resolve the ordered list of levels for a sequence of category keys.
    pub fn resolve(&self, values: &[Option<String>]) -> Result<Vec<String>> {
        match self {
            LevelOrder::FirstAppearance => Ok(first_appearance(values)),
            LevelOrder::Sorted => {
                let mut levels = first_appearance(values);
                sort_levels(&mut levels);
                Ok(levels)
            }
            LevelOrder::Explicit(levels) => {
                let mut seen = HashSet::new();
                for level in levels {
                    if !seen.insert(level.as_str()) {
                        return Err(TabError::InvalidParameter(format!(
                            "Level '{}' listed more than once in explicit ordering",
                            level
                        )));
                    }
                }
                for value in values.iter().flatten() {
                    if !seen.contains(value.as_str()) {
                        return Err(TabError::InvalidParameter(format!(
                            "Value '{}' is not in the explicit level ordering {:?}",
                            value, levels
                        )));
                    }
                }
                Ok(levels.clone())
            }
        }
    }
}

/// Map each level to its position.
pub(crate) fn level_index(levels: &[String]) -> HashMap<&str, usize> {
    levels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), i))
        .collect()
}

pub(crate) fn first_appearance(values: &[Option<String>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut levels = Vec::new();
    for value in values.iter().flatten() {
        if seen.insert(value.as_str()) {
            levels.push(value.clone());
        }
    }
    levels
}

fn sort_levels(levels: &mut [String]) {
    let numeric: Option<Vec<f64>> = levels.iter().map(|l| l.parse::<f64>().ok()).collect();
    match numeric {
        Some(_) => levels.sort_by(|a, b| {
            let x: f64 = a.parse().unwrap_or(f64::NAN);
            let y: f64 = b.parse().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal)
        }),
        None => levels.sort(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
            .collect()
    }

    #[test]
    fn test_first_appearance() {
        let levels = LevelOrder::FirstAppearance
            .resolve(&keys(&["S", "C", "", "S", "Q"]))
            .unwrap();
        assert_eq!(levels, vec!["S", "C", "Q"]);
    }

    #[test]
    fn test_sorted_numeric() {
        let levels = LevelOrder::Sorted
            .resolve(&keys(&["3", "10", "1", "2"]))
            .unwrap();
        assert_eq!(levels, vec!["1", "2", "3", "10"]);
    }

    #[test]
    fn test_sorted_text() {
        let levels = LevelOrder::Sorted.resolve(&keys(&["S", "C", "Q"])).unwrap();
        assert_eq!(levels, vec!["C", "Q", "S"]);
    }

    #[test]
    fn test_explicit_includes_unseen_levels() {
        let order = LevelOrder::Explicit(vec!["C".into(), "Q".into(), "S".into()]);
        let levels = order.resolve(&keys(&["S", "S"])).unwrap();
        assert_eq!(levels, vec!["C", "Q", "S"]);
    }

    #[test]
    fn test_explicit_rejects_unknown_value() {
        let order = LevelOrder::Explicit(vec!["C".into(), "S".into()]);
        assert!(order.resolve(&keys(&["S", "Q"])).is_err());
    }

    #[test]
    fn test_explicit_rejects_duplicates() {
        let order = LevelOrder::Explicit(vec!["C".into(), "C".into()]);
        assert!(order.resolve(&keys(&["C"])).is_err());
    }
}

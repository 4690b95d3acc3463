//! One-way frequency table.

use super::render::{format_real, write_grid};
use crate::error::{Result, TabError};
use serde::{Deserialize, Serialize};

/// Counts of each distinct value of a single variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneWayTable {
    variable: String,
    labels: Vec<String>,
    counts: Vec<u64>,
}

impl OneWayTable {
    /// Create a table from labels and their counts.
    pub fn new(variable: &str, labels: Vec<String>, counts: Vec<u64>) -> Result<Self> {
        if labels.len() != counts.len() {
            return Err(TabError::DimensionMismatch {
                expected: labels.len(),
                actual: counts.len(),
            });
        }
        Ok(Self {
            variable: variable.to_string(),
            labels,
            counts,
        })
    }

    /// Assemble a table whose labels and counts are known to align.
    pub(crate) fn from_parts(variable: &str, labels: Vec<String>, counts: Vec<u64>) -> Self {
        debug_assert_eq!(labels.len(), counts.len());
        Self {
            variable: variable.to_string(),
            labels,
            counts,
        }
    }

    /// Variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Level labels in table order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Counts aligned with [`labels`](Self::labels).
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Count for a label.
    pub fn get(&self, label: &str) -> Option<u64> {
        let idx = self.labels.iter().position(|l| l == label)?;
        self.counts.get(idx).copied()
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sum of all counts.
    pub fn grand_total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of each level in the grand total (`NaN` when the total is zero).
    pub fn proportions(&self) -> Vec<f64> {
        let total = self.grand_total() as f64;
        self.counts
            .iter()
            .map(|&c| if total > 0.0 { c as f64 / total } else { f64::NAN })
            .collect()
    }

    /// Iterate over (label, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.labels
            .iter()
            .map(|l| l.as_str())
            .zip(self.counts.iter().copied())
    }

    /// Return a copy with new labels.
    pub fn with_labels(&self, labels: Vec<String>) -> Result<Self> {
        Self::new(&self.variable, labels, self.counts.clone())
    }
}

impl std::fmt::Display for OneWayTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = vec![
            self.variable.clone(),
            "Count".to_string(),
            "Proportion".to_string(),
        ];
        let proportions = self.proportions();
        let mut rows: Vec<Vec<String>> = self
            .iter()
            .zip(proportions.iter())
            .map(|((label, count), &p)| {
                vec![label.to_string(), count.to_string(), format_real(p, 4)]
            })
            .collect();
        rows.push(vec![
            "Total".to_string(),
            self.grand_total().to_string(),
            format_real(if self.is_empty() { f64::NAN } else { 1.0 }, 4),
        ]);
        write_grid(f, &header, &rows)
    }
}

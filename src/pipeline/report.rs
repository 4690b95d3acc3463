//! Results collected while running a pipeline.

use crate::data::{CountTable, ExpectedTable, OneWayTable, ProportionTable};
use crate::error::{Result, TabError};
use crate::missing::MissingStrategy;
use crate::profile::{Histogram, SummaryStats};
use crate::test::ChiSquaredResult;
use serde::{Deserialize, Serialize};

/// Output of a single pipeline step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportSection {
    /// Records removed for missing a value.
    RowsDropped {
        column: String,
        before: usize,
        after: usize,
    },
    /// One-way frequency table.
    OneWay(OneWayTable),
    /// Two-way contingency table.
    TwoWay(CountTable),
    /// Expected counts under independence.
    Expected(ExpectedTable),
    /// Row or column proportions.
    Proportions(ProportionTable),
    /// Chi-squared test of independence.
    ChiSquared(ChiSquaredResult),
    /// Summary statistics of a numeric column.
    Summary {
        strategy: MissingStrategy,
        stats: SummaryStats,
    },
    /// Histogram of a numeric column.
    Histogram {
        column: String,
        strategy: MissingStrategy,
        histogram: Histogram,
    },
}

impl ReportSection {
    /// Short heading for display.
    pub fn title(&self) -> String {
        match self {
            Self::RowsDropped { column, .. } => format!("Dropped records missing {}", column),
            Self::OneWay(t) => format!("Frequencies of {}", t.variable()),
            Self::TwoWay(t) => format!("{} by {}", t.row_variable(), t.col_variable()),
            Self::Expected(t) => format!(
                "Expected counts under independence ({} by {})",
                t.row_variable, t.col_variable
            ),
            Self::Proportions(t) => format!(
                "{} proportions ({} by {})",
                capitalize(t.axis.name()),
                t.row_variable,
                t.col_variable
            ),
            Self::ChiSquared(_) => "Chi-squared test".to_string(),
            Self::Summary { strategy, stats } => {
                format!("Summary of {} ({})", stats.name, strategy.name())
            }
            Self::Histogram {
                column, strategy, ..
            } => format!("Histogram of {} ({})", column, strategy.name()),
        }
    }
}

impl std::fmt::Display for ReportSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let title = self.title();
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "-".repeat(title.chars().count()))?;
        match self {
            Self::RowsDropped { before, after, .. } => {
                writeln!(f, "{} of {} records kept ({} dropped)", after, before, before - after)
            }
            Self::OneWay(t) => write!(f, "{}", t),
            Self::TwoWay(t) => write!(f, "{}", t),
            Self::Expected(t) => write!(f, "{}", t),
            Self::Proportions(t) => write!(f, "{}", t),
            Self::ChiSquared(r) => writeln!(f, "{}", r),
            Self::Summary { stats, .. } => write!(f, "{}", stats),
            Self::Histogram { histogram, .. } => write!(f, "{}", histogram),
        }
    }
}

/// Everything a pipeline run produced, in step order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Pipeline name.
    pub name: String,
    /// Records in the input table.
    pub n_records: usize,
    /// One section per reporting step.
    pub sections: Vec<ReportSection>,
}

impl AnalysisReport {
    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// All two-way tables in the report.
    pub fn count_tables(&self) -> Vec<&CountTable> {
        self.sections
            .iter()
            .filter_map(|s| match s {
                ReportSection::TwoWay(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// All chi-squared results in the report.
    pub fn chi_squared_results(&self) -> Vec<&ChiSquaredResult> {
        self.sections
            .iter()
            .filter_map(|s| match s {
                ReportSection::ChiSquared(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(TabError::from)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(TabError::from)
    }
}

impl std::fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Analysis: {}", self.name)?;
        writeln!(f, "Records:  {}", self.n_records)?;
        for section in &self.sections {
            writeln!(f)?;
            write!(f, "{}", section)?;
        }
        Ok(())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

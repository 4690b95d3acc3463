//! Pipeline runner for composing and executing tabulation steps.

use super::report::{AnalysisReport, ReportSection};
use crate::data::{Axis, CountTable, ExpectedTable, Table};
use crate::error::{Result, TabError};
use crate::missing::{apply_missing_strategy, drop_rows_missing, MissingStrategy};
use crate::normalize::proportions;
use crate::profile::{describe, histogram, DEFAULT_BINS};
use crate::tabulate::{crosstab, tabulate_one_way_with_order, LevelOrder, TwoWayConfig};
use crate::test::{expected_counts, test_chi_squared_with_config, ChiSquaredConfig};
use serde::{Deserialize, Serialize};

/// Which table a proportions step normalizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProportionSource {
    /// The most recent two-way table.
    #[default]
    Observed,
    /// The most recent expected-count table.
    Expected,
}

/// A step in the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PipelineStep {
    // === Missing Values ===
    /// Drop records missing a value in a column.
    DropRowsMissing { column: String },

    // === Tabulation ===
    /// One-way frequency table.
    OneWay {
        column: String,
        #[serde(default)]
        order: LevelOrder,
        #[serde(default)]
        labels: Option<Vec<String>>,
    },
    /// Two-way contingency table; becomes the current table.
    TwoWay {
        rows: String,
        columns: String,
        margins: bool,
        #[serde(default)]
        row_order: LevelOrder,
        #[serde(default)]
        col_order: LevelOrder,
        #[serde(default)]
        row_labels: Option<Vec<String>>,
        #[serde(default)]
        col_labels: Option<Vec<String>>,
    },

    // === Derived Tables ===
    /// Row or column proportions of the current table.
    Proportions {
        axis: Axis,
        #[serde(default)]
        source: ProportionSource,
    },
    /// Expected counts of the current table.
    Expected,

    // === Testing ===
    /// Chi-squared test of independence on the current table.
    ChiSquared {
        #[serde(default)]
        yates_correction: bool,
    },

    // === Profiling ===
    /// Summary statistics of a numeric column.
    Describe {
        column: String,
        strategy: MissingStrategy,
    },
    /// Histogram of a numeric column.
    Histogram {
        column: String,
        strategy: MissingStrategy,
        #[serde(default)]
        bins: Option<usize>,
    },
}

/// Pipeline configuration for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Name of the pipeline.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Steps to execute.
    pub steps: Vec<PipelineStep>,
}

impl PipelineConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(TabError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(TabError::from)
    }
}

/// Builder for constructing and running tabulation pipelines.
#[derive(Debug, Clone)]
pub struct Pipeline {
    steps: Vec<PipelineStep>,
    name: String,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            name: "unnamed".to_string(),
        }
    }

    /// Create from a config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            steps: config.steps.clone(),
            name: config.name.clone(),
        }
    }

    /// Set the pipeline name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Drop records missing a value in `column`.
    pub fn drop_rows_missing(mut self, column: &str) -> Self {
        self.steps.push(PipelineStep::DropRowsMissing {
            column: column.to_string(),
        });
        self
    }

    /// Add a one-way table in first-appearance order.
    pub fn one_way(self, column: &str) -> Self {
        self.one_way_with(column, LevelOrder::FirstAppearance, None)
    }

    /// Add a one-way table with level ordering and optional display labels.
    pub fn one_way_with(
        mut self,
        column: &str,
        order: LevelOrder,
        labels: Option<Vec<String>>,
    ) -> Self {
        self.steps.push(PipelineStep::OneWay {
            column: column.to_string(),
            order,
            labels,
        });
        self
    }

    /// Add a two-way table in first-appearance order.
    pub fn two_way(self, rows: &str, columns: &str, margins: bool) -> Self {
        let config = TwoWayConfig {
            include_margins: margins,
            ..Default::default()
        };
        self.two_way_with(rows, columns, config, None, None)
    }

    /// Add a two-way table with custom configuration and display labels.
    pub fn two_way_with(
        mut self,
        rows: &str,
        columns: &str,
        config: TwoWayConfig,
        row_labels: Option<Vec<String>>,
        col_labels: Option<Vec<String>>,
    ) -> Self {
        self.steps.push(PipelineStep::TwoWay {
            rows: rows.to_string(),
            columns: columns.to_string(),
            margins: config.include_margins,
            row_order: config.row_order,
            col_order: config.col_order,
            row_labels,
            col_labels,
        });
        self
    }

    /// Add proportions of the current two-way table.
    pub fn proportions(mut self, axis: Axis) -> Self {
        self.steps.push(PipelineStep::Proportions {
            axis,
            source: ProportionSource::Observed,
        });
        self
    }

    /// Add proportions of the current expected-count table.
    pub fn expected_proportions(mut self, axis: Axis) -> Self {
        self.steps.push(PipelineStep::Proportions {
            axis,
            source: ProportionSource::Expected,
        });
        self
    }

    /// Add expected counts.
    pub fn expected(mut self) -> Self {
        self.steps.push(PipelineStep::Expected);
        self
    }

    /// Add a chi-squared test of independence.
    pub fn chi_squared(mut self, yates_correction: bool) -> Self {
        self.steps.push(PipelineStep::ChiSquared { yates_correction });
        self
    }

    /// Add summary statistics of a numeric column.
    pub fn describe(mut self, column: &str, strategy: MissingStrategy) -> Self {
        self.steps.push(PipelineStep::Describe {
            column: column.to_string(),
            strategy,
        });
        self
    }

    /// Add a histogram of a numeric column.
    pub fn histogram(
        mut self,
        column: &str,
        strategy: MissingStrategy,
        bins: Option<usize>,
    ) -> Self {
        self.steps.push(PipelineStep::Histogram {
            column: column.to_string(),
            strategy,
            bins,
        });
        self
    }

    /// Convert to config for serialization.
    pub fn to_config(&self, description: Option<&str>) -> PipelineConfig {
        PipelineConfig {
            name: self.name.clone(),
            description: description.map(String::from),
            steps: self.steps.clone(),
        }
    }

    /// Run the pipeline on a table of records.
    pub fn run(&self, table: &Table) -> Result<AnalysisReport> {
        tracing::info!(
            pipeline = %self.name,
            steps = self.steps.len(),
            records = table.n_rows(),
            "running pipeline"
        );
        let mut state = PipelineState::new(table.clone());

        for (i, step) in self.steps.iter().enumerate() {
            tracing::debug!(step = i + 1, ?step, "applying step");
            state = state.apply(step).map_err(|e| {
                TabError::Pipeline(format!("Step {} ({:?}) failed: {}", i + 1, step, e))
            })?;
        }

        Ok(AnalysisReport {
            name: self.name.clone(),
            n_records: table.n_rows(),
            sections: state.sections,
        })
    }
}

/// Internal state during pipeline execution.
struct PipelineState {
    table: Table,
    counts: Option<CountTable>,
    expected: Option<ExpectedTable>,
    sections: Vec<ReportSection>,
}

impl PipelineState {
    fn new(table: Table) -> Self {
        Self {
            table,
            counts: None,
            expected: None,
            sections: Vec::new(),
        }
    }

    fn apply(mut self, step: &PipelineStep) -> Result<Self> {
        match step {
            // === Missing Values ===
            PipelineStep::DropRowsMissing { column } => {
                let before = self.table.n_rows();
                self.table = drop_rows_missing(&self.table, column)?;
                self.sections.push(ReportSection::RowsDropped {
                    column: column.clone(),
                    before,
                    after: self.table.n_rows(),
                });
            }

            // === Tabulation ===
            PipelineStep::OneWay {
                column,
                order,
                labels,
            } => {
                let mut table = tabulate_one_way_with_order(self.table.column(column)?, order)?;
                if let Some(labels) = labels {
                    table = table.with_labels(labels.clone())?;
                }
                self.sections.push(ReportSection::OneWay(table));
            }
            PipelineStep::TwoWay {
                rows,
                columns,
                margins,
                row_order,
                col_order,
                row_labels,
                col_labels,
            } => {
                let config = TwoWayConfig {
                    include_margins: *margins,
                    row_order: row_order.clone(),
                    col_order: col_order.clone(),
                };
                let mut counts = crosstab(&self.table, rows, columns, &config)?;
                if let Some(labels) = row_labels {
                    counts = counts.with_row_labels(labels.clone())?;
                }
                if let Some(labels) = col_labels {
                    counts = counts.with_col_labels(labels.clone())?;
                }
                self.sections.push(ReportSection::TwoWay(counts.clone()));
                self.counts = Some(counts);
                self.expected = None;
            }

            // === Derived Tables ===
            PipelineStep::Proportions { axis, source } => {
                let table = match source {
                    ProportionSource::Observed => {
                        proportions(self.current_counts("proportions")?, *axis)
                    }
                    ProportionSource::Expected => {
                        let expected = self.expected.as_ref().ok_or_else(|| {
                            TabError::Pipeline(
                                "Must compute expected counts before expected proportions"
                                    .to_string(),
                            )
                        })?;
                        proportions(expected, *axis)
                    }
                };
                self.sections.push(ReportSection::Proportions(table));
            }
            PipelineStep::Expected => {
                let expected = expected_counts(self.current_counts("expected counts")?)?;
                self.sections.push(ReportSection::Expected(expected.clone()));
                self.expected = Some(expected);
            }

            // === Testing ===
            PipelineStep::ChiSquared { yates_correction } => {
                let config = ChiSquaredConfig {
                    yates_correction: *yates_correction,
                };
                let counts = self.current_counts("chi-squared test")?;
                let result = test_chi_squared_with_config(counts, &config)?;
                tracing::info!(
                    statistic = result.statistic,
                    df = result.df,
                    p_value = result.p_value,
                    "chi-squared test of independence"
                );
                self.sections.push(ReportSection::ChiSquared(result));
            }

            // === Profiling ===
            PipelineStep::Describe { column, strategy } => {
                let handled = apply_missing_strategy(&self.table, column, *strategy)?;
                self.sections.push(ReportSection::Summary {
                    strategy: *strategy,
                    stats: describe(&handled)?,
                });
            }
            PipelineStep::Histogram {
                column,
                strategy,
                bins,
            } => {
                let handled = apply_missing_strategy(&self.table, column, *strategy)?;
                let values = handled.present_numbers()?;
                self.sections.push(ReportSection::Histogram {
                    column: column.clone(),
                    strategy: *strategy,
                    histogram: histogram(&values, bins.unwrap_or(DEFAULT_BINS))?,
                });
            }
        }
        Ok(self)
    }

    fn current_counts(&self, what: &str) -> Result<&CountTable> {
        self.counts.as_ref().ok_or_else(|| {
            TabError::Pipeline(format!("Must build a two-way table before {}", what))
        })
    }
}

/// The survival-by-port analysis of the Titanic passenger list.
///
/// Profiles ages with both missing-value policies, drops records without a
/// port of embarkation, then tabulates survival against port and port
/// against passenger class.
pub fn titanic_pipeline() -> Pipeline {
    let survival = Some(vec!["Died".to_string(), "Survived".to_string()]);
    let ports = Some(vec![
        "Cherbourg".to_string(),
        "Queenstown".to_string(),
        "Southampton".to_string(),
    ]);
    let classes = Some(vec![
        "1st Class".to_string(),
        "2nd Class".to_string(),
        "3rd Class".to_string(),
    ]);
    let sorted = TwoWayConfig {
        include_margins: true,
        row_order: LevelOrder::Sorted,
        col_order: LevelOrder::Sorted,
    };

    Pipeline::new()
        .name("titanic")
        .describe("Age", MissingStrategy::DropValues)
        .histogram("Age", MissingStrategy::DropValues, None)
        .describe("Age", MissingStrategy::InterpolateLinear)
        .histogram("Age", MissingStrategy::InterpolateLinear, None)
        .drop_rows_missing("Embarked")
        .one_way_with("Survived", LevelOrder::Sorted, survival.clone())
        .one_way_with("Embarked", LevelOrder::Sorted, ports.clone())
        .two_way_with("Survived", "Embarked", sorted.clone(), survival, ports.clone())
        .expected()
        .proportions(Axis::Row)
        .expected_proportions(Axis::Row)
        .chi_squared(false)
        .two_way_with("Embarked", "Pclass", sorted, ports, classes)
        .proportions(Axis::Row)
}

//! Pipeline composition and execution for tabulation analyses.

mod report;
mod runner;

pub use report::{AnalysisReport, ReportSection};
pub use runner::{titanic_pipeline, Pipeline, PipelineConfig, PipelineStep, ProportionSource};

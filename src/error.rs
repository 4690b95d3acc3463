//! Error types for the crosstab library.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum TabError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed input at record {record}: expected {expected} fields, got {actual}")]
    MalformedInput {
        record: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Column '{0}' is not numeric")]
    NonNumericColumn(String),

    #[error("Degenerate table: {0}")]
    DegenerateTable(String),

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Numerical error: {0}")]
    Numerical(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, TabError>;

//! Cell values for tabular records.

use serde::{Deserialize, Serialize};

/// Tokens (after trimming, compared ignoring ASCII case) that load as a
/// missing value.
pub const MISSING_TOKENS: [&str; 3] = ["", "na", "nan"];

/// A single cell: text, a number, or explicitly missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Categorical/free text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Missing value.
    Missing,
}

impl Value {
    /// Check if this is a missing value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Check if this value is present.
    pub fn is_present(&self) -> bool {
        !self.is_missing()
    }

    /// Try to get as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Category key used for tabulation.
    ///
    /// Integral numbers drop their fractional part (`1.0` becomes `"1"`) so
    /// that codes such as passenger class or a 0/1 survival flag read
    /// naturally. Returns `None` for missing values.
    pub fn category(&self) -> Option<String> {
        match self {
            Value::Text(s) => Some(s.clone()),
            Value::Number(v) => Some(format_number(*v)),
            Value::Missing => None,
        }
    }

    /// Parse a raw field. Missing tokens become [`Value::Missing`]; anything
    /// else is kept as text. Numeric coercion is decided per column.
    pub fn parse_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if MISSING_TOKENS
            .iter()
            .any(|token| token.eq_ignore_ascii_case(trimmed))
        {
            Value::Missing
        } else {
            Value::Text(trimmed.to_string())
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Number(v) => write!(f, "{}", format_number(*v)),
            Value::Missing => Ok(()),
        }
    }
}

/// Format a number the way it is used as a label or written back to text.
pub(crate) fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

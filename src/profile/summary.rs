//! Summary statistics for numeric columns.

use crate::data::Column;
use crate::error::{Result, TabError};
use serde::{Deserialize, Serialize};

/// Descriptive statistics of the present values of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Column name.
    pub name: String,
    /// Number of present values.
    pub count: usize,
    /// Number of missing values skipped.
    pub n_missing: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (ddof = 1); `NaN` for a single value.
    pub std: f64,
    /// Minimum.
    pub min: f64,
    /// 25th percentile.
    pub q25: f64,
    /// Median.
    pub median: f64,
    /// 75th percentile.
    pub q75: f64,
    /// Maximum.
    pub max: f64,
}

impl SummaryStats {
    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q75 - self.q25
    }
}

impl std::fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Summary of {}", self.name)?;
        writeln!(f, "  count   {}", self.count)?;
        writeln!(f, "  missing {}", self.n_missing)?;
        writeln!(f, "  mean    {:.4}", self.mean)?;
        writeln!(f, "  std     {:.4}", self.std)?;
        writeln!(f, "  min     {:.4}", self.min)?;
        writeln!(f, "  25%     {:.4}", self.q25)?;
        writeln!(f, "  50%     {:.4}", self.median)?;
        writeln!(f, "  75%     {:.4}", self.q75)?;
        writeln!(f, "  max     {:.4}", self.max)?;
        Ok(())
    }
}

/// Describe the present values of a numeric column.
///
/// # Errors
/// `NonNumericColumn` for a text column, `EmptyData` when no value is present.
pub fn describe(column: &Column) -> Result<SummaryStats> {
    let mut values = column.present_numbers()?;
    if values.is_empty() {
        return Err(TabError::EmptyData(format!(
            "Column '{}' has no present values",
            column.name()
        )));
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std = if n > 1 {
        let ss: f64 = values.iter().map(|&x| (x - mean) * (x - mean)).sum();
        (ss / (n - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    Ok(SummaryStats {
        name: column.name().to_string(),
        count: n,
        n_missing: column.n_missing(),
        mean,
        std,
        min: values[0],
        q25: quantile_sorted(&values, 0.25),
        median: quantile_sorted(&values, 0.5),
        q75: quantile_sorted(&values, 0.75),
        max: values[n - 1],
    })
}

/// Quantile of sorted data by linear interpolation between closest ranks.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

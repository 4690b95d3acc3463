//! Equal-width histograms of numeric values.

use crate::error::{Result, TabError};
use serde::{Deserialize, Serialize};

/// Default number of bins.
pub const DEFAULT_BINS: usize = 10;

/// Binned counts of numeric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Number of bins.
    pub n_bins: usize,
    /// Bin width.
    pub bin_width: f64,
    /// Bin edges (length = n_bins + 1).
    pub edges: Vec<f64>,
    /// Count of values in each bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Index of the most populated bin.
    pub fn mode_bin(&self) -> Option<usize> {
        self.counts
            .iter()
            .enumerate()
            .max_by_key(|(i, &c)| (c, std::cmp::Reverse(*i)))
            .map(|(i, _)| i)
    }
}

impl std::fmt::Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let max = self.counts.iter().copied().max().unwrap_or(0).max(1);
        for (i, &count) in self.counts.iter().enumerate() {
            let close = if i + 1 == self.n_bins { ']' } else { ')' };
            let bar = "#".repeat((count * 40).div_ceil(max));
            writeln!(
                f,
                "[{:>10.3}, {:>10.3}{} {:>6} {}",
                self.edges[i],
                self.edges[i + 1],
                close,
                count,
                bar
            )?;
        }
        Ok(())
    }
}

/// Bin values into `n_bins` equal-width bins spanning [min, max].
///
/// Bins are half-open except the last, which also includes `max`. A
/// constant series is placed in a single unit-width bin centred on its value.
///
/// # Errors
/// `InvalidParameter` for zero bins or non-finite values, `EmptyData` for no values.
pub fn histogram(values: &[f64], n_bins: usize) -> Result<Histogram> {
    if n_bins == 0 {
        return Err(TabError::InvalidParameter(
            "Histogram needs at least one bin".to_string(),
        ));
    }
    if values.is_empty() {
        return Err(TabError::EmptyData("No values to bin".to_string()));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(TabError::InvalidParameter(
            "Histogram values must be finite".to_string(),
        ));
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return Ok(Histogram {
            n_bins: 1,
            bin_width: 1.0,
            edges: vec![min - 0.5, min + 0.5],
            counts: vec![values.len()],
        });
    }

    let bin_width = (max - min) / n_bins as f64;
    let edges: Vec<f64> = (0..=n_bins)
        .map(|i| if i == n_bins { max } else { min + bin_width * i as f64 })
        .collect();

    let mut counts = vec![0usize; n_bins];
    for &v in values {
        let idx = (((v - min) / bin_width).floor() as usize).min(n_bins - 1);
        counts[idx] += 1;
    }

    Ok(Histogram {
        n_bins,
        bin_width,
        edges,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_histogram_bins() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let hist = histogram(&values, 5).unwrap();

        assert_eq!(hist.n_bins, 5);
        assert_eq!(hist.edges.len(), 6);
        assert_relative_eq!(hist.bin_width, 2.0, epsilon = 1e-12);
        // last bin is closed on the right
        assert_eq!(hist.counts, vec![2, 2, 2, 2, 3]);
        assert_eq!(hist.total(), values.len());
    }

    #[test]
    fn test_constant_series() {
        let hist = histogram(&[4.0, 4.0, 4.0], DEFAULT_BINS).unwrap();
        assert_eq!(hist.n_bins, 1);
        assert_eq!(hist.counts, vec![3]);
        assert_relative_eq!(hist.edges[0], 3.5, epsilon = 1e-12);
        assert_relative_eq!(hist.edges[1], 4.5, epsilon = 1e-12);
    }

    #[test]
    fn test_mode_bin() {
        let hist = histogram(&[1.0, 1.5, 1.7, 9.0, 10.0], 3).unwrap();
        assert_eq!(hist.mode_bin(), Some(0));
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(histogram(&[1.0], 0), Err(TabError::InvalidParameter(_))));
        assert!(matches!(histogram(&[], 10), Err(TabError::EmptyData(_))));
        assert!(histogram(&[1.0, f64::NAN], 10).is_err());
    }
}

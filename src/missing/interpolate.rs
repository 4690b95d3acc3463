//! Linear interpolation of missing numeric values.

use crate::data::Column;
use crate::error::Result;

/// Fill missing values by linear interpolation between present neighbours.
///
/// Values are treated as equally spaced in record order. A missing value at
/// position `i` between present values `y0` at `i0` and `y1` at `i1` becomes
/// `y0 + (y1 - y0) * (i - i0) / (i1 - i0)`.
///
/// Leading and trailing runs of missing values (no present neighbour on one
/// side) are left missing. Present values are never changed.
///
/// # Errors
/// `NonNumericColumn` if the column holds text.
pub fn interpolate_linear(column: &Column) -> Result<Column> {
    let values = column.numbers()?;
    let filled = interpolate_series(&values);

    let n_filled = values
        .iter()
        .zip(filled.iter())
        .filter(|(before, after)| before.is_none() && after.is_some())
        .count();
    tracing::debug!(column = column.name(), n_filled, "interpolated missing values");

    Ok(Column::from_numbers(column.name(), &filled))
}

/// Interpolate a series of optional values.
pub fn interpolate_series(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut result = values.to_vec();
    let mut prev: Option<(usize, f64)> = None;

    for (i, v) in values.iter().enumerate() {
        let Some(y1) = *v else {
            continue;
        };
        if let Some((i0, y0)) = prev {
            let span = (i - i0) as f64;
            for (k, slot) in result.iter_mut().enumerate().take(i).skip(i0 + 1) {
                let t = (k - i0) as f64 / span;
                *slot = Some(y0 + (y1 - y0) * t);
            }
        }
        prev = Some((i, y1));
    }

    result
}

//! Plain-text grid rendering shared by the table `Display` impls.

use std::fmt;

/// Write a header row and body rows as an aligned grid.
///
/// The first column is left-aligned (row labels), the rest right-aligned.
pub(crate) fn write_grid(
    f: &mut fmt::Formatter<'_>,
    header: &[String],
    rows: &[Vec<String>],
) -> fmt::Result {
    let n_cols = header.len();
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (j, cell) in row.iter().enumerate().take(n_cols) {
            widths[j] = widths[j].max(cell.chars().count());
        }
    }

    write_line(f, header, &widths)?;
    for row in rows {
        write_line(f, row, &widths)?;
    }
    Ok(())
}

fn write_line(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    for (j, cell) in cells.iter().enumerate() {
        let width = widths.get(j).copied().unwrap_or(0);
        if j == 0 {
            write!(f, "{:<width$}", cell, width = width)?;
        } else {
            write!(f, "  {:>width$}", cell, width = width)?;
        }
    }
    writeln!(f)
}

/// Format a real-valued cell for display.
pub(crate) fn format_real(v: f64, precision: usize) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.*}", precision, v)
    }
}

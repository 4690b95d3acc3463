//! In-memory table of named columns loaded from delimited text.

use super::column::Column;
use super::value::Value;
use crate::error::{Result, TabError};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// An ordered collection of records sharing one column set.
///
/// Stored column-major. Every operation that changes rows or columns
/// returns a new table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    column_names: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    /// Create a table from columns of equal length with unique names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            for col in &columns {
                if col.len() != expected {
                    return Err(TabError::DimensionMismatch {
                        expected,
                        actual: col.len(),
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.name()) {
                return Err(TabError::InvalidParameter(format!(
                    "Duplicate column name '{}'",
                    col.name()
                )));
            }
        }

        Ok(Self {
            column_names: columns.iter().map(|c| c.name().to_string()).collect(),
            columns,
        })
    }

    /// Load a table from a comma-separated file.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), b',')
    }

    /// Load a table from a tab-separated file.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), b'\t')
    }

    /// Parse a table from comma-separated text held in memory.
    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_reader(text.as_bytes(), b',')
    }

    /// Load a table from any reader.
    ///
    /// Expected format:
    /// - First record: header with column names
    /// - Subsequent records: one field per header column
    ///
    /// A column is numeric when every non-missing field parses as a number,
    /// otherwise it is kept as text. Empty fields, `NA` and `NaN` are missing.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let header: Vec<String> = rdr.headers()?.iter().map(|s| s.trim().to_string()).collect();
        if header.is_empty() {
            return Err(TabError::EmptyData("Missing header row".to_string()));
        }
        let n_fields = header.len();

        let mut raw: Vec<Vec<String>> = vec![Vec::new(); n_fields];
        for (idx, record_result) in rdr.records().enumerate() {
            let record = record_result?;
            if record.len() != n_fields {
                return Err(TabError::MalformedInput {
                    record: idx + 1,
                    expected: n_fields,
                    actual: record.len(),
                });
            }
            for (col_idx, field) in record.iter().enumerate() {
                raw[col_idx].push(field.to_string());
            }
        }

        let columns: Vec<Column> = header
            .iter()
            .zip(raw.iter())
            .map(|(name, values)| Column::from_raw(name, values))
            .collect();

        let table = Self::new(columns)?;
        tracing::debug!(
            rows = table.n_rows(),
            columns = table.n_columns(),
            "loaded table"
        );
        Ok(table)
    }

    /// Write the table as delimited text.
    ///
    /// Missing values become empty fields.
    pub fn write_csv<W: Write>(&self, writer: W, delimiter: u8) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(writer);

        wtr.write_record(&self.column_names)?;
        for row in 0..self.n_rows() {
            let fields: Vec<String> = self
                .columns
                .iter()
                .map(|c| c.get(row).map(|v| v.to_string()).unwrap_or_default())
                .collect();
            wtr.write_record(&fields)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write the table to a comma-separated file.
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file), b',')
    }

    /// Number of records.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in header order.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// All columns in header order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| TabError::ColumnNotFound(name.to_string()))
    }

    /// Check if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// Get a single cell.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.column(column).ok().and_then(|c| c.get(row))
    }

    /// Keep only the given record positions, in the given order.
    pub fn subset_rows(&self, indices: &[usize]) -> Result<Self> {
        let n_rows = self.n_rows();
        if let Some(&bad) = indices.iter().find(|&&i| i >= n_rows) {
            return Err(TabError::InvalidParameter(format!(
                "Row index {} out of range for table with {} rows",
                bad, n_rows
            )));
        }
        Ok(Self {
            column_names: self.column_names.clone(),
            columns: self.columns.iter().map(|c| c.subset(indices)).collect(),
        })
    }

    /// Return a new table with `column` replacing the column of the same
    /// name, or appended if no such column exists.
    pub fn with_column(&self, column: Column) -> Result<Self> {
        if !self.columns.is_empty() && column.len() != self.n_rows() {
            return Err(TabError::DimensionMismatch {
                expected: self.n_rows(),
                actual: column.len(),
            });
        }
        let mut columns = self.columns.clone();
        match columns.iter().position(|c| c.name() == column.name()) {
            Some(idx) => columns[idx] = column,
            None => columns.push(column),
        }
        Self::new(columns)
    }
}

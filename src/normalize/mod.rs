//! Normalization of two-way tables into proportions.
//!
//! - **Row proportions**: each row divided by its total
//! - **Column proportions**: each column divided by its total

pub mod proportions;

pub use proportions::{column_proportions, proportions, row_proportions};

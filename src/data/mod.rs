//! Data structures for tabular records and contingency tables.

mod column;
mod contingency;
mod count_table;
mod expected_table;
mod one_way_table;
mod proportion_table;
mod render;
mod table;
mod value;

pub use column::{Column, ColumnType};
pub use contingency::{Axis, Contingency};
pub use count_table::{CountTable, Margins, COLUMN_TOTAL_LABEL, ROW_TOTAL_LABEL};
pub use expected_table::ExpectedTable;
pub use one_way_table::OneWayTable;
pub use proportion_table::ProportionTable;
pub use table::Table;
pub use value::{Value, MISSING_TOKENS};

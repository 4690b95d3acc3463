//! Frequency tabulation.
//!
//! One-way tables count the levels of a single variable; two-way tables
//! cross-tabulate two row-aligned variables, optionally with margins.
//! Missing values never form a level.

mod one_way;
mod order;
mod two_way;

pub use one_way::{tabulate_one_way, tabulate_one_way_with_order};
pub use order::LevelOrder;
pub use two_way::{crosstab, tabulate_two_way, tabulate_two_way_with_config, TwoWayConfig};

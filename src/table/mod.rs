//! Listing view engine: derives the visible, ordered rows of an admin table from the
//! loaded records and the user's search, filter and sort choices.
//!
//! Everything here is pure and total. Unknown fields, missing values and values of the
//! wrong kind never raise; they simply fail to match or sort last.

pub mod filter;
pub mod search;
pub mod sort;
pub mod state;

#[cfg(test)]
mod view_tests;

pub use filter::{
    distinct_values,
    FilterCriteria,
    FilterSelection,
};
pub use sort::{
    SortDirection,
    SortState,
};
pub use state::TableState;

use crate::core::{
    Record,
    RecordSchema,
};

/// Filtered then sorted copy of `records`. Without a sort key the input order is kept.
pub fn compute_view(
    records: &[Record],
    schema: &RecordSchema,
    search: &str,
    filters: &FilterCriteria,
    sort: &SortState,
) -> Vec<Record> {
    let mut visible: Vec<Record> = records
        .iter()
        .filter(|record| search::matches_search(record, schema, search) && filters.matches(record))
        .cloned()
        .collect();

    sort::sort_records(&mut visible, sort, schema);
    visible
}

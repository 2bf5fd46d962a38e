use serde::{
    Deserialize,
    Serialize,
};
use tracing::trace;

use super::{
    filter::{
        self,
        FilterCriteria,
        FilterSelection,
    },
    search,
    sort::{
        self,
        SortDirection,
        SortState,
    },
};
use crate::core::{
    Record,
    RecordSchema,
};

/// The user's current table choices, kept separately so a screen can persist them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableQuery {
    pub search: String,
    pub filters: FilterCriteria,
    pub sort: SortState,
}

/// Table state for one admin listing screen. Holds the query and a cached list of
/// visible row indices that is rebuilt lazily after any change.
pub struct TableState {
    schema: RecordSchema,
    query: TableQuery,
    visible_indices: Vec<usize>,
    dirty: bool,
}

impl TableState {
    pub fn new(schema: RecordSchema) -> Self {
        Self { schema, query: TableQuery::default(), visible_indices: Vec::new(), dirty: true }
    }

    pub fn with_query(schema: RecordSchema, query: TableQuery) -> Self {
        Self { schema, query, visible_indices: Vec::new(), dirty: true }
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    pub fn query(&self) -> &TableQuery {
        &self.query
    }

    pub fn reset(&mut self) {
        self.query = TableQuery::default();
        self.visible_indices.clear();
        self.dirty = true;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn set_search(&mut self, search: String) {
        if self.query.search != search {
            self.query.search = search;
            self.dirty = true;
        }
    }

    pub fn search(&self) -> &str {
        &self.query.search
    }

    pub fn set_filter(&mut self, dimension: &str, selection: FilterSelection) {
        if self.query.filters.set(dimension, selection) {
            self.dirty = true;
        }
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.query.filters
    }

    pub fn clear_filters(&mut self) {
        if self.query.filters.active().next().is_some() {
            self.query.filters.clear();
            self.dirty = true;
        }
    }

    pub fn sort_state(&self) -> &SortState {
        &self.query.sort
    }

    pub fn toggle_sort(&mut self, field: &str) {
        self.query.sort.toggle_or_set(field);
        self.dirty = true;
    }

    pub fn set_sort(&mut self, field: &str, direction: SortDirection) {
        let next = SortState::by(field, direction);
        if self.query.sort != next {
            self.query.sort = next;
            self.dirty = true;
        }
    }

    pub fn clear_sort(&mut self) {
        if self.query.sort.field.is_some() {
            self.query.sort.clear();
            self.dirty = true;
        }
    }

    /// Options for a filter dropdown, derived from the loaded records.
    pub fn filter_options(&self, records: &[Record], dimension: &str) -> Vec<FilterSelection> {
        filter::distinct_values(records, dimension)
    }

    pub fn ensure_indices(&mut self, records: &[Record]) {
        let needs_rebuild = self.dirty
            || self.visible_indices.len() > records.len()
            || self.visible_indices.iter().any(|&idx| idx >= records.len());

        if needs_rebuild {
            self.recompute_indices(records);
        }
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible_indices
    }

    pub fn visible_records<'a>(&mut self, records: &'a [Record]) -> Vec<&'a Record> {
        self.ensure_indices(records);
        self.visible_indices.iter().filter_map(|&idx| records.get(idx)).collect()
    }

    fn recompute_indices(&mut self, records: &[Record]) {
        self.visible_indices.clear();

        for (idx, record) in records.iter().enumerate() {
            if !search::matches_search(record, &self.schema, &self.query.search) {
                continue;
            }
            if !self.query.filters.matches(record) {
                continue;
            }
            self.visible_indices.push(idx);
        }

        if let Some(field) = self.query.sort.field.as_deref() {
            let direction = self.query.sort.direction;
            let schema = &self.schema;
            self.visible_indices.sort_by(|&lhs, &rhs| {
                sort::compare_records(&records[lhs], &records[rhs], field, direction, schema)
            });
        }

        trace!(total = records.len(), visible = self.visible_indices.len(), "table view rebuilt");
        self.dirty = false;
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(RecordSchema::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldKind;

    fn listing(id: u64, title: &str, region: &str, price: f64) -> Record {
        Record::new(id).with("title", title).with("region", region).with("price", price)
    }

    fn records() -> Vec<Record> {
        vec![
            listing(1, "Villa A", "Girne", 450000.0),
            listing(2, "Flat B", "İskele", 120000.0),
            listing(3, "Villa C", "İskele", 310000.0),
        ]
    }

    #[test]
    fn test_indices_follow_query() {
        let records = records();
        let mut state = TableState::new(RecordSchema::default().field("price", FieldKind::Number));

        state.ensure_indices(&records);
        assert_eq!(state.visible_indices(), &[0, 1, 2]);

        state.set_search("villa".to_string());
        state.ensure_indices(&records);
        assert_eq!(state.visible_indices(), &[0, 2]);

        state.set_filter("region", FilterSelection::only("İskele"));
        state.ensure_indices(&records);
        assert_eq!(state.visible_indices(), &[2]);

        state.clear_filters();
        state.set_search(String::new());
        state.toggle_sort("price");
        state.ensure_indices(&records);
        assert_eq!(state.visible_indices(), &[1, 2, 0]);

        state.toggle_sort("price");
        let titles: Vec<_> =
            state.visible_records(&records).into_iter().filter_map(|r| r.text("title")).collect();
        assert_eq!(titles, vec!["Villa A", "Villa C", "Flat B"]);
    }

    #[test]
    fn test_rebuilds_when_records_shrink() {
        let mut records = records();
        let mut state = TableState::default();
        state.ensure_indices(&records);
        assert_eq!(state.visible_indices().len(), 3);

        records.truncate(1);
        state.ensure_indices(&records);
        assert_eq!(state.visible_indices(), &[0]);
    }

    #[test]
    fn test_unchanged_setters_keep_cache() {
        let records = records();
        let mut state = TableState::default();
        state.ensure_indices(&records);

        state.set_search(String::new());
        state.set_filter("region", FilterSelection::All);
        state.clear_sort();
        assert!(!state.dirty);
    }

    #[test]
    fn test_query_round_trips_through_json() {
        let mut state = TableState::default();
        state.set_search("girne".to_string());
        state.set_filter("status", FilterSelection::only("published"));
        state.set_sort("updatedAt", SortDirection::Descending);

        let json = serde_json::to_string(state.query()).unwrap();
        let query: TableQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(&query, state.query());
    }
}

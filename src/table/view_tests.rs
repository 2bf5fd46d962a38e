use std::cmp::Ordering;

use proptest::prelude::*;

use super::{
    compute_view,
    sort::compare_records,
    FilterCriteria,
    FilterSelection,
    SortDirection,
    SortState,
};
use crate::core::{
    FieldKind,
    Record,
    RecordId,
    RecordSchema,
};

const REGIONS: &[&str] = &["Girne", "İskele", "Gazimağusa", "Lefkoşa"];
const STATUSES: &[&str] = &["published", "draft", "archived"];

fn schema() -> RecordSchema {
    RecordSchema::default().field("price", FieldKind::Number).field("featured", FieldKind::Bool)
}

fn two_listings() -> Vec<Record> {
    vec![
        Record::new(1).with("title", "Villa A").with("region", "Kyrenia").with("code", "V1"),
        Record::new(2).with("title", "Flat B").with("region", "Iskele").with("code", "F1"),
    ]
}

fn listing_strategy() -> impl Strategy<Value = Record> {
    (
        any::<u32>(),
        "[A-Za-z ]{0,12}",
        prop::sample::select(REGIONS),
        prop::sample::select(STATUSES),
        prop::option::of(0u32..2_000_000),
        any::<bool>(),
    )
        .prop_map(|(id, title, region, status, price, featured)| {
            let mut record = Record::new(u64::from(id))
                .with("title", title)
                .with("region", region)
                .with("status", status)
                .with("featured", featured);
            if let Some(price) = price {
                record.set("price", price);
            }
            record
        })
}

fn sort_strategy() -> impl Strategy<Value = SortState> {
    (
        prop::sample::select(vec!["title", "price", "featured", "region", "missing"]),
        prop::bool::ANY,
    )
        .prop_map(|(field, descending)| {
            let direction =
                if descending { SortDirection::Descending } else { SortDirection::Ascending };
            SortState::by(field, direction)
        })
}

#[test]
fn test_search_scenario() {
    let filters = FilterCriteria::new().with("region", FilterSelection::All);
    let view = compute_view(&two_listings(), &schema(), "villa", &filters, &SortState::unsorted());

    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, RecordId::from(1));
}

#[test]
fn test_sort_scenario() {
    let sort = SortState::by("title", SortDirection::Descending);
    let view = compute_view(&two_listings(), &schema(), "", &FilterCriteria::new(), &sort);

    let titles: Vec<_> = view.iter().filter_map(|record| record.text("title")).collect();
    assert_eq!(titles, vec!["Villa A", "Flat B"]);
}

#[test]
fn test_search_term_is_not_trimmed() {
    let records = vec![
        Record::new(1).with("title", "Ab"),
        Record::new(2).with("title", "x b"),
    ];
    let sort = SortState::unsorted();

    let view = compute_view(&records, &schema(), " b", &FilterCriteria::new(), &sort);
    let ids: Vec<RecordId> = view.into_iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![RecordId::from(2)]);

    let view = compute_view(&records, &schema(), "   ", &FilterCriteria::new(), &sort);
    assert!(view.is_empty());
}

#[test]
fn test_empty_records() {
    let sort = SortState::by("price", SortDirection::Ascending);
    let view = compute_view(&[], &schema(), "villa", &FilterCriteria::new(), &sort);
    assert!(view.is_empty());
}

#[test]
fn test_unknown_filter_field_matches_nothing() {
    let filters = FilterCriteria::new().with("nonexistent", FilterSelection::only("x"));
    let view = compute_view(&two_listings(), &schema(), "", &filters, &SortState::unsorted());
    assert!(view.is_empty());
}

#[test]
fn test_featured_only_toggle() {
    let records = vec![
        Record::new(1).with("title", "A").with("featured", true),
        Record::new(2).with("title", "B").with("featured", false),
    ];
    let filters = FilterCriteria::new().with("featured", FilterSelection::only(true));
    let view = compute_view(&records, &schema(), "", &filters, &SortState::unsorted());
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].text("title"), Some("A"));
}

proptest! {
    #[test]
    fn prop_view_is_idempotent(
        records in prop::collection::vec(listing_strategy(), 0..40),
        search in "[a-z]{0,3}",
        sort in sort_strategy(),
    ) {
        let filters = FilterCriteria::new();
        let first = compute_view(&records, &schema(), &search, &filters, &sort);
        let second = compute_view(&records, &schema(), &search, &filters, &sort);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_constraints_never_grow_result(
        records in prop::collection::vec(listing_strategy(), 0..40),
        region in prop::sample::select(REGIONS),
        status in prop::sample::select(STATUSES),
    ) {
        let base = FilterCriteria::new().with("status", FilterSelection::only(status));
        let narrowed = base.clone().with("region", FilterSelection::only(region));

        let wide = compute_view(&records, &schema(), "", &base, &SortState::unsorted());
        let narrow = compute_view(&records, &schema(), "", &narrowed, &SortState::unsorted());
        prop_assert!(narrow.len() <= wide.len());
    }

    #[test]
    fn prop_adjacent_rows_are_ordered(
        records in prop::collection::vec(listing_strategy(), 0..40),
        sort in sort_strategy(),
    ) {
        let schema = schema();
        let view = compute_view(&records, &schema, "", &FilterCriteria::new(), &sort);
        let field = sort.field.as_deref().unwrap_or_default();

        for pair in view.windows(2) {
            let ordering = compare_records(&pair[0], &pair[1], field, sort.direction, &schema);
            prop_assert_ne!(ordering, Ordering::Greater);
        }
    }

    #[test]
    fn prop_unsorted_keeps_input_order(
        records in prop::collection::vec(listing_strategy(), 0..40),
        search in "[a-z]{0,2}",
    ) {
        let filters = FilterCriteria::new();
        let view = compute_view(&records, &schema(), &search, &filters, &SortState::unsorted());
        let mut cursor = records.iter();
        for row in &view {
            prop_assert!(cursor.any(|record| record == row));
        }
    }
}

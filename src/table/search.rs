use crate::core::{
    utils::text_matches_search,
    Record,
    RecordSchema,
};

/// The query is matched as typed: surrounding spaces are part of the term.
pub fn matches_search(record: &Record, schema: &RecordSchema, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    // Only text values take part; numbers and flags never match a search term
    schema
        .searchable_fields()
        .iter()
        .filter_map(|field| record.text(field))
        .any(|text| text_matches_search(text, query))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_any_searchable_field() {
        let schema = RecordSchema::default();
        let record =
            Record::new(1).with("title", "Villa A").with("region", "Kyrenia").with("code", "V1");

        assert!(matches_search(&record, &schema, "villa"));
        assert!(matches_search(&record, &schema, "KYREN"));
        assert!(matches_search(&record, &schema, "v1"));
        assert!(!matches_search(&record, &schema, "iskele"));
        assert!(matches_search(&record, &schema, ""));
    }

    #[test]
    fn test_spaces_in_query_are_significant() {
        let schema = RecordSchema::default();
        let tight = Record::new(1).with("title", "Ab");
        let spaced = Record::new(2).with("title", "x b");

        assert!(!matches_search(&tight, &schema, " b"));
        assert!(matches_search(&spaced, &schema, " b"));
        assert!(!matches_search(&tight, &schema, "   "));
        assert!(!matches_search(&spaced, &schema, "   "));
    }

    #[test]
    fn test_non_text_fields_never_match() {
        let schema = RecordSchema::default().searchable("price");
        let record = Record::new(1).with("title", "Flat B").with("price", 1500.0);

        assert!(!matches_search(&record, &schema, "1500"));
    }

    #[test]
    fn test_unlisted_fields_are_ignored() {
        let schema = RecordSchema::default();
        let record = Record::new(1).with("title", "Flat B").with("agentName", "Ayşe");

        assert!(!matches_search(&record, &schema, "ayşe"));
    }
}

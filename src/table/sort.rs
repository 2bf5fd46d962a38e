use std::cmp::Ordering;

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    models::ID_FIELD,
    FieldKind,
    FieldValue,
    Record,
    RecordId,
    RecordSchema,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Ascending
    }
}

/// At most one active sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: Option<&str>, direction: SortDirection) -> Self {
        Self { field: field.map(str::to_string), direction }
    }

    pub fn by(field: &str, direction: SortDirection) -> Self {
        Self::new(Some(field), direction)
    }

    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Same field flips the direction, a new field starts ascending.
    pub fn toggle_or_set(&mut self, field: &str) {
        match self.field.as_deref() {
            Some(current) if current == field => {
                self.direction = self.direction.reversed();
            }
            _ => {
                self.field = Some(field.to_string());
                self.direction = SortDirection::Ascending;
            }
        }
    }

    pub fn clear(&mut self) {
        self.field = None;
        self.direction = SortDirection::Ascending;
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
    Bool(bool),
    /// Undeclared `id`: numeric ids by value, text ids lexicographically, numbers first.
    Id(RecordId),
}

impl SortKey {
    fn extract(value: &FieldValue, kind: FieldKind) -> Option<SortKey> {
        match kind {
            FieldKind::Number => match value {
                FieldValue::Number(number) => Some(SortKey::Number(*number)),
                FieldValue::Text(text) => text.trim().parse::<f64>().ok().map(SortKey::Number),
                FieldValue::Bool(_) => None,
            },
            FieldKind::Text => Some(SortKey::Text(value.to_string())),
            FieldKind::Bool => match value {
                FieldValue::Bool(flag) => Some(SortKey::Bool(*flag)),
                FieldValue::Text(text) => text.trim().parse::<bool>().ok().map(SortKey::Bool),
                FieldValue::Number(_) => None,
            },
        }
    }

    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(left), SortKey::Number(right)) => left.total_cmp(right),
            (SortKey::Text(left), SortKey::Text(right)) => left.cmp(right),
            (SortKey::Bool(left), SortKey::Bool(right)) => left.cmp(right),
            (SortKey::Id(left), SortKey::Id(right)) => left.cmp(right),
            // sort_key() yields one variant per field
            _ => Ordering::Equal,
        }
    }
}

fn sort_key(record: &Record, field: &str, schema: &RecordSchema) -> Option<SortKey> {
    match schema.declared_kind(field) {
        None if field == ID_FIELD => Some(SortKey::Id(record.id.clone())),
        kind => {
            let kind = kind.unwrap_or(FieldKind::Text);
            record.get(field).and_then(|value| SortKey::extract(&value, kind))
        }
    }
}

fn compare_keys(
    left: &Option<SortKey>,
    right: &Option<SortKey>,
    direction: SortDirection,
) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => direction.apply(left.compare(right)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Three-way comparison of two records on `field`. Values missing or not readable as the
/// declared kind go after every present value, whichever the direction.
pub fn compare_records(
    left: &Record,
    right: &Record,
    field: &str,
    direction: SortDirection,
    schema: &RecordSchema,
) -> Ordering {
    compare_keys(&sort_key(left, field, schema), &sort_key(right, field, schema), direction)
}

/// Stable: ties keep their input order.
pub fn sort_records(records: &mut Vec<Record>, sort: &SortState, schema: &RecordSchema) {
    let Some(field) = sort.field.as_deref() else {
        return;
    };
    let mut keyed: Vec<(Option<SortKey>, Record)> =
        records.drain(..).map(|record| (sort_key(&record, field, schema), record)).collect();
    keyed.sort_by(|(left, _), (right, _)| compare_keys(left, right, sort.direction));

    records.extend(keyed.into_iter().map(|(_, record)| record));
}

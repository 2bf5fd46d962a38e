use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

use crate::core::{
    FieldValue,
    Record,
};

pub const ALL: &str = "All";

/// One dimension's selection: the `All` sentinel or an exact value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSelection {
    All,
    Only(FieldValue),
}

impl FilterSelection {
    pub fn only(value: impl Into<FieldValue>) -> Self {
        FilterSelection::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FilterSelection::All)
    }

    pub fn label(&self) -> String {
        match self {
            FilterSelection::All => ALL.to_string(),
            FilterSelection::Only(value) => value.to_string(),
        }
    }

    pub fn matches(&self, value: Option<&FieldValue>) -> bool {
        match self {
            FilterSelection::All => true,
            FilterSelection::Only(selected) => value == Some(selected),
        }
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        FilterSelection::All
    }
}

impl Serialize for FilterSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterSelection::All => serializer.serialize_str(ALL),
            FilterSelection::Only(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FilterSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = FieldValue::deserialize(deserializer)?;
        match value {
            FieldValue::Text(text) if text == ALL => Ok(FilterSelection::All),
            other => Ok(FilterSelection::Only(other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterCriteria {
    selections: BTreeMap<String, FilterSelection>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dimension: &str, selection: FilterSelection) -> Self {
        self.set(dimension, selection);
        self
    }

    /// Returns true when the stored selection changed.
    pub fn set(&mut self, dimension: &str, selection: FilterSelection) -> bool {
        if self.get(dimension) == &selection {
            return false;
        }
        if selection.is_all() {
            self.selections.remove(dimension);
        } else {
            self.selections.insert(dimension.to_string(), selection);
        }
        true
    }

    pub fn get(&self, dimension: &str) -> &FilterSelection {
        static ALL_SELECTION: FilterSelection = FilterSelection::All;
        self.selections.get(dimension).unwrap_or(&ALL_SELECTION)
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    pub fn active(&self) -> impl Iterator<Item = (&str, &FilterSelection)> {
        self.selections
            .iter()
            .filter(|(_, selection)| !selection.is_all())
            .map(|(dimension, selection)| (dimension.as_str(), selection))
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.active().all(|(dimension, selection)| {
            let value = record.get(dimension);
            selection.matches(value.as_ref())
        })
    }
}

/// `All` followed by each observed value of `dimension`, in first-seen order.
pub fn distinct_values(records: &[Record], dimension: &str) -> Vec<FilterSelection> {
    let mut options = vec![FilterSelection::All];
    for record in records {
        let Some(value) = record.get(dimension) else {
            continue;
        };
        let candidate = FilterSelection::Only(value);
        if !options.contains(&candidate) {
            options.push(candidate);
        }
    }
    options
}

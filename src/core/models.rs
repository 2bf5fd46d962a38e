use std::{
    collections::{
        BTreeMap,
        HashMap,
    },
    fmt,
};

use serde::{
    Deserialize,
    Serialize,
};

/// A single scalar stored on a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::Number(number) => write!(f, "{}", number),
            FieldValue::Bool(flag) => write!(f, "{}", flag),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(id) => write!(f, "{}", id),
            RecordId::Text(id) => write!(f, "{}", id),
        }
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId::Number(id)
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        u64::try_from(id).map(RecordId::Number).unwrap_or_else(|_| RecordId::Text(id.to_string()))
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

pub const ID_FIELD: &str = "id";

/// A listed entity (property, advisor, ...) as plain field-value data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self { id: id.into(), fields: BTreeMap::new() }
    }

    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.fields.insert(field.to_string(), value.into());
    }

    /// Looks up a field; `"id"` resolves to the record identifier.
    pub fn get(&self, field: &str) -> Option<FieldValue> {
        if field == ID_FIELD {
            return Some(match &self.id {
                RecordId::Number(id) => FieldValue::Number(*id as f64),
                RecordId::Text(id) => FieldValue::Text(id.clone()),
            });
        }
        self.fields.get(field).cloned()
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(FieldValue::as_text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Bool,
}

/// Declared field kinds plus the fields free-text search looks at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSchema {
    kinds: HashMap<String, FieldKind>,
    searchable: Vec<String>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self { kinds: HashMap::new(), searchable: Vec::new() }
    }

    pub fn field(mut self, name: &str, kind: FieldKind) -> Self {
        self.kinds.insert(name.to_string(), kind);
        self
    }

    pub fn searchable(mut self, name: &str) -> Self {
        if !self.searchable.iter().any(|existing| existing == name) {
            self.searchable.push(name.to_string());
        }
        self.kinds.entry(name.to_string()).or_insert(FieldKind::Text);
        self
    }

    pub fn declared_kind(&self, field: &str) -> Option<FieldKind> {
        self.kinds.get(field).copied()
    }

    /// Undeclared fields sort as text.
    pub fn kind_of(&self, field: &str) -> FieldKind {
        self.declared_kind(field).unwrap_or(FieldKind::Text)
    }

    pub fn searchable_fields(&self) -> &[String] {
        &self.searchable
    }
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::new().searchable("title").searchable("region").searchable("code")
    }
}

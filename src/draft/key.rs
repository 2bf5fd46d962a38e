use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::RecordId;

pub const DEFAULT_NAMESPACE: &str = "caria_draft_property";
const NEW_SENTINEL: &str = "new";
const NUMBER_ID_PREFIX: &str = "id-";
const TEXT_ID_PREFIX: &str = "key-";

/// Which record a form is editing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityIdentity {
    Existing(RecordId),
    New,
}

impl From<Option<RecordId>> for EntityIdentity {
    fn from(id: Option<RecordId>) -> Self {
        match id {
            Some(id) => EntityIdentity::Existing(id),
            None => EntityIdentity::New,
        }
    }
}

/// Store key of a form draft: `"<namespace>:new"`, `"<namespace>:id-<n>"` for numeric ids
/// and `"<namespace>:key-<text>"` for text ids. The prefixes keep a record whose id is
/// literally "new" apart from the create form, and `1` apart from `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftKey(String);

impl DraftKey {
    pub fn for_entity(namespace: &str, entity: &EntityIdentity) -> Self {
        match entity {
            EntityIdentity::New => DraftKey(format!("{}:{}", namespace, NEW_SENTINEL)),
            EntityIdentity::Existing(RecordId::Number(id)) => {
                DraftKey(format!("{}:{}{}", namespace, NUMBER_ID_PREFIX, id))
            }
            EntityIdentity::Existing(RecordId::Text(id)) => {
                DraftKey(format!("{}:{}{}", namespace, TEXT_ID_PREFIX, id))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_stable_and_distinct() {
        let first = DraftKey::for_entity(DEFAULT_NAMESPACE, &EntityIdentity::Existing(7.into()));
        let again = DraftKey::for_entity(DEFAULT_NAMESPACE, &EntityIdentity::Existing(7.into()));
        let other = DraftKey::for_entity(DEFAULT_NAMESPACE, &EntityIdentity::Existing(8.into()));
        let new = DraftKey::for_entity(DEFAULT_NAMESPACE, &EntityIdentity::New);

        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_ne!(first, new);
        assert_eq!(new.as_str(), "caria_draft_property:new");
        assert_eq!(first.to_string(), "caria_draft_property:id-7");
    }

    #[test]
    fn test_record_named_new_does_not_collide() {
        let named_new = EntityIdentity::Existing(RecordId::from("new"));
        let named_new = DraftKey::for_entity(DEFAULT_NAMESPACE, &named_new);
        assert_ne!(named_new, DraftKey::for_entity(DEFAULT_NAMESPACE, &EntityIdentity::New));
        assert_eq!(named_new.as_str(), "caria_draft_property:key-new");
    }

    #[test]
    fn test_numeric_and_text_ids_do_not_collide() {
        let number = EntityIdentity::Existing(RecordId::Number(1));
        let text = EntityIdentity::Existing(RecordId::Text("1".to_string()));
        assert_ne!(
            DraftKey::for_entity(DEFAULT_NAMESPACE, &number),
            DraftKey::for_entity(DEFAULT_NAMESPACE, &text)
        );
    }

    #[test]
    fn test_namespaces_separate_forms() {
        let property = DraftKey::for_entity("caria_draft_property", &EntityIdentity::New);
        let advisor = DraftKey::for_entity("caria_draft_advisor", &EntityIdentity::New);
        assert_ne!(property, advisor);
    }
}

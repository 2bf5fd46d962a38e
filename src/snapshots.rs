//! Manual backups of a content page, kept newest first in the local store.

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    de::DeserializeOwned,
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    warn,
};
use uuid::Uuid;

use crate::{
    config::SnapshotSettings,
    core::CariaError,
    persistence::KeyValueStore,
};

pub const DEFAULT_NOTE: &str = "Manual backup";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub note: String,
    pub version: u32,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotHistory<T> {
    entries: Vec<Snapshot<T>>,
    max_entries: usize,
}

impl<T> SnapshotHistory<T> {
    pub fn new(settings: &SnapshotSettings) -> Self {
        Self { entries: Vec::new(), max_entries: settings.max_entries.max(1) }
    }

    /// Pushes a copy of `data` to the front, dropping the oldest entries past the cap.
    pub fn create(&mut self, note: &str, data: T) -> &Snapshot<T> {
        let note = note.trim();
        let version = self.entries.first().map(|latest| latest.version + 1).unwrap_or(1);
        let snapshot = Snapshot {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            note: if note.is_empty() { DEFAULT_NOTE.to_string() } else { note.to_string() },
            version,
            data,
        };

        self.entries.insert(0, snapshot);
        self.entries.truncate(self.max_entries);
        &self.entries[0]
    }

    pub fn get(&self, id: Uuid) -> Option<&Snapshot<T>> {
        self.entries.iter().find(|snapshot| snapshot.id == id)
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|snapshot| snapshot.id != id);
        self.entries.len() != before
    }

    pub fn latest(&self) -> Option<&Snapshot<T>> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Clone> SnapshotHistory<T> {
    /// The data to put back into the editor.
    pub fn restore(&self, id: Uuid) -> Option<T> {
        self.get(id).map(|snapshot| snapshot.data.clone())
    }
}

impl<T: Serialize + DeserializeOwned> SnapshotHistory<T> {
    /// Missing or malformed history reads as empty. Store failures are logged and
    /// treated the same way.
    pub fn load(store: &dyn KeyValueStore, key: &str, settings: &SnapshotSettings) -> Self {
        let mut history = Self::new(settings);

        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return history,
            Err(e) => {
                warn!(key, error = %e, "snapshot history unavailable");
                return history;
            }
        };

        match serde_json::from_str::<Vec<Snapshot<T>>>(&raw) {
            Ok(mut entries) => {
                entries.truncate(history.max_entries);
                debug!(key, count = entries.len(), "loaded snapshot history");
                history.entries = entries;
            }
            Err(e) => warn!(key, error = %e, "discarding malformed snapshot history"),
        }
        history
    }

    pub fn save(&self, store: &dyn KeyValueStore, key: &str) -> Result<(), CariaError> {
        let raw = serde_json::to_string(&self.entries)?;
        store.set(key, &raw)?;
        Ok(())
    }
}

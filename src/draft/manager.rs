use std::{
    sync::{
        Arc,
        Mutex,
        MutexGuard,
    },
    time::Duration,
};

use chrono::Local;
use serde::{
    de::DeserializeOwned,
    Serialize,
};
use tracing::{
    debug,
    info,
    warn,
};

use super::{
    debounce::Debouncer,
    key::{
        DraftKey,
        EntityIdentity,
    },
    status::{
        DraftPhase,
        DraftStatus,
        MountOutcome,
        SaveStatus,
    },
};
use crate::{
    config::DraftSettings,
    persistence::KeyValueStore,
};

/// Keyed draft reads and deletes over a shared store. Every failure is absorbed here:
/// a broken store or a malformed value reads as "no draft".
pub struct DraftStore<S: KeyValueStore> {
    store: Arc<S>,
}

impl<S: KeyValueStore> Clone for DraftStore<S> {
    fn clone(&self) -> Self {
        Self { store: self.store.clone() }
    }
}

impl<S: KeyValueStore> DraftStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn check_for_draft(&self, key: &DraftKey) -> bool {
        match self.store.get(key.as_str()) {
            Ok(value) => value.is_some(),
            Err(e) => {
                warn!(key = %key, error = %e, "draft lookup failed");
                false
            }
        }
    }

    pub fn restore_draft<T: DeserializeOwned>(&self, key: &DraftKey) -> Option<T> {
        let raw = match self.store.get(key.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %key, error = %e, "draft read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(key = %key, error = %e, "ignoring malformed draft");
                None
            }
        }
    }

    pub fn discard_draft(&self, key: &DraftKey) {
        match self.store.remove(key.as_str()) {
            Ok(()) => debug!(key = %key, "draft discarded"),
            Err(e) => warn!(key = %key, error = %e, "draft discard failed"),
        }
    }

    fn write(&self, key: &DraftKey, json: &str) -> bool {
        match self.store.set(key.as_str(), json) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, error = %e, "snapshot skipped");
                false
            }
        }
    }
}

#[derive(Default)]
struct Progress {
    status: DraftStatus,
    pending: Option<String>,
}

fn lock(progress: &Mutex<Progress>) -> MutexGuard<'_, Progress> {
    // A panicked writer leaves nothing half-updated worth refusing
    progress.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// Writes under the progress lock so a concurrent discard always lands after the write.
fn write_pending<S: KeyValueStore>(
    drafts: &DraftStore<S>,
    key: &DraftKey,
    progress: &Mutex<Progress>,
) {
    let mut state = lock(progress);
    let Some(json) = state.pending.take() else {
        return;
    };

    if drafts.write(key, &json) {
        state.status.save = SaveStatus::Saved;
        state.status.phase = DraftPhase::Snapshotted;
        state.status.last_saved = Some(Local::now());
        debug!(key = %key, bytes = json.len(), "snapshot written");
    } else {
        state.status.save = SaveStatus::Error;
    }
}

/// Draft lifecycle of one mounted form: debounced snapshots, the restore decision on
/// mount, and cleanup after a successful submit.
pub struct DraftManager<S: KeyValueStore + 'static> {
    key: DraftKey,
    drafts: DraftStore<S>,
    debouncer: Debouncer,
    progress: Arc<Mutex<Progress>>,
}

impl<S: KeyValueStore + 'static> DraftManager<S> {
    pub fn new(store: Arc<S>, entity: &EntityIdentity, settings: &DraftSettings) -> Self {
        Self {
            key: DraftKey::for_entity(&settings.namespace, entity),
            drafts: DraftStore::new(store),
            debouncer: Debouncer::new(Duration::from_millis(settings.quiet_window_ms)),
            progress: Arc::new(Mutex::new(Progress::default())),
        }
    }

    pub fn key(&self) -> &DraftKey {
        &self.key
    }

    pub fn drafts(&self) -> &DraftStore<S> {
        &self.drafts
    }

    pub fn status(&self) -> DraftStatus {
        lock(&self.progress).status.clone()
    }

    pub fn phase(&self) -> DraftPhase {
        lock(&self.progress).status.phase
    }

    /// Called once when the form opens. A found draft leaves the manager waiting on
    /// `accept_draft` or `reject_draft`.
    pub fn mount(&self) -> MountOutcome {
        if self.drafts.check_for_draft(&self.key) {
            info!(key = %self.key, "pending draft found");
            MountOutcome::DraftAvailable
        } else {
            lock(&self.progress).status.phase = DraftPhase::Clean;
            MountOutcome::NoDraft
        }
    }

    /// Restored state replaces the form; the stored draft stays until discarded or submitted.
    pub fn accept_draft<T: DeserializeOwned>(&self) -> Option<T> {
        let restored = self.drafts.restore_draft(&self.key);
        lock(&self.progress).status.phase = DraftPhase::Clean;
        restored
    }

    pub fn reject_draft(&mut self) {
        self.discard_draft();
    }

    pub fn check_for_draft(&self) -> bool {
        self.drafts.check_for_draft(&self.key)
    }

    pub fn restore_draft<T: DeserializeOwned>(&self) -> Option<T> {
        self.drafts.restore_draft(&self.key)
    }

    /// Call on every form change. Only the last call inside one quiet window is written.
    pub fn schedule_snapshot<T: Serialize>(&mut self, form_state: &T) {
        let json = match serde_json::to_string(form_state) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %self.key, error = %e, "form state not serializable, snapshot skipped");
                lock(&self.progress).status.save = SaveStatus::Error;
                return;
            }
        };

        {
            let mut state = lock(&self.progress);
            state.pending = Some(json);
            state.status.phase = DraftPhase::Dirty;
            state.status.save = SaveStatus::Dirty;
        }

        let drafts = self.drafts.clone();
        let key = self.key.clone();
        let progress = self.progress.clone();
        self.debouncer.schedule(move || write_pending(&drafts, &key, &progress));
    }

    pub fn has_pending_snapshot(&self) -> bool {
        lock(&self.progress).pending.is_some()
    }

    /// Writes a waiting snapshot right away, e.g. when the form closes.
    pub fn flush(&mut self) {
        self.debouncer.cancel();
        write_pending(&self.drafts, &self.key, &self.progress);
    }

    /// Idempotent. Also drops a snapshot that has not been written yet, including one
    /// whose timer already fired and is mid-write.
    pub fn discard_draft(&mut self) {
        self.debouncer.cancel();
        let mut state = lock(&self.progress);
        state.pending = None;
        state.status.phase = DraftPhase::Clean;
        state.status.save = SaveStatus::Saved;
        self.drafts.discard_draft(&self.key);
    }

    pub fn submit_succeeded(&mut self) {
        self.discard_draft();
    }
}

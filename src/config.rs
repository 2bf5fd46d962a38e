use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::CariaError,
    draft::key::DEFAULT_NAMESPACE,
    persistence::{
        get_data_file_path,
        load_json_or_default,
        save_json,
        FileStore,
    },
};

pub const CONFIG_FILE: &str = "caria_config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftSettings {
    pub quiet_window_ms: u64,
    pub namespace: String,
    /// Defaults to the app data directory.
    pub store_dir: Option<PathBuf>,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self { quiet_window_ms: 1000, namespace: DEFAULT_NAMESPACE.to_string(), store_dir: None }
    }
}

impl DraftSettings {
    pub fn file_store(&self) -> FileStore {
        match &self.store_dir {
            Some(dir) => FileStore::new(dir),
            None => FileStore::in_app_data(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSettings {
    pub max_entries: usize,
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self { max_entries: 20 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencySettings {
    pub gbp_to_try_rate: f64,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self { gbp_to_try_rate: 40.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CariaConfig {
    pub draft: DraftSettings,
    pub snapshots: SnapshotSettings,
    pub currency: CurrencySettings,
}

impl CariaConfig {
    pub fn default_path() -> PathBuf {
        get_data_file_path(CONFIG_FILE)
    }

    /// Missing or unreadable files fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, CariaError> {
        let config: CariaConfig = load_json_or_default(path);
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), CariaError> {
        self.validate()?;
        save_json(self, path)
    }

    pub fn validate(&self) -> Result<(), CariaError> {
        if self.draft.quiet_window_ms == 0 {
            return Err(CariaError::InvalidConfig("draft.quiet_window_ms must be positive".into()));
        }
        if self.draft.namespace.trim().is_empty() {
            return Err(CariaError::InvalidConfig("draft.namespace must not be empty".into()));
        }
        if self.snapshots.max_entries == 0 {
            return Err(CariaError::InvalidConfig("snapshots.max_entries must be positive".into()));
        }
        if !(self.currency.gbp_to_try_rate.is_finite() && self.currency.gbp_to_try_rate > 0.0) {
            return Err(CariaError::InvalidConfig(
                "currency.gbp_to_try_rate must be positive".into(),
            ));
        }
        Ok(())
    }
}

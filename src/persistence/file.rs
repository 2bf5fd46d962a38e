use std::{
    fs,
    io::ErrorKind,
    path::PathBuf,
};

use super::{
    get_app_data_dir,
    KeyValueStore,
    StoreError,
};
const DRAFTS_DIR: &str = "drafts";

/// One file per key inside a directory. File names are the hex of the key bytes, so distinct
/// keys never share a file, even on case-insensitive file systems.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<local data dir>/caria/drafts`
    pub fn in_app_data() -> Self {
        Self::new(get_app_data_dir().join(DRAFTS_DIR))
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() {
            return Err(StoreError::Unavailable("empty store key".to_string()));
        }
        Ok(self.root.join(format!("{}.json", hex::encode(key.as_bytes()))))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("drafts"));

        assert_eq!(store.get("caria_draft_property:new").unwrap(), None);
        store.set("caria_draft_property:new", r#"{"title":"Villa"}"#).unwrap();
        assert_eq!(
            store.get("caria_draft_property:new").unwrap().as_deref(),
            Some(r#"{"title":"Villa"}"#)
        );
        let file_name = format!("{}.json", hex::encode("caria_draft_property:new"));
        assert!(dir.path().join("drafts").join(file_name).exists());

        store.remove("caria_draft_property:new").unwrap();
        store.remove("caria_draft_property:new").unwrap();
        assert_eq!(store.get("caria_draft_property:new").unwrap(), None);
    }

    #[test]
    fn test_unusable_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.set("", "x"), Err(StoreError::Unavailable(_))));
        store.set("///", "x").unwrap();
        assert_eq!(store.get("///").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_keys_differing_in_case_or_punctuation_stay_apart() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let upper = "caria_draft_property:key-AB-1";
        let spaced = "caria_draft_property:key-ab 1";
        let lower = "caria_draft_property:key-ab-1";

        store.set(upper, r#"{"title":"upper"}"#).unwrap();
        assert_eq!(store.get(spaced).unwrap(), None);
        assert_eq!(store.get(lower).unwrap(), None);

        store.set(spaced, r#"{"title":"spaced"}"#).unwrap();
        assert_eq!(store.get(upper).unwrap().as_deref(), Some(r#"{"title":"upper"}"#));
        assert_eq!(store.get(spaced).unwrap().as_deref(), Some(r#"{"title":"spaced"}"#));

        store.remove(upper).unwrap();
        assert_eq!(store.get(upper).unwrap(), None);
        assert!(store.get(spaced).unwrap().is_some());
    }
}

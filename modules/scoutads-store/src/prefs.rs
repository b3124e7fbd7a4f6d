//! Local preference store.
//!
//! Values are JSON strings under fixed keys. Every read and write through
//! `Preferences` is best effort: failures are logged and the caller gets the
//! default it supplied, never an error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use scoutads_common::{Result, ScoutAdsError};

pub const FILTERS_KEY: &str = "scoutads-filters";
pub const SAVED_KEY: &str = "scoutads-saved";

// ---------------------------------------------------------------------------
// Raw key-value stores
// ---------------------------------------------------------------------------

/// String key-value storage, shaped like browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

// Arc<S> / Box<dyn> blankets: lets tests keep a handle for assertions and
// lets the binary pick a store at runtime.

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl KeyValueStore for Box<dyn KeyValueStore> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-memory store. Lost on drop.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| ScoutAdsError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ScoutAdsError::Validation(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        // Write then rename so a crash never leaves a half-written file.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Typed, best-effort access
// ---------------------------------------------------------------------------

pub struct Preferences<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Value stored under `key`, or `default` when missing, unreadable or
    /// not valid JSON for `T`.
    pub fn load_or_default<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(key, "No stored preference, using default");
                default
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to load preference, using default");
                default
            }
        }
    }

    /// Store `value` under `key`. Returns whether the write succeeded.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(ScoutAdsError::from)
            .and_then(|json| self.store.set(key, &json));
        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "Failed to save preference");
                false
            }
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        match self.store.remove(key) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "Failed to remove preference");
                false
            }
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key)? {
            Some(raw) if !raw.trim().is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
            _ => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Saved creatives
// ---------------------------------------------------------------------------

/// The user's starred creatives. Keeps insertion order so the persisted
/// array is stable across toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedCreatives {
    ids: Vec<String>,
}

impl SavedCreatives {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a persisted array, dropping duplicate ids.
    pub fn from_vec(ids: Vec<String>) -> Self {
        let mut saved = Self::new();
        for id in ids {
            if !saved.contains(&id) {
                saved.ids.push(id);
            }
        }
        saved
    }

    /// Flip membership of `id`. Returns true when it is now saved.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|s| s == id) {
            Some(pos) => {
                self.ids.remove(pos);
                false
            }
            None => {
                self.ids.push(id.to_string());
                true
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.ids.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoutads_common::SearchFilters;

    /// Store whose every operation fails, like a full or disabled disk.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(ScoutAdsError::Storage("storage unavailable".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(ScoutAdsError::Storage("quota exceeded".into()))
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Err(ScoutAdsError::Storage("storage unavailable".into()))
        }
    }

    #[test]
    fn memory_store_round_trips_filters() {
        let prefs = Preferences::new(MemoryStore::new());
        let filters = SearchFilters {
            query: Some("bitcoin".into()),
            min_duplicates: 20,
            ..SearchFilters::default()
        };
        assert!(prefs.save(FILTERS_KEY, &filters));
        let loaded = prefs.load_or_default(FILTERS_KEY, SearchFilters::default());
        assert_eq!(loaded, filters);
    }

    #[test]
    fn missing_key_returns_default() {
        let prefs = Preferences::new(MemoryStore::new());
        let saved: Vec<String> = prefs.load_or_default(SAVED_KEY, vec!["x".to_string()]);
        assert_eq!(saved, vec!["x".to_string()]);
    }

    #[test]
    fn corrupt_json_returns_default() {
        let store = MemoryStore::new();
        store.set(FILTERS_KEY, "{not json").unwrap();
        let prefs = Preferences::new(store);
        let loaded = prefs.load_or_default(FILTERS_KEY, SearchFilters::default());
        assert_eq!(loaded, SearchFilters::default());
    }

    #[test]
    fn broken_store_never_propagates_errors() {
        let prefs = Preferences::new(BrokenStore);
        let loaded: Vec<String> = prefs.load_or_default(SAVED_KEY, Vec::new());
        assert!(loaded.is_empty());
        assert!(!prefs.save(SAVED_KEY, &vec!["1".to_string()]));
        assert!(!prefs.remove(SAVED_KEY));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let prefs = Preferences::new(FileStore::new(dir.path()));
            assert!(prefs.save(SAVED_KEY, &vec!["2".to_string(), "7".to_string()]));
        }
        let prefs = Preferences::new(FileStore::new(dir.path()));
        let saved: Vec<String> = prefs.load_or_default(SAVED_KEY, Vec::new());
        assert_eq!(saved, vec!["2".to_string(), "7".to_string()]);
        assert!(dir.path().join("scoutads-saved.json").exists());
    }

    #[test]
    fn file_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set(FILTERS_KEY, "{}").unwrap();
        store.remove(FILTERS_KEY).unwrap();
        store.remove(FILTERS_KEY).unwrap();
        assert_eq!(store.get(FILTERS_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.set("../escape", "{}").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn toggling_twice_restores_saved_set() {
        let prefs = Preferences::new(MemoryStore::new());
        let original = SavedCreatives::from_vec(vec!["1".into(), "3".into()]);
        prefs.save(SAVED_KEY, &original.to_vec());

        for _ in 0..2 {
            let mut saved =
                SavedCreatives::from_vec(prefs.load_or_default(SAVED_KEY, Vec::new()));
            saved.toggle("5");
            prefs.save(SAVED_KEY, &saved.to_vec());
        }

        let restored = SavedCreatives::from_vec(prefs.load_or_default(SAVED_KEY, Vec::new()));
        assert_eq!(restored, original);
    }

    #[test]
    fn toggle_reports_membership() {
        let mut saved = SavedCreatives::new();
        assert!(saved.toggle("9"));
        assert!(saved.contains("9"));
        assert!(!saved.toggle("9"));
        assert!(saved.is_empty());
    }

    #[test]
    fn from_vec_drops_duplicates() {
        let saved = SavedCreatives::from_vec(vec!["1".into(), "1".into(), "2".into()]);
        assert_eq!(saved.len(), 2);
        assert_eq!(saved.iter().collect::<Vec<_>>(), vec!["1", "2"]);
    }
}

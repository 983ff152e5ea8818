//! Local persistence of dashboard preferences.
//!
//! Only two fields survive a restart: the dashboard configuration and the
//! current page. They are stored together as one JSON object under
//! [`STORAGE_KEY`] in a [`KeyValueStore`].
//!
//! Reads never fail: an absent, unreadable or malformed entry yields
//! [`PersistedPreferences::default`]. Writes that fail are logged and dropped.

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::store::{DashboardConfig, Page};

/// Namespace key of the persisted preferences entry.
pub const STORAGE_KEY: &str = "metrics-dashboard-storage";

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing storage failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Preferences could not be converted to or from JSON.
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value storage.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Read an entry; `Ok(None)` when it does not exist.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Create or replace an entry.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete an entry. Deleting a missing entry is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// One JSON file per key inside a directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// crash mid-write leaves the previous entry intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the directory entries are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process storage, used by tests and when no state directory is wanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// The persisted subset of the dashboard state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedPreferences {
    pub dashboard_config: DashboardConfig,
    pub current_page: Page,
}

/// Reads and writes [`PersistedPreferences`] under one key of a backend.
#[derive(Debug, Clone)]
pub struct Preferences {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl Preferences {
    /// Preferences stored under [`STORAGE_KEY`].
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Load preferences, falling back to defaults on any problem.
    pub fn load(&self) -> PersistedPreferences {
        match self.try_load() {
            Ok(Some(prefs)) => {
                debug!(key = %self.key, page = ?prefs.current_page, "restored preferences");
                prefs
            }
            Ok(None) => PersistedPreferences::default(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "ignoring unreadable preferences");
                PersistedPreferences::default()
            }
        }
    }

    /// Load preferences, surfacing storage and parse errors.
    pub fn try_load(&self) -> Result<Option<PersistedPreferences>, StorageError> {
        match self.backend.get(&self.key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Persist preferences. Failures are logged, never returned.
    pub fn save(&self, prefs: &PersistedPreferences) {
        if let Err(e) = self.try_save(prefs) {
            warn!(key = %self.key, error = %e, "failed to persist preferences");
        }
    }

    pub fn try_save(&self, prefs: &PersistedPreferences) -> Result<(), StorageError> {
        let json = serde_json::to_string(prefs)?;
        self.backend.set(&self.key, &json)
    }

    /// Forget persisted preferences.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ThemeMode;
    use tempfile::TempDir;

    fn custom_prefs() -> PersistedPreferences {
        let mut prefs = PersistedPreferences::default();
        prefs.dashboard_config.theme = ThemeMode::Dark;
        prefs.dashboard_config.refresh_interval_ms = 5_000;
        prefs.current_page = Page::QaMetrics;
        prefs
    }

    #[test]
    fn entry_has_exactly_two_fields() {
        let json = serde_json::to_value(PersistedPreferences::default()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("dashboardConfig"));
        assert_eq!(object["currentPage"], "dashboard");
    }

    #[test]
    fn file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let prefs = Preferences::new(Arc::new(FileStore::new(dir.path())));

        prefs.try_save(&custom_prefs()).unwrap();
        assert!(dir.path().join("metrics-dashboard-storage.json").exists());

        let reopened = Preferences::new(Arc::new(FileStore::new(dir.path())));
        assert_eq!(reopened.load(), custom_prefs());
    }

    #[test]
    fn file_store_missing_entry_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("not-yet-created"));
        assert!(store.get("anything").unwrap().is_none());
        store.remove("anything").unwrap();
    }

    #[test]
    fn absent_entry_loads_defaults() {
        let prefs = Preferences::new(Arc::new(MemoryStore::new()));
        let loaded = prefs.load();
        assert_eq!(loaded.current_page, Page::Dashboard);
        assert_eq!(loaded.dashboard_config.theme, ThemeMode::Light);
        assert_eq!(loaded.dashboard_config.refresh_interval_ms, 30_000);
    }

    #[test]
    fn malformed_entry_loads_defaults() {
        let backend = Arc::new(MemoryStore::new());
        backend.set(STORAGE_KEY, "{not json").unwrap();
        let prefs = Preferences::new(backend.clone());

        assert!(matches!(prefs.try_load(), Err(StorageError::Serialize(_))));
        assert_eq!(prefs.load(), PersistedPreferences::default());
    }

    #[test]
    fn unknown_page_loads_defaults() {
        let backend = Arc::new(MemoryStore::new());
        backend
            .set(STORAGE_KEY, r#"{"dashboardConfig":{},"currentPage":"reports"}"#)
            .unwrap();
        assert_eq!(Preferences::new(backend).load(), PersistedPreferences::default());
    }

    #[test]
    fn clear_removes_entry() {
        let backend = Arc::new(MemoryStore::new());
        let prefs = Preferences::new(backend.clone());
        prefs.save(&custom_prefs());
        prefs.clear().unwrap();
        assert!(backend.get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn write_failure_is_swallowed() {
        let dir = TempDir::new().unwrap();
        // A regular file where the store expects a directory.
        let blocker = dir.path().join("state");
        fs::write(&blocker, "").unwrap();
        let prefs = Preferences::new(Arc::new(FileStore::new(&blocker)));

        assert!(prefs.try_save(&custom_prefs()).is_err());
        prefs.save(&custom_prefs());
    }
}

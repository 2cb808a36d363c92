//! Key/value settings storage, persisted as `settings.json` in the site root.
//!
//! The store is schemaless: string keys mapped to JSON values. Reads are
//! tolerant of malformed values (a non-numeric value simply fails the typed
//! accessor); writes persist the whole map immediately.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde_json::Value;

/// Settings file name, relative to the site root.
pub const SETTINGS_FILE: &str = "settings.json";

/// Persistent key/value settings store.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    values: RwLock<serde_json::Map<String, Value>>,
}

impl SettingsStore {
    /// Open the settings store for a site root. A missing file yields an
    /// empty store; the file is created on first write.
    pub fn open(root: &Path) -> Result<Self> {
        let path = root.join(SETTINGS_FILE);
        let values = if path.is_file() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?
        } else {
            serde_json::Map::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    /// Read a value as `u64`, tolerating numeric strings. Malformed values
    /// behave as absent.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        match self.values.read().get(key)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Set a key and persist.
    pub fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self.values.write();
        values.insert(key.to_string(), value);
        self.persist(&values)
    }

    /// Delete a key and persist. Deleting an absent key is a no-op.
    pub fn delete(&self, key: &str) -> Result<()> {
        let mut values = self.values.write();
        if values.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&values)
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }

    fn persist(&self, values: &serde_json::Map<String, Value>) -> Result<()> {
        let content = serde_json::to_string_pretty(&Value::Object(values.clone()))?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_get_delete() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SettingsStore::open(tmp.path()).unwrap();

        store.set("archive_page_event", json!(42)).unwrap();
        assert_eq!(store.get_u64("archive_page_event"), Some(42));

        store.delete("archive_page_event").unwrap();
        assert_eq!(store.get_u64("archive_page_event"), None);
        // deleting again is a no-op
        store.delete("archive_page_event").unwrap();
    }

    #[test]
    fn test_persistence_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let store = SettingsStore::open(tmp.path()).unwrap();
            store.set("archive_page_event", json!(42)).unwrap();
        }

        let reopened = SettingsStore::open(tmp.path()).unwrap();
        assert_eq!(reopened.get_u64("archive_page_event"), Some(42));
    }

    #[test]
    fn test_malformed_values_behave_as_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SettingsStore::open(tmp.path()).unwrap();

        store.set("a", json!("17")).unwrap();
        store.set("b", json!("not a number")).unwrap();
        store.set("c", json!([1, 2])).unwrap();

        assert_eq!(store.get_u64("a"), Some(17));
        assert_eq!(store.get_u64("b"), None);
        assert_eq!(store.get_u64("c"), None);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SettingsStore::open(tmp.path()).unwrap();
        assert!(store.keys().is_empty());
    }
}

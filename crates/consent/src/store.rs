//! Consent record and the stores that persist it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed storage key for the persisted consent record. The file store
/// names its single file after this key.
pub const CONSENT_KEY: &str = "aurumgate_cookie_choice";

/// The user's stored cookie preference selections.
///
/// `essential` covers session authentication and security and is always
/// granted; both store implementations force it back on before and after
/// persistence, whatever the stored bytes claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub essential: bool,
    pub analytics: bool,
    pub marketing: bool,
}

impl Default for ConsentRecord {
    fn default() -> Self {
        Self {
            essential: true,
            analytics: false,
            marketing: false,
        }
    }
}

impl ConsentRecord {
    /// All categories granted, as the banner's accept action writes.
    pub fn accept_all() -> Self {
        Self {
            essential: true,
            analytics: true,
            marketing: true,
        }
    }

    fn normalized(mut self) -> Self {
        self.essential = true;
        self
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("consent store io: {0}")]
    Io(#[from] std::io::Error),

    #[error("consent store serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persistence behind the consent controller.
///
/// `load` never fails: absent or malformed data falls back to the default
/// record. `exists` distinguishes "defaults because nothing is stored"
/// from "the user chose the default values"; banner visibility hangs on
/// that difference.
pub trait ConsentStore {
    fn load(&self) -> ConsentRecord;
    fn exists(&self) -> bool;
    fn save(&mut self, record: &ConsentRecord) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

fn parse_record(raw: &str) -> ConsentRecord {
    match serde_json::from_str::<ConsentRecord>(raw) {
        Ok(record) => record.normalized(),
        Err(_) => ConsentRecord::default(),
    }
}

// ── File-backed store ───────────────────────────────────────────

/// One JSON file named after [`CONSENT_KEY`] in a caller-supplied
/// directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let mut path = dir.into();
        path.push(format!("{CONSENT_KEY}.json"));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConsentStore for FileStore {
    fn load(&self) -> ConsentRecord {
        match fs::read_to_string(&self.path) {
            Ok(raw) => parse_record(&raw),
            Err(_) => ConsentRecord::default(),
        }
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn save(&mut self, record: &ConsentRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(&record.normalized())?;
        // Temp file + rename: a concurrent load never observes a partial
        // record.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ── In-memory store ─────────────────────────────────────────────

/// In-memory store for tests and headless embedding. Holds the raw
/// serialized value so malformed-data behavior matches the file store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw stored value, valid JSON or not.
    pub fn with_raw(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

impl ConsentStore for MemoryStore {
    fn load(&self) -> ConsentRecord {
        match &self.value {
            Some(raw) => parse_record(raw),
            None => ConsentRecord::default(),
        }
    }

    fn exists(&self) -> bool {
        self.value.is_some()
    }

    fn save(&mut self, record: &ConsentRecord) -> Result<(), StoreError> {
        self.value = Some(serde_json::to_string(&record.normalized())?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.value = None;
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_defaults() {
        let store = MemoryStore::new();
        assert!(!store.exists());
        assert_eq!(store.load(), ConsentRecord::default());
    }

    #[test]
    fn test_round_trip_preserves_choices() {
        let mut store = MemoryStore::new();
        let record = ConsentRecord {
            essential: true,
            analytics: true,
            marketing: false,
        };
        store.save(&record).unwrap();
        assert!(store.exists());
        assert_eq!(store.load(), record);
    }

    #[test]
    fn test_essential_forced_true_on_save() {
        let mut store = MemoryStore::new();
        store
            .save(&ConsentRecord {
                essential: false,
                analytics: true,
                marketing: true,
            })
            .unwrap();
        assert!(store.load().essential);
    }

    #[test]
    fn test_essential_forced_true_on_load() {
        let store = MemoryStore::with_raw(
            r#"{"essential":false,"analytics":true,"marketing":false}"#,
        );
        let record = store.load();
        assert!(record.essential);
        assert!(record.analytics);
        assert!(!record.marketing);
    }

    #[test]
    fn test_corrupted_value_loads_defaults() {
        let store = MemoryStore::with_raw("not json at all {");
        assert_eq!(store.load(), ConsentRecord::default());
    }

    #[test]
    fn test_clear_resets_to_defaults() {
        let mut store = MemoryStore::new();
        store.save(&ConsentRecord::accept_all()).unwrap();
        store.clear().unwrap();
        assert!(!store.exists());
        assert_eq!(store.load(), ConsentRecord::default());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        assert!(!store.exists());
        assert_eq!(store.load(), ConsentRecord::default());

        store.save(&ConsentRecord::accept_all()).unwrap();
        assert!(store.exists());
        assert_eq!(store.load(), ConsentRecord::accept_all());

        // A second store over the same directory sees the same record.
        let other = FileStore::new(dir.path());
        assert_eq!(other.load(), ConsentRecord::accept_all());
    }

    #[test]
    fn test_file_store_corrupted_file_loads_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.path(), "]]garbage[[").unwrap();
        assert!(store.exists());
        assert_eq!(store.load(), ConsentRecord::default());
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());
        store.clear().unwrap();
        store.save(&ConsentRecord::accept_all()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(!store.exists());
    }

    #[test]
    fn test_file_store_names_file_after_key() {
        let store = FileStore::new("/tmp/prefs");
        assert!(store
            .path()
            .ends_with(format!("{CONSENT_KEY}.json")));
    }
}

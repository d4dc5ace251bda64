//! Durable key/value storage

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Failure of the durable layer. Returned as a value, never panics.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),

    #[error("io error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Key/value persistence that survives process restart
pub trait DurableStore {
    /// Read the bytes under `key`, `None` if absent
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the bytes under `key`
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Remove `key`; removing an absent key succeeds
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Directory-backed store, one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        FileStore { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl DurableStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;

        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        write_atomic(&path, bytes).map_err(|source| StoreError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// Write to a sibling temp file, sync, then rename into place.
///
/// On Windows, `rename` does not overwrite existing files, so the destination is removed first.
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_name = format!(
        "{}.tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("record.json"),
        std::process::id()
    );
    let tmp_path = path.with_file_name(tmp_name);

    {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }

    #[cfg(windows)]
    {
        if path.exists() {
            fs::remove_file(path)?;
        }
    }

    fs::rename(&tmp_path, path)
}

/// In-memory store for tests.
///
/// Clones share the same map, so a clone handed to a fresh store instance
/// behaves like the same device after a restart. Reads and writes can be
/// switched to fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Rc<RefCell<BTreeMap<String, Vec<u8>>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
    fail_remove_of: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Make `remove` fail for `key` only
    pub fn set_fail_remove_of(&self, key: Option<&str>) {
        *self.fail_remove_of.borrow_mut() = key.map(str::to_string);
    }

    /// Raw bytes under `key`, bypassing failure injection
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.data.borrow().get(key).cloned()
    }
}

impl DurableStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        validate_key(key)?;
        if self.fail_reads.get() {
            return Err(StoreError::Unavailable(format!("read of '{}' failed", key)));
        }
        Ok(self.data.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        validate_key(key)?;
        if self.fail_writes.get() {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }
        self.data.borrow_mut().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        let targeted = self.fail_remove_of.borrow().as_deref() == Some(key);
        if self.fail_writes.get() || targeted {
            return Err(StoreError::Unavailable(format!("remove of '{}' failed", key)));
        }
        self.data.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("store"));

        assert_eq!(store.read("theme").unwrap(), None);

        store.write("theme", b"\"light\"").unwrap();
        assert!(temp.path().join("store/theme.json").exists());
        assert_eq!(store.read("theme").unwrap(), Some(b"\"light\"".to_vec()));

        store.write("theme", b"\"dark\"").unwrap();
        assert_eq!(store.read("theme").unwrap(), Some(b"\"dark\"".to_vec()));
    }

    #[test]
    fn test_file_store_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().to_path_buf());

        store.write("logs-history", b"{}").unwrap();

        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["logs-history.json".to_string()]);
    }

    #[test]
    fn test_file_store_remove_absent_key() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().to_path_buf());

        store.remove("missing").unwrap();
        store.write("k", b"1").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.read("k").unwrap(), None);
    }

    #[test]
    fn test_file_store_survives_new_instance() {
        let temp = TempDir::new().unwrap();
        FileStore::new(temp.path().to_path_buf())
            .write("k", b"persisted")
            .unwrap();

        let reopened = FileStore::new(temp.path().to_path_buf());
        assert_eq!(reopened.read("k").unwrap(), Some(b"persisted".to_vec()));
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().to_path_buf());

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(store.read(key), Err(StoreError::InvalidKey(_))));
            assert!(matches!(store.write(key, b"x"), Err(StoreError::InvalidKey(_))));
        }
    }

    #[test]
    fn test_memory_store_failure_injection() {
        let store = MemoryStore::new();
        store.write("k", b"1").unwrap();

        store.set_fail_writes(true);
        assert!(matches!(store.write("k", b"2"), Err(StoreError::Unavailable(_))));
        assert_eq!(store.raw("k"), Some(b"1".to_vec()));

        store.set_fail_reads(true);
        assert!(store.read("k").is_err());
    }

    #[test]
    fn test_memory_store_targeted_remove_failure() {
        let store = MemoryStore::new();
        store.write("a", b"1").unwrap();
        store.write("b", b"2").unwrap();
        store.set_fail_remove_of(Some("b"));

        store.remove("a").unwrap();
        assert!(store.remove("b").is_err());
        assert_eq!(store.raw("b"), Some(b"2".to_vec()));

        store.set_fail_remove_of(None);
        store.remove("b").unwrap();
    }

    #[test]
    fn test_memory_store_clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.write("k", b"shared").unwrap();
        assert_eq!(other.read("k").unwrap(), Some(b"shared".to_vec()));
    }
}

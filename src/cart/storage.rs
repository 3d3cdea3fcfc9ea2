use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cart storage io error: {0}")]
    Io(#[from] io::Error),
}

/// Key/value backend for persisted carts. One entry per cart.
pub trait CartStorage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Stores each cart as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    dir: PathBuf,
}

impl FileCartStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

impl CartStorage for FileCartStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // write then rename so a crash never leaves a half-written cart
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process storage, used by tests and embedded callers.
#[derive(Debug, Default)]
pub struct MemoryCartStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCartStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CartStorage for MemoryCartStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_round_trips_and_reports_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = FileCartStorage::new(dir.path().join("carts"));

        assert!(storage.read("cart-storage-a").expect("read").is_none());

        storage.write("cart-storage-a", "{}").expect("write");
        assert_eq!(storage.read("cart-storage-a").expect("read").as_deref(), Some("{}"));

        storage.remove("cart-storage-a").expect("remove");
        storage.remove("cart-storage-a").expect("remove twice");
        assert!(storage.read("cart-storage-a").expect("read").is_none());
    }

    #[test]
    fn file_storage_sanitizes_keys() {
        let storage = FileCartStorage::new("/tmp/carts");
        let path = storage.path_for("cart-storage:../x");
        assert_eq!(path, PathBuf::from("/tmp/carts/cart-storage____x.json"));
    }
}

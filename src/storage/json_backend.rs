use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    errors::LedgerError,
};

use super::{KeyValueStore, Result};

const ENTRY_EXTENSION: &str = "json";

/// Filesystem-backed store that keeps one JSON file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `root`, or under the application data directory.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        let dir = PathResolver::store_dir_in(&base);
        ensure_dir(&dir)?;
        Ok(Self { root: dir })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{ENTRY_EXTENSION}")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.entry_path(key)?;
        write_atomic(&path, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(LedgerError::InvalidInput(format!(
            "store key `{key}` must be non-empty ASCII alphanumerics"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrips_entries_on_disk() {
        let temp = tempdir().unwrap();
        let store = JsonFileStore::new(Some(temp.path().to_path_buf())).unwrap();
        store.set("transactions", b"[]").unwrap();
        store.set_double("currentBalance", 42.5).unwrap();

        assert!(store.entry_path("transactions").unwrap().exists());
        assert_eq!(store.get("transactions").unwrap(), Some(b"[]".to_vec()));
        assert_eq!(store.get_double("currentBalance").unwrap(), Some(42.5));

        let reopened = JsonFileStore::new(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(reopened.get_double("currentBalance").unwrap(), Some(42.5));
    }

    #[test]
    fn missing_entries_read_as_none_and_remove_is_idempotent() {
        let temp = tempdir().unwrap();
        let store = JsonFileStore::new(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(store.get("achievements").unwrap(), None);
        store.remove("achievements").unwrap();
    }

    #[test]
    fn rejects_path_like_keys() {
        let temp = tempdir().unwrap();
        let store = JsonFileStore::new(Some(temp.path().to_path_buf())).unwrap();
        let err = store.set("../escape", b"{}").expect_err("key must be rejected");
        assert!(matches!(err, LedgerError::InvalidInput(_)), "unexpected: {err:?}");
    }
}

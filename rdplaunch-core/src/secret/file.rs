//! File-based credential storage fallback.
//!
//! Used whenever the Secret Service is unavailable or fails. The file holds
//! the credential map as plain JSON; its only protection is the owner-only
//! permission bits applied after every write.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::restrict_permissions;
use crate::error::{SecretError, SecretResult};

use super::store::CredentialMap;

/// Owner-only JSON file holding the credential map.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store for the given file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the credential map; a missing file yields an empty map.
    ///
    /// # Errors
    /// Returns `SecretError::RetrieveFailed` if the file exists but cannot
    /// be read or parsed.
    pub fn load_map(&self) -> SecretResult<CredentialMap> {
        if !self.path.exists() {
            return Ok(CredentialMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            SecretError::RetrieveFailed(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            SecretError::RetrieveFailed(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Writes the credential map and restricts the file to owner read/write.
    ///
    /// The parent directory is created if absent.
    ///
    /// # Errors
    /// Returns `SecretError::StoreFailed` on any write failure.
    pub fn save_map(&self, map: &CredentialMap) -> SecretResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SecretError::StoreFailed(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(map)
            .map_err(|e| SecretError::StoreFailed(format!("Failed to serialize: {e}")))?;

        fs::write(&self.path, content).map_err(|e| {
            SecretError::StoreFailed(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        restrict_permissions(&self.path).map_err(|e| {
            SecretError::StoreFailed(format!(
                "Failed to set permissions on {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Deletes the file if present.
    ///
    /// # Errors
    /// Returns `SecretError::DeleteFailed` if the file exists and cannot be
    /// removed.
    pub fn remove(&self) -> SecretResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SecretError::DeleteFailed(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("credentials.json"));
        (store, temp_dir)
    }

    #[test]
    fn test_missing_file_is_empty_map() {
        let (store, _temp) = create_test_store();
        assert!(store.load_map().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (store, _temp) = create_test_store();

        let mut map = CredentialMap::new();
        map.insert("server01:admin".to_string(), "secret".to_string());
        store.save_map(&map).unwrap();

        assert_eq!(store.load_map().unwrap(), map);
    }

    #[test]
    fn test_save_creates_missing_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested").join("credentials.json"));

        store.save_map(&CredentialMap::new()).unwrap();
        assert!(store.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (store, _temp) = create_test_store();
        store.save_map(&CredentialMap::new()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (store, _temp) = create_test_store();
        store.save_map(&CredentialMap::new()).unwrap();

        store.remove().unwrap();
        assert!(!store.path().exists());
        store.remove().unwrap();
    }
}

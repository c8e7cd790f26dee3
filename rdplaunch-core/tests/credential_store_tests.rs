//! Integration tests for the credential store fallback chain.
//!
//! A set of simulated keyring backends drives every degradation path: a
//! failing backend must transparently fall back to the file store, and the
//! file must end up with owner-only permissions.

use std::sync::Arc;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::sync::Mutex;

use rdplaunch_core::error::{SecretError, SecretResult};
use rdplaunch_core::secret::{CredentialStore, FileStore, SecretBackend, StorageSource};

/// In-memory keyring that behaves like a healthy Secret Service.
#[derive(Default)]
struct MemoryBackend {
    blob: Mutex<Option<String>>,
}

#[async_trait]
impl SecretBackend for MemoryBackend {
    async fn store(&self, blob: &str) -> SecretResult<()> {
        *self.blob.lock().await = Some(blob.to_string());
        Ok(())
    }

    async fn load(&self) -> SecretResult<Option<String>> {
        Ok(self.blob.lock().await.clone())
    }

    async fn clear(&self) -> SecretResult<()> {
        *self.blob.lock().await = None;
        Ok(())
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn backend_id(&self) -> &'static str {
        "memory"
    }
}

/// Keyring that rejects every operation.
struct BrokenBackend;

#[async_trait]
impl SecretBackend for BrokenBackend {
    async fn store(&self, _blob: &str) -> SecretResult<()> {
        Err(SecretError::StoreFailed("simulated write failure".into()))
    }

    async fn load(&self) -> SecretResult<Option<String>> {
        Err(SecretError::RetrieveFailed("simulated read failure".into()))
    }

    async fn clear(&self) -> SecretResult<()> {
        Err(SecretError::DeleteFailed("simulated delete failure".into()))
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn backend_id(&self) -> &'static str {
        "broken"
    }
}

fn file_store(temp: &TempDir) -> FileStore {
    FileStore::new(temp.path().join("credentials.json"))
}

#[tokio::test]
async fn save_and_load_through_healthy_keyring() {
    let temp = TempDir::new().unwrap();
    let backend = Arc::new(MemoryBackend::default());

    let mut store = CredentialStore::new(Some(backend.clone()), file_store(&temp));
    let source = store.save("server01", "admin", "secret").await.unwrap();
    assert_eq!(source, StorageSource::Keyring);

    // The file fallback must stay untouched when the keyring works
    assert!(!temp.path().join("credentials.json").exists());

    let mut reloaded = CredentialStore::new(Some(backend), file_store(&temp));
    assert_eq!(reloaded.load().await, StorageSource::Keyring);
    assert_eq!(reloaded.get("server01", "admin"), Some("secret"));
}

#[tokio::test]
async fn broken_keyring_falls_back_to_file() {
    let temp = TempDir::new().unwrap();

    let mut store = CredentialStore::new(Some(Arc::new(BrokenBackend)), file_store(&temp));
    let source = store.save("server01", "admin", "secret").await.unwrap();
    assert_eq!(source, StorageSource::File);
    assert!(temp.path().join("credentials.json").exists());

    // A fresh store in the same broken environment must find the password
    let mut reloaded = CredentialStore::new(Some(Arc::new(BrokenBackend)), file_store(&temp));
    assert_eq!(reloaded.load().await, StorageSource::File);
    assert_eq!(reloaded.get("server01", "admin"), Some("secret"));
}

#[cfg(unix)]
#[tokio::test]
async fn fallback_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let mut store = CredentialStore::new(Some(Arc::new(BrokenBackend)), file_store(&temp));
    store.save("server01", "admin", "secret").await.unwrap();

    let mode = std::fs::metadata(temp.path().join("credentials.json"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[tokio::test]
async fn file_only_mode_without_keyring() {
    let temp = TempDir::new().unwrap();

    let mut store = CredentialStore::new(None, file_store(&temp));
    assert_eq!(store.load().await, StorageSource::File);
    let source = store.save("server01", "admin", "secret").await.unwrap();
    assert_eq!(source, StorageSource::File);

    let mut reloaded = CredentialStore::new(None, file_store(&temp));
    reloaded.load().await;
    assert_eq!(reloaded.get("server01", "admin"), Some("secret"));
}

#[tokio::test]
async fn clear_empties_every_backend() {
    let temp = TempDir::new().unwrap();
    let backend = Arc::new(MemoryBackend::default());

    let mut store = CredentialStore::new(Some(backend.clone()), file_store(&temp));
    store.save("server01", "admin", "secret").await.unwrap();
    store.clear().await.unwrap();
    assert!(store.is_empty());

    let mut reloaded = CredentialStore::new(Some(backend), file_store(&temp));
    reloaded.load().await;
    assert!(reloaded.is_empty());
}

#[tokio::test]
async fn clear_works_when_file_was_the_active_backend() {
    let temp = TempDir::new().unwrap();

    let mut store = CredentialStore::new(Some(Arc::new(BrokenBackend)), file_store(&temp));
    store.save("server01", "admin", "secret").await.unwrap();
    assert!(temp.path().join("credentials.json").exists());

    // The broken keyring's failing delete must be ignored
    store.clear().await.unwrap();
    assert!(!temp.path().join("credentials.json").exists());

    let mut reloaded = CredentialStore::new(Some(Arc::new(BrokenBackend)), file_store(&temp));
    reloaded.load().await;
    assert!(reloaded.is_empty());
}

#[tokio::test]
async fn disabled_keyring_preference_uses_file() {
    let temp = TempDir::new().unwrap();
    let backend = Arc::new(MemoryBackend::default());

    let mut store = CredentialStore::new(Some(backend), file_store(&temp));
    assert!(store.keyring_active());
    assert!(!store.set_keyring_enabled(false));

    let source = store.save("server01", "admin", "secret").await.unwrap();
    assert_eq!(source, StorageSource::File);
}

#[tokio::test]
async fn enabling_unavailable_keyring_is_rejected() {
    let temp = TempDir::new().unwrap();

    let mut store = CredentialStore::new(None, file_store(&temp));
    assert!(!store.keyring_active());
    // The toggle must revert instead of pretending the keyring works
    assert!(!store.set_keyring_enabled(true));
    assert!(!store.keyring_active());
}

#[tokio::test]
async fn corrupt_keyring_blob_falls_back_to_file() {
    let temp = TempDir::new().unwrap();
    let backend = Arc::new(MemoryBackend::default());
    backend.store("not json at all").await.unwrap();

    let mut store = CredentialStore::new(Some(backend), file_store(&temp));
    assert_eq!(store.load().await, StorageSource::File);
    assert!(store.is_empty());
}

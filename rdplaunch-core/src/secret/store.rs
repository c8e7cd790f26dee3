//! Credential store with keyring-to-file fallback.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{SecretError, SecretResult};

use super::backend::SecretBackend;
use super::file::FileStore;

/// Mapping from `"hostname:username"` to plaintext password.
pub type CredentialMap = HashMap<String, String>;

/// Which storage actually served a load or save.
///
/// Returned so callers (and tests) can observe when the keyring was skipped
/// or failed and the file fallback was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageSource {
    /// The platform keyring
    Keyring,
    /// The local credential file
    File,
}

/// In-memory credential map persisted through the preferred backend.
///
/// The map is loaded once at startup and rewritten in full after every
/// mutation. All keyring failures degrade to the file store; file failures
/// on save are surfaced so the caller can tell the user the password will
/// not be remembered, but nothing here is ever fatal to a connection.
pub struct CredentialStore {
    keyring: Option<Arc<dyn SecretBackend>>,
    use_keyring: bool,
    file: FileStore,
    entries: CredentialMap,
}

impl CredentialStore {
    /// Creates a store with an optional keyring backend and a file fallback.
    ///
    /// `keyring: None` means the Secret Service is structurally unavailable;
    /// the store then works in file-only mode.
    #[must_use]
    pub fn new(keyring: Option<Arc<dyn SecretBackend>>, file: FileStore) -> Self {
        let use_keyring = keyring.is_some();
        Self {
            keyring,
            use_keyring,
            file,
            entries: CredentialMap::new(),
        }
    }

    /// Builds the lookup key for a connection.
    ///
    /// Hostname and username are joined with `:`. A hostname or username
    /// containing `:` can collide with another pair; this matches the
    /// historical on-disk format and is a known limitation.
    #[must_use]
    pub fn credential_key(hostname: &str, username: &str) -> String {
        format!("{hostname}:{username}")
    }

    /// Loads the credential map from the active backend.
    ///
    /// The keyring is tried first when enabled; any failure (missing entry,
    /// backend error, corrupt blob) falls through to the file store. The
    /// caller never sees backend failure as an error, only as a file-sourced
    /// or empty result.
    pub async fn load(&mut self) -> StorageSource {
        if self.use_keyring
            && let Some(backend) = &self.keyring
        {
            match backend.load().await {
                Ok(Some(blob)) => match serde_json::from_str(&blob) {
                    Ok(map) => {
                        self.entries = map;
                        return StorageSource::Keyring;
                    }
                    Err(e) => {
                        tracing::warn!(%e, "Stored keyring entry is not valid JSON, trying file storage");
                    }
                },
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!(%e, "Keyring lookup failed, trying file storage");
                }
            }
        }

        match self.file.load_map() {
            Ok(map) => self.entries = map,
            Err(e) => {
                tracing::warn!(%e, "Could not read the credential file, starting empty");
                self.entries.clear();
            }
        }
        StorageSource::File
    }

    /// Returns the stored password for a connection, if any.
    #[must_use]
    pub fn get(&self, hostname: &str, username: &str) -> Option<&str> {
        self.entries
            .get(&Self::credential_key(hostname, username))
            .map(String::as_str)
    }

    /// Number of stored passwords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no passwords are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Saves a password and persists the map immediately.
    ///
    /// A keyring write failure falls back to the file store; the returned
    /// [`StorageSource`] reports where the map actually landed.
    ///
    /// # Errors
    /// Returns an error only when the file fallback itself fails; the
    /// password is then kept for this session but will not be remembered.
    pub async fn save(
        &mut self,
        hostname: &str,
        username: &str,
        password: &str,
    ) -> SecretResult<StorageSource> {
        self.entries.insert(
            Self::credential_key(hostname, username),
            password.to_string(),
        );
        self.persist().await
    }

    /// Persists the current map through the preferred backend.
    async fn persist(&self) -> SecretResult<StorageSource> {
        if self.use_keyring
            && let Some(backend) = &self.keyring
        {
            let blob = serde_json::to_string(&self.entries)
                .map_err(|e| SecretError::StoreFailed(format!("Failed to serialize: {e}")))?;
            match backend.store(&blob).await {
                Ok(()) => return Ok(StorageSource::Keyring),
                Err(e) => {
                    tracing::warn!(%e, "Keyring write failed, falling back to file storage");
                }
            }
        }

        self.file.save_map(&self.entries)?;
        Ok(StorageSource::File)
    }

    /// Deletes all stored passwords from every backend.
    ///
    /// The keyring delete is attempted regardless of the preference toggle
    /// and its failure is ignored; the file is removed if present; the
    /// in-memory map is reset.
    ///
    /// # Errors
    /// Returns an error if the credential file exists and cannot be removed.
    pub async fn clear(&mut self) -> SecretResult<()> {
        if let Some(backend) = &self.keyring
            && let Err(e) = backend.clear().await
        {
            tracing::debug!(%e, "Keyring clear failed");
        }

        self.file.remove()?;
        self.entries.clear();
        Ok(())
    }

    /// Returns true when the keyring is present and enabled.
    #[must_use]
    pub fn keyring_active(&self) -> bool {
        self.use_keyring && self.keyring.is_some()
    }

    /// Enables or disables the keyring preference.
    ///
    /// Enabling while the keyring is structurally unavailable is rejected:
    /// the toggle reverts and the effective state is returned so the caller
    /// can notify the user.
    pub fn set_keyring_enabled(&mut self, enabled: bool) -> bool {
        if enabled && self.keyring.is_none() {
            self.use_keyring = false;
        } else {
            self.use_keyring = enabled;
        }
        self.use_keyring
    }
}

//! Secret backend trait.

use async_trait::async_trait;

use crate::error::SecretResult;

/// A platform credential backend holding the serialized credential map as a
/// single named entry.
///
/// Implementations must never prompt or block indefinitely; callers treat
/// every error as "fall back to file storage".
#[async_trait]
pub trait SecretBackend: Send + Sync {
    /// Stores the serialized credential map.
    ///
    /// # Errors
    /// Returns `SecretError` if the backend rejects the write.
    async fn store(&self, blob: &str) -> SecretResult<()>;

    /// Retrieves the serialized credential map.
    ///
    /// Returns `Ok(None)` when no entry exists.
    ///
    /// # Errors
    /// Returns `SecretError` if the backend cannot be queried.
    async fn load(&self) -> SecretResult<Option<String>>;

    /// Deletes the stored entry.
    ///
    /// # Errors
    /// Returns `SecretError` if the delete fails for a reason other than
    /// the entry not existing.
    async fn clear(&self) -> SecretResult<()>;

    /// Checks whether the backend can be used at all.
    async fn is_available(&self) -> bool;

    /// Stable identifier for logs and status output.
    fn backend_id(&self) -> &'static str;
}

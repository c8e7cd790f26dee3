//! Secret Service storage via `secret-tool` (libsecret)
//!
//! The whole credential map is stored as one JSON blob under a single
//! keyring entry, addressed by an `application`/`key` attribute pair.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{SecretError, SecretResult};

use super::backend::SecretBackend;

/// Application identifier used as the `application` attribute in keyring entries
const APP_ID: &str = "rdplaunch";

/// Attribute value of the credential map entry
const CREDENTIALS_KEY: &str = "credentials";

/// Label shown by keyring managers for the stored entry
const ENTRY_LABEL: &str = "RDPLaunch saved passwords";

/// Secret Service backend driven by the `secret-tool` binary.
pub struct LibSecretBackend {
    key: &'static str,
}

impl Default for LibSecretBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LibSecretBackend {
    /// Creates a backend addressing the credential map entry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            key: CREDENTIALS_KEY,
        }
    }

    /// Creates a backend addressing a custom entry key.
    ///
    /// Used by backend detection to probe the service without touching the
    /// real credential entry.
    #[must_use]
    pub const fn with_key(key: &'static str) -> Self {
        Self { key }
    }
}

/// Checks whether the `secret-tool` binary is available on the system.
///
/// All keyring operations depend on this tool. If it is missing, callers
/// should fall back to file storage and inform the user to install
/// `libsecret-tools`.
pub async fn is_secret_tool_available() -> bool {
    Command::new("secret-tool")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

#[async_trait]
impl SecretBackend for LibSecretBackend {
    async fn store(&self, blob: &str) -> SecretResult<()> {
        use tokio::io::AsyncWriteExt;

        if !is_secret_tool_available().await {
            return Err(SecretError::BackendUnavailable(
                "secret-tool not found. Install libsecret-tools or use file storage.".into(),
            ));
        }

        let mut child = Command::new("secret-tool")
            .args([
                "store",
                "--label",
                ENTRY_LABEL,
                "application",
                APP_ID,
                "key",
                self.key,
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SecretError::LibSecret(format!("Failed to spawn secret-tool: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(blob.as_bytes())
                .await
                .map_err(|e| SecretError::LibSecret(format!("Failed to write secret: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| SecretError::LibSecret(format!("Failed to wait for secret-tool: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SecretError::StoreFailed(format!(
                "secret-tool store failed: {stderr}"
            )));
        }

        Ok(())
    }

    async fn load(&self) -> SecretResult<Option<String>> {
        let output = Command::new("secret-tool")
            .args(["lookup", "application", APP_ID, "key", self.key])
            .output()
            .await
            .map_err(|e| SecretError::LibSecret(format!("Failed to run secret-tool: {e}")))?;

        if !output.status.success() {
            return Ok(None);
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    async fn clear(&self) -> SecretResult<()> {
        let output = Command::new("secret-tool")
            .args(["clear", "application", APP_ID, "key", self.key])
            .output()
            .await
            .map_err(|e| SecretError::LibSecret(format!("Failed to run secret-tool: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SecretError::DeleteFailed(format!(
                "secret-tool clear failed: {stderr}"
            )));
        }

        Ok(())
    }

    async fn is_available(&self) -> bool {
        is_secret_tool_available().await
    }

    fn backend_id(&self) -> &'static str {
        "libsecret"
    }
}

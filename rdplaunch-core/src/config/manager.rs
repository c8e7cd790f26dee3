//! Configuration manager for JSON file operations
//!
//! Handles loading and saving the connection registry document and owns the
//! location of the credential fallback file. Both files are private to the
//! user: every write is followed by restricting the file to owner read/write.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};
use crate::models::RegistryDocument;

/// File name of the connection registry document
const REGISTRY_FILE: &str = "config.json";
/// File name of the credential fallback store
const CREDENTIALS_FILE: &str = "credentials.json";

/// Configuration manager for `RDPLaunch`
///
/// Configuration is stored in `~/.config/rdplaunch/` by default.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Base directory for configuration files
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new `ConfigManager` with the default configuration directory
    ///
    /// The default directory is `~/.config/rdplaunch/`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> ConfigResult<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound(PathBuf::from("~/.config")))?
            .join("rdplaunch");
        Ok(Self { config_dir })
    }

    /// Creates a new `ConfigManager` with a custom configuration directory
    ///
    /// This is useful for testing or non-standard configurations.
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Returns the configuration directory path
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the path of the connection registry document
    #[must_use]
    pub fn registry_path(&self) -> PathBuf {
        self.config_dir.join(REGISTRY_FILE)
    }

    /// Returns the path of the credential fallback file
    #[must_use]
    pub fn credentials_path(&self) -> PathBuf {
        self.config_dir.join(CREDENTIALS_FILE)
    }

    /// Ensures the configuration directory exists
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_config_dir(&self) -> ConfigResult<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).map_err(|e| {
                ConfigError::Write(format!(
                    "Failed to create config directory {}: {}",
                    self.config_dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Loads the connection registry document
    ///
    /// Returns an empty document if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_registry(&self) -> ConfigResult<RegistryDocument> {
        Self::load_json_file(&self.registry_path())
    }

    /// Saves the connection registry document
    ///
    /// Creates the configuration directory if it doesn't exist. The whole
    /// document is rewritten on every save.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_registry(&self, document: &RegistryDocument) -> ConfigResult<()> {
        self.ensure_config_dir()?;
        Self::save_json_file(&self.registry_path(), document)
    }

    /// Loads and parses a JSON file, returning the default value if the file
    /// doesn't exist.
    fn load_json_file<T>(path: &Path) -> ConfigResult<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        if !path.exists() {
            return Ok(T::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read {}: {}", path.display(), e)))?;

        serde_json::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Saves data to a JSON file and restricts it to owner read/write.
    fn save_json_file<T>(path: &Path, data: &T) -> ConfigResult<()>
    where
        T: serde::Serialize,
    {
        let content = serde_json::to_string_pretty(data)
            .map_err(|e| ConfigError::Serialize(format!("Failed to serialize: {e}")))?;

        fs::write(path, content)
            .map_err(|e| ConfigError::Write(format!("Failed to write {}: {}", path.display(), e)))?;

        restrict_permissions(path).map_err(|e| {
            ConfigError::Write(format!(
                "Failed to set permissions on {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Restricts a file to owner read/write (mode 0600).
#[cfg(unix)]
pub(crate) fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms)
}

/// No-op on platforms without Unix permission bits.
#[cfg(not(unix))]
pub(crate) fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConnectionProfile;
    use tempfile::TempDir;

    fn create_test_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_config_dir(temp_dir.path().to_path_buf());
        (manager, temp_dir)
    }

    #[test]
    fn test_ensure_config_dir() {
        let (manager, _temp) = create_test_manager();
        assert!(manager.ensure_config_dir().is_ok());
        assert!(manager.config_dir().exists());
    }

    #[test]
    fn test_load_missing_registry_is_empty() {
        let (manager, _temp) = create_test_manager();
        let document = manager.load_registry().unwrap();
        assert!(document.connections.is_empty());
        assert!(document.recent.is_empty());
    }

    #[test]
    fn test_save_and_load_registry() {
        let (manager, _temp) = create_test_manager();

        let mut document = RegistryDocument::default();
        document.connections.insert(
            "server01".to_string(),
            ConnectionProfile {
                username: "admin".to_string(),
                ..ConnectionProfile::default()
            },
        );
        document.recent.push("server01".to_string());

        manager.save_registry(&document).unwrap();
        let loaded = manager.load_registry().unwrap();
        assert_eq!(loaded, document);
    }

    #[test]
    fn test_corrupt_registry_is_an_error() {
        let (manager, _temp) = create_test_manager();
        manager.ensure_config_dir().unwrap();
        fs::write(manager.registry_path(), "not json").unwrap();
        assert!(manager.load_registry().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_registry_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (manager, _temp) = create_test_manager();
        manager.save_registry(&RegistryDocument::default()).unwrap();

        let mode = fs::metadata(manager.registry_path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

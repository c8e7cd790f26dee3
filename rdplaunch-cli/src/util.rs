//! Shared utility functions used across command modules.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use rdplaunch_core::config::ConfigManager;
use rdplaunch_core::secret::{CredentialStore, FileStore, LibSecretBackend, StorageChoice};

use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Creates a tokio runtime for bridging into the async secret backends.
pub fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new().map_err(|e| CliError::Secret(format!("Runtime error: {e}")))
}

/// Opens the credential store, running backend detection unless the keyring
/// was disabled on the command line.
pub fn open_credential_store(
    config: &ConfigManager,
    no_keyring: bool,
    rt: &tokio::runtime::Runtime,
) -> CredentialStore {
    let file = FileStore::new(config.credentials_path());

    if no_keyring {
        return CredentialStore::new(None, file);
    }

    let decision = rt.block_on(rdplaunch_core::secret::choose_storage());
    match decision.choice {
        StorageChoice::Keyring => {
            CredentialStore::new(Some(Arc::new(LibSecretBackend::new())), file)
        }
        StorageChoice::File => CredentialStore::new(None, file),
    }
}

/// Formats a launch command for safe display by masking the password token.
pub fn format_command_for_log(program: &str, args: &[String]) -> String {
    let masked: Vec<String> = args
        .iter()
        .map(|arg| {
            if arg.starts_with("/p:") {
                "/p:****".to_string()
            } else {
                arg.clone()
            }
        })
        .collect();
    format!("{program} {}", masked.join(" "))
}

/// Asks the user a yes/no question on stdin.
pub fn confirm(prompt: &str) -> std::io::Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

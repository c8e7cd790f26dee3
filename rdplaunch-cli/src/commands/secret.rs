//! Secret command — credential backend status and clearing saved passwords.

use std::path::Path;
use std::sync::Arc;

use rdplaunch_core::secret::{
    CredentialStore, FileStore, LibSecretBackend, SecretServiceKind, StorageChoice, choose_storage,
};

use crate::error::CliError;
use crate::util::{confirm, create_config_manager, open_credential_store, runtime};

/// Secret status handler
pub fn cmd_status(config_path: Option<&Path>, no_keyring: bool) -> Result<(), CliError> {
    let config = create_config_manager(config_path)?;
    let rt = runtime()?;

    let decision = rt.block_on(choose_storage());
    let kind = match decision.kind {
        SecretServiceKind::SecretService => "Secret Service (libsecret)",
        SecretServiceKind::KdeWallet => "KDE Wallet",
        SecretServiceKind::Unavailable => "not available",
    };
    println!("Secret service:      {kind}");
    println!("Desktop environment: {:?}", decision.desktop);

    let storage = if no_keyring {
        "local credential file (keyring disabled with --no-keyring)"
    } else {
        match decision.choice {
            StorageChoice::Keyring => "system keyring",
            StorageChoice::File => "local credential file",
        }
    };
    println!("Password storage:    {storage}");

    // Reuse the decision above instead of detecting a second time
    let file = FileStore::new(config.credentials_path());
    let mut store = if no_keyring || decision.choice == StorageChoice::File {
        CredentialStore::new(None, file)
    } else {
        CredentialStore::new(Some(Arc::new(LibSecretBackend::new())), file)
    };
    let source = rt.block_on(store.load());
    println!("Saved passwords:     {} (loaded from {source:?})", store.len());

    Ok(())
}

/// Secret clear handler
pub fn cmd_clear(config_path: Option<&Path>, no_keyring: bool, yes: bool) -> Result<(), CliError> {
    if !yes && !confirm("Delete all saved passwords? This cannot be undone. [y/N] ")? {
        println!("Aborted");
        return Ok(());
    }

    let config = create_config_manager(config_path)?;
    let rt = runtime()?;

    let mut store = open_credential_store(&config, no_keyring, &rt);
    rt.block_on(store.load());
    rt.block_on(store.clear())
        .map_err(|e| CliError::Secret(e.to_string()))?;

    println!("All saved passwords have been cleared");
    Ok(())
}

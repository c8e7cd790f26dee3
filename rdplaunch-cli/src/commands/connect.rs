//! Connect command — launch a `FreeRDP` session to a remote host.

use std::path::Path;

use rdplaunch_core::protocol::{
    FREERDP_INSTALL_HINT, LaunchConfig, build_freerdp_args, detect_freerdp_binary,
};
use rdplaunch_core::registry::ConnectionRegistry;
use rdplaunch_core::secret::StorageSource;
use rdplaunch_core::session::SessionHandle;

use crate::cli::ConnectArgs;
use crate::error::CliError;
use crate::util::{create_config_manager, format_command_for_log, open_credential_store, runtime};

/// Connect command handler
pub fn cmd_connect(
    config_path: Option<&Path>,
    no_keyring: bool,
    args: &ConnectArgs,
) -> Result<(), CliError> {
    let host = args.host.trim();
    if host.is_empty() {
        return Err(CliError::Validation(
            "Please enter a hostname or IP address".to_string(),
        ));
    }

    let config = create_config_manager(config_path)?;
    let mut registry = ConnectionRegistry::load(config.clone());

    // Saved profile pre-fills username and domain, explicit flags win
    let profile = registry.get(host).cloned();
    let username = args
        .user
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .or_else(|| {
            profile
                .as_ref()
                .map(|p| p.username.clone())
                .filter(|u| !u.is_empty())
        })
        .ok_or_else(|| CliError::Validation("Please enter a username".to_string()))?;
    let domain = args
        .domain
        .clone()
        .or_else(|| profile.as_ref().map(|p| p.domain.clone()))
        .unwrap_or_default();

    let rt = runtime()?;
    let mut store = open_credential_store(&config, no_keyring, &rt);
    let source = rt.block_on(store.load());
    tracing::debug!(?source, "Loaded credential store");

    let stored = store.get(host, &username).map(str::to_string);
    let password = match stored {
        Some(stored) if !args.prompt => {
            println!("Using saved password for {username}@{host}");
            stored
        }
        _ => rpassword::prompt_password(format!("Password for {username}@{host}: "))?,
    };
    if password.is_empty() {
        return Err(CliError::Validation("Password is required".to_string()));
    }

    let options = registry.advanced_options(host);
    let launch = LaunchConfig::new(host, &username, password.clone())
        .with_domain(&domain)
        .with_options(options);
    launch
        .validate()
        .map_err(|e| CliError::Validation(e.to_string()))?;

    let freerdp_args = build_freerdp_args(&launch);

    if args.dry_run {
        let binary = detect_freerdp_binary().unwrap_or_else(|| "xfreerdp".to_string());
        println!("{}", format_command_for_log(&binary, &freerdp_args));
        return Ok(());
    }

    let binary = detect_freerdp_binary().ok_or_else(|| {
        CliError::ClientNotFound(format!("FreeRDP is not installed. {FREERDP_INSTALL_HINT}"))
    })?;

    registry
        .upsert(host, &username, &domain)
        .map_err(|e| CliError::Config(format!("Failed to save connection info: {e}")))?;

    if !args.no_save {
        match rt.block_on(store.save(host, &username, &password)) {
            Ok(StorageSource::Keyring) => {
                tracing::info!("Password saved to the system keyring");
            }
            Ok(StorageSource::File) => {
                tracing::info!("Password saved to the local credential file");
            }
            Err(e) => {
                // Degrade, never abort the connection
                eprintln!("Warning: the password could not be saved and will not be remembered: {e}");
            }
        }
    }

    println!("Connecting to {host} as {username}...");
    tracing::debug!(command = %format_command_for_log(&binary, &freerdp_args), "Launching client");

    let mut session = SessionHandle::spawn(&binary, &freerdp_args, host)
        .map_err(|e| CliError::Session(e.to_string()))?;
    let status = session
        .wait()
        .map_err(|e| CliError::Session(e.to_string()))?;

    if status.success() {
        Ok(())
    } else {
        Err(CliError::Session(format!(
            "{binary} exited with status {}",
            status.code().unwrap_or(-1)
        )))
    }
}

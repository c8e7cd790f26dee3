//! Command dispatch for the CLI.

mod connect;
mod options;
mod recent;
mod secret;

use std::path::Path;

use crate::cli::{Commands, SecretAction};
use crate::error::CliError;

/// Dispatches a parsed command to its handler.
pub fn dispatch(
    config_path: Option<&Path>,
    no_keyring: bool,
    command: Commands,
) -> Result<(), CliError> {
    match command {
        Commands::Connect(args) => connect::cmd_connect(config_path, no_keyring, &args),
        Commands::Recent => recent::cmd_recent(config_path),
        Commands::Options(args) => options::cmd_options(config_path, &args),
        Commands::Secret { action } => match action {
            SecretAction::Status => secret::cmd_status(config_path, no_keyring),
            SecretAction::Clear { yes } => secret::cmd_clear(config_path, no_keyring, yes),
        },
    }
}

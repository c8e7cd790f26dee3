//! `RDPLaunch` CLI - Command-line interface for the `RDPLaunch` session
//! launcher
//!
//! Provides commands for connecting to remote hosts through `FreeRDP`,
//! listing recent connections, managing per-host advanced options, and
//! managing saved passwords.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config_path = cli.config.as_deref();
    let result = commands::dispatch(config_path, cli.no_keyring, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

/// Initializes the tracing subscriber from the verbosity flags.
///
/// `RUST_LOG` wins over the flags when set.
fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// `RDPLaunch` command-line interface for launching `FreeRDP` sessions
#[derive(Parser)]
#[command(name = "rdplaunch-cli")]
#[command(author, version, about = "RDPLaunch command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, global = true, env = "RDPLAUNCH_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Store passwords in the local credential file instead of the system
    /// keyring
    #[arg(long, global = true)]
    pub no_keyring: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Connect to a remote host
    #[command(about = "Launch a FreeRDP session to a remote host")]
    Connect(ConnectArgs),

    /// List recent connections
    #[command(about = "List recent connections, most recent first")]
    Recent,

    /// Show or change per-host advanced options
    #[command(about = "Show or change advanced options for a host")]
    Options(OptionsArgs),

    /// Manage saved passwords
    #[command(about = "Manage saved passwords and the credential backend")]
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },
}

/// Arguments of the `connect` command.
#[derive(Args)]
pub struct ConnectArgs {
    /// Hostname or IP address
    pub host: String,

    /// Username for authentication (defaults to the saved profile)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Domain for authentication (defaults to the saved profile)
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Prompt for the password even if one is saved
    #[arg(long)]
    pub prompt: bool,

    /// Do not save the entered password
    #[arg(long)]
    pub no_save: bool,

    /// Show the command that would be executed without running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments of the `options` command.
///
/// Without any setter flag the current (merged) options are printed;
/// with setters the changed options are saved for the host first.
#[derive(Args)]
pub struct OptionsArgs {
    /// Hostname the options apply to
    pub host: String,

    /// Use fullscreen mode (true/false)
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Window resolution, e.g. 1920x1080 (used when fullscreen is false)
    #[arg(long)]
    pub resolution: Option<String>,

    /// Span the session across multiple monitors (true/false)
    #[arg(long)]
    pub multimon: Option<bool>,

    /// Comma-separated monitor indexes, e.g. "0,1"; empty for all monitors
    #[arg(long)]
    pub monitors: Option<String>,

    /// Disable font smoothing (true/false)
    #[arg(long)]
    pub disable_fonts: Option<bool>,

    /// Disable wallpaper (true/false)
    #[arg(long)]
    pub disable_wallpaper: Option<bool>,

    /// Disable themes (true/false)
    #[arg(long)]
    pub disable_themes: Option<bool>,

    /// Disable desktop composition (true/false)
    #[arg(long)]
    pub disable_aero: Option<bool>,

    /// Disable full window drag (true/false)
    #[arg(long)]
    pub disable_drag: Option<bool>,

    /// Enable compression (true/false)
    #[arg(long)]
    pub compression: Option<bool>,

    /// Audio mode: local, remote, or disabled
    #[arg(long)]
    pub audio: Option<String>,

    /// Share the clipboard (true/false)
    #[arg(long)]
    pub clipboard: Option<bool>,

    /// Share the home directory as a remote drive (true/false)
    #[arg(long)]
    pub redirect_drives: Option<bool>,

    /// Use network-level authentication (true/false)
    #[arg(long)]
    pub nla: Option<bool>,
}

/// Saved-password management subcommands
#[derive(Subcommand)]
pub enum SecretAction {
    /// Show credential backend status
    #[command(about = "Show the detected credential backend and entry count")]
    Status,

    /// Delete all saved passwords
    #[command(about = "Delete all saved passwords from every backend")]
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

//! `FreeRDP` command builder
//!
//! Builds the `FreeRDP` command-line argument list from connection
//! parameters and per-host advanced options. The token order is fixed so
//! that the produced command is reproducible and testable.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ProtocolError, ProtocolResult};
use crate::models::{AdvancedOptions, AudioMode};

/// Parameters for a single `FreeRDP` session launch.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// Target hostname or IP address
    pub host: String,
    /// Username for authentication
    pub username: String,
    /// Domain for authentication; empty means no domain argument
    pub domain: String,
    /// Password for authentication
    pub password: SecretString,
    /// Per-host advanced options
    pub options: AdvancedOptions,
}

impl LaunchConfig {
    /// Creates a launch configuration with default advanced options.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            domain: String::new(),
            password: SecretString::from(password.into()),
            options: AdvancedOptions::default(),
        }
    }

    /// Sets the domain
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Sets the advanced options
    #[must_use]
    pub fn with_options(mut self, options: AdvancedOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates the user-supplied connection parameters.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidConfig` for an empty hostname,
    /// username, or password.
    pub fn validate(&self) -> ProtocolResult<()> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidConfig(
                "Hostname cannot be empty".to_string(),
            ));
        }
        if self.username.trim().is_empty() {
            return Err(ProtocolError::InvalidConfig(
                "Username cannot be empty".to_string(),
            ));
        }
        if self.password.expose_secret().is_empty() {
            return Err(ProtocolError::InvalidConfig(
                "Password cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builds the `FreeRDP` argument list for a session launch.
///
/// The password is embedded verbatim in a `/p:` token, matching the
/// external client's CLI contract. Callers must mask that token in any
/// logged or displayed command line.
#[must_use]
pub fn build_freerdp_args(config: &LaunchConfig) -> Vec<String> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
    build_freerdp_args_with_home(config, &home)
}

/// Builds the `FreeRDP` argument list with an explicit home directory.
///
/// The home directory is only used for the `home` drive redirection token;
/// injecting it keeps the function deterministic for tests.
#[must_use]
pub fn build_freerdp_args_with_home(config: &LaunchConfig, home: &Path) -> Vec<String> {
    let options = &config.options;
    let mut args = vec![
        format!("/v:{}", config.host),
        format!("/u:{}", config.username),
    ];

    if !config.domain.is_empty() {
        args.push(format!("/d:{}", config.domain));
    }

    args.push(format!("/p:{}", config.password.expose_secret()));

    // Display sizing
    if options.fullscreen {
        args.push("/f".to_string());
    } else {
        args.push(format!("/size:{}", options.resolution));
    }

    // Multi-monitor
    if options.multimon {
        args.push("/multimon".to_string());
        if !options.selected_monitors.is_empty() {
            let monitors = options
                .selected_monitors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            args.push(format!("/monitors:{monitors}"));
        }
    }

    // Performance flags
    if options.disable_fonts {
        args.push("-fonts".to_string());
    }
    if options.disable_wallpaper {
        args.push("-wallpaper".to_string());
    }
    if options.disable_themes {
        args.push("-themes".to_string());
    }
    if options.disable_aero {
        args.push("-aero".to_string());
    }
    if options.disable_drag {
        args.push("-window-drag".to_string());
    }

    // Audio
    match options.audio_mode {
        AudioMode::Local => args.push("/sound:sys:alsa".to_string()),
        AudioMode::Remote => args.push("/audio-mode:1".to_string()),
        AudioMode::Disabled => args.push("/audio-mode:2".to_string()),
        AudioMode::Unknown => {}
    }

    // Clipboard
    if options.clipboard {
        args.push("+clipboard".to_string());
    }

    // Drive redirection
    if options.redirect_drives {
        args.push(format!("/drive:home,{}", home.display()));
    }

    // Certificate acceptance
    args.push("/cert-ignore".to_string());

    // Security mode
    if options.nla {
        args.push("/sec:nla".to_string());
    } else {
        args.push("/sec:rdp".to_string());
    }

    // Compression
    if options.compression {
        args.push("+compression".to_string());
    }

    args
}

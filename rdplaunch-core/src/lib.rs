//! `RDPLaunch` Core Library
//!
//! This crate provides the core functionality for the `RDPLaunch` FreeRDP
//! session launcher: per-host connection profiles, option resolution into
//! `FreeRDP` command lines, and credential storage with a Secret Service to
//! local-file fallback chain.
//!
//! # Crate Structure
//!
//! - [`models`] - Core data structures (profiles, advanced options)
//! - [`config`] - Configuration document persistence
//! - [`registry`] - Connection registry and recent-connections list
//! - [`protocol`] - `FreeRDP` command construction and client detection
//! - [`secret`] - Credential storage (libsecret, file fallback)
//! - [`session`] - Client process handling

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod protocol;
pub mod registry;
pub mod secret;
pub mod session;

pub use config::ConfigManager;
pub use error::{
    ConfigError, ConfigResult, ProtocolError, ProtocolResult, RdpLaunchError, SecretError,
    SecretResult, SessionError, SessionResult,
};
pub use models::{
    AdvancedOptions, AudioMode, ConnectionProfile, RegistryDocument, Resolution,
    parse_monitor_list,
};
pub use protocol::{
    FREERDP_INSTALL_HINT, LaunchConfig, build_freerdp_args, build_freerdp_args_with_home,
    detect_freerdp_binary,
};
pub use registry::{ConnectionRegistry, MAX_RECENT};
pub use secret::{
    CredentialMap, CredentialStore, DesktopEnvironment, FileStore, LibSecretBackend,
    SecretBackend, SecretServiceKind, StorageChoice, StorageDecision, StorageSource,
    choose_storage, desktop_environment, detect_backend_kind, is_secret_tool_available,
    select_storage,
};
pub use session::{GRACEFUL_SHUTDOWN_SECS, SessionHandle};

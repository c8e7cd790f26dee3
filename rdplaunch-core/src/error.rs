//! Error types for `RDPLaunch`
//!
//! This module defines all error types used throughout the `RDPLaunch`
//! application, providing descriptive error messages for configuration,
//! command construction, secret storage, and session management operations.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for `RDPLaunch` operations
#[derive(Debug, Error)]
pub enum RdpLaunchError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Command construction and validation errors
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Secret storage errors (Secret Service, credential file)
    #[error("Secret storage error: {0}")]
    Secret(#[from] SecretError),

    /// Session management errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to configuration file operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {reason}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// The reason for validation failure
        reason: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Failed to write configuration file
    #[error("Failed to write configuration: {0}")]
    Write(String),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),
}

/// Errors related to command construction for the external client
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Invalid connection parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Required client binary not found
    #[error("Client not found: {0}")]
    ClientNotFound(String),
}

/// Errors related to secret storage operations
#[derive(Debug, Error)]
pub enum SecretError {
    /// Failed to store credentials
    #[error("Failed to store credentials: {0}")]
    StoreFailed(String),

    /// Failed to retrieve credentials
    #[error("Failed to retrieve credentials: {0}")]
    RetrieveFailed(String),

    /// Failed to delete credentials
    #[error("Failed to delete credentials: {0}")]
    DeleteFailed(String),

    /// Secret backend not available
    #[error("Secret backend not available: {0}")]
    BackendUnavailable(String),

    /// libsecret-specific error
    #[error("libsecret error: {0}")]
    LibSecret(String),
}

/// Errors related to session process management
#[derive(Debug, Error)]
pub enum SessionError {
    /// Failed to start the client process
    #[error("Failed to start session: {0}")]
    StartFailed(String),

    /// Failed to terminate the client process
    #[error("Failed to terminate session: {0}")]
    TerminateFailed(String),

    /// Process management error
    #[error("Process error: {0}")]
    Process(String),
}

/// Result type alias for `RDPLaunch` operations
pub type Result<T> = std::result::Result<T, RdpLaunchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for protocol operations
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// Result type alias for secret operations
pub type SecretResult<T> = std::result::Result<T, SecretError>;

/// Result type alias for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

//! CLI error types and exit codes.

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, validation, or other non-connection
    /// errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Connection failure - the client could not be started or exited with
    /// an error
    pub const CONNECTION_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input
    #[error("{0}")]
    Validation(String),

    /// Secret backend error
    #[error("Secret error: {0}")]
    Secret(String),

    /// Session error
    #[error("Session error: {0}")]
    Session(String),

    /// Required client binary not found
    #[error("{0}")]
    ClientNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, validation, secrets, IO)
    /// - 2: Connection failure (client missing or session failed)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Session(_) | Self::ClientNotFound(_) => exit_codes::CONNECTION_FAILURE,
            Self::Config(_) | Self::Validation(_) | Self::Secret(_) | Self::Io(_) => {
                exit_codes::GENERAL_ERROR
            }
        }
    }
}

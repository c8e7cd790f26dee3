//! Secret management module for `RDPLaunch`
//!
//! Saved passwords live in one of two places:
//! - the platform Secret Service, addressed through `secret-tool`
//!   (libsecret), holding the whole credential map as a single JSON blob
//!   under one named entry, or
//! - a local `credentials.json` restricted to owner read/write.
//!
//! The [`CredentialStore`] prefers the Secret Service and falls back to the
//! file transparently: backend failures degrade to "password not remembered",
//! never to an error the caller has to handle at connect time.

mod backend;
mod detection;
mod file;
mod libsecret;
mod store;

pub use backend::SecretBackend;
pub use detection::{
    DesktopEnvironment, SecretServiceKind, StorageChoice, StorageDecision, choose_storage,
    desktop_environment, detect_backend_kind, select_storage,
};
pub use file::FileStore;
pub use libsecret::{LibSecretBackend, is_secret_tool_available};
pub use store::{CredentialMap, CredentialStore, StorageSource};

//! Secret Service capability detection and storage selection policy.
//!
//! The selection rule mirrors a long-standing annoyance on mixed desktops:
//! KDE Wallet registers itself as the Secret Service on some setups and then
//! pops wallet dialogs on GNOME/XFCE sessions. When that combination is
//! detected, a generic Secret Service entry is probed once; if the probe
//! fails, passwords go to file storage and the decision is logged rather
//! than retried.

use super::backend::SecretBackend;
use super::libsecret::{LibSecretBackend, is_secret_tool_available};

/// Desktop environment of the running session, from `XDG_CURRENT_DESKTOP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopEnvironment {
    /// KDE Plasma
    Kde,
    /// GNOME
    Gnome,
    /// XFCE
    Xfce,
    /// Anything else (or the variable is unset)
    Other,
}

/// Kind of Secret Service provider found on the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretServiceKind {
    /// A generic Secret Service provider (e.g. GNOME Keyring)
    SecretService,
    /// KDE Wallet acting as the Secret Service provider
    KdeWallet,
    /// No usable Secret Service (`secret-tool` missing)
    Unavailable,
}

/// Where passwords should be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageChoice {
    /// The platform keyring via libsecret
    Keyring,
    /// The local owner-only credential file
    File,
}

/// Outcome of storage selection, kept for status output and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageDecision {
    /// Detected Secret Service provider kind
    pub kind: SecretServiceKind,
    /// Detected desktop environment
    pub desktop: DesktopEnvironment,
    /// Selected storage
    pub choice: StorageChoice,
}

/// Reads the desktop environment from `XDG_CURRENT_DESKTOP`.
#[must_use]
pub fn desktop_environment() -> DesktopEnvironment {
    let desktop = std::env::var("XDG_CURRENT_DESKTOP").unwrap_or_default();
    desktop_environment_from(&desktop)
}

fn desktop_environment_from(value: &str) -> DesktopEnvironment {
    let lower = value.to_lowercase();
    if lower.contains("kde") {
        DesktopEnvironment::Kde
    } else if lower.contains("gnome") {
        DesktopEnvironment::Gnome
    } else if lower.contains("xfce") {
        DesktopEnvironment::Xfce
    } else {
        DesktopEnvironment::Other
    }
}

/// Detects the Secret Service provider kind.
///
/// `secret-tool` missing means no Secret Service at all. A running KDE
/// Wallet daemon is reported as [`SecretServiceKind::KdeWallet`] so the
/// selection policy can decide whether to trust it.
pub async fn detect_backend_kind() -> SecretServiceKind {
    if !is_secret_tool_available().await {
        return SecretServiceKind::Unavailable;
    }
    if kwallet_daemon_running().await {
        SecretServiceKind::KdeWallet
    } else {
        SecretServiceKind::SecretService
    }
}

/// Checks whether a KDE Wallet daemon is running.
async fn kwallet_daemon_running() -> bool {
    for daemon in ["kwalletd6", "kwalletd5"] {
        let running = tokio::process::Command::new("pgrep")
            .args(["-x", daemon])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false);
        if running {
            return true;
        }
    }
    false
}

/// Pure storage selection policy.
///
/// `generic_service_ok` reports whether forcing a generic Secret Service
/// entry worked; it only matters for the KDE-Wallet-on-foreign-desktop case.
#[must_use]
pub const fn select_storage(
    kind: SecretServiceKind,
    desktop: DesktopEnvironment,
    generic_service_ok: bool,
) -> StorageChoice {
    match kind {
        SecretServiceKind::Unavailable => StorageChoice::File,
        SecretServiceKind::SecretService => StorageChoice::Keyring,
        SecretServiceKind::KdeWallet => match desktop {
            DesktopEnvironment::Kde => StorageChoice::Keyring,
            _ if generic_service_ok => StorageChoice::Keyring,
            _ => StorageChoice::File,
        },
    }
}

/// Detects the environment and selects the credential storage.
///
/// The probe (a throwaway store/clear round-trip) only runs for the
/// KDE-Wallet-on-foreign-desktop case. The decision is logged once; callers
/// must not retry it on every operation.
pub async fn choose_storage() -> StorageDecision {
    let kind = detect_backend_kind().await;
    let desktop = desktop_environment();

    let generic_service_ok =
        if kind == SecretServiceKind::KdeWallet && desktop != DesktopEnvironment::Kde {
            probe_generic_service().await
        } else {
            true
        };

    let choice = select_storage(kind, desktop, generic_service_ok);
    tracing::info!(?kind, ?desktop, ?choice, "Selected credential storage");
    StorageDecision {
        kind,
        desktop,
        choice,
    }
}

/// Probes the generic Secret Service with a throwaway entry.
async fn probe_generic_service() -> bool {
    let probe = LibSecretBackend::with_key("probe");
    match probe.store("ok").await {
        Ok(()) => {
            let _ = probe.clear().await;
            true
        }
        Err(e) => {
            tracing::warn!(%e, "Generic Secret Service probe failed, using file storage");
            false
        }
    }
}

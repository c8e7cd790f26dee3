//! Connection registry: per-host profiles and the recent-connections list.
//!
//! The registry owns the persisted configuration document. Every mutating
//! operation rewrites the whole document immediately, so the on-disk state
//! always reflects the in-memory state.

use chrono::Local;

use crate::config::ConfigManager;
use crate::error::ConfigResult;
use crate::models::{AdvancedOptions, ConnectionProfile, RegistryDocument};

/// Maximum number of entries kept in the recent-connections list
pub const MAX_RECENT: usize = 10;

/// Format of the `last_used` timestamp
const LAST_USED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// In-memory connection registry backed by the configuration document.
#[derive(Debug)]
pub struct ConnectionRegistry {
    config: ConfigManager,
    document: RegistryDocument,
}

impl ConnectionRegistry {
    /// Loads the registry from the configuration directory.
    ///
    /// A missing document yields an empty registry. An unreadable or corrupt
    /// document is logged and also yields an empty registry: startup never
    /// fails on a bad config file.
    #[must_use]
    pub fn load(config: ConfigManager) -> Self {
        let document = match config.load_registry() {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(%e, "Could not load the connection registry, starting empty");
                RegistryDocument::default()
            }
        };
        Self { config, document }
    }

    /// Creates a registry from an already loaded document.
    ///
    /// Useful for tests that want to start from a known state.
    #[must_use]
    pub const fn with_document(config: ConfigManager, document: RegistryDocument) -> Self {
        Self { config, document }
    }

    /// Returns the profile for a hostname, if one exists.
    #[must_use]
    pub fn get(&self, hostname: &str) -> Option<&ConnectionProfile> {
        self.document.connections.get(hostname)
    }

    /// Records a confirmed connection to a host.
    ///
    /// Creates or updates the profile, stamps `last_used` with the current
    /// local time, and moves the hostname to the front of the recent list
    /// (deduplicated, capped at [`MAX_RECENT`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be persisted.
    pub fn upsert(&mut self, hostname: &str, username: &str, domain: &str) -> ConfigResult<()> {
        let profile = self
            .document
            .connections
            .entry(hostname.to_string())
            .or_default();
        profile.username = username.to_string();
        profile.domain = domain.to_string();
        profile.last_used = Local::now().format(LAST_USED_FORMAT).to_string();

        self.document.recent.retain(|h| h != hostname);
        self.document.recent.insert(0, hostname.to_string());
        self.document.recent.truncate(MAX_RECENT);

        self.save()
    }

    /// Returns the advanced options for a host, merged over defaults.
    ///
    /// Hosts without explicitly saved options get the documented defaults.
    #[must_use]
    pub fn advanced_options(&self, hostname: &str) -> AdvancedOptions {
        self.document
            .connections
            .get(hostname)
            .and_then(|profile| profile.advanced.clone())
            .unwrap_or_default()
    }

    /// Saves advanced options for a host.
    ///
    /// A skeleton profile is created for a hostname that has never connected.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be persisted.
    pub fn set_advanced_options(
        &mut self,
        hostname: &str,
        options: AdvancedOptions,
    ) -> ConfigResult<()> {
        self.document
            .connections
            .entry(hostname.to_string())
            .or_default()
            .advanced = Some(options);
        self.save()
    }

    /// Returns the recent hostnames, most-recently-used first.
    #[must_use]
    pub fn recent(&self) -> &[String] {
        &self.document.recent
    }

    /// Persists the whole document.
    fn save(&self) -> ConfigResult<()> {
        self.config.save_registry(&self.document)
    }
}

//! Recent command — list recent connections.

use std::path::Path;

use rdplaunch_core::registry::ConnectionRegistry;

use crate::error::CliError;
use crate::util::create_config_manager;

/// Recent command handler
pub fn cmd_recent(config_path: Option<&Path>) -> Result<(), CliError> {
    let config = create_config_manager(config_path)?;
    let registry = ConnectionRegistry::load(config);

    if registry.recent().is_empty() {
        println!("No recent connections");
        return Ok(());
    }

    println!("{:<28} {:<20} {:<14} {}", "HOST", "USER", "DOMAIN", "LAST USED");
    for hostname in registry.recent() {
        if let Some(profile) = registry.get(hostname) {
            println!(
                "{:<28} {:<20} {:<14} {}",
                hostname, profile.username, profile.domain, profile.last_used
            );
        }
    }

    Ok(())
}

//! Core data structures for connection profiles and per-host options.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-host connection record.
///
/// A profile is created on the first confirmed connection to a host and
/// updated in place afterwards. Clearing saved passwords does not remove
/// profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    /// Username used for the last connection
    #[serde(default)]
    pub username: String,
    /// Windows domain; empty means no domain
    #[serde(default)]
    pub domain: String,
    /// Local time of the last successful connect, `YYYY-MM-DD HH:MM:SS`
    #[serde(default)]
    pub last_used: String,
    /// Advanced options, absent until explicitly saved for the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced: Option<AdvancedOptions>,
}

/// The persisted configuration document: all known profiles plus the
/// recent-connections list (most-recently-used first, capped at 10).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDocument {
    /// Profiles keyed by hostname (case-sensitive)
    #[serde(default)]
    pub connections: HashMap<String, ConnectionProfile>,
    /// Recent hostnames, MRU-first
    #[serde(default)]
    pub recent: Vec<String>,
}

/// Per-host advanced session options.
///
/// Every field carries a serde default, so a partial stored object merges
/// over the documented defaults on deserialization. A stored default value
/// and an absent key are indistinguishable after a round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedOptions {
    /// Use fullscreen mode instead of a fixed-size window
    #[serde(default = "default_true")]
    pub fullscreen: bool,
    /// Window resolution, only used when `fullscreen` is false
    #[serde(default)]
    pub resolution: Resolution,
    /// Span the session across multiple monitors
    #[serde(default)]
    pub multimon: bool,
    /// Monitor indexes to use; empty means all monitors
    #[serde(default)]
    pub selected_monitors: Vec<u32>,
    /// Disable font smoothing
    #[serde(default = "default_true")]
    pub disable_fonts: bool,
    /// Disable wallpaper
    #[serde(default = "default_true")]
    pub disable_wallpaper: bool,
    /// Disable themes
    #[serde(default = "default_true")]
    pub disable_themes: bool,
    /// Disable desktop composition
    #[serde(default = "default_true")]
    pub disable_aero: bool,
    /// Disable full window drag
    #[serde(default = "default_true")]
    pub disable_drag: bool,
    /// Enable bulk compression
    #[serde(default = "default_true")]
    pub compression: bool,
    /// Where session audio is played
    #[serde(default)]
    pub audio_mode: AudioMode,
    /// Share the clipboard with the remote session
    #[serde(default = "default_true")]
    pub clipboard: bool,
    /// Expose the local home directory as a remote drive
    #[serde(default)]
    pub redirect_drives: bool,
    /// Use network-level authentication instead of legacy RDP security
    #[serde(default = "default_true")]
    pub nla: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for AdvancedOptions {
    fn default() -> Self {
        Self {
            fullscreen: true,
            resolution: Resolution::default(),
            multimon: false,
            selected_monitors: Vec::new(),
            disable_fonts: true,
            disable_wallpaper: true,
            disable_themes: true,
            disable_aero: true,
            disable_drag: true,
            compression: true,
            audio_mode: AudioMode::default(),
            clipboard: true,
            redirect_drives: false,
            nla: true,
        }
    }
}

/// Fixed set of supported window resolutions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// 1920x1080
    #[default]
    #[serde(rename = "1920x1080")]
    R1920x1080,
    /// 1680x1050
    #[serde(rename = "1680x1050")]
    R1680x1050,
    /// 1600x900
    #[serde(rename = "1600x900")]
    R1600x900,
    /// 1440x900
    #[serde(rename = "1440x900")]
    R1440x900,
    /// 1366x768
    #[serde(rename = "1366x768")]
    R1366x768,
    /// 1280x1024
    #[serde(rename = "1280x1024")]
    R1280x1024,
    /// 1280x720
    #[serde(rename = "1280x720")]
    R1280x720,
    /// 1024x768
    #[serde(rename = "1024x768")]
    R1024x768,
}

impl Resolution {
    /// All supported resolutions, largest first
    pub const ALL: [Self; 8] = [
        Self::R1920x1080,
        Self::R1680x1050,
        Self::R1600x900,
        Self::R1440x900,
        Self::R1366x768,
        Self::R1280x1024,
        Self::R1280x720,
        Self::R1024x768,
    ];

    /// Returns the `WIDTHxHEIGHT` string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::R1920x1080 => "1920x1080",
            Self::R1680x1050 => "1680x1050",
            Self::R1600x900 => "1600x900",
            Self::R1440x900 => "1440x900",
            Self::R1366x768 => "1366x768",
            Self::R1280x1024 => "1280x1024",
            Self::R1280x720 => "1280x720",
            Self::R1024x768 => "1024x768",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|r| r.as_str() == s)
            .copied()
            .ok_or_else(|| ConfigError::Validation {
                field: "resolution".to_string(),
                reason: format!("unsupported resolution: {s}"),
            })
    }
}

/// Where session audio is played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioMode {
    /// Play on this computer
    #[default]
    Local,
    /// Play on the remote computer
    Remote,
    /// Do not play audio
    Disabled,
    /// Unrecognized mode from an externally edited config; resolves to no
    /// audio argument when the command is built
    #[serde(other)]
    Unknown,
}

impl FromStr for AudioMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            "disabled" => Ok(Self::Disabled),
            _ => Err(ConfigError::Validation {
                field: "audio_mode".to_string(),
                reason: format!("unsupported audio mode: {s} (expected local, remote, or disabled)"),
            }),
        }
    }
}

/// Parses a comma-separated monitor list from free-text input.
///
/// Any malformed token discards the entire parse and yields an empty list,
/// which means "all monitors". Partial results are never returned.
#[must_use]
pub fn parse_monitor_list(text: &str) -> Vec<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split(',')
        .map(|token| token.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advanced_options_defaults() {
        let opts = AdvancedOptions::default();
        assert!(opts.fullscreen);
        assert_eq!(opts.resolution, Resolution::R1920x1080);
        assert!(!opts.multimon);
        assert!(opts.selected_monitors.is_empty());
        assert!(opts.disable_fonts);
        assert!(opts.compression);
        assert_eq!(opts.audio_mode, AudioMode::Local);
        assert!(opts.clipboard);
        assert!(!opts.redirect_drives);
        assert!(opts.nla);
    }

    #[test]
    fn test_partial_options_merge_over_defaults() {
        let opts: AdvancedOptions =
            serde_json::from_str(r#"{"fullscreen": false, "resolution": "1024x768"}"#).unwrap();
        assert!(!opts.fullscreen);
        assert_eq!(opts.resolution, Resolution::R1024x768);
        // Everything not stored keeps its documented default
        assert!(opts.disable_wallpaper);
        assert!(opts.nla);
        assert_eq!(opts.audio_mode, AudioMode::Local);
    }

    #[test]
    fn test_unknown_audio_mode_deserializes() {
        let opts: AdvancedOptions = serde_json::from_str(r#"{"audio_mode": "surround"}"#).unwrap();
        assert_eq!(opts.audio_mode, AudioMode::Unknown);
    }

    #[test]
    fn test_resolution_round_trip() {
        for resolution in Resolution::ALL {
            let json = serde_json::to_string(&resolution).unwrap();
            assert_eq!(json, format!("\"{resolution}\""));
            let parsed: Resolution = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, resolution);
            assert_eq!(resolution.as_str().parse::<Resolution>().unwrap(), resolution);
        }
        assert!("800x600".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_parse_monitor_list() {
        assert_eq!(parse_monitor_list("0,1"), vec![0, 1]);
        assert_eq!(parse_monitor_list(" 2 , 0 , 1 "), vec![2, 0, 1]);
        assert!(parse_monitor_list("").is_empty());
        assert!(parse_monitor_list("   ").is_empty());
    }

    #[test]
    fn test_parse_monitor_list_discards_entire_parse_on_bad_token() {
        assert!(parse_monitor_list("0,1,x").is_empty());
        assert!(parse_monitor_list("-1,2").is_empty());
        assert!(parse_monitor_list("0,,1").is_empty());
    }

    #[test]
    fn test_registry_document_round_trip() {
        let mut document = RegistryDocument::default();
        document.connections.insert(
            "server01".to_string(),
            ConnectionProfile {
                username: "admin".to_string(),
                domain: "CORP".to_string(),
                last_used: "2025-11-03 09:14:55".to_string(),
                advanced: Some(AdvancedOptions::default()),
            },
        );
        document.recent.push("server01".to_string());

        let json = serde_json::to_string_pretty(&document).unwrap();
        let loaded: RegistryDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, document);
    }
}

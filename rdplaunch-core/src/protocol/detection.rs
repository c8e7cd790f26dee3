//! Runtime detection of the installed `FreeRDP` client binary.

use std::path::PathBuf;
use std::process::Command;

/// `FreeRDP` binaries in order of preference (3.x first)
const FREERDP_BINARIES: [&str; 2] = ["xfreerdp3", "xfreerdp"];

/// Hint shown to the user when no `FreeRDP` binary is installed
pub const FREERDP_INSTALL_HINT: &str =
    "Install the freerdp3-x11 (or freerdp2-x11) package and try again.";

/// Detects the installed `FreeRDP` binary.
///
/// Prefers `xfreerdp3` over `xfreerdp`. Returns `None` when neither is
/// found in `PATH`.
#[must_use]
pub fn detect_freerdp_binary() -> Option<String> {
    FREERDP_BINARIES
        .iter()
        .find(|binary| which_binary(binary).is_some())
        .map(|binary| (*binary).to_string())
}

/// Finds a binary in `PATH` using the `which` command.
fn which_binary(binary: &str) -> Option<PathBuf> {
    let output = Command::new("which").arg(binary).output().ok()?;

    if output.status.success() {
        let path_str = String::from_utf8_lossy(&output.stdout);
        let path = path_str.trim();
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_which_binary_finds_common_tool() {
        // `sh` exists on any Unix system this crate targets
        assert!(which_binary("sh").is_some());
    }

    #[test]
    fn test_which_binary_missing_tool() {
        assert!(which_binary("definitely-not-a-real-binary-name").is_none());
    }
}

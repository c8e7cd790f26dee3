//! Command construction for the external `FreeRDP` client.
//!
//! `RDPLaunch` does not implement the RDP protocol itself; it resolves
//! per-host options into an argument vector for `xfreerdp`/`xfreerdp3` and
//! delegates the session to that binary.

mod detection;
mod freerdp;

pub use detection::{FREERDP_INSTALL_HINT, detect_freerdp_binary};
pub use freerdp::{LaunchConfig, build_freerdp_args, build_freerdp_args_with_home};

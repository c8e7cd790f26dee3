//! Session process handling for the external client.
//!
//! The client is launched fire-and-forget; the handle only exists so the
//! front-end can wait for exit and, on user cancellation, terminate the
//! child gracefully before force-killing it.

use std::process::{Child, Command, ExitStatus};
use std::time::{Duration, Instant};

use crate::error::{SessionError, SessionResult};

/// Seconds a terminated client gets to exit before it is force-killed
pub const GRACEFUL_SHUTDOWN_SECS: u64 = 5;

/// Poll interval while waiting for a terminated client to exit
const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Handle to a running client process.
#[derive(Debug)]
pub struct SessionHandle {
    child: Child,
    target: String,
}

impl SessionHandle {
    /// Spawns the client process.
    ///
    /// Standard streams are inherited so client diagnostics stay visible.
    ///
    /// # Errors
    /// Returns `SessionError::StartFailed` if the process cannot be spawned.
    pub fn spawn(program: &str, args: &[String], target: &str) -> SessionResult<Self> {
        let child = Command::new(program)
            .args(args)
            .spawn()
            .map_err(|e| SessionError::StartFailed(format!("Failed to launch {program}: {e}")))?;

        tracing::info!(host = %target, pid = child.id(), "Remote desktop client started");

        Ok(Self {
            child,
            target: target.to_string(),
        })
    }

    /// Process id of the client.
    #[must_use]
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Hostname this session was launched against.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Blocks until the client exits.
    ///
    /// # Errors
    /// Returns `SessionError::Process` if waiting fails.
    pub fn wait(&mut self) -> SessionResult<ExitStatus> {
        self.child
            .wait()
            .map_err(|e| SessionError::Process(format!("Failed to wait for client: {e}")))
    }

    /// Checks whether the client has exited without blocking.
    ///
    /// # Errors
    /// Returns `SessionError::Process` if the status cannot be queried.
    pub fn try_wait(&mut self) -> SessionResult<Option<ExitStatus>> {
        self.child
            .try_wait()
            .map_err(|e| SessionError::Process(format!("Failed to poll client: {e}")))
    }

    /// Terminates the client with the default grace period.
    ///
    /// # Errors
    /// Returns `SessionError::TerminateFailed` if the process can neither be
    /// terminated nor killed.
    pub fn terminate(&mut self) -> SessionResult<()> {
        self.shutdown(Duration::from_secs(GRACEFUL_SHUTDOWN_SECS))
    }

    /// Terminates the client: graceful signal first, force kill after the
    /// grace period.
    ///
    /// # Errors
    /// Returns `SessionError::TerminateFailed` if the process can neither be
    /// terminated nor killed.
    pub fn shutdown(&mut self, grace: Duration) -> SessionResult<()> {
        if self.try_wait()?.is_some() {
            return Ok(());
        }

        #[cfg(unix)]
        {
            // std only exposes SIGKILL; send SIGTERM through kill(1)
            let _ = Command::new("kill").arg(self.child.id().to_string()).status();

            let deadline = Instant::now() + grace;
            while Instant::now() < deadline {
                if self.try_wait()?.is_some() {
                    tracing::info!(host = %self.target, "Client exited after terminate");
                    return Ok(());
                }
                std::thread::sleep(SHUTDOWN_POLL_INTERVAL);
            }
            tracing::warn!(host = %self.target, "Client did not exit in time, killing");
        }

        self.child
            .kill()
            .map_err(|e| SessionError::TerminateFailed(format!("Failed to kill client: {e}")))?;
        self.child
            .wait()
            .map_err(|e| SessionError::TerminateFailed(format!("Failed to reap client: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_wait() {
        let mut session = SessionHandle::spawn("true", &[], "server01").unwrap();
        assert_eq!(session.target(), "server01");
        let status = session.wait().unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_spawn_missing_binary_fails() {
        let result = SessionHandle::spawn("definitely-not-a-real-binary-name", &[], "server01");
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_shutdown_terminates_long_running_child() {
        let args = vec!["60".to_string()];
        let mut session = SessionHandle::spawn("sleep", &args, "server01").unwrap();

        let started = Instant::now();
        session.shutdown(Duration::from_secs(2)).unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(session.try_wait().unwrap().is_some());
    }

    #[test]
    fn test_shutdown_after_exit_is_a_no_op() {
        let mut session = SessionHandle::spawn("true", &[], "server01").unwrap();
        session.wait().unwrap();
        session.shutdown(Duration::from_secs(1)).unwrap();
    }
}

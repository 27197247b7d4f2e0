//! External process invocation.
//!
//! Children are started detached from the event loop: nothing waits on them
//! and their exit status is only logged when they are reaped.

use std::ffi::OsStr;
use std::io;
use std::process::{Child, Command};

use tracing::{debug, warn};

/// Starts external programs on behalf of the tray actions.
#[cfg_attr(test, mockall::automock)]
pub trait Launcher {
    /// Run `opener` with a single `target` argument.
    fn open(&mut self, opener: &str, target: &OsStr) -> io::Result<()>;

    /// Run `program` with no arguments.
    fn spawn(&mut self, program: &str) -> io::Result<()>;

    /// Collect children that have exited. Never blocks.
    fn reap(&mut self);
}

/// [`Launcher`] backed by `std::process::Command`.
#[derive(Debug, Default)]
pub struct ProcessLauncher {
    children: Vec<Child>,
}

impl ProcessLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of children not yet reaped.
    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.children.len()
    }

    fn start(&mut self, mut command: Command) -> io::Result<()> {
        let child = command.spawn()?;
        debug!(pid = child.id(), "Started child process");
        self.children.push(child);
        Ok(())
    }
}

impl Launcher for ProcessLauncher {
    fn open(&mut self, opener: &str, target: &OsStr) -> io::Result<()> {
        let mut command = Command::new(opener);
        command.arg(target);
        self.start(command)
    }

    fn spawn(&mut self, program: &str) -> io::Result<()> {
        self.start(Command::new(program))
    }

    fn reap(&mut self) {
        self.children.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                debug!(pid = child.id(), %status, "Child process exited");
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!(pid = child.id(), error = %e, "Failed to poll child process");
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_spawn_missing_program_fails() {
        let mut launcher = ProcessLauncher::new();
        let result = launcher.spawn("syncrop-indicator-test-no-such-program");
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
        assert_eq!(launcher.pending(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_open_passes_target_verbatim_and_reaps() {
        let mut launcher = ProcessLauncher::new();
        launcher
            .open("true", OsStr::new("~/.syncrop/syncrop.log"))
            .unwrap();
        assert_eq!(launcher.pending(), 1);

        let deadline = Instant::now() + Duration::from_secs(5);
        while launcher.pending() > 0 && Instant::now() < deadline {
            launcher.reap();
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(launcher.pending(), 0);
    }
}

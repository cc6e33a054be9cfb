//! Process termination by PID.

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Sends termination signals to processes.
///
/// Both calls are thin signal deliveries: neither waits for the target to
/// exit nor verifies that it did. The caller observes the outcome through
/// the next discovery cycle.
#[derive(Debug, Default)]
pub struct ProcessKiller;

impl ProcessKiller {
    /// Create a new process killer.
    pub fn new() -> Self {
        Self
    }

    /// Request cooperative shutdown with SIGTERM. The target may ignore it.
    pub fn terminate(&self, pid: u32) -> Result<()> {
        self.send(pid, Signal::SIGTERM)
    }

    /// Unconditionally end the target with SIGKILL.
    pub fn force_terminate(&self, pid: u32) -> Result<()> {
        self.send(pid, Signal::SIGKILL)
    }

    fn send(&self, pid: u32, signal: Signal) -> Result<()> {
        debug!(pid, signal = %signal, "sending signal");

        kill(Pid::from_raw(pid as i32), signal).map_err(|errno| {
            warn!(pid, signal = %signal, %errno, "signal delivery failed");
            Error::Signal {
                pid,
                reason: reason_for(errno).to_string(),
            }
        })
    }
}

fn reason_for(errno: Errno) -> &'static str {
    match errno {
        Errno::ESRCH => "no such process",
        Errno::EPERM => "permission denied",
        _ => errno.desc(),
    }
}

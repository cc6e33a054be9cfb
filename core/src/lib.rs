//! Portscope Core Library
//!
//! Discovers local processes bound to network ports and terminates them.
//! Provides functionality to:
//! - Enumerate listening TCP/UDP sockets by shelling out to `lsof`
//! - Parse the loosely-structured tabular output into listener records
//! - Send termination signals to a process by PID (SIGTERM or SIGKILL)
//!
//! Every discovery cycle produces a fresh, complete record set; nothing is
//! cached or patched incrementally. Malformed rows in the external command's
//! output are dropped individually rather than failing the cycle, because
//! the format is not stable across platform versions.
//!
//! # Platform Support
//! Unix only: discovery scrapes `lsof` output and termination delivers
//! POSIX signals.

pub mod error;
pub mod killer;
pub mod models;
pub mod scanner;

// Re-export commonly used types
pub use error::{Error, Result};
pub use killer::ProcessKiller;
pub use models::{ListenerRecord, Protocol};
pub use scanner::{LsofScanner, Scanner};

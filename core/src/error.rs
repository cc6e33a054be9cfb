//! Error types for the portscope-core library.

use thiserror::Error;

/// Result type alias for portscope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during port discovery and process termination.
#[derive(Error, Debug)]
pub enum Error {
    /// The port enumeration command could not run or exited with an
    /// unexpected status.
    #[error("discovery failed: {0}")]
    DiscoveryFailed(String),

    /// A termination signal could not be delivered.
    #[error("failed to signal process {pid}: {reason}")]
    Signal { pid: u32, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Data models for listening sockets and their owning processes.

mod listener;

pub use listener::{ListenerRecord, Protocol};

//! Listener record data structures.

use serde::{Deserialize, Serialize};

/// Transport protocol of a listening socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    /// Parse a protocol label as reported by the enumeration command.
    ///
    /// Labels are matched case-insensitively; anything other than TCP or
    /// UDP yields `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "TCP" => Some(Protocol::Tcp),
            "UDP" => Some(Protocol::Udp),
            _ => None,
        }
    }

    /// Uppercase label for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One observed listening endpoint.
///
/// Records are produced by a single discovery cycle and are immutable once
/// built; every refresh replaces the whole set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerRecord {
    /// Transport protocol the socket listens on.
    pub protocol: Protocol,

    /// Port number, 1-65535.
    pub port: u16,

    /// Process ID of the owning process.
    pub pid: u32,

    /// Short process/executable name, possibly truncated by the source.
    pub command: String,

    /// Username of the process owner.
    pub user: String,

    /// Socket state label (e.g. "LISTEN"); empty when the source reports none.
    pub state: String,
}

impl ListenerRecord {
    /// Identity of the underlying listener within one discovery cycle.
    ///
    /// The protocol is part of the key: one process may legitimately hold
    /// the same port over both TCP and UDP.
    pub fn key(&self) -> (Protocol, u16, u32) {
        (self.protocol, self.port, self.pid)
    }

    /// Check if this record matches a search query.
    ///
    /// Searches across command, port, PID, protocol, user and state.
    pub fn matches_search(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }

        let query_lower = query.to_lowercase();
        self.command.to_lowercase().contains(&query_lower)
            || self.port.to_string().contains(&query_lower)
            || self.pid.to_string().contains(&query_lower)
            || self.protocol.as_str().to_lowercase().contains(&query_lower)
            || self.user.to_lowercase().contains(&query_lower)
            || self.state.to_lowercase().contains(&query_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ListenerRecord {
        ListenerRecord {
            protocol: Protocol::Tcp,
            port: 3000,
            pid: 1234,
            command: "node".to_string(),
            user: "testuser".to_string(),
            state: "LISTEN".to_string(),
        }
    }

    #[test]
    fn test_protocol_from_label() {
        assert_eq!(Protocol::from_label("TCP"), Some(Protocol::Tcp));
        assert_eq!(Protocol::from_label("udp"), Some(Protocol::Udp));
        assert_eq!(Protocol::from_label("ICMP"), None);
        assert_eq!(Protocol::from_label(""), None);
    }

    #[test]
    fn test_protocol_display_is_uppercase() {
        assert_eq!(Protocol::Tcp.to_string(), "TCP");
        assert_eq!(Protocol::Udp.to_string(), "UDP");
    }

    #[test]
    fn test_key_distinguishes_protocols() {
        let tcp = record();
        let udp = ListenerRecord {
            protocol: Protocol::Udp,
            ..record()
        };
        assert_ne!(tcp.key(), udp.key());
    }

    #[test]
    fn test_matches_search() {
        let r = record();

        assert!(r.matches_search("node"));
        assert!(r.matches_search("3000"));
        assert!(r.matches_search("1234"));
        assert!(r.matches_search("tcp"));
        assert!(r.matches_search("testuser"));
        assert!(r.matches_search("listen"));
        assert!(r.matches_search("")); // Empty query matches all
        assert!(!r.matches_search("nginx")); // Non-matching query
    }
}

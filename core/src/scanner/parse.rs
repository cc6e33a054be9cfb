//! Parsing of lsof's tabular output into listener records.
//!
//! The output format is not guaranteed stable across platform versions, so
//! a malformed row costs that row, never the whole cycle.

use std::collections::HashSet;

use tracing::debug;

use crate::models::{ListenerRecord, Protocol};

// lsof column layout (with -P -n):
//
// COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
// node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
const COMMAND_COL: usize = 0;
const PID_COL: usize = 1;
const USER_COL: usize = 2;
const NODE_COL: usize = 7;
const NAME_COL: usize = 8;
const STATE_COL: usize = 9;

/// Minimum token count for a data row: everything up to and including NAME.
const MIN_COLS: usize = 9;

/// Parse raw lsof output into listener records, in input order.
///
/// The first line is the column header and is discarded; empty or
/// header-only input yields an empty set. Rows that do not fit the expected
/// shape are skipped individually — parsing itself never fails.
pub fn parse(raw: &str) -> Vec<ListenerRecord> {
    let mut records = Vec::new();

    for line in raw.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_COLS {
            if !fields.is_empty() {
                debug!(line, "skipping short row");
            }
            continue;
        }

        let pid: u32 = match fields[PID_COL].parse() {
            Ok(p) if p > 0 => p,
            _ => {
                debug!(line, "skipping row without a numeric pid");
                continue;
            }
        };

        let Some(protocol) = Protocol::from_label(fields[NODE_COL]) else {
            debug!(line, "skipping row with unknown protocol");
            continue;
        };

        let Some(port) = parse_port(fields[NAME_COL]) else {
            debug!(line, "skipping row without a resolvable port");
            continue;
        };

        // Optional trailing state, e.g. "(LISTEN)". UDP rows have none.
        let state = fields
            .get(STATE_COL)
            .map(|s| s.trim_matches(['(', ')']).to_string())
            .unwrap_or_default();

        records.push(ListenerRecord {
            protocol,
            port,
            pid,
            command: fields[COMMAND_COL].to_string(),
            user: fields[USER_COL].to_string(),
            state,
        });
    }

    records
}

/// Extract the port from an address field.
///
/// Handles `*:8080`, `127.0.0.1:8080` and `[::1]:8080`: the substring after
/// the last colon is the port, which sidesteps the colons inside bracketed
/// IPv6 hosts. Returns `None` when no valid non-zero port can be extracted.
fn parse_port(name: &str) -> Option<u16> {
    let (_, port) = name.rsplit_once(':')?;
    match port.parse::<u16>() {
        Ok(p) if p > 0 => Some(p),
        _ => None,
    }
}

/// Collapse rows describing the same underlying listener.
///
/// lsof reports one row per bound address, so a single socket can show up
/// several times. The first record for each `(protocol, port, pid)` triple
/// wins; input order is otherwise preserved.
pub fn dedupe(records: Vec<ListenerRecord>) -> Vec<ListenerRecord> {
    let mut seen = HashSet::new();
    records.into_iter().filter(|r| seen.insert(r.key())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
COMMAND    PID   USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
rapportd   610   alice   8u  IPv4 0x6f70d8a7e3a2b5c1      0t0  TCP *:49152 (LISTEN)
rapportd   610   alice   9u  IPv6 0x6f70d8a7e3a2b5c2      0t0  TCP *:49152 (LISTEN)
node     34805   alice  19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
mDNSResponder  328 _mdnsresponder 10u IPv4 0x9a1b2c3d4e5f6071 0t0 UDP *:5353
postgres  1290 postgres   7u  IPv4 0x1122334455667788      0t0  TCP 127.0.0.1:5432 (LISTEN)
";

    #[test]
    fn test_parse_sample_output() {
        let records = parse(SAMPLE);
        // Both rapportd rows survive parsing; collapsing them is dedupe's job.
        assert_eq!(records.len(), 5);

        let node = &records[2];
        assert_eq!(node.command, "node");
        assert_eq!(node.pid, 34805);
        assert_eq!(node.user, "alice");
        assert_eq!(node.protocol, Protocol::Tcp);
        assert_eq!(node.port, 3000);
        assert_eq!(node.state, "LISTEN");
    }

    #[test]
    fn test_parse_preserves_input_order() {
        let ports: Vec<u16> = parse(SAMPLE).iter().map(|r| r.port).collect();
        assert_eq!(ports, vec![49152, 49152, 3000, 5353, 5432]);
    }

    #[test]
    fn test_udp_row_without_state() {
        let records = parse(SAMPLE);
        let mdns = &records[3];
        assert_eq!(mdns.protocol, Protocol::Udp);
        assert_eq!(mdns.port, 5353);
        assert_eq!(mdns.state, "");
    }

    #[test]
    fn test_empty_and_header_only_input() {
        assert!(parse("").is_empty());
        assert!(parse("COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME\n").is_empty());
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let raw = "\
COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
garbled row
nginx        1  root    6u  IPv4 0x1234567890abcdef      0t0  TCP *:80 (LISTEN)
";
        let records = parse(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].command, "nginx");
    }

    #[test]
    fn test_non_numeric_pid_is_skipped() {
        let raw = "\
COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
nginx      abc  root    6u  IPv4 0x1234567890abcdef      0t0  TCP *:80 (LISTEN)
";
        assert!(parse(raw).is_empty());
    }

    #[test]
    fn test_unknown_protocol_is_skipped() {
        let raw = "\
COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
ping       999  root    3u  IPv4 0x1234567890abcdef      0t0  ICMP *:8
";
        assert!(parse(raw).is_empty());
    }

    #[test]
    fn test_unresolvable_port_is_skipped() {
        let raw = "\
COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
weird      999  root    3u  IPv4 0x1234567890abcdef      0t0  TCP no-colon-here
zero       998  root    3u  IPv4 0x1234567890abcdef      0t0  TCP *:0
junk       997  root    3u  IPv4 0x1234567890abcdef      0t0  TCP *:notaport
";
        assert!(parse(raw).is_empty());
    }

    #[test]
    fn test_parse_port_address_forms() {
        assert_eq!(parse_port("127.0.0.1:8080"), Some(8080));
        assert_eq!(parse_port("*:3000"), Some(3000));
        assert_eq!(parse_port("[::1]:9090"), Some(9090));
        assert_eq!(parse_port("[fe80::1%lo0]:546"), Some(546));
        assert_eq!(parse_port("no-port"), None);
        assert_eq!(parse_port("*:0"), None);
    }

    #[test]
    fn test_dedupe_collapses_same_listener() {
        let deduped = dedupe(parse(SAMPLE));
        assert_eq!(deduped.len(), 4);
        // First-seen record wins.
        assert_eq!(deduped[0].command, "rapportd");
        assert_eq!(deduped[0].port, 49152);
    }

    #[test]
    fn test_dedupe_keeps_distinct_protocols() {
        let raw = "\
COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
dns        100  root    5u  IPv4 0x1234567890abcdef      0t0  TCP *:8080 (LISTEN)
dns        100  root    6u  IPv4 0x1234567890abcdee      0t0  UDP *:8080
";
        let deduped = dedupe(parse(raw));
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].protocol, Protocol::Tcp);
        assert_eq!(deduped[1].protocol, Protocol::Udp);
    }

    #[test]
    fn test_dedupe_keeps_first_seen_fields() {
        let raw = "\
COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
node       100  alice   5u  IPv4 0x1234567890abcdef      0t0  TCP 127.0.0.1:3000 (LISTEN)
node       100  alice   6u  IPv6 0xfedcba0987654321      0t0  TCP [::1]:3000 (LISTEN)
";
        let deduped = dedupe(parse(raw));
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].user, "alice");
        assert_eq!(deduped[0].state, "LISTEN");
    }
}

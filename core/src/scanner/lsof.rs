//! Discovery source adapter that shells out to lsof.

use std::process::{Output, Stdio};

use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::ListenerRecord;

use super::parse;
use super::Scanner;

/// lsof exit code meaning "nothing matched the selection".
const NO_RESULTS_EXIT: i32 = 1;

/// Port scanner that invokes lsof and parses its tabular output.
///
/// Each call spawns exactly one external process and blocks until it
/// finishes; there is no internal retry or timeout. Retrying is the
/// caller's policy.
#[derive(Debug, Default)]
pub struct LsofScanner;

impl LsofScanner {
    /// Create a new lsof-backed scanner.
    pub fn new() -> Self {
        Self
    }

    /// Run the enumeration command and return its raw stdout.
    ///
    /// Executes: `lsof -iTCP -iUDP -sTCP:LISTEN -P -n`
    ///
    /// Flags explained:
    /// - -iTCP -iUDP: select both transports
    /// - -sTCP:LISTEN: restrict TCP sockets to the listening state
    /// - -P: show port numbers (don't resolve to service names)
    /// - -n: show IP addresses (don't resolve to hostnames)
    async fn raw_listing(&self) -> Result<String> {
        let output = Command::new("lsof")
            .args(["-iTCP", "-iUDP", "-sTCP:LISTEN", "-P", "-n"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::DiscoveryFailed(format!("failed to run lsof: {e}")))?;

        classify_output(output)
    }
}

/// Apply lsof's exit-status contract to a finished invocation.
///
/// Exit 1 means no sockets matched the selection and is success with an
/// empty listing; any other non-zero status is a discovery failure.
fn classify_output(output: Output) -> Result<String> {
    if output.status.success() {
        // Lossy decoding: a mangled byte should cost one row at most.
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    if output.status.code() == Some(NO_RESULTS_EXIT) {
        debug!("lsof reported no listening sockets");
        return Ok(String::new());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(Error::DiscoveryFailed(format!(
        "lsof exited with {}: {}",
        output.status,
        stderr.trim()
    )))
}

impl Scanner for LsofScanner {
    /// Run one full discovery cycle: enumerate, parse, dedupe.
    async fn scan(&self) -> Result<Vec<ListenerRecord>> {
        let raw = self.raw_listing().await?;
        Ok(parse::dedupe(parse::parse(&raw)))
    }
}

#[cfg(test)]
mod tests {
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;

    use super::*;

    fn finished(code: i32, stdout: &str, stderr: &str) -> Output {
        Output {
            // Wait-status encoding: the exit code lives in the high byte.
            status: ExitStatus::from_raw(code << 8),
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_success_passes_stdout_through() {
        let raw = classify_output(finished(0, "COMMAND PID\ndata row\n", "")).unwrap();
        assert_eq!(raw, "COMMAND PID\ndata row\n");
    }

    #[test]
    fn test_no_results_exit_is_empty_success() {
        let raw = classify_output(finished(1, "", "")).unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn test_other_failures_surface_as_discovery_errors() {
        let err = classify_output(finished(2, "", "lsof: unknown option")).unwrap_err();
        match err {
            Error::DiscoveryFailed(reason) => assert!(reason.contains("unknown option")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

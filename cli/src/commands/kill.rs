//! Kill command - signal the processes bound to a port.

use anyhow::{bail, Result};
use portscope_core::{LsofScanner, ProcessKiller, Scanner};

pub async fn run(port: u16, force: bool) -> Result<()> {
    let scanner = LsofScanner::new();
    let records = scanner.scan().await?;

    // One pid can hold the port over several protocols; signal it once.
    let mut targets: Vec<(u32, String)> = Vec::new();
    for r in records.iter().filter(|r| r.port == port) {
        if !targets.iter().any(|(pid, _)| *pid == r.pid) {
            targets.push((r.pid, r.command.clone()));
        }
    }

    if targets.is_empty() {
        bail!("no process is listening on port {port}");
    }

    let killer = ProcessKiller::new();
    let signal = if force { "SIGKILL" } else { "SIGTERM" };

    for (pid, command) in targets {
        let result = if force {
            killer.force_terminate(pid)
        } else {
            killer.terminate(pid)
        };

        match result {
            Ok(()) => println!("Sent {signal} to {command} (PID {pid})"),
            Err(e) => eprintln!("{e}"),
        }
    }

    Ok(())
}

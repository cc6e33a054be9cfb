//! List command - show all listening ports.

use anyhow::Result;
use portscope_core::{LsofScanner, Scanner};

pub async fn run(port_filter: Option<u16>, name_filter: Option<String>, json: bool) -> Result<()> {
    let scanner = LsofScanner::new();
    let mut records = scanner.scan().await?;

    // Apply filters
    if let Some(p) = port_filter {
        records.retain(|r| r.port == p);
    }
    if let Some(ref name) = name_filter {
        let name_lower = name.to_lowercase();
        records.retain(|r| r.command.to_lowercase().contains(&name_lower));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No listening ports found.");
        return Ok(());
    }

    // Table header
    println!(
        "{:<6} {:<8} {:<20} {:<6} {:<12} STATE",
        "PORT", "PID", "COMMAND", "PROTO", "USER"
    );
    println!("{}", "-".repeat(64));

    for r in &records {
        println!(
            "{:<6} {:<8} {:<20} {:<6} {:<12} {}",
            r.port,
            r.pid,
            truncate(&r.command, 20),
            r.protocol,
            truncate(&r.user, 12),
            r.state
        );
    }

    println!("\nTotal: {} listeners", records.len());
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 1).collect();
        format!("{cut}…")
    }
}

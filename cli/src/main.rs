//! Portscope CLI - inspect and kill processes on network ports
//!
//! Launches an interactive dashboard by default, with plain subcommands
//! for scripted use.

mod commands;
mod tui;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "portscope")]
#[command(author, version, about = "Inspect and kill processes listening on network ports")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Disable the interactive dashboard
    #[arg(long, global = true)]
    no_tui: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List all listening ports
    #[command(alias = "ls")]
    List {
        /// Filter by port number
        #[arg(short, long)]
        port: Option<u16>,

        /// Filter by process name
        #[arg(short = 'n', long)]
        name: Option<String>,
    },

    /// Kill the process(es) listening on a port
    Kill {
        /// Port number to kill
        port: u16,

        /// Send SIGKILL instead of SIGTERM
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List { port, name }) => {
            commands::list::run(port, name, cli.json).await?;
        }
        Some(Commands::Kill { port, force }) => {
            commands::kill::run(port, force).await?;
        }
        None => {
            // Default: launch the dashboard, or list when piped
            if cli.no_tui || !atty::is(atty::Stream::Stdout) {
                commands::list::run(None, None, cli.json).await?;
            } else {
                tui::run().await?;
            }
        }
    }

    Ok(())
}

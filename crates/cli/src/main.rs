//! Handoff CLI — inspect and validate agent definitions.
//!
//! Commands:
//! - `check`  — Validate the configured agents
//! - `agents` — List configured agents
//! - `init`   — Print or write a starter config

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "handoff",
    about = "Handoff — multi-agent definitions with reflection and handoff",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of ~/.handoff/config.toml
    #[arg(short, long, global = true, env = "HANDOFF_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate agent definitions
    Check,

    /// List configured agents
    Agents,

    /// Print a starter configuration
    Init {
        /// Write it to ~/.handoff/config.toml instead of stdout
        #[arg(short, long)]
        write: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Check => commands::check::run(config)?,
        Commands::Agents => commands::agents::run(config)?,
        Commands::Init { write } => commands::init::run(write)?,
    }

    Ok(())
}

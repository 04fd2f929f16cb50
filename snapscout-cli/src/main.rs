//! Snapscout CLI - search photos and videos from the terminal

mod commands;
mod render;

use std::path::PathBuf;

use clap::Parser;
use snapscout_core::tracing_setup::{CliLogLevel, init_tracing};

/// Media search client with one search session per run.
#[derive(Parser, Debug)]
#[command(name = "snapscout")]
#[command(about = "Search stock photos and videos")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Console log level; the log file always records everything
    #[arg(long, global = true, default_value = "warn")]
    log_level: CliLogLevel,

    /// Directory for the per-run debug log
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), cli.logs_dir.as_deref())?;

    commands::handle_command(cli.command).await
}

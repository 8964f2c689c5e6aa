//! fedreg CLI - Federal Register tools over MCP.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

mod commands;
mod input;
mod output;
pub(crate) mod shared;

/// fedreg - query the Federal Register API from AI agents.
#[derive(Debug, Parser)]
#[command(name = "fedreg", version, about)]
struct Cli {
    /// Configuration file path (TOML).
    #[arg(short, long, global = true, env = "FEDREG_CONFIG")]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv). Overrides `[logging] level`.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format: plain (default) or json (for log aggregation).
    #[arg(long, global = true, default_value = "plain", value_parser = ["plain", "json"])]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the MCP server over stdio or HTTP.
    Serve(commands::serve::ServeArgs),
    /// Invoke one tool and print its payload.
    Call(commands::call::CallArgs),
    /// List the available tools.
    Tools(commands::tools::ToolsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shared::load_config(cli.config.as_deref())?;

    // Logs always go to stderr: with the stdio transport stdout carries
    // protocol frames only.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(shared::log_filter(cli.verbose, &config.logging.level)));
    match cli.log_format.as_str() {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    };

    tracing::debug!(config = ?cli.config, "fedreg starting");

    match &cli.command {
        Commands::Serve(args) => commands::serve::execute(args, &config).await,
        Commands::Call(args) => commands::call::execute(args, &config).await,
        Commands::Tools(args) => commands::tools::execute(args, &config),
    }
}

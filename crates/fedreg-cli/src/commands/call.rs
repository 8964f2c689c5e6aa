//! `fedreg call` command.
//!
//! Runs one tool against the live API, outside of any MCP session, and
//! prints the text payload the tool would return over MCP.

use clap::Args;
use fedreg_config::FedRegConfig;

use crate::{input, output, shared};

/// Invoke one tool directly.
#[derive(Debug, Args)]
pub struct CallArgs {
    /// Tool name (see `fedreg tools`), e.g. get_document.
    pub tool: String,
    /// JSON object of tool arguments.
    #[arg(short, long, default_value = "{}")]
    pub input: String,
    /// Read the arguments from a file (use "-" for stdin).
    #[arg(short = 'f', long)]
    pub input_file: Option<String>,
}

/// Executes the call command.
pub async fn execute(args: &CallArgs, config: &FedRegConfig) -> anyhow::Result<()> {
    let arguments = input::resolve_arguments(&args.input, args.input_file.as_deref())?;
    let handler = shared::build_handler(config)?;

    tracing::info!(tool = %args.tool, "calling tool");

    let result = handler
        .call_tool(&args.tool, arguments)
        .await
        .map_err(output::fail)?;

    if result.is_error {
        output::print_error(&result.joined_text());
        anyhow::bail!("{} reported an error", args.tool);
    }
    println!("{}", result.joined_text());
    Ok(())
}

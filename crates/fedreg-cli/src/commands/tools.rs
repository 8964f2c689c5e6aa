//! `fedreg tools` command.

use clap::Args;

use fedreg_config::FedRegConfig;

use crate::{output, shared};

/// List the tools the server exposes.
#[derive(Debug, Args)]
pub struct ToolsArgs {
    /// Print the full `tools/list` definitions as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the tools command.
pub fn execute(args: &ToolsArgs, config: &FedRegConfig) -> anyhow::Result<()> {
    let handler = shared::build_handler(config)?;
    let tools = handler.tool_definitions();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&tools)?);
    } else {
        println!("{}", output::tool_table(&tools));
    }
    Ok(())
}

//! Shared helpers used across CLI commands.
//!
//! Centralises loading the layered configuration and wiring the HTTP
//! client into an `McpHandler`, so every command sees the same defaults.

use std::path::Path;
use std::sync::Arc;

use fedreg_client::{ClientConfig, FederalRegisterClient, PageLimits};
use fedreg_config::FedRegConfig;
use fedreg_mcp::{McpHandler, ToolSettings};

use crate::output;

/// Loads defaults, then the TOML file (if any), then `FEDREG_*` variables.
///
/// # Errors
///
/// Returns an error if the file is missing or a value has the wrong type.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<FedRegConfig> {
    fedreg_config::load_config(path).map_err(output::fail)
}

/// Log filter directive for a `-v` count, falling back to the configured level.
pub fn log_filter(verbose: u8, configured: &str) -> String {
    match verbose {
        0 if configured.trim().is_empty() => "info".to_string(),
        0 => configured.trim().to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Tool knobs derived from the `[api]` and `[fields]` sections.
pub fn tool_settings(config: &FedRegConfig) -> ToolSettings {
    ToolSettings {
        fields: config.fields.clone(),
        limits: PageLimits {
            max_per_page: config.api.max_per_page.max(1),
            max_total_results: config.api.max_total_results,
        },
        lookup_page_size: config.api.lookup_page_size.max(1),
        ..ToolSettings::default()
    }
}

/// Builds the MCP handler over the live Federal Register API.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be initialised.
pub fn build_handler(config: &FedRegConfig) -> anyhow::Result<Arc<McpHandler>> {
    let client = FederalRegisterClient::new(ClientConfig {
        base_url: config.api.base_url.clone(),
        timeout: config.api.timeout(),
        user_agent: config.api.user_agent.clone(),
    })
    .map_err(output::fail)?;
    tracing::debug!(base_url = client.base_url(), "Federal Register client ready");

    Ok(Arc::new(McpHandler::new(
        Arc::new(client),
        tool_settings(config),
    )))
}

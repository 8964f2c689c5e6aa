//! `fedreg serve` command.
//!
//! Starts the MCP server over stdio or HTTP, exposing the Federal
//! Register tools via JSON-RPC 2.0.

use clap::Args;

use fedreg_config::{FedRegConfig, TransportKind};
use fedreg_transport_http::HttpServer;

use crate::{output, shared};

/// Start the MCP server (stdio or HTTP).
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Transport mode; defaults to `[server] transport` (stdio).
    #[arg(long, value_parser = ["stdio", "http"])]
    pub transport: Option<String>,
    /// Bind address for the HTTP transport.
    #[arg(long)]
    pub host: Option<String>,
    /// TCP port for the HTTP transport.
    #[arg(long)]
    pub port: Option<u16>,
    /// Bearer token required on `/mcp` (HTTP only).
    #[arg(long, env = "FEDREG_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Listener settings after merging flags over configuration.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Listen {
    pub transport: TransportKind,
    pub host: String,
    pub port: u16,
}

impl ServeArgs {
    pub(crate) fn resolve(&self, config: &FedRegConfig) -> Listen {
        let transport = match self.transport.as_deref() {
            Some("http") => TransportKind::Http,
            Some(_) => TransportKind::Stdio,
            None => config.server.transport,
        };
        Listen {
            transport,
            host: self
                .host
                .clone()
                .unwrap_or_else(|| config.server.host.clone()),
            port: self.port.unwrap_or(config.server.port),
        }
    }
}

/// Executes the serve command.
pub async fn execute(args: &ServeArgs, config: &FedRegConfig) -> anyhow::Result<()> {
    let listen = args.resolve(config);
    let handler = shared::build_handler(config)?;

    match listen.transport {
        TransportKind::Http => {
            let token = args.token.clone().filter(|t| !t.is_empty());
            if token.is_none() {
                tracing::warn!("HTTP transport running without a bearer token");
            }
            HttpServer::new(handler, &listen.host, listen.port, token)
                .run()
                .await
                .map_err(output::fail)?;
        }
        TransportKind::Stdio => {
            tracing::info!("fedreg MCP server ready on stdio");
            tokio::select! {
                result = fedreg_transport_stdio::serve_stdio(handler) => {
                    result.map_err(output::fail)?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown signal received");
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(transport: Option<&str>, port: Option<u16>) -> ServeArgs {
        ServeArgs {
            transport: transport.map(String::from),
            host: None,
            port,
            token: None,
        }
    }

    #[test]
    fn config_supplies_defaults() {
        let listen = args(None, None).resolve(&FedRegConfig::default());
        assert_eq!(
            listen,
            Listen {
                transport: TransportKind::Stdio,
                host: "127.0.0.1".into(),
                port: 3000,
            }
        );
    }

    #[test]
    fn flags_override_config() {
        let mut config = FedRegConfig::default();
        config.server.transport = TransportKind::Http;
        config.server.port = 8080;

        let listen = args(Some("stdio"), Some(9000)).resolve(&config);
        assert_eq!(listen.transport, TransportKind::Stdio);
        assert_eq!(listen.port, 9000);

        let listen = args(None, None).resolve(&config);
        assert_eq!(listen.transport, TransportKind::Http);
        assert_eq!(listen.port, 8080);
    }
}

//! Configuration schema types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use fedreg_types::FieldDefaults;

/// Top-level fedreg configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FedRegConfig {
    /// Upstream API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Transport settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default field selections per operation.
    #[serde(default)]
    pub fields: FieldDefaults,
}

/// Federal Register API access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Largest `per_page` the API accepts.
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u32,
    /// Most matches one query can page through.
    #[serde(default = "default_max_total_results")]
    pub max_total_results: usize,
    /// Page size of the executive-order-by-number search.
    #[serde(default = "default_lookup_page_size")]
    pub lookup_page_size: u32,
}

impl ApiConfig {
    /// Returns the timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_per_page: default_max_per_page(),
            max_total_results: default_max_total_results(),
            lookup_page_size: default_lookup_page_size(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.federalregister.gov/api/v1".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    concat!("fedreg/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_max_per_page() -> u32 {
    1000
}
fn default_max_total_results() -> usize {
    2000
}
fn default_lookup_page_size() -> u32 {
    20
}

/// Which transport `fedreg serve` binds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    #[default]
    Stdio,
    Http,
}

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub transport: TransportKind,
    /// Bind address for the HTTP transport.
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    3000
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "fedreg_client=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

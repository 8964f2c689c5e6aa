//! # fedreg-config
//!
//! Configuration management for fedreg.
//! Supports layered config: defaults -> file -> env vars.

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_with_prefix, ConfigError, ENV_PREFIX};
pub use schema::{ApiConfig, FedRegConfig, LoggingConfig, ServerConfig, TransportKind};

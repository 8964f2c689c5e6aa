//! Configuration loader (file + env + CLI merge).

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use fedreg_types::{DiagnosticError, ErrorKind, FedRegError};

use crate::schema::FedRegConfig;

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "FEDREG_";

/// Top-level sections that environment variables may target.
const SECTIONS: &[&str] = &["api", "server", "logging", "fields"];

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("configuration file not found: {0}")]
    MissingFile(String),
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),
}

impl DiagnosticError for ConfigError {
    fn hint(&self) -> Option<String> {
        match self {
            Self::MissingFile(_) => Some("The --config path does not point at a file.".into()),
            Self::Load(_) => Some(
                "A value in the TOML file or a FEDREG_* variable has the wrong type.".into(),
            ),
        }
    }

    fn fix(&self) -> Option<String> {
        match self {
            Self::MissingFile(_) => Some("Create the file or drop the --config flag.".into()),
            Self::Load(_) => Some(
                "Nested keys use a double underscore, e.g. FEDREG_API__TIMEOUT_SECS=60".into(),
            ),
        }
    }
}

impl From<ConfigError> for FedRegError {
    fn from(e: ConfigError) -> Self {
        FedRegError::new(ErrorKind::InvalidInput, e.to_string()).with_context("configuration")
    }
}

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if given)
/// 3. Environment variables (`FEDREG_` prefix, `__` between section and key)
pub fn load_config(config_path: Option<&Path>) -> Result<FedRegConfig, ConfigError> {
    load_config_with_prefix(config_path, ENV_PREFIX)
}

/// Same as [`load_config`] with a custom environment prefix.
pub fn load_config_with_prefix(
    config_path: Option<&Path>,
    env_prefix: &str,
) -> Result<FedRegConfig, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(FedRegConfig::default()));

    if let Some(path) = config_path {
        if !path.is_file() {
            return Err(ConfigError::MissingFile(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    // Variables outside the known sections (e.g. FEDREG_TOKEN, read by
    // the CLI) are not configuration keys.
    let env = Env::prefixed(env_prefix).split("__").filter(|key| {
        let section = key.as_str().split('.').next().unwrap_or_default();
        SECTIONS.iter().any(|s| s.eq_ignore_ascii_case(section))
    });
    figment = figment.merge(env);

    figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))
}

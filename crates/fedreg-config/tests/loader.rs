//! Layering tests: defaults -> TOML file -> environment.
//!
//! Each test uses its own environment prefix so parallel tests never
//! observe each other's variables.

use std::io::Write;

use fedreg_config::{load_config, load_config_with_prefix, ConfigError, TransportKind};
use tempfile::NamedTempFile;

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

#[test]
fn no_file_yields_defaults() {
    let config = load_config_with_prefix(None, "FEDREG_TEST_DEFAULTS_").expect("load");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.server.transport, TransportKind::Stdio);
}

#[test]
fn file_overrides_defaults() {
    let file = toml_file(
        r#"
[api]
timeout_secs = 10
base_url = "http://localhost:9000/api/v1"

[server]
transport = "http"
port = 8080
"#,
    );
    let config = load_config_with_prefix(Some(file.path()), "FEDREG_TEST_FILE_").expect("load");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.api.base_url, "http://localhost:9000/api/v1");
    assert_eq!(config.server.transport, TransportKind::Http);
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "127.0.0.1");
}

#[test]
fn env_overrides_file() {
    let file = toml_file("[api]\ntimeout_secs = 10\n");
    std::env::set_var("FEDREG_TEST_ENV_API__TIMEOUT_SECS", "90");
    std::env::set_var("FEDREG_TEST_ENV_LOGGING__LEVEL", "debug");
    let config = load_config_with_prefix(Some(file.path()), "FEDREG_TEST_ENV_").expect("load");
    assert_eq!(config.api.timeout_secs, 90);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn env_outside_sections_is_ignored() {
    std::env::set_var("FEDREG_TEST_STRAY_TOKEN", "secret");
    let config = load_config_with_prefix(None, "FEDREG_TEST_STRAY_").expect("load");
    assert_eq!(config, fedreg_config::FedRegConfig::default());
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().expect("dir");
    let path = dir.path().join("absent.toml");
    let err = load_config(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::MissingFile(_)));
}

#[test]
fn wrong_type_is_load_error() {
    let file = toml_file("[api]\ntimeout_secs = \"soon\"\n");
    let err = load_config_with_prefix(Some(file.path()), "FEDREG_TEST_BADTYPE_").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn unknown_section_in_file_is_rejected() {
    let file = toml_file("[sandbox]\nfuel = 1\n");
    let err = load_config_with_prefix(Some(file.path()), "FEDREG_TEST_UNKNOWN_").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

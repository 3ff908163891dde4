//! Unit tests for configuration resolution
//!
//! Tests cover:
//! - Priority order: CLI argument > environment > TOML file > compiled default
//! - Missing default config file is not an error
//! - Explicit config file must exist
//! - Malformed TOML and invalid values are configuration errors
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate POLYGLOTAS_* variables are marked with #[serial].

use polyglotas_common::config::{
    load_toml_config, ConfigResolver, DEFAULT_BACKEND_URL, ENV_API_KEY, ENV_BACKEND_URL,
};
use polyglotas_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn clear_env() {
    env::remove_var(ENV_BACKEND_URL);
    env::remove_var(ENV_API_KEY);
}

#[test]
#[serial]
fn test_empty_file_uses_compiled_defaults() {
    clear_env();
    let file = write_config("");

    let config = ConfigResolver::new()
        .with_config_file(Some(file.path().to_path_buf()))
        .resolve()
        .unwrap();

    assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
    assert!(config.api_key.is_none());
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert_eq!(config.log_level, "info");
}

#[test]
#[serial]
fn test_toml_values_are_used() {
    clear_env();
    let file = write_config(
        r#"
backend_url = "https://example.supabase.co/rest/v1/"
api_key = "anon-key"
request_timeout_secs = 5

[logging]
level = "debug"
"#,
    );

    let config = ConfigResolver::new()
        .with_config_file(Some(file.path().to_path_buf()))
        .resolve()
        .unwrap();

    // Trailing slash trimmed so paths can be appended directly
    assert_eq!(config.backend_url, "https://example.supabase.co/rest/v1");
    assert_eq!(config.api_key.as_deref(), Some("anon-key"));
    assert_eq!(config.request_timeout, Duration::from_secs(5));
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.config_file.as_deref(), Some(file.path()));
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    let file = write_config(
        r#"
backend_url = "https://from-toml.example/rest/v1"
api_key = "toml-key"
"#,
    );
    env::set_var(ENV_BACKEND_URL, "https://from-env.example/rest/v1");
    env::set_var(ENV_API_KEY, "env-key");

    let config = ConfigResolver::new()
        .with_config_file(Some(file.path().to_path_buf()))
        .resolve()
        .unwrap();

    assert_eq!(config.backend_url, "https://from-env.example/rest/v1");
    assert_eq!(config.api_key.as_deref(), Some("env-key"));

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    let file = write_config("");
    env::set_var(ENV_BACKEND_URL, "https://from-env.example/rest/v1");

    let config = ConfigResolver::new()
        .with_config_file(Some(file.path().to_path_buf()))
        .with_backend_url(Some("https://from-cli.example/rest/v1".to_string()))
        .with_api_key(Some("cli-key".to_string()))
        .resolve()
        .unwrap();

    assert_eq!(config.backend_url, "https://from-cli.example/rest/v1");
    assert_eq!(config.api_key.as_deref(), Some("cli-key"));

    clear_env();
}

#[test]
#[serial]
fn test_blank_env_var_is_ignored() {
    clear_env();
    let file = write_config(r#"backend_url = "https://from-toml.example""#);
    env::set_var(ENV_BACKEND_URL, "   ");

    let config = ConfigResolver::new()
        .with_config_file(Some(file.path().to_path_buf()))
        .resolve()
        .unwrap();

    assert_eq!(config.backend_url, "https://from-toml.example");

    clear_env();
}

#[test]
#[serial]
fn test_explicit_missing_file_is_error() {
    clear_env();
    let result = ConfigResolver::new()
        .with_config_file(Some(PathBuf::from("/nonexistent/polyglotas/config.toml")))
        .resolve();

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_load_missing_file_returns_none() {
    let result = load_toml_config(&PathBuf::from("/nonexistent/polyglotas/config.toml")).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_malformed_toml_is_config_error() {
    let file = write_config("backend_url = [not toml");
    let result = load_toml_config(file.path());
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_non_http_backend_rejected() {
    clear_env();
    let file = write_config(r#"backend_url = "ftp://example.com""#);

    let result = ConfigResolver::new()
        .with_config_file(Some(file.path().to_path_buf()))
        .resolve();

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_zero_timeout_rejected() {
    clear_env();
    let file = write_config("request_timeout_secs = 0");

    let result = ConfigResolver::new()
        .with_config_file(Some(file.path().to_path_buf()))
        .resolve();

    assert!(matches!(result, Err(Error::Config(_))));
}

// dirs only honours XDG_CONFIG_HOME on Linux
#[cfg(target_os = "linux")]
#[test]
#[serial]
fn test_resolved_config_records_source_file() {
    clear_env();
    let file = write_config("request_timeout_secs = 7");

    let explicit = ConfigResolver::new()
        .with_config_file(Some(file.path().to_path_buf()))
        .resolve()
        .unwrap();
    assert_eq!(explicit.config_file, Some(file.path().to_path_buf()));

    // Default location under an empty config home: nothing loaded
    let home = tempfile::tempdir().unwrap();
    let previous = env::var_os("XDG_CONFIG_HOME");
    env::set_var("XDG_CONFIG_HOME", home.path());

    let defaults = ConfigResolver::new().resolve().unwrap();
    assert!(defaults.config_file.is_none());
    assert_eq!(defaults.request_timeout, Duration::from_secs(30));

    match previous {
        Some(value) => env::set_var("XDG_CONFIG_HOME", value),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }
}

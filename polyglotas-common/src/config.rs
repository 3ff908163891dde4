//! Configuration loading and backend endpoint resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable overriding the backend base URL
pub const ENV_BACKEND_URL: &str = "POLYGLOTAS_BACKEND_URL";

/// Environment variable overriding the backend API key
pub const ENV_API_KEY: &str = "POLYGLOTAS_API_KEY";

/// Local development backend (PostgREST behind the managed database)
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:54321/rest/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of `config.toml`
///
/// Every key is optional; absent keys fall through to the next source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub backend_url: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout for backend fetches
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
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

/// Fully resolved settings handed to the rest of the program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub backend_url: String,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
    pub log_level: String,
    /// File the TOML layer was read from, `None` when only defaults applied
    pub config_file: Option<PathBuf>,
}

/// Default location of the config file for this platform
///
/// `~/.config/polyglotas/config.toml` on Linux, the platform config dir elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("polyglotas").join("config.toml"))
}

/// Read and parse a TOML config file
///
/// Returns `Ok(None)` if the file does not exist; a malformed file is an error.
pub fn load_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io(e)),
    };

    toml::from_str::<TomlConfig>(&content)
        .map(Some)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Resolves configuration from CLI overrides, environment, TOML and defaults
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_backend_url: Option<String>,
    cli_api_key: Option<String>,
    config_file: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend_url(mut self, url: Option<String>) -> Self {
        self.cli_backend_url = url;
        self
    }

    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.cli_api_key = key;
        self
    }

    /// Use an explicit config file instead of the platform default
    ///
    /// Unlike the default location, an explicit file must exist.
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    /// Parsed TOML layer and the path it came from
    fn load_file(&self) -> Result<(TomlConfig, Option<PathBuf>)> {
        if let Some(path) = &self.config_file {
            let config = load_toml_config(path)?.ok_or_else(|| {
                Error::Config(format!("Config file not found: {}", path.display()))
            })?;
            return Ok((config, Some(path.clone())));
        }

        match default_config_path() {
            Some(path) => match load_toml_config(&path)? {
                Some(config) => {
                    debug!("Loaded config from {}", path.display());
                    Ok((config, Some(path)))
                }
                None => {
                    debug!("No config file at {}, using defaults", path.display());
                    Ok((TomlConfig::default(), None))
                }
            },
            None => {
                warn!("Could not determine config directory, using defaults");
                Ok((TomlConfig::default(), None))
            }
        }
    }

    /// Resolve every setting
    ///
    /// Usually called before logging is initialised, so callers should log
    /// `config_file` themselves once a subscriber is installed.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let (file, config_file) = self.load_file()?;

        let backend_url = self
            .cli_backend_url
            .clone()
            .or_else(|| env_non_empty(ENV_BACKEND_URL))
            .or(file.backend_url)
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "backend_url must be an http(s) URL, got '{}'",
                backend_url
            )));
        }

        let api_key = self
            .cli_api_key
            .clone()
            .or_else(|| env_non_empty(ENV_API_KEY))
            .or(file.api_key);

        let timeout_secs = file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be positive".to_string()));
        }

        Ok(ResolvedConfig {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            api_key,
            request_timeout: Duration::from_secs(timeout_secs),
            log_level: file.logging.level,
            config_file,
        })
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

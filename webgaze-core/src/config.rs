//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/webgaze/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/webgaze/` (~/.config/webgaze/)
//! - State/Logs: `$XDG_STATE_HOME/webgaze/` (~/.local/state/webgaze/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Browsing-log endpoint the collector exposes.
pub const DEFAULT_LOG_ENDPOINT: &str = "http://127.0.0.1:8000/api/log_browsing_data/";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Monitoring settings (who is being monitored)
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Collector endpoint configuration
    #[serde(default)]
    pub collector: CollectorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Monitoring settings normally maintained through the host's settings UI.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct MonitorConfig {
    /// Email address identifying the monitored child
    pub child_email: Option<String>,
}

/// Collector endpoint configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CollectorConfig {
    /// URL of the collector's browsing-log endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_collector_timeout")]
    pub timeout_secs: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_collector_timeout(),
        }
    }
}

impl CollectorConfig {
    /// Validate configuration, returning an error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::Config(
                "collector.endpoint must not be empty".to_string(),
            ));
        }
        url::Url::parse(&self.endpoint)
            .map_err(|e| Error::Config(format!("collector.endpoint is not a valid URL: {}", e)))?;
        Ok(())
    }
}

fn default_endpoint() -> String {
    DEFAULT_LOG_ENDPOINT.to_string()
}

fn default_collector_timeout() -> u64 {
    30
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/webgaze/config.toml` (~/.config/webgaze/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("webgaze").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/webgaze/` (~/.local/state/webgaze/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("webgaze")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/webgaze/webgaze.log` (~/.local/state/webgaze/webgaze.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("webgaze.log")
    }
}

//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::HttpEcoClientConfig;
use crate::dashboard::DashboardConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> HttpEcoClientConfig {
        HttpEcoClientConfig {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            request_timeout_ms: self.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// Polling and chart window configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSettings {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default = "default_trend_limit")]
    pub trend_limit: usize,
}

fn default_poll_interval() -> u64 {
    60
}

fn default_history_limit() -> usize {
    30
}

fn default_trend_limit() -> usize {
    2
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            history_limit: default_history_limit(),
            trend_limit: default_trend_limit(),
        }
    }
}

impl DashboardSettings {
    pub fn dashboard_config(&self) -> DashboardConfig {
        DashboardConfig {
            // A zero interval would spin; one second is the floor
            poll_interval: Duration::from_secs(self.poll_interval_secs.max(1)),
            history_limit: self.history_limit,
            trend_limit: self.trend_limit,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("ecowatcher").join("config.toml")),
            Some(PathBuf::from("/etc/ecowatcher/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("ECOWATCHER_API_URL") {
            self.api.base_url = url;
        }

        if let Some(secs) = var("ECOWATCHER_POLL_INTERVAL_SECS").and_then(|s| s.parse().ok()) {
            self.dashboard.poll_interval_secs = secs;
        }
        if let Some(limit) = var("ECOWATCHER_HISTORY_LIMIT").and_then(|s| s.parse().ok()) {
            self.dashboard.history_limit = limit;
        }

        if let Some(level) = var("ECOWATCHER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("ECOWATCHER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# EcoWatcher Configuration
#
# Environment variables override these settings:
# - ECOWATCHER_API_URL
# - ECOWATCHER_POLL_INTERVAL_SECS
# - ECOWATCHER_HISTORY_LIMIT
# - ECOWATCHER_LOG_LEVEL
# - ECOWATCHER_LOG_FORMAT

[api]
# EcoWatcher backend base URL
base_url = "http://localhost:5000"

# Request timeout in seconds
request_timeout_secs = 10

[dashboard]
# How often the latest reading and the chart are refreshed (seconds)
poll_interval_secs = 60

# Readings shown on the chart
history_limit = 30

# Readings used to compute the trend
trend_limit = 2

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

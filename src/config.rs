//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub polling: PollingConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub alerts: AlertConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the dashboard endpoints live
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Origin prefixed to every endpoint path; empty means same origin
    #[serde(default)]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Full URL for an endpoint path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Poll cycle timing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PollingConfig {
    #[serde(default = "default_poll_interval")]
    pub interval_ms: u64,
}

fn default_poll_interval() -> u64 {
    300_000 // 5 minutes
}

/// Shortest poll interval the controller will arm
pub const MIN_POLL_INTERVAL_MS: u64 = 1000;

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval(),
        }
    }
}

impl PollingConfig {
    /// Interval between poll cycles, never below [`MIN_POLL_INTERVAL_MS`]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(MIN_POLL_INTERVAL_MS))
    }
}

/// Responsive layout
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayoutConfig {
    /// Widest viewport (px) on which a menu click closes the sidebar
    #[serde(default = "default_breakpoint")]
    pub mobile_breakpoint_px: u32,
}

fn default_breakpoint() -> u32 {
    992
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: default_breakpoint(),
        }
    }
}

/// Low-stock toast lifecycle
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    #[serde(default = "default_reveal_delay")]
    pub reveal_delay_ms: u64,

    #[serde(default = "default_auto_hide")]
    pub auto_hide_ms: u64,

    #[serde(default = "default_removal_delay")]
    pub removal_delay_ms: u64,

    #[serde(default = "default_max_listed")]
    pub max_listed: usize,

    #[serde(default = "default_view_all_href")]
    pub view_all_href: String,
}

fn default_reveal_delay() -> u64 {
    500
}

fn default_auto_hide() -> u64 {
    10_000
}

fn default_removal_delay() -> u64 {
    300
}

fn default_max_listed() -> usize {
    3
}

fn default_view_all_href() -> String {
    "/dashboard/products/?filter=low_stock".to_string()
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: default_reveal_delay(),
            auto_hide_ms: default_auto_hide(),
            removal_delay_ms: default_removal_delay(),
            max_listed: default_max_listed(),
            view_all_href: default_view_all_href(),
        }
    }
}

/// Flash message alerts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlertConfig {
    #[serde(default = "default_alert_ttl")]
    pub auto_dismiss_ms: u64,
}

fn default_alert_ttl() -> u64 {
    5000
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            auto_dismiss_ms: default_alert_ttl(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
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

impl DashboardConfig {
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

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        if config.polling.interval_ms == 0 {
            return Err("polling.interval_ms must be greater than zero".to_string());
        }
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = DashboardConfig::default();
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
    #[cfg(feature = "native")]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("storefront-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/storefront-dashboard/config.toml")),
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
        if let Ok(url) = std::env::var("STOREFRONT_DASHBOARD_BASE_URL") {
            self.api.base_url = url;
        }
        if let Ok(interval) = std::env::var("STOREFRONT_DASHBOARD_POLL_INTERVAL_MS") {
            if let Some(ms) = interval.parse::<u64>().ok().filter(|ms| *ms > 0) {
                self.polling.interval_ms = ms;
            }
        }
        if let Ok(level) = std::env::var("STOREFRONT_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("STOREFRONT_DASHBOARD_LOG_FORMAT") {
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
    r#"# Storefront Dashboard Configuration
#
# Environment variables override these settings:
# - STOREFRONT_DASHBOARD_BASE_URL
# - STOREFRONT_DASHBOARD_POLL_INTERVAL_MS
# - STOREFRONT_DASHBOARD_LOG_LEVEL
# - STOREFRONT_DASHBOARD_LOG_FORMAT

[api]
# Origin serving /dashboard/ajax/* (empty = same origin)
base_url = "http://localhost:8000"

# Request timeout in seconds
request_timeout_secs = 30

[polling]
# Auto refresh interval (ms)
interval_ms = 300000

[layout]
# Menu clicks close the sidebar at or below this viewport width (px)
mobile_breakpoint_px = 992

[notifications]
# Low-stock toast entry delay, visible time and exit animation (ms)
reveal_delay_ms = 500
auto_hide_ms = 10000
removal_delay_ms = 300

# Products listed in the toast before "+N more items"
max_listed = 3

view_all_href = "/dashboard/products/?filter=low_stock"

[alerts]
# Flash messages close themselves after this long (ms)
auto_dismiss_ms = 5000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

//! Configuration settings structures for boxcar-push
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "boxcar-push".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_endpoint() -> String {
    "https://boxcar-api.io/api/push".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Boxcar Gateway Configuration
// ============================================================================

/// Credentials and endpoint of the Boxcar.io push gateway
///
/// Read once at start-up and never mutated afterwards.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxcarConfig {
    /// Publish (access) key sent as the `publishkey` query parameter
    #[serde(default)]
    pub access_key: String,

    /// Secret key used to sign requests; never transmitted
    #[serde(default)]
    pub secret_key: String,

    /// Absolute URL of the push endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl BoxcarConfig {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            endpoint: endpoint.into(),
            timeout_seconds: default_timeout_seconds(),
        }
    }

    /// Parse the endpoint into an absolute http(s) URL with a host
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| ConfigError::invalid_endpoint(&self.endpoint, e.to_string()))?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::invalid_endpoint(
                &self.endpoint,
                "URL must use http or https protocol",
            ));
        }

        if url.host_str().is_none() {
            return Err(ConfigError::invalid_endpoint(&self.endpoint, "URL has no host"));
        }

        Ok(url)
    }
}

impl Default for BoxcarConfig {
    fn default() -> Self {
        Self::new(String::new(), String::new(), default_endpoint())
    }
}

// Keeps the secret key out of logs.
impl std::fmt::Debug for BoxcarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxcarConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

// ============================================================================
// Logger Configuration
// ============================================================================

/// Logger settings as they appear in configuration files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: "full", "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to colour console output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl LoggerSettings {
    /// Convert to the logger module's configuration type
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let format: LogFormat = self.format.parse().map_err(|e: anyhow::Error| {
            ConfigError::validation("logger.format".to_string(), e.to_string())
        })?;

        LoggerConfig::new(self.level, format, self.colored).map_err(|e| {
            ConfigError::validation("logger.level".to_string(), format!("{:#}", e))
        })
    }
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            colored: default_true(),
        }
    }
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Push gateway credentials and endpoint
    #[serde(default)]
    pub boxcar: BoxcarConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}

//! Configuration validation logic
//!
//! Every value read from files or the environment is checked here before the
//! sender is constructed, so a bad endpoint fails at start-up.

use crate::config::error::ConfigError;
use crate::config::settings::{BoxcarConfig, LoggerSettings, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Upper bound for the per-request timeout
const MAX_TIMEOUT_SECONDS: u64 = 300;

impl BoxcarConfig {
    /// Validate gateway configuration
    ///
    /// # Validation Rules
    /// - Access key and secret key must not be empty
    /// - Endpoint must be an absolute http(s) URL with a host
    /// - Timeout must be between 1 and 300 seconds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_key.trim().is_empty() {
            return Err(ConfigError::validation(
                "boxcar.access_key",
                "Access key is required. Set it in the config file or BOXCAR_BOXCAR__ACCESS_KEY.",
            ));
        }

        if self.secret_key.trim().is_empty() {
            return Err(ConfigError::validation(
                "boxcar.secret_key",
                "Secret key is required. Set it in the config file or BOXCAR_BOXCAR__SECRET_KEY.",
            ));
        }

        self.endpoint_url()?;

        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ConfigError::ValidationError {
                field: "boxcar.timeout_seconds".to_string(),
                message: format!(
                    "Timeout must be between 1 and {} seconds, got {}.",
                    MAX_TIMEOUT_SECONDS, self.timeout_seconds
                ),
            });
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid values are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        let format = self.format.to_lowercase();
        if !VALID_LOG_FORMATS.contains(&format.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid values are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.boxcar.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        Settings {
            boxcar: BoxcarConfig::new("AK", "SK", "https://api.example.com/push"),
            ..Settings::default()
        }
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn test_missing_access_key() {
        let mut settings = valid_settings();
        settings.boxcar.access_key = "  ".to_string();
        match settings.validate() {
            Err(ConfigError::ValidationError { field, .. }) => {
                assert_eq!(field, "boxcar.access_key")
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_secret_key() {
        let mut settings = valid_settings();
        settings.boxcar.secret_key.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_malformed_endpoint() {
        let mut settings = valid_settings();
        settings.boxcar.endpoint = "not a url".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_timeout_bounds() {
        let mut settings = valid_settings();
        settings.boxcar.timeout_seconds = 0;
        assert!(settings.validate().is_err());
        settings.boxcar.timeout_seconds = 301;
        assert!(settings.validate().is_err());
        settings.boxcar.timeout_seconds = 300;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut settings = valid_settings();
        settings.logger.level = "verbose".to_string();
        assert!(settings.validate().is_err());
    }
}

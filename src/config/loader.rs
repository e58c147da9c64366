//! Configuration loader for boxcar-push
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "BOXCAR_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "BOXCAR_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "BOXCAR";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local overrides (optional)
/// 4. `BOXCAR_*` environment variables (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from `BOXCAR_CONFIG_DIR`,
    /// `BOXCAR_CONFIG_FILE` and `BOXCAR_APP_ENV`
    ///
    /// # Errors
    ///
    /// Returns an error if both `BOXCAR_CONFIG_DIR` and `BOXCAR_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && std::env::var(CONFIG_DIR_ENV).is_ok() {
            return Err(ConfigError::mutual_exclusivity(
                "BOXCAR_CONFIG_DIR and BOXCAR_CONFIG_FILE cannot both be set. \
                 Use BOXCAR_CONFIG_DIR for layered configuration or \
                 BOXCAR_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir,
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Create a loader that reads exactly one file (plus env overrides)
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Override the environment used to pick `{environment}.toml`
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load and validate configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `default.toml` is not found (when using layered loading)
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            Self::add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // Env vars always win: BOXCAR_BOXCAR__ACCESS_KEY -> boxcar.access_key
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }

    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests touching process env vars must not interleave
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const BASE_CONFIG: &str = r#"
[boxcar]
access_key = "AK"
secret_key = "SK"
endpoint = "https://api.example.com/push"

[logger]
level = "info"
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Restores touched environment variables on drop
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    fn clear_boxcar_env(env: &mut EnvGuard) {
        for key in [
            "BOXCAR_CONFIG_DIR",
            "BOXCAR_CONFIG_FILE",
            "BOXCAR_APP_ENV",
            "BOXCAR_BOXCAR__ACCESS_KEY",
            "BOXCAR_BOXCAR__SECRET_KEY",
            "BOXCAR_BOXCAR__ENDPOINT",
        ] {
            env.remove(key);
        }
    }

    #[test]
    fn test_config_loader_new_default() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_boxcar_env(&mut env);

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir, PathBuf::from("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_boxcar_env(&mut env);

        env.set("BOXCAR_CONFIG_DIR", "/custom/config");
        env.set("BOXCAR_CONFIG_FILE", "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("BOXCAR_CONFIG_DIR"));
                assert!(msg.contains("BOXCAR_CONFIG_FILE"));
            }
            other => panic!("Expected MutualExclusivityError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_boxcar_env(&mut env);

        let temp_dir = setup_config_dir(&[]);
        env.set("BOXCAR_CONFIG_DIR", temp_dir.path().to_str().unwrap());

        let loader = ConfigLoader::new().expect("Should create loader");
        match loader.load() {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_layers_environment_and_local() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_boxcar_env(&mut env);

        let temp_dir = setup_config_dir(&[
            ("default.toml", BASE_CONFIG),
            ("production.toml", "[boxcar]\naccess_key = \"PROD_AK\"\n"),
            ("local.toml", "[logger]\nlevel = \"debug\"\n"),
        ]);
        env.set("BOXCAR_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.set("BOXCAR_APP_ENV", "production");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.boxcar.access_key, "PROD_AK");
        assert_eq!(settings.boxcar.secret_key, "SK");
        assert_eq!(settings.logger.level, "debug");
    }

    #[test]
    fn test_env_vars_override_files() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_boxcar_env(&mut env);

        let temp_dir = setup_config_dir(&[("boxcar.toml", BASE_CONFIG)]);
        let file = temp_dir.path().join("boxcar.toml");
        env.set("BOXCAR_BOXCAR__SECRET_KEY", "from-env");

        let settings = ConfigLoader::from_file(file).load().unwrap();
        assert_eq!(settings.boxcar.secret_key, "from-env");
        assert_eq!(settings.boxcar.access_key, "AK");
    }

    #[test]
    fn test_load_rejects_invalid_endpoint() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_boxcar_env(&mut env);

        let temp_dir = setup_config_dir(&[(
            "boxcar.toml",
            "[boxcar]\naccess_key = \"AK\"\nsecret_key = \"SK\"\nendpoint = \"push\"\n",
        )]);

        let result = ConfigLoader::from_file(temp_dir.path().join("boxcar.toml")).load();
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_from_file_missing() {
        let _guard = TEST_MUTEX.lock().unwrap();
        let result = ConfigLoader::from_file("/nonexistent/boxcar.toml").load();
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_cli_config_flag_loads_single_file() {
        use clap::Parser;

        let _guard = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        clear_boxcar_env(&mut env);

        let temp_dir = setup_config_dir(&[("boxcar.toml", BASE_CONFIG)]);
        let path = temp_dir.path().join("boxcar.toml");
        let cli = crate::cli::Cli::try_parse_from([
            "boxcar-push",
            "--config",
            path.to_str().unwrap(),
            "--env",
            "prod",
            "sign",
            "--body",
            "{}",
        ])
        .unwrap();

        let settings = crate::cli::load_settings(&cli).unwrap();
        assert_eq!(settings.boxcar.access_key, "AK");
        assert_eq!(settings.boxcar.secret_key, "SK");
    }
}

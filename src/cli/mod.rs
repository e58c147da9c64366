//! CLI module for boxcar-push
//!
//! - Argument parsing with clap
//! - Settings loading with CLI overrides
//! - Command handlers for `send` and `sign`

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, SendArgs};

use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};
use crate::logger::LoggerConfig;

/// Load settings honouring `--config` and `--env`
///
/// # Errors
/// Returns error if configuration loading or validation fails
pub fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::from_file(path),
        None => ConfigLoader::new()?,
    };

    let loader = match cli.env {
        Some(env) => loader.with_environment(env.into()),
        None => loader,
    };

    loader.load()
}

/// Logger configuration from settings, with `--verbose`/`--quiet` applied
pub fn logger_config(cli: &Cli, settings: &Settings) -> Result<LoggerConfig, ConfigError> {
    let config = settings.logger.clone().into_logger_config()?;
    Ok(match cli.log_level_override() {
        Some(level) => config.with_level(level),
        None => config,
    })
}

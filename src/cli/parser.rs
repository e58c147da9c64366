//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

use super::validation::{
    parse_data_json, parse_field, validate_config_file_path, validate_method,
};
use crate::config::Environment as AppEnvironment;
use crate::error::AppResult;
use crate::services::notifications::{NotificationData, ScalarValue};

/// Send signed push notifications through Boxcar.io
#[derive(Parser, Debug)]
#[command(name = "boxcar-push")]
#[command(about = "Send signed push notifications through Boxcar.io")]
#[command(long_about = "
boxcar-push composes a Boxcar.io push payload, signs it with the configured
secret key and sends it to the gateway in a single request.

EXAMPLES:
    # Push an alert to one alias
    boxcar-push send --to user1 --alert \"Hello\" --badge 1

    # Push to several aliases with extra fields
    boxcar-push send --to user1 --to user2 --alert \"New message\" --field room=lobby

    # Show the signed request without sending it
    boxcar-push send --to user1 --alert \"Hello\" --dry-run

    # Compute the signature of an arbitrary body
    boxcar-push sign --body '{\"aliases\":[\"user1\"]}'

Credentials are read from config/default.toml or BOXCAR_BOXCAR__* variables.
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Reads this single TOML file instead of the layered config directory.
    #[arg(short, long, value_name = "FILE", value_parser = validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (prints the payload before sending)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose, sign and send one push notification
    Send(SendArgs),

    /// Print the signature for a request body
    Sign {
        /// HTTP method included in the signed string
        #[arg(long, default_value = "POST", value_parser = validate_method)]
        method: String,

        /// Exact request body to sign
        #[arg(long)]
        body: String,
    },
}

/// Arguments of the `send` command
#[derive(Args, Debug, Clone)]
pub struct SendArgs {
    /// Recipient alias; repeat for several recipients
    #[arg(long = "to", value_name = "ALIAS", required = true)]
    pub to: Vec<String>,

    /// Alert text shown to the user
    #[arg(long)]
    pub alert: Option<String>,

    /// Badge number
    #[arg(long)]
    pub badge: Option<i64>,

    /// Sound name
    #[arg(long)]
    pub sound: Option<String>,

    /// Sender identifier, sent as `recipient`
    #[arg(long)]
    pub from: Option<String>,

    /// Sender display name, sent as `senderName`
    #[arg(long = "from-name")]
    pub from_name: Option<String>,

    /// Extra scalar field as KEY=VALUE; repeatable
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, ScalarValue)>,

    /// Base notification data as a JSON object; flags override its values
    #[arg(long, value_name = "JSON", value_parser = parse_data_json)]
    pub data: Option<Value>,

    /// Print the signed request instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl SendArgs {
    /// Merge `--data` with the individual flags; flags win.
    pub fn notification_data(&self) -> AppResult<NotificationData> {
        let mut data = match &self.data {
            Some(raw) => NotificationData::try_from(raw.clone())?,
            None => NotificationData::new(),
        };

        if let Some(badge) = self.badge {
            data.badge = Some(Value::from(badge));
        }
        if let Some(alert) = &self.alert {
            data.alert = Some(Value::String(alert.clone()));
        }
        if let Some(sound) = &self.sound {
            data.sound = Some(Value::String(sound.clone()));
        }
        if let Some(from) = &self.from {
            data.from = Some(Value::String(from.clone()));
        }
        if let Some(from_name) = &self.from_name {
            data.from_name = Some(Value::String(from_name.clone()));
        }
        for (key, value) in &self.fields {
            data.extra.insert(key.clone(), value.clone());
        }

        Ok(data)
    }
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
    #[value(name = "test")]
    Test,
}

impl From<Environment> for AppEnvironment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => AppEnvironment::Development,
            Environment::Staging => AppEnvironment::Staging,
            Environment::Production => AppEnvironment::Production,
            Environment::Test => AppEnvironment::Test,
        }
    }
}

impl Cli {
    /// Log level forced by `--verbose`/`--quiet`, if any
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}

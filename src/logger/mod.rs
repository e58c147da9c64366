//! Logger Module
//!
//! Console logging based on `tracing-subscriber`, with colour control and
//! full, compact or JSON formatting.

pub mod config;


pub use config::*;

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber with the given configuration
///
/// `level` must be a single level name (trace, debug, info, warn, error);
/// per-target directives such as `info,hyper=warn` are rejected.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = build_filter(&config);
    let use_ansi = config.colored && std::io::stdout().is_terminal();

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.format {
        LogFormat::Full => registry
            .with(fmt::layer().with_ansi(use_ansi).with_target(true).with_level(true))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().with_ansi(false).json())
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("Failed to install global subscriber: {}", e))
}

fn build_filter(config: &LoggerConfig) -> EnvFilter {
    EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"))
}

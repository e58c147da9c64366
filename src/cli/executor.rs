//! Command executor for dispatching CLI commands

use super::handlers::{SendCommandHandler, SignCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Execute a CLI command with the loaded settings
///
/// # Errors
/// Returns errors from command handlers
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match &cli.command {
        Commands::Send(args) => SendCommandHandler::new(&settings)?.execute(args).await,
        Commands::Sign { method, body } => {
            SignCommandHandler::new(&settings)?.execute(method, body)?;
            Ok(())
        }
    }
}

use boxcar_push::cli::{Cli, execute_command, load_settings, logger_config};
use boxcar_push::logger::init_logger;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    init_logger(logger_config(&cli, &settings)?)?;

    tracing::debug!(
        app = %settings.application.name,
        version = %settings.application.version,
        "Configuration loaded"
    );

    execute_command(&cli, settings).await?;
    Ok(())
}

//! Birthday reminder CLI
//!
//! Loads the configuration, sets up logging and dispatches the subcommand.

use anyhow::Context;
use clap::Parser;
use infrastructure::{AppConfig, init_telemetry};
use presentation_cli::{Cli, Commands, app};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => AppConfig::load().context("Failed to load configuration")?,
    };

    let telemetry = match cli.verbosity_filter() {
        Some(level) => config.telemetry.clone().with_level(level),
        None => config.telemetry.clone(),
    };
    init_telemetry(&telemetry)?;

    config.validate()?;

    match cli.command() {
        Commands::Run => app::run(&config).await,
        Commands::Today => app::today(&config).await,
        Commands::Export { output } => app::export(&config, output).await,
        Commands::CheckConfig => {
            app::check_config(&config);
            Ok(())
        },
    }
}

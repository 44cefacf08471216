//! pulsetrack - live heart rate and step count dashboard.
//!
//! This is the main entry point for the pulsetrack CLI tool.

use std::process::ExitCode;

use clap::Parser;
use pulsetrack::cli::{Cli, Commands, DashboardCommand};
use pulsetrack::{logging, PulseConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Dashboard(DashboardCommand::default()));

    // Config commands must still work on a file that fails validation.
    let loaded = match command {
        Commands::Config(_) => PulseConfig::read(config_path),
        _ => PulseConfig::load(config_path),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.logging, cli.verbose, command.log_target(&config)) {
        eprintln!("\x1b[33mWarning:\x1b[0m logging disabled: {e:#}");
    }

    match command {
        Commands::Dashboard(c) => c.execute(&config).await,
        Commands::Fetch(c) => c.execute(&config).await,
        Commands::Config(c) => c.execute(config_path),
    }
}

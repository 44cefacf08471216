//! CLI commands and argument handling.
//!
//! This module contains the clap CLI definitions; command bodies live in
//! [`commands`].

pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::PulseConfig;
use crate::logging::LogTarget;

/// Live heart rate and step count dashboard.
///
/// Fetches both metrics concurrently from simulated sensors. Refresh and
/// cancel at any time; a failed load can be retried.
#[derive(Parser, Debug)]
#[command(name = "pulsetrack")]
#[command(author, version = crate::VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file.
    #[arg(long, global = true, env = "PULSETRACK_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Command to run; defaults to the dashboard.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands for pulsetrack.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the live dashboard (default).
    ///
    /// Keys: r refresh/retry, c cancel, q quit.
    Dashboard(DashboardCommand),

    /// Load metrics once and print them.
    ///
    /// Press Ctrl+C to cancel the load.
    Fetch(FetchCommand),

    /// Inspect or change configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

impl Commands {
    /// Where logs should go while this command runs.
    pub fn log_target(&self, config: &PulseConfig) -> LogTarget {
        match self {
            Commands::Dashboard(_) => LogTarget::File(PathBuf::from(&config.logging.file)),
            _ => LogTarget::Stderr,
        }
    }
}

/// Arguments for the 'dashboard' command.
#[derive(Args, Debug, Default)]
pub struct DashboardCommand {
    /// Don't load metrics until refresh is pressed.
    #[arg(long)]
    pub no_autoload: bool,

    /// Override the redraw interval in milliseconds.
    #[arg(long, value_name = "MS")]
    pub tick_rate: Option<u64>,
}

/// Arguments for the 'fetch' command.
#[derive(Args, Debug)]
pub struct FetchCommand {
    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Subcommands for config management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show all configuration values.
    Show(ConfigShowCommand),

    /// Get a specific config value.
    ///
    /// Use dot notation (e.g. steps.delay_ms).
    Get(ConfigGetCommand),

    /// Set a config value.
    ///
    /// Values are validated before saving.
    Set(ConfigSetCommand),

    /// List all valid config keys.
    Keys,
}

/// Arguments for 'config show' command.
#[derive(Args, Debug)]
pub struct ConfigShowCommand {
    /// Filter to a specific section (e.g. 'heart_rate').
    #[arg(short = 's', long)]
    pub section: Option<String>,
}

/// Arguments for 'config get' command.
#[derive(Args, Debug)]
pub struct ConfigGetCommand {
    /// Config key in dot notation.
    pub key: String,
}

/// Arguments for 'config set' command.
#[derive(Args, Debug)]
pub struct ConfigSetCommand {
    /// Config key in dot notation.
    pub key: String,

    /// Value to set.
    pub value: String,
}

impl DashboardCommand {
    /// Execute the dashboard command.
    pub async fn execute(&self, config: &PulseConfig) -> ExitCode {
        let tick_ms = self.tick_rate.unwrap_or(config.dashboard.tick_rate_ms).max(1);
        let tick_rate = Duration::from_millis(tick_ms);
        let load_on_start = config.dashboard.load_on_start && !self.no_autoload;

        match commands::dashboard::dashboard(config, tick_rate, load_on_start).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("\x1b[31mError:\x1b[0m {e}");
                ExitCode::FAILURE
            }
        }
    }
}

impl FetchCommand {
    /// Execute the fetch command.
    pub async fn execute(&self, config: &PulseConfig) -> ExitCode {
        match commands::fetch::fetch(config, self.json).await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("\x1b[31mError:\x1b[0m {e}");
                ExitCode::FAILURE
            }
        }
    }
}

impl ConfigCommands {
    /// Execute a config subcommand against the file at `path`.
    pub fn execute(&self, path: Option<&std::path::Path>) -> ExitCode {
        use commands::config as cmd;

        let result = match self {
            ConfigCommands::Show(c) => cmd::config_show(path, c.section.as_deref()),
            ConfigCommands::Get(c) => cmd::config_get(path, &c.key),
            ConfigCommands::Set(c) => cmd::config_set(path, &c.key, &c.value),
            ConfigCommands::Keys => {
                cmd::config_keys();
                Ok(())
            }
        };

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("\x1b[31mError:\x1b[0m {e}");
                ExitCode::FAILURE
            }
        }
    }
}

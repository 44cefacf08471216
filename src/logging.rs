//! Structured logging setup.
//!
//! Logs go to stderr for one-shot commands. While the dashboard owns the
//! terminal they are appended to a file instead.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error.
    Stderr,
    /// Append to a file, creating it and its parent directories.
    File(PathBuf),
}

/// Effective level: `--verbose` bumps the configured level to debug.
pub fn effective_level(config: &LoggingConfig, verbose: bool) -> &str {
    if verbose {
        "debug"
    } else {
        &config.level
    }
}

/// Build the filter. `RUST_LOG` overrides the configured level entirely.
pub fn env_filter(level: &str) -> EnvFilter {
    std::env::var("RUST_LOG").map_or_else(
        |_| EnvFilter::new(format!("warn,pulsetrack={level}")),
        EnvFilter::new,
    )
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(config: &LoggingConfig, verbose: bool, target: LogTarget) -> Result<()> {
    let filter = env_filter(effective_level(config, verbose));
    let registry = tracing_subscriber::registry().with(filter);

    match target {
        LogTarget::Stderr => registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .try_init()
            .context("Failed to initialise logging")?,
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
                .context("Failed to initialise logging")?
        }
    }

    Ok(())
}

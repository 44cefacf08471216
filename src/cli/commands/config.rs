//! Config command implementations.
//!
//! Implements the `pulsetrack config` subcommands for managing
//! configuration without editing JSON directly.

use std::path::Path;

use crate::config::{FieldError, PulseConfig};

/// Result type for config command operations.
pub type ConfigCommandResult = Result<(), ConfigCommandError>;

/// Error type for config command operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigCommandError {
    /// A key or value was rejected.
    #[error("{0}")]
    FieldError(#[from] FieldError),

    /// The config file could not be loaded, validated, or saved.
    #[error("Config error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    /// `--section` named something that is not a section.
    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

/// Show config values in a human-readable format.
pub fn config_show(path: Option<&Path>, section_filter: Option<&str>) -> ConfigCommandResult {
    let config = PulseConfig::read(path)?;
    print!("{}", render_sections(&config, section_filter)?);
    Ok(())
}

/// Render one or all sections as aligned `field value` lines.
pub fn render_sections(
    config: &PulseConfig,
    section_filter: Option<&str>,
) -> Result<String, ConfigCommandError> {
    let sections: Vec<&str> = match section_filter {
        Some(filter) if PulseConfig::fields_for_section(filter).is_some() => vec![filter],
        Some(filter) => return Err(ConfigCommandError::UnknownSection(filter.into())),
        None => PulseConfig::section_names().to_vec(),
    };

    let mut out = String::from("\x1b[1m=== pulsetrack config ===\x1b[0m\n\n");
    for section in sections {
        out.push_str(&format!("\x1b[36m{section}\x1b[0m\n"));
        for field in PulseConfig::fields_for_section(section).unwrap_or(&[]) {
            let value = config.get_by_path(&format!("{section}.{field}"))?;
            out.push_str(&format!("  {field:<16} {value}\n"));
        }
        out.push('\n');
    }
    Ok(out)
}

/// Get a specific config value.
pub fn config_get(path: Option<&Path>, key: &str) -> ConfigCommandResult {
    let config = PulseConfig::read(path)?;
    let value = config.get_by_path(key)?;
    println!("{value}");
    Ok(())
}

/// Set a config value. The whole config is validated before it is saved.
pub fn config_set(path: Option<&Path>, key: &str, value: &str) -> ConfigCommandResult {
    let mut config = PulseConfig::read(path)?;
    let old_value = config.get_by_path(key).ok();

    config.set_by_path(key, value)?;
    config.validate()?;
    config.save(path)?;

    let new_value = config.get_by_path(key)?;
    match old_value {
        Some(old) if old != new_value => {
            println!("\x1b[32m✓\x1b[0m {key}: {old} → {new_value}");
        }
        Some(_) => println!("\x1b[33m⚠\x1b[0m {key} unchanged: {new_value}"),
        None => println!("\x1b[32m✓\x1b[0m {key} = {new_value}"),
    }
    Ok(())
}

/// List all valid config keys.
pub fn config_keys() {
    for key in PulseConfig::all_keys() {
        println!("{key}");
    }
}

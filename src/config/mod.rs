//! Configuration models for .pulsetrack/config.json.
//!
//! Every field has a serde default, so a missing file or a partial file
//! yields a usable configuration.

pub mod field;
mod validation;

use serde::{Deserialize, Serialize};

pub use field::{ConfigField, FieldError};
use std::fs;
use std::path::{Path, PathBuf};

/// Default data directory path.
pub const DATA_DIR: &str = ".pulsetrack";
/// Default config file path.
pub const CONFIG_FILE: &str = ".pulsetrack/config.json";
/// Default log file path (dashboard mode).
pub const LOG_FILE: &str = ".pulsetrack/pulsetrack.log";

/// Simulated heart rate sensor settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateConfig {
    /// Simulated sensor latency in milliseconds.
    #[serde(default = "default_heart_rate_delay_ms")]
    pub delay_ms: u64,
    /// Lowest bpm the sensor reports.
    #[serde(default = "default_min_bpm")]
    pub min_bpm: u32,
    /// Highest bpm the sensor reports.
    #[serde(default = "default_max_bpm")]
    pub max_bpm: u32,
}

fn default_heart_rate_delay_ms() -> u64 {
    1_000
}

fn default_min_bpm() -> u32 {
    60
}

fn default_max_bpm() -> u32 {
    110
}

impl Default for HeartRateConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_heart_rate_delay_ms(),
            min_bpm: default_min_bpm(),
            max_bpm: default_max_bpm(),
        }
    }
}

/// Simulated step counter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepsConfig {
    /// Simulated sync latency in milliseconds.
    #[serde(default = "default_steps_delay_ms")]
    pub delay_ms: u64,
    /// Lowest step count reported.
    #[serde(default = "default_min_count")]
    pub min_count: u32,
    /// Highest step count reported.
    #[serde(default = "default_max_count")]
    pub max_count: u32,
}

fn default_steps_delay_ms() -> u64 {
    8_000
}

fn default_min_count() -> u32 {
    1_000
}

fn default_max_count() -> u32 {
    20_000
}

impl Default for StepsConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_steps_delay_ms(),
            min_count: default_min_count(),
            max_count: default_max_count(),
        }
    }
}

/// Terminal dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Redraw interval in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Start loading as soon as the dashboard opens.
    #[serde(default = "default_true")]
    pub load_on_start: bool,
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            load_on_start: true,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// File that receives logs while the dashboard owns the terminal.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    LOG_FILE.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main pulsetrack configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseConfig {
    /// Heart rate source settings.
    #[serde(default)]
    pub heart_rate: HeartRateConfig,
    /// Steps source settings.
    #[serde(default)]
    pub steps: StepsConfig,
    /// Dashboard settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Error type for config operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading or writing the config file.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Error parsing the config file JSON.
    #[error("Failed to parse config JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    /// Values that parse but cannot be used together.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl PulseConfig {
    /// Load configuration from a file, or return defaults if it doesn't exist.
    ///
    /// `path` defaults to `.pulsetrack/config.json`. The loaded values are
    /// validated before being returned.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the config file without cross-field validation.
    ///
    /// Used by the `config` commands so an invalid file can still be
    /// inspected and repaired.
    pub fn read(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let path = path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the path for the config file.
    pub fn config_file() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    /// Get a config value by dot-notation path (e.g. "steps.delay_ms").
    pub fn get_by_path(&self, path: &str) -> Result<String, FieldError> {
        let (section, key) = field::split_path(path)?;
        let value = match section {
            "heart_rate" => self.heart_rate.get_field(key),
            "steps" => self.steps.get_field(key),
            "dashboard" => self.dashboard.get_field(key),
            "logging" => self.logging.get_field(key),
            _ => None,
        };
        value.ok_or_else(|| FieldError::UnknownKey(path.into()))
    }

    /// Set a config value by dot-notation path.
    pub fn set_by_path(&mut self, path: &str, value: &str) -> Result<(), FieldError> {
        let (section, key) = field::split_path(path)?;
        match section {
            "heart_rate" => self.heart_rate.set_field(key, value),
            "steps" => self.steps.set_field(key, value),
            "dashboard" => self.dashboard.set_field(key, value),
            "logging" => self.logging.set_field(key, value),
            _ => Err(FieldError::UnknownKey(path.into())),
        }
    }

    /// List all section names.
    pub fn section_names() -> &'static [&'static str] {
        &["heart_rate", "steps", "dashboard", "logging"]
    }

    /// Get all field names for a section.
    pub fn fields_for_section(section: &str) -> Option<&'static [&'static str]> {
        match section {
            "heart_rate" => Some(HeartRateConfig::field_names()),
            "steps" => Some(StepsConfig::field_names()),
            "dashboard" => Some(DashboardConfig::field_names()),
            "logging" => Some(LoggingConfig::field_names()),
            _ => None,
        }
    }

    /// All valid keys in dot notation.
    pub fn all_keys() -> Vec<String> {
        Self::section_names()
            .iter()
            .flat_map(|section| {
                Self::fields_for_section(section)
                    .unwrap_or(&[])
                    .iter()
                    .map(move |field| format!("{section}.{field}"))
            })
            .collect()
    }
}

//! Field access and validation for config sections.

use super::field::{parse_bool, parse_number, ConfigField, FieldError};
use super::{ConfigError, DashboardConfig, HeartRateConfig, LoggingConfig, PulseConfig, StepsConfig};

/// Level names accepted by the logging filter.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl ConfigField for HeartRateConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "delay_ms" => Some(self.delay_ms.to_string()),
            "min_bpm" => Some(self.min_bpm.to_string()),
            "max_bpm" => Some(self.max_bpm.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "delay_ms" => self.delay_ms = parse_number(key, value)?,
            "min_bpm" => self.min_bpm = parse_number(key, value)?,
            "max_bpm" => self.max_bpm = parse_number(key, value)?,
            _ => return Err(FieldError::UnknownKey(key.into())),
        }
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &["delay_ms", "min_bpm", "max_bpm"]
    }
}

impl ConfigField for StepsConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "delay_ms" => Some(self.delay_ms.to_string()),
            "min_count" => Some(self.min_count.to_string()),
            "max_count" => Some(self.max_count.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "delay_ms" => self.delay_ms = parse_number(key, value)?,
            "min_count" => self.min_count = parse_number(key, value)?,
            "max_count" => self.max_count = parse_number(key, value)?,
            _ => return Err(FieldError::UnknownKey(key.into())),
        }
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &["delay_ms", "min_count", "max_count"]
    }
}

impl ConfigField for DashboardConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "tick_rate_ms" => Some(self.tick_rate_ms.to_string()),
            "load_on_start" => Some(self.load_on_start.to_string()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "tick_rate_ms" => {
                let rate: u64 = parse_number(key, value)?;
                if rate == 0 {
                    return Err(FieldError::InvalidValue {
                        key: key.into(),
                        expected: "positive integer".into(),
                    });
                }
                self.tick_rate_ms = rate;
            }
            "load_on_start" => self.load_on_start = parse_bool(key, value)?,
            _ => return Err(FieldError::UnknownKey(key.into())),
        }
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &["tick_rate_ms", "load_on_start"]
    }
}

impl ConfigField for LoggingConfig {
    fn get_field(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.level.clone()),
            "file" => Some(self.file.clone()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "level" => {
                let level = value.to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(FieldError::InvalidValue {
                        key: key.into(),
                        expected: LOG_LEVELS.join(" | "),
                    });
                }
                self.level = level;
            }
            "file" => {
                if value.trim().is_empty() {
                    return Err(FieldError::InvalidValue {
                        key: key.into(),
                        expected: "file path".into(),
                    });
                }
                self.file = value.to_string();
            }
            _ => return Err(FieldError::UnknownKey(key.into())),
        }
        Ok(())
    }

    fn field_names() -> &'static [&'static str] {
        &["level", "file"]
    }
}

impl PulseConfig {
    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heart_rate.min_bpm > self.heart_rate.max_bpm {
            return Err(ConfigError::Invalid(format!(
                "heart_rate.min_bpm ({}) is greater than heart_rate.max_bpm ({})",
                self.heart_rate.min_bpm, self.heart_rate.max_bpm
            )));
        }
        if self.steps.min_count > self.steps.max_count {
            return Err(ConfigError::Invalid(format!(
                "steps.min_count ({}) is greater than steps.max_count ({})",
                self.steps.min_count, self.steps.max_count
            )));
        }
        if self.dashboard.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.tick_rate_ms must be positive".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

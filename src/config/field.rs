//! ConfigField trait for dynamic get/set access to config sections.
//!
//! Powers the `pulsetrack config get/set` commands.

/// Error type for config field operations.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The specified config key is not recognised.
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// The value provided is invalid for the specified key.
    #[error("Invalid value for {key}: expected {expected}")]
    InvalidValue {
        /// The config key that was being set.
        key: String,
        /// Description of the expected value format.
        expected: String,
    },

    /// The config path format is invalid.
    #[error("Invalid path format: {0}")]
    InvalidPath(String),
}

/// Config sections that support field access by name.
pub trait ConfigField {
    /// Get a field value by name as a display string.
    ///
    /// Returns `None` if the key is not recognised.
    fn get_field(&self, key: &str) -> Option<String>;

    /// Set a field value by name from string input.
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError>;

    /// All field names in this section.
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;
}

/// Split a dot-notation path into section and field.
///
/// ```ignore
/// split_path("heart_rate.delay_ms") // Ok(("heart_rate", "delay_ms"))
/// split_path("invalid") // Err(InvalidPath)
/// ```
pub fn split_path(path: &str) -> Result<(&str, &str), FieldError> {
    path.split_once('.')
        .ok_or_else(|| FieldError::InvalidPath(format!("{path} (expected section.field)")))
}

/// Parse a boolean from various string representations.
pub fn parse_bool(key: &str, value: &str) -> Result<bool, FieldError> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(FieldError::InvalidValue {
            key: key.into(),
            expected: "true/false, yes/no, 1/0, on/off".into(),
        }),
    }
}

/// Parse a non-negative integer field.
pub fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, FieldError> {
    value.trim().parse().map_err(|_| FieldError::InvalidValue {
        key: key.into(),
        expected: "non-negative integer".into(),
    })
}

//! Error types.

use thiserror::Error;

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors raised by a preference store. Callers log and drop these.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Preference storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt preference file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to encode preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

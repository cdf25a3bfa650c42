//! Typed error variants for the avour-config crate.
//!
//! Provides structured error types for config I/O and validation operations
//! so callers can match on the failure instead of inspecting strings.

use thiserror::Error;

/// Errors that can occur when loading, saving or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the field and the rule it broke.
    #[error("Config validation error: {0}")]
    Validation(String),
}

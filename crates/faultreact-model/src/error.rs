// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model configuration

use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or validating a model configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value is outside its allowed range
    #[error("Invalid configuration value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Malformed TOML content
    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, msg: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            message: msg.into(),
        }
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for deck and calculation export

use thiserror::Error;

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors that can occur while exporting a model
#[derive(Error, Debug)]
pub enum ExportError {
    /// Model or settings cannot be exported
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Writing a deck section failed
    #[error("Failed to write {section} to fault reactivation INP: {source}")]
    Section {
        section: String,
        #[source]
        source: std::io::Error,
    },

    /// An auxiliary property file could not be created
    #[error("Failed to create {0} file")]
    PropertyFile(String),

    /// Output file could not be opened
    #[error("Unable to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    /// Create an invalid model error
    pub fn invalid_model(msg: impl Into<String>) -> Self {
        ExportError::InvalidModel(msg.into())
    }

    /// Create a property file error
    pub fn property_file(name: impl Into<String>) -> Self {
        ExportError::PropertyFile(name.into())
    }

    /// Attach the deck section to an IO error
    pub fn in_section(self, section: &str) -> Self {
        match self {
            ExportError::Io(source) => ExportError::Section {
                section: section.to_string(),
                source,
            },
            other => other,
        }
    }
}

/// Errors raised by the calculation interchange format
#[derive(Error, Debug)]
pub enum CalculationError {
    /// Content is not a valid calculation table
    #[error("Failed to parse calculations: {0}")]
    Parse(String),

    /// Calculations could not be serialized
    #[error("Failed to serialize calculations: {0}")]
    Serialize(String),

    /// A required field is absent
    #[error("Calculation {index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry generation

use thiserror::Error;

/// Geometry result type
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry generation errors
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry generation error
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Cell counts that cannot produce a grid
    #[error("Invalid cell count: {0}")]
    InvalidCellCount(String),

    /// Model parameters that leave the model geometry undefined
    #[error("Invalid model: {0}")]
    InvalidModel(String),
}

impl Error {
    /// Create a geometry error
    pub fn geometry(msg: impl Into<String>) -> Self {
        Error::Geometry(msg.into())
    }

    /// Create an invalid cell count error
    pub fn invalid_cell_count(msg: impl Into<String>) -> Self {
        Error::InvalidCellCount(msg.into())
    }

    /// Create an invalid model error
    pub fn invalid_model(msg: impl Into<String>) -> Self {
        Error::InvalidModel(msg.into())
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! FaultReact Model - Shared types and data-provider traits
//!
//! This crate holds the vocabulary shared by the geometry, data-access and
//! export crates of a fault reactivation model:
//!
//! - the part, surface, boundary and property enumerations used to key
//!   element sets and data queries
//! - [`StructuredGridCase`] and [`FemResultCase`], the interfaces of the
//!   opaque simulation-grid providers the data accessors query
//! - [`ModelConfig`], the TOML description of a model and its export options
//!
//! # Example
//!
//! ```ignore
//! use faultreact_model::{ModelConfig, GridPart};
//!
//! let config = ModelConfig::load("model.toml")?;
//! config.validate()?;
//! println!("{} horizontal cells per part", config.grid.horizontal_cells);
//! ```

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Re-export all public types
pub use config::*;
pub use error::*;
pub use traits::*;
pub use types::*;

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # FaultReact Export
//!
//! Writes fault reactivation models as INP input decks for the
//! finite-element solver, and reads and writes calculation expression files.
//!
//! - [`inp`]: format-exact emitters for keyword lines, node and element
//!   blocks, sets and surfaces
//! - [`FaultReactivationModelExporter`]: the complete deck, with optional
//!   include files for grid-sampled pore pressure and initial stress
//! - [`calculation`]: TOML interchange of calculation expressions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use faultreact_data::{DataAccess, DataParameters};
//! use faultreact_export::{ExportSettings, FaultReactivationModelExporter};
//! use faultreact_geometry::FaultReactivationModel;
//!
//! let model = FaultReactivationModel::from_config(&config)?;
//! let mut data = DataAccess::gradient_only(&DataParameters::from(&config.data));
//! let exporter = FaultReactivationModelExporter::new(ExportSettings::from_config(&config));
//! exporter.export_to_file("fault.inp", &model, &mut data)?;
//! ```

pub mod calculation;
pub mod error;
pub mod exporter;
pub mod inp;
pub mod settings;

pub use calculation::{
    export_calculations, import_calculations, read_calculations_file, write_calculations_file,
    Calculation, CalculationVariable,
};
pub use error::{CalculationError, ExportError, Result};
pub use exporter::{FaultReactivationModelExporter, ModelSettings};
pub use settings::{ExportSettings, BORDER_NAMES, BOUNDARY_NAMES, BOUNDARY_SYMMETRY, FACES};

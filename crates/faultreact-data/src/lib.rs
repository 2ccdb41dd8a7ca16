// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # FaultReact Data
//!
//! Position-based data extraction for fault reactivation models.
//!
//! ## Architecture
//!
//! - [`DataAccessor`]: trait for values at a position (pore pressure,
//!   temperature, stress, depth)
//! - [`DataAccess`]: registry choosing the accessor per [`Property`](faultreact_model::Property)
//!   and evaluating it over model grids
//! - [`WellLogExtraction`]: interpolation and extrapolation along synthetic
//!   vertical paths
//!
//! Positions outside the available data yield `f64::INFINITY`. Pore pressure
//! falls back to a hydrostatic gradient, stress without a finite-element case
//! is integrated from the overburden.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use faultreact_data::{DataAccess, DataParameters, DataSources};
//! use faultreact_model::{GridPart, Property};
//!
//! let sources = DataSources { grid: Some(&eclipse_case), fem: None };
//! let mut access = DataAccess::with_sources(sources, &DataParameters::default());
//! let pressures = access.property_values(&model, GridPart::Part1, Property::PorePressure, 0);
//! ```

pub mod access;
pub mod accessor;
pub mod grid_accessors;
pub mod memory;
pub mod stress;
pub mod well_log;

pub use access::{DataAccess, DataSources};
pub use accessor::{
    depth_below_sea_level, hydrostatic_pore_pressure, DataAccessor, DataParameters, GRAVITY,
    PASCAL_PER_BAR,
};
pub use grid_accessors::{PorePressureAccessor, TemperatureAccessor};
pub use memory::{HexFemCase, RegularGridCase};
pub use stress::{EclipseStressAccessor, FemStressAccessor, OVERBURDEN_DENSITY};
pub use well_log::WellLogExtraction;

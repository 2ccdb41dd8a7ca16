// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # FaultReact Geometry
//!
//! Geometry of a fault reactivation model: the model plane with its overlay
//! rectangles, and the two structured hexahedral grids on either side of the
//! fault.
//!
//! ## Overview
//!
//! - **Model**: [`FaultReactivationModel`] holds the fault plane, extent and
//!   fault intersection, and computes the six overlay rectangles
//! - **Grids**: [`GriddedPart3d`] generates nodes, C3D8 connectivity and the
//!   border/boundary element sets of one part
//! - **Elements**: [`hex8`] has the isoparametric helpers shared with the
//!   finite-element data accessors
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use faultreact_geometry::{FaultReactivationModel, Point3, Vector3};
//! use faultreact_model::GridConfig;
//!
//! let mut model = FaultReactivationModel::new();
//! model.set_plane(Point3::new(0.0, 0.0, -1000.0), Vector3::new(1.0, 0.0, 0.0));
//! model.set_max_extent_from_anchor(2000.0, -3000.0, 0.0);
//! model.set_fault_plane_intersect(Point3::new(0.0, 0.0, -900.0), Point3::new(0.0, 0.0, -1100.0));
//! model.update_rects();
//! model.generate_geometry(&GridConfig::default())?;
//! ```

pub mod error;
pub mod gridded_part;
pub mod hex8;
pub mod model;

// Re-export nalgebra types for convenience
pub use nalgebra::{Isometry3, Point3, Vector3};

// Re-export main types
pub use error::{Error, Result};
pub use gridded_part::{GriddedPart3d, THICKNESS_CELLS};
pub use model::{FaultReactivationModel, Texture};

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data accessor trait and shared parameters

use faultreact_model::{DataConfig, GridPart, Property};
use nalgebra::Point3;
use rustc_hash::FxHashMap;

/// Gravitational acceleration in m/s2
pub const GRAVITY: f64 = 9.81;

/// Conversion from bar to pascal
pub const PASCAL_PER_BAR: f64 = 1.0e5;

/// Value provider for one or more model properties
///
/// Accessors are bound to a single time step. Positions outside the data
/// domain yield `f64::INFINITY`; callers treat that as "no data".
pub trait DataAccessor {
    /// Select the time step and re-bind the result arrays
    fn set_time_step(&mut self, time_step: usize);

    /// Re-bind to the result arrays of the current time step
    fn update_result_accessor(&mut self);

    /// Check whether this accessor serves a property
    fn is_matching(&self, property: Property) -> bool;

    /// Property value at a position
    ///
    /// # Arguments
    /// * `position` - Query position in global coordinates
    /// * `part` - Grid part the position belongs to
    ///
    /// # Returns
    /// The value in SI units, or `f64::INFINITY` when it cannot be resolved
    fn value_at_position(&self, position: &Point3<f64>, part: GridPart) -> f64;
}

/// Parameters shared by the accessors of one export
#[derive(Debug, Clone, PartialEq)]
pub struct DataParameters {
    /// Hydrostatic gradient used when no pore pressure can be read
    pub pore_pressure_gradient: f64,
    /// Seabed depth in metres below sea level
    pub seabed_depth: f64,
    /// Sea water density in kg/m3
    pub water_density: f64,
    pub lateral_stress_coefficient: f64,
    /// Maps cell indices of a refined grid onto the cells holding results
    pub cell_index_adjustment: Option<FxHashMap<usize, usize>>,
}

impl Default for DataParameters {
    fn default() -> Self {
        Self::from(&DataConfig::default())
    }
}

impl From<&DataConfig> for DataParameters {
    fn from(config: &DataConfig) -> Self {
        Self {
            pore_pressure_gradient: config.pore_pressure_gradient,
            seabed_depth: config.seabed_depth,
            water_density: config.water_density,
            lateral_stress_coefficient: config.lateral_stress_coefficient,
            cell_index_adjustment: None,
        }
    }
}

/// Hydrostatic pore pressure in pascal at a depth in metres
pub fn hydrostatic_pore_pressure(gradient: f64, depth: f64) -> f64 {
    gradient * GRAVITY * depth * 1000.0
}

/// Depth below sea level (z = 0), zero above it
pub fn depth_below_sea_level(position: &Point3<f64>) -> f64 {
    (-position.z).max(0.0)
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessors reading cell results of a structured grid case

use crate::accessor::{depth_below_sea_level, hydrostatic_pore_pressure, DataAccessor, PASCAL_PER_BAR};
use faultreact_model::{GridPart, Property, ResultAddress, StructuredGridCase};
use log::debug;
use nalgebra::Point3;
use rustc_hash::FxHashMap;

/// Cell lookup shared by the structured-grid accessors
#[derive(Clone, Copy)]
struct CellLookup<'a> {
    case: Option<&'a dyn StructuredGridCase>,
    time_step: usize,
    has_result: bool,
}

impl<'a> CellLookup<'a> {
    fn new(case: Option<&'a dyn StructuredGridCase>) -> Self {
        Self {
            case,
            time_step: 0,
            has_result: false,
        }
    }

    fn update(&mut self, address: &ResultAddress) {
        self.has_result = self
            .case
            .map(|case| self.time_step < case.time_step_count())
            .unwrap_or(false);
        debug!(
            "{} bound to time step {}: {}",
            address.name,
            self.time_step,
            if self.has_result { "available" } else { "no data" }
        );
    }

    fn value(
        &self,
        address: &ResultAddress,
        position: &Point3<f64>,
        adjustment: Option<&FxHashMap<usize, usize>>,
    ) -> Option<f64> {
        if !self.has_result {
            return None;
        }
        let case = self.case?;
        let mut cell = case.find_cell_index(position)?;
        if let Some(&adjusted) = adjustment.and_then(|map| map.get(&cell)) {
            cell = adjusted;
        }
        case.cell_value(address, self.time_step, cell)
            .filter(|v| v.is_finite())
    }
}

/// Pore pressure from the grid, with a hydrostatic fallback
///
/// Grid values are stored in bar and returned in pascal. When the position
/// is outside the grid or the value is undefined, the pressure is
/// `gradient * 9.81 * depth * 1000` with depth below sea level, so positions
/// above z = 0 get zero pressure.
pub struct PorePressureAccessor<'a> {
    lookup: CellLookup<'a>,
    address: ResultAddress,
    gradient: f64,
    cell_index_adjustment: Option<FxHashMap<usize, usize>>,
}

impl<'a> PorePressureAccessor<'a> {
    pub fn new(case: Option<&'a dyn StructuredGridCase>, gradient: f64) -> Self {
        let mut accessor = Self {
            lookup: CellLookup::new(case),
            address: ResultAddress::pressure(),
            gradient,
            cell_index_adjustment: None,
        };
        accessor.update_result_accessor();
        accessor
    }

    pub fn with_cell_index_adjustment(mut self, adjustment: Option<FxHashMap<usize, usize>>) -> Self {
        self.cell_index_adjustment = adjustment;
        self
    }

    /// Pore pressure in pascal read from the grid, if available
    pub fn grid_value(&self, position: &Point3<f64>) -> Option<f64> {
        self.lookup
            .value(&self.address, position, self.cell_index_adjustment.as_ref())
            .map(|bar| bar * PASCAL_PER_BAR)
    }

    pub fn gradient(&self) -> f64 {
        self.gradient
    }
}

impl DataAccessor for PorePressureAccessor<'_> {
    fn set_time_step(&mut self, time_step: usize) {
        self.lookup.time_step = time_step;
        self.update_result_accessor();
    }

    fn update_result_accessor(&mut self) {
        self.lookup.update(&self.address);
    }

    fn is_matching(&self, property: Property) -> bool {
        property == Property::PorePressure
    }

    fn value_at_position(&self, position: &Point3<f64>, _part: GridPart) -> f64 {
        self.grid_value(position)
            .unwrap_or_else(|| hydrostatic_pore_pressure(self.gradient, depth_below_sea_level(position)))
    }
}

/// Temperature from the grid
///
/// There is no gradient fallback: positions outside the grid yield
/// `f64::INFINITY`.
pub struct TemperatureAccessor<'a> {
    lookup: CellLookup<'a>,
    address: ResultAddress,
}

impl<'a> TemperatureAccessor<'a> {
    pub fn new(case: Option<&'a dyn StructuredGridCase>) -> Self {
        let mut accessor = Self {
            lookup: CellLookup::new(case),
            address: ResultAddress::temperature(),
        };
        accessor.update_result_accessor();
        accessor
    }
}

impl DataAccessor for TemperatureAccessor<'_> {
    fn set_time_step(&mut self, time_step: usize) {
        self.lookup.time_step = time_step;
        self.update_result_accessor();
    }

    fn update_result_accessor(&mut self) {
        self.lookup.update(&self.address);
    }

    fn is_matching(&self, property: Property) -> bool {
        property == Property::Temperature
    }

    fn value_at_position(&self, position: &Point3<f64>, _part: GridPart) -> f64 {
        self.lookup
            .value(&self.address, position, None)
            .unwrap_or(f64::INFINITY)
    }
}

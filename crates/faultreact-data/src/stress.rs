// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stress accessors
//!
//! Stress comes from a finite-element result case when one is available
//! ([`FemStressAccessor`]), otherwise it is estimated from the overburden
//! along a vertical path through the structured grid
//! ([`EclipseStressAccessor`]).

use crate::accessor::{DataAccessor, DataParameters, GRAVITY, PASCAL_PER_BAR};
use crate::grid_accessors::PorePressureAccessor;
use crate::well_log::WellLogExtraction;
use faultreact_geometry::hex8;
use faultreact_model::{FemResultAddress, FemResultCase, GridPart, Property, StructuredGridCase};
use log::{debug, trace};
use nalgebra::Point3;

/// Samples along the synthetic path used when a position is outside the mesh
pub const WELL_LOG_SAMPLES: usize = 100;

/// Density used for every overburden segment, in kg/m3
pub const OVERBURDEN_DENSITY: f64 = 999.0;

fn is_stress_property(property: Property) -> bool {
    Property::STRESS.contains(&property)
}

/// Stress from nodal results of a finite-element case
///
/// Reads the last frame of the selected time step. Stress and pore pressure
/// are stored in bar.
pub struct FemStressAccessor<'a> {
    case: &'a dyn FemResultCase,
    property: Property,
    time_step: usize,
    frame: Option<usize>,
    s11: FemResultAddress,
    s22: FemResultAddress,
    s33: FemResultAddress,
    pore_pressure: FemResultAddress,
}

impl<'a> FemStressAccessor<'a> {
    pub fn new(case: &'a dyn FemResultCase, property: Property) -> Self {
        let mut accessor = Self {
            case,
            property,
            time_step: 0,
            frame: None,
            s11: FemResultAddress::stress("S11"),
            s22: FemResultAddress::stress("S22"),
            s33: FemResultAddress::stress("S33"),
            pore_pressure: FemResultAddress::pore_pressure(),
        };
        accessor.update_result_accessor();
        accessor
    }

    /// Interpolate a nodal result inside the element containing `position`
    fn interpolate(&self, address: &FemResultAddress, frame: usize, position: &Point3<f64>) -> Option<f64> {
        let element = self.case.find_element_index(position)?;
        let node_indices = self.case.element_nodes(element)?;
        let values = self.case.nodal_values(address, self.time_step, frame)?;

        let mut corners = [Point3::origin(); 8];
        let mut nodal = [0.0; 8];
        for (i, &node) in node_indices.iter().enumerate() {
            corners[i] = self.case.node_coordinates(node)?;
            nodal[i] = *values.get(node)?;
        }

        let natural = hex8::natural_coordinates(&corners, position)?;
        Some(hex8::interpolate(&natural, &nodal))
    }

    /// Nodal result at a position, from a vertical log when outside the mesh
    fn result_at(&self, address: &FemResultAddress, position: &Point3<f64>) -> f64 {
        let Some(frame) = self.frame else {
            return f64::INFINITY;
        };
        if let Some(value) = self.interpolate(address, frame, position) {
            return value;
        }

        let Some((min, max)) = self.case.bounding_box() else {
            return f64::INFINITY;
        };
        trace!("{} outside mesh at {:?}, extracting along vertical path", address, position);
        let log = WellLogExtraction::sample_vertical(
            position.x,
            position.y,
            min.z,
            max.z,
            WELL_LOG_SAMPLES,
            |p| self.interpolate(address, frame, p),
        );
        log.value_at(position.z)
    }
}

impl DataAccessor for FemStressAccessor<'_> {
    fn set_time_step(&mut self, time_step: usize) {
        self.time_step = time_step;
        self.update_result_accessor();
    }

    fn update_result_accessor(&mut self) {
        self.frame = if self.time_step < self.case.time_step_count() {
            self.case.frame_count(self.time_step).checked_sub(1)
        } else {
            None
        };
        debug!(
            "{} bound to time step {} frame {:?}",
            self.property, self.time_step, self.frame
        );
    }

    fn is_matching(&self, property: Property) -> bool {
        property == self.property
    }

    fn value_at_position(&self, position: &Point3<f64>, _part: GridPart) -> f64 {
        match self.property {
            Property::DepthTop | Property::DepthBottom => position.z,
            Property::StressTop | Property::StressBottom => {
                let s33 = self.result_at(&self.s33, position);
                let pore_pressure = self.result_at(&self.pore_pressure, position);
                if s33.is_finite() && pore_pressure.is_finite() {
                    (s33 - pore_pressure) * PASCAL_PER_BAR
                } else {
                    f64::INFINITY
                }
            }
            Property::LateralStressComponentX | Property::LateralStressComponentY => {
                let lateral = if self.property == Property::LateralStressComponentX {
                    &self.s11
                } else {
                    &self.s22
                };
                let s = self.result_at(lateral, position);
                let s33 = self.result_at(&self.s33, position);
                if s.is_finite() && s33.is_finite() && s33 != 0.0 {
                    s / s33
                } else {
                    f64::INFINITY
                }
            }
            _ => f64::INFINITY,
        }
    }
}

/// Stress estimated from a structured grid case
///
/// The vertical stress is the sea water load plus the overburden integrated
/// along a vertical path from the seabed to the query depth. The effective
/// vertical stress subtracts the pore pressure; lateral components use a
/// fixed lateral stress coefficient.
pub struct EclipseStressAccessor<'a> {
    case: Option<&'a dyn StructuredGridCase>,
    property: Property,
    pore_pressure: PorePressureAccessor<'a>,
    seabed_depth: f64,
    water_density: f64,
    lateral_stress_coefficient: f64,
}

impl<'a> EclipseStressAccessor<'a> {
    pub fn new(
        case: Option<&'a dyn StructuredGridCase>,
        property: Property,
        parameters: &DataParameters,
    ) -> Self {
        Self {
            case,
            property,
            pore_pressure: PorePressureAccessor::new(case, parameters.pore_pressure_gradient)
                .with_cell_index_adjustment(parameters.cell_index_adjustment.clone()),
            seabed_depth: parameters.seabed_depth,
            water_density: parameters.water_density,
            lateral_stress_coefficient: parameters.lateral_stress_coefficient,
        }
    }

    /// Density of the overburden between two depths
    fn segment_density(&self, _cell_index: Option<usize>) -> f64 {
        // TODO: read per-cell density once the grid case exposes a density result
        OVERBURDEN_DENSITY
    }

    /// Total vertical stress in pascal at a position
    ///
    /// Starts from the sea water load `g * seabed_depth * water_density` and
    /// adds `density * g * delta_depth` for every segment between ordered
    /// grid intersections of the path from the seabed down to the position.
    pub fn integrate_vertical_stress(&self, position: &Point3<f64>) -> f64 {
        let target_depth = -position.z;
        if target_depth <= self.seabed_depth {
            return GRAVITY * target_depth.max(0.0) * self.water_density;
        }

        let seabed = Point3::new(position.x, position.y, -self.seabed_depth);
        let intersections = self
            .case
            .map(|case| case.path_intersections(&[seabed, *position]))
            .unwrap_or_default();

        // Depth breakpoints with the cell of the segment ending there
        let mut breakpoints: Vec<(f64, Option<usize>)> = vec![(self.seabed_depth, None)];
        for intersection in &intersections {
            for (point, cell) in [(intersection.entry, None), (intersection.exit, Some(intersection.cell_index))] {
                let depth = -point.z;
                let last = breakpoints.last().map(|b| b.0).unwrap_or(self.seabed_depth);
                if depth > last && depth < target_depth {
                    breakpoints.push((depth, cell));
                }
            }
        }
        let final_cell = intersections
            .last()
            .filter(|i| -i.exit.z >= target_depth)
            .map(|i| i.cell_index);
        breakpoints.push((target_depth, final_cell));

        let mut stress = GRAVITY * self.seabed_depth * self.water_density;
        for segment in breakpoints.windows(2) {
            let delta_depth = segment[1].0 - segment[0].0;
            stress += self.segment_density(segment[1].1) * GRAVITY * delta_depth;
        }
        stress
    }
}

impl DataAccessor for EclipseStressAccessor<'_> {
    fn set_time_step(&mut self, time_step: usize) {
        self.pore_pressure.set_time_step(time_step);
        self.update_result_accessor();
    }

    fn update_result_accessor(&mut self) {
        self.pore_pressure.update_result_accessor();
    }

    fn is_matching(&self, property: Property) -> bool {
        is_stress_property(property) && property == self.property
    }

    fn value_at_position(&self, position: &Point3<f64>, part: GridPart) -> f64 {
        match self.property {
            Property::DepthTop | Property::DepthBottom => position.z,
            Property::StressTop | Property::StressBottom => {
                let vertical = self.integrate_vertical_stress(position);
                vertical - self.pore_pressure.value_at_position(position, part)
            }
            Property::LateralStressComponentX | Property::LateralStressComponentY => {
                self.lateral_stress_coefficient
            }
            _ => f64::INFINITY,
        }
    }
}

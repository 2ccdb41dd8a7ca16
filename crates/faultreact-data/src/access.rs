// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data access - property-keyed dispatch to data accessors
//!
//! Routes property requests to the first registered accessor that matches
//! and evaluates them over the nodes or elements of a model grid.

use crate::accessor::{DataAccessor, DataParameters};
use crate::grid_accessors::{PorePressureAccessor, TemperatureAccessor};
use crate::stress::{EclipseStressAccessor, FemStressAccessor};
use faultreact_geometry::{hex8, FaultReactivationModel};
use faultreact_model::{FemResultCase, GridPart, Property, StructuredGridCase};
use log::{debug, warn};
use nalgebra::Point3;

/// Simulation cases available to an export
#[derive(Clone, Copy, Default)]
pub struct DataSources<'a> {
    /// Structured reservoir grid case
    pub grid: Option<&'a dyn StructuredGridCase>,
    /// Finite-element geomechanical case
    pub fem: Option<&'a dyn FemResultCase>,
}

/// Registry of data accessors
///
/// Accessors borrow the cases they read from; the registry lives for a
/// single export.
pub struct DataAccess<'a> {
    accessors: Vec<Box<dyn DataAccessor + 'a>>,
}

impl Default for DataAccess<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> DataAccess<'a> {
    /// Create registry without any accessors registered
    pub fn new() -> Self {
        Self {
            accessors: Vec::new(),
        }
    }

    /// Create registry with the accessors matching the available sources
    ///
    /// Registers:
    /// - `PorePressureAccessor` and `TemperatureAccessor` on the grid case
    /// - `FemStressAccessor` per stress property when a finite-element case
    ///   exists, `EclipseStressAccessor` otherwise
    pub fn with_sources(sources: DataSources<'a>, parameters: &DataParameters) -> Self {
        let mut access = Self::new();
        access.register(Box::new(
            PorePressureAccessor::new(sources.grid, parameters.pore_pressure_gradient)
                .with_cell_index_adjustment(parameters.cell_index_adjustment.clone()),
        ));
        access.register(Box::new(TemperatureAccessor::new(sources.grid)));

        for property in Property::STRESS {
            match sources.fem {
                Some(fem) => access.register(Box::new(FemStressAccessor::new(fem, property))),
                None => access.register(Box::new(EclipseStressAccessor::new(
                    sources.grid,
                    property,
                    parameters,
                ))),
            }
        }

        debug!(
            "Data access with {} accessors (grid case: {}, fem case: {})",
            access.accessors.len(),
            sources.grid.is_some(),
            sources.fem.is_some()
        );
        access
    }

    /// Registry using only gradient and overburden estimates
    pub fn gradient_only(parameters: &DataParameters) -> Self {
        Self::with_sources(DataSources::default(), parameters)
    }

    /// Register an accessor; earlier registrations take precedence
    pub fn register(&mut self, accessor: Box<dyn DataAccessor + 'a>) {
        self.accessors.push(accessor);
    }

    /// Accessor serving a property
    pub fn accessor_mut(&mut self, property: Property) -> Option<&mut (dyn DataAccessor + 'a)> {
        self.accessors
            .iter_mut()
            .find(|a| a.is_matching(property))
            .map(|a| a.as_mut())
    }

    pub fn has_accessor(&self, property: Property) -> bool {
        self.accessors.iter().any(|a| a.is_matching(property))
    }

    /// Property value at a single position
    pub fn value_at_position(
        &mut self,
        property: Property,
        time_step: usize,
        position: &Point3<f64>,
        part: GridPart,
    ) -> Option<f64> {
        let accessor = self.accessor_mut(property)?;
        accessor.set_time_step(time_step);
        Some(accessor.value_at_position(position, part))
    }

    /// Property values over a model grid part
    ///
    /// Nodal properties are evaluated at every node. Element properties are
    /// evaluated at the top face center (`*Top`), the bottom face center
    /// (`*Bottom`) or the element centroid.
    ///
    /// # Returns
    /// One value per node or element, or `None` when no accessor serves the
    /// property
    pub fn property_values(
        &mut self,
        model: &FaultReactivationModel,
        part: GridPart,
        property: Property,
        time_step: usize,
    ) -> Option<Vec<f64>> {
        let grid = model.grid(part);
        let Some(accessor) = self.accessor_mut(property) else {
            warn!("No data accessor for {}", property);
            return None;
        };
        accessor.set_time_step(time_step);

        let values: Vec<f64> = if property.is_nodal() {
            grid.nodes()
                .iter()
                .map(|p| accessor.value_at_position(p, part))
                .collect()
        } else {
            (0..grid.element_count())
                .filter_map(|e| grid.element_corners(e))
                .map(|corners| {
                    let position = match property {
                        Property::StressTop | Property::DepthTop => hex8::top_face_center(&corners),
                        Property::StressBottom | Property::DepthBottom => {
                            hex8::bottom_face_center(&corners)
                        }
                        _ => hex8::centroid(&corners),
                    };
                    accessor.value_at_position(&position, part)
                })
                .collect()
        };

        let undefined = values.iter().filter(|v| !v.is_finite()).count();
        if undefined > 0 {
            warn!(
                "{} of {} {} values undefined for {} at time step {}",
                undefined,
                values.len(),
                property,
                part,
                time_step
            );
        }
        Some(values)
    }
}

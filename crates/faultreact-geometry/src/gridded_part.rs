// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structured hexahedral grid for one part of a fault reactivation model
//!
//! The grid is generated from eight corner points describing the two
//! vertical edges of the part in the model plane:
//!
//! ```text
//!   3 ----------- 7      top
//!   |             |
//!   2 ----------- 6      fault top
//!   |             |
//!   1 ----------- 5      fault bottom
//!   |             |
//!   0 ----------- 4      bottom
//! far side      fault
//! ```
//!
//! Each vertical zone (0-1, 1-2, 2-3) is subdivided with its own cell count.
//! The plane is extruded two cells out of plane, one to each side, giving
//! three node layers (front, plane, back).

use crate::error::{Error, Result};
use faultreact_model::{BorderSurface, Boundary};
use log::{debug, warn};
use nalgebra::{Isometry3, Point3, Vector3};
use std::collections::BTreeMap;

/// Number of cells through the model thickness
pub const THICKNESS_CELLS: usize = 2;

/// Structured grid of linear hexahedra
#[derive(Debug, Clone, Default)]
pub struct GriddedPart3d {
    nodes: Vec<Point3<f64>>,
    local_nodes: Vec<Point3<f64>>,
    element_indices: Vec<[usize; 8]>,
    border_surface_elements: BTreeMap<BorderSurface, Vec<usize>>,
    boundary_nodes: BTreeMap<Boundary, Vec<usize>>,
    boundary_elements: BTreeMap<Boundary, Vec<usize>>,
}

impl GriddedPart3d {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all generated geometry
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.local_nodes.clear();
        self.element_indices.clear();
        self.border_surface_elements.clear();
        self.boundary_nodes.clear();
        self.boundary_elements.clear();
    }

    /// Generate nodes, elements and element sets
    ///
    /// # Arguments
    /// * `corners` - Far-side edge (0-3) and fault-side edge (4-7), bottom to top
    /// * `num_horz_cells` - Cells between the far side and the fault
    /// * `num_vert_cells_lower` - Cells between corners 0 and 1
    /// * `num_vert_cells_middle` - Cells between corners 1 and 2
    /// * `num_vert_cells_upper` - Cells between corners 2 and 3
    /// * `thickness` - Distance from the model plane to the front and back layers
    ///
    /// Face S4 of every element on the fault-side column points towards the
    /// fault, so the mirrored parts expose S4 to each other.
    pub fn generate_geometry(
        &mut self,
        corners: &[Point3<f64>; 8],
        num_horz_cells: usize,
        num_vert_cells_lower: usize,
        num_vert_cells_middle: usize,
        num_vert_cells_upper: usize,
        thickness: f64,
    ) -> Result<()> {
        self.reset();

        let num_vert_cells = num_vert_cells_lower + num_vert_cells_middle + num_vert_cells_upper;
        if num_horz_cells == 0 {
            return Err(Error::invalid_cell_count("horizontal cell count is zero"));
        }
        if num_vert_cells == 0 {
            return Err(Error::invalid_cell_count("total vertical cell count is zero"));
        }
        if thickness.is_nan() || thickness <= 0.0 {
            return Err(Error::geometry(format!(
                "thickness must be positive, got {}",
                thickness
            )));
        }

        for i in 0..4 {
            if (corners[i + 4] - corners[i]).norm() < f64::EPSILON {
                warn!(
                    "Corner points {} and {} coincide, grid will contain degenerate cells",
                    i,
                    i + 4
                );
            }
        }

        let vertical = corners[3] - corners[0];
        let horizontal = corners[4] - corners[0];
        let thickness_dir = match vertical.cross(&horizontal).try_normalize(f64::EPSILON) {
            Some(dir) => dir * thickness,
            None => {
                warn!("Corner points span no plane, grid will have zero thickness");
                Vector3::zeros()
            }
        };

        let rows = Self::vertical_rows(
            corners,
            [num_vert_cells_lower, num_vert_cells_middle, num_vert_cells_upper],
        );

        let nh = num_horz_cells;
        let nt = THICKNESS_CELLS;
        self.nodes.reserve(rows.len() * (nh + 1) * (nt + 1));
        for (far, fault) in &rows {
            for h in 0..=nh {
                let in_plane = far + (fault - far) * (h as f64 / nh as f64);
                for t in 0..=nt {
                    let offset = t as f64 - (nt as f64 / 2.0);
                    self.nodes.push(in_plane + thickness_dir * offset);
                }
            }
        }

        let node_index = |v: usize, h: usize, t: usize| v * (nh + 1) * (nt + 1) + h * (nt + 1) + t;

        let mut border_surface_elements: BTreeMap<BorderSurface, Vec<usize>> = BorderSurface::ALL
            .iter()
            .map(|b| (*b, Vec::new()))
            .collect();
        let mut boundary_elements: BTreeMap<Boundary, Vec<usize>> =
            Boundary::ALL.iter().map(|b| (*b, Vec::new())).collect();

        self.element_indices.reserve(num_vert_cells * nh * nt);
        for v in 0..num_vert_cells {
            let zone = if v < num_vert_cells_lower {
                BorderSurface::LowerSurface
            } else if v < num_vert_cells_lower + num_vert_cells_middle {
                BorderSurface::FaultSurface
            } else {
                BorderSurface::UpperSurface
            };

            for h in 0..nh {
                for t in 0..nt {
                    let element = self.element_indices.len();
                    self.element_indices.push([
                        node_index(v, h, t),
                        node_index(v, h + 1, t),
                        node_index(v, h + 1, t + 1),
                        node_index(v, h, t + 1),
                        node_index(v + 1, h, t),
                        node_index(v + 1, h + 1, t),
                        node_index(v + 1, h + 1, t + 1),
                        node_index(v + 1, h, t + 1),
                    ]);

                    if h == nh - 1 {
                        border_surface_elements.entry(zone).or_default().push(element);
                    }
                    if v == 0 {
                        boundary_elements.entry(Boundary::Bottom).or_default().push(element);
                    }
                    if h == 0 {
                        boundary_elements.entry(Boundary::FarSide).or_default().push(element);
                    }
                    if t == 0 {
                        boundary_elements.entry(Boundary::Front).or_default().push(element);
                    }
                    if t == nt - 1 {
                        boundary_elements.entry(Boundary::Back).or_default().push(element);
                    }
                }
            }
        }

        let mut boundary_nodes: BTreeMap<Boundary, Vec<usize>> =
            Boundary::ALL.iter().map(|b| (*b, Vec::new())).collect();
        for v in 0..rows.len() {
            for h in 0..=nh {
                for t in 0..=nt {
                    let node = node_index(v, h, t);
                    if v == 0 {
                        boundary_nodes.entry(Boundary::Bottom).or_default().push(node);
                    }
                    if h == 0 {
                        boundary_nodes.entry(Boundary::FarSide).or_default().push(node);
                    }
                    if t == 0 {
                        boundary_nodes.entry(Boundary::Front).or_default().push(node);
                    }
                    if t == nt {
                        boundary_nodes.entry(Boundary::Back).or_default().push(node);
                    }
                }
            }
        }

        self.border_surface_elements = border_surface_elements;
        self.boundary_elements = boundary_elements;
        self.boundary_nodes = boundary_nodes;

        debug!(
            "Generated part grid with {} nodes and {} elements",
            self.nodes.len(),
            self.element_indices.len()
        );
        Ok(())
    }

    /// Far-side and fault-side points of every node row, bottom to top
    fn vertical_rows(corners: &[Point3<f64>; 8], zone_cells: [usize; 3]) -> Vec<(Point3<f64>, Point3<f64>)> {
        let mut rows = vec![(corners[0], corners[4])];
        for (zone, &count) in zone_cells.iter().enumerate() {
            let (far_from, far_to) = (corners[zone], corners[zone + 1]);
            let (fault_from, fault_to) = (corners[zone + 4], corners[zone + 5]);
            for i in 1..=count {
                let f = i as f64 / count as f64;
                rows.push((
                    far_from + (far_to - far_from) * f,
                    fault_from + (fault_to - fault_from) * f,
                ));
            }
        }
        rows
    }

    /// Store the nodes transformed into a local coordinate system
    pub fn generate_local_nodes(&mut self, to_local: &Isometry3<f64>) {
        self.local_nodes = self.nodes.iter().map(|p| to_local * p).collect();
    }

    /// Node coordinates in the global coordinate system
    pub fn nodes(&self) -> &[Point3<f64>] {
        &self.nodes
    }

    /// Node coordinates in the local coordinate system, empty until generated
    pub fn local_nodes(&self) -> &[Point3<f64>] {
        &self.local_nodes
    }

    /// Nodes to write to a deck, local if requested and available
    pub fn nodes_for_export(&self, use_local: bool) -> &[Point3<f64>] {
        if use_local && self.local_nodes.len() == self.nodes.len() {
            &self.local_nodes
        } else {
            &self.nodes
        }
    }

    pub fn element_indices(&self) -> &[[usize; 8]] {
        &self.element_indices
    }

    /// Corner coordinates of one element
    pub fn element_corners(&self, element: usize) -> Option<[Point3<f64>; 8]> {
        let indices = self.element_indices.get(element)?;
        let mut corners = [Point3::origin(); 8];
        for (corner, &index) in corners.iter_mut().zip(indices.iter()) {
            *corner = *self.nodes.get(index)?;
        }
        Some(corners)
    }

    pub fn border_surface_elements(&self) -> &BTreeMap<BorderSurface, Vec<usize>> {
        &self.border_surface_elements
    }

    pub fn boundary_elements(&self) -> &BTreeMap<Boundary, Vec<usize>> {
        &self.boundary_elements
    }

    pub fn boundary_nodes(&self) -> &BTreeMap<Boundary, Vec<usize>> {
        &self.boundary_nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.element_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.element_indices.is_empty()
    }
}

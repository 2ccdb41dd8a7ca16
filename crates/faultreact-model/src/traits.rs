// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data-provider traits
//!
//! The simulation grids a fault reactivation model samples are owned by the
//! host application. These traits are the only view the data accessors have
//! of them: point lookups, scalar result arrays and path intersections.

use crate::{FemResultAddress, ResultAddress};
use nalgebra::Point3;

/// Intersection of a path with one grid cell
#[derive(Clone, Debug, PartialEq)]
pub struct CellIntersection {
    /// Index of the intersected cell
    pub cell_index: usize,
    /// Point where the path enters the cell
    pub entry: Point3<f64>,
    /// Point where the path leaves the cell
    pub exit: Point3<f64>,
}

/// Structured (corner-point) reservoir grid case
///
/// Cell results are stored per time step, one scalar per cell.
///
/// # Example
///
/// ```ignore
/// use faultreact_model::{ResultAddress, StructuredGridCase};
///
/// let case: &dyn StructuredGridCase = get_case();
/// if let Some(cell) = case.find_cell_index(&point) {
///     let pressure = case.cell_value(&ResultAddress::pressure(), 0, cell);
/// }
/// ```
pub trait StructuredGridCase {
    /// Find the active cell containing a point
    ///
    /// # Arguments
    /// * `point` - Query position in case coordinates
    ///
    /// # Returns
    /// The cell index, or `None` when the point lies outside every active cell
    fn find_cell_index(&self, point: &Point3<f64>) -> Option<usize>;

    /// Scalar result value of a cell
    ///
    /// # Arguments
    /// * `address` - Result to read
    /// * `time_step` - Time step index (ignored for static results)
    /// * `cell_index` - Cell to read
    ///
    /// # Returns
    /// The stored value, or `None` when the result, step or cell is unavailable
    fn cell_value(&self, address: &ResultAddress, time_step: usize, cell_index: usize)
        -> Option<f64>;

    /// Number of time steps with dynamic results
    fn time_step_count(&self) -> usize;

    /// Intersections of a polyline with the grid cells, ordered along the path
    fn path_intersections(&self, path: &[Point3<f64>]) -> Vec<CellIntersection>;
}

/// Unstructured finite-element (geomechanical) result case
///
/// Results are nodal arrays stored per time step and frame. Elements are
/// linear hexahedra.
pub trait FemResultCase {
    /// Find the element containing a point
    fn find_element_index(&self, point: &Point3<f64>) -> Option<usize>;

    /// Node indices of an element in C3D8 order
    fn element_nodes(&self, element_index: usize) -> Option<[usize; 8]>;

    /// Coordinates of a node
    fn node_coordinates(&self, node_index: usize) -> Option<Point3<f64>>;

    /// Number of time steps
    fn time_step_count(&self) -> usize;

    /// Number of frames stored for a time step
    fn frame_count(&self, time_step: usize) -> usize;

    /// Nodal values of a result for one frame
    ///
    /// # Returns
    /// One value per node, or `None` when the result is not available
    fn nodal_values(
        &self,
        address: &FemResultAddress,
        time_step: usize,
        frame: usize,
    ) -> Option<&[f64]>;

    /// Axis-aligned bounds of the mesh as (min, max)
    fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)>;
}

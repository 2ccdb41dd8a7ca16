// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory grid cases
//!
//! Small implementations of the provider traits backed by plain vectors.
//! They serve tests and tools that build a model from synthetic data.

use faultreact_geometry::hex8;
use faultreact_model::{
    CellIntersection, FemResultAddress, FemResultCase, ResultAddress, ResultCategory,
    StructuredGridCase,
};
use nalgebra::{Point3, Vector3};
use rustc_hash::FxHashMap;

const CONTAINMENT_TOLERANCE: f64 = 1e-9;

/// Axis-aligned regular grid with cell results
///
/// Cells are numbered `i + j * ni + k * ni * nj` with `k` increasing upwards
/// from the origin corner.
#[derive(Debug, Clone)]
pub struct RegularGridCase {
    origin: Point3<f64>,
    cell_size: Vector3<f64>,
    dims: [usize; 3],
    results: FxHashMap<ResultAddress, Vec<Vec<f64>>>,
}

impl RegularGridCase {
    pub fn new(origin: Point3<f64>, cell_size: Vector3<f64>, dims: [usize; 3]) -> Self {
        Self {
            origin,
            cell_size,
            dims,
            results: FxHashMap::default(),
        }
    }

    /// Store a result, one vector of cell values per time step
    pub fn set_result(&mut self, address: ResultAddress, values: Vec<Vec<f64>>) {
        self.results.insert(address, values);
    }

    pub fn cell_count(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    pub fn cell_index(&self, i: usize, j: usize, k: usize) -> usize {
        i + j * self.dims[0] + k * self.dims[0] * self.dims[1]
    }

    fn max_corner(&self) -> Point3<f64> {
        self.origin
            + Vector3::new(
                self.cell_size.x * self.dims[0] as f64,
                self.cell_size.y * self.dims[1] as f64,
                self.cell_size.z * self.dims[2] as f64,
            )
    }
}

impl StructuredGridCase for RegularGridCase {
    fn find_cell_index(&self, point: &Point3<f64>) -> Option<usize> {
        let mut ijk = [0usize; 3];
        for axis in 0..3 {
            let f = (point[axis] - self.origin[axis]) / self.cell_size[axis];
            let n = self.dims[axis] as f64;
            if !(0.0..=n).contains(&f) {
                return None;
            }
            ijk[axis] = (f.floor() as usize).min(self.dims[axis].saturating_sub(1));
        }
        Some(self.cell_index(ijk[0], ijk[1], ijk[2]))
    }

    fn cell_value(&self, address: &ResultAddress, time_step: usize, cell_index: usize) -> Option<f64> {
        let steps = self.results.get(address)?;
        let step = match address.category {
            ResultCategory::Static => 0,
            ResultCategory::Dynamic => time_step,
        };
        steps.get(step)?.get(cell_index).copied()
    }

    fn time_step_count(&self) -> usize {
        self.results
            .iter()
            .filter(|(address, _)| address.category == ResultCategory::Dynamic)
            .map(|(_, steps)| steps.len())
            .max()
            .unwrap_or(0)
    }

    fn path_intersections(&self, path: &[Point3<f64>]) -> Vec<CellIntersection> {
        let mut intersections: Vec<CellIntersection> = Vec::new();
        let max = self.max_corner();

        for segment in path.windows(2) {
            let (a, b) = (segment[0], segment[1]);
            let d = b - a;

            // Parameters where the segment crosses a cell plane
            let mut params = vec![0.0, 1.0];
            for axis in 0..3 {
                if d[axis].abs() < f64::EPSILON {
                    continue;
                }
                for plane in 0..=self.dims[axis] {
                    let c = self.origin[axis] + plane as f64 * self.cell_size[axis];
                    let t = (c - a[axis]) / d[axis];
                    if t > 0.0 && t < 1.0 {
                        params.push(t);
                    }
                }
            }
            params.sort_by(|x, y| x.total_cmp(y));
            params.dedup_by(|x, y| (*x - *y).abs() < 1e-12);

            for pair in params.windows(2) {
                let mid = a + d * ((pair[0] + pair[1]) / 2.0);
                if (0..3).any(|axis| mid[axis] < self.origin[axis] || mid[axis] > max[axis]) {
                    continue;
                }
                let Some(cell_index) = self.find_cell_index(&mid) else {
                    continue;
                };
                let entry = a + d * pair[0];
                let exit = a + d * pair[1];
                match intersections.last_mut() {
                    Some(last)
                        if last.cell_index == cell_index
                            && (last.exit - entry).norm() < CONTAINMENT_TOLERANCE =>
                    {
                        last.exit = exit;
                    }
                    _ => intersections.push(CellIntersection {
                        cell_index,
                        entry,
                        exit,
                    }),
                }
            }
        }
        intersections
    }
}

/// Unstructured mesh of linear hexahedra with nodal results
///
/// Results are stored per time step, per frame, one value per node.
#[derive(Debug, Clone, Default)]
pub struct HexFemCase {
    nodes: Vec<Point3<f64>>,
    elements: Vec<[usize; 8]>,
    results: FxHashMap<FemResultAddress, Vec<Vec<Vec<f64>>>>,
}

impl HexFemCase {
    pub fn new(nodes: Vec<Point3<f64>>, elements: Vec<[usize; 8]>) -> Self {
        Self {
            nodes,
            elements,
            results: FxHashMap::default(),
        }
    }

    /// Axis-aligned block of `dims` elements starting at `origin`
    pub fn regular_block(origin: Point3<f64>, element_size: Vector3<f64>, dims: [usize; 3]) -> Self {
        let [ni, nj, nk] = dims;
        let node = |i: usize, j: usize, k: usize| i + j * (ni + 1) + k * (ni + 1) * (nj + 1);

        let mut nodes = Vec::with_capacity((ni + 1) * (nj + 1) * (nk + 1));
        for k in 0..=nk {
            for j in 0..=nj {
                for i in 0..=ni {
                    nodes.push(
                        origin
                            + Vector3::new(
                                element_size.x * i as f64,
                                element_size.y * j as f64,
                                element_size.z * k as f64,
                            ),
                    );
                }
            }
        }

        let mut elements = Vec::with_capacity(ni * nj * nk);
        for k in 0..nk {
            for j in 0..nj {
                for i in 0..ni {
                    elements.push([
                        node(i, j, k),
                        node(i + 1, j, k),
                        node(i + 1, j + 1, k),
                        node(i, j + 1, k),
                        node(i, j, k + 1),
                        node(i + 1, j, k + 1),
                        node(i + 1, j + 1, k + 1),
                        node(i, j + 1, k + 1),
                    ]);
                }
            }
        }
        Self::new(nodes, elements)
    }

    /// Store a result as `[time_step][frame][node]`
    pub fn set_result(&mut self, address: FemResultAddress, values: Vec<Vec<Vec<f64>>>) {
        self.results.insert(address, values);
    }

    /// Store a result evaluated at every node
    pub fn set_result_from_fn<F>(&mut self, address: FemResultAddress, time_steps: usize, frames: usize, f: F)
    where
        F: Fn(usize, usize, &Point3<f64>) -> f64,
    {
        let values: Vec<Vec<Vec<f64>>> = (0..time_steps)
            .map(|step| {
                (0..frames)
                    .map(|frame| self.nodes.iter().map(|p| f(step, frame, p)).collect())
                    .collect()
            })
            .collect();
        self.set_result(address, values);
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn element_corners(&self, element: usize) -> Option<[Point3<f64>; 8]> {
        let indices = self.elements.get(element)?;
        let mut corners = [Point3::origin(); 8];
        for (corner, &index) in corners.iter_mut().zip(indices.iter()) {
            *corner = *self.nodes.get(index)?;
        }
        Some(corners)
    }
}

impl FemResultCase for HexFemCase {
    fn find_element_index(&self, point: &Point3<f64>) -> Option<usize> {
        (0..self.elements.len()).find(|&element| {
            let Some(corners) = self.element_corners(element) else {
                return false;
            };
            let inside_box = (0..3).all(|axis| {
                let min = corners.iter().map(|c| c[axis]).fold(f64::INFINITY, f64::min);
                let max = corners.iter().map(|c| c[axis]).fold(f64::NEG_INFINITY, f64::max);
                point[axis] >= min - CONTAINMENT_TOLERANCE && point[axis] <= max + CONTAINMENT_TOLERANCE
            });
            inside_box && hex8::contains(&corners, point, CONTAINMENT_TOLERANCE)
        })
    }

    fn element_nodes(&self, element_index: usize) -> Option<[usize; 8]> {
        self.elements.get(element_index).copied()
    }

    fn node_coordinates(&self, node_index: usize) -> Option<Point3<f64>> {
        self.nodes.get(node_index).copied()
    }

    fn time_step_count(&self) -> usize {
        self.results.values().map(|steps| steps.len()).max().unwrap_or(0)
    }

    fn frame_count(&self, time_step: usize) -> usize {
        self.results
            .values()
            .filter_map(|steps| steps.get(time_step).map(|frames| frames.len()))
            .max()
            .unwrap_or(0)
    }

    fn nodal_values(&self, address: &FemResultAddress, time_step: usize, frame: usize) -> Option<&[f64]> {
        self.results
            .get(address)?
            .get(time_step)?
            .get(frame)
            .map(|values| values.as_slice())
    }

    fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.nodes.first()?;
        Some(self.nodes.iter().fold((first, first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        }))
    }
}

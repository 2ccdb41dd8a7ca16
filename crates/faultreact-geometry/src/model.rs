// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fault reactivation model geometry
//!
//! The model is a vertical plane through an anchor point, perpendicular to
//! the fault. It is split by the fault into two parts and vertically by the
//! fault top and bottom into three zones. Twelve control points define the
//! six overlay rectangles and the corner points of both part grids:
//!
//! ```text
//!  level 3  (max z)          c0 ---- c1 ---- c2
//!  level 2  (fault top)      c0 ---- c1 ---- c2
//!  level 1  (fault bottom)   c0 ---- c1 ---- c2
//!  level 0  (min z)          c0 ---- c1 ---- c2
//!                           PART1   fault   PART2
//! ```
//!
//! Column 1 follows the fault line, extrapolated to the model top and bottom.

use crate::error::{Error, Result};
use crate::gridded_part::GriddedPart3d;
use faultreact_model::{GridConfig, GridPart, ModelConfig, ModelPart, PartColors};
use log::{debug, warn};
use nalgebra::{Isometry3, Matrix3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

const NUM_COLUMNS: usize = 3;
const NUM_LEVELS: usize = 4;
const FAULT_COLUMN: usize = 1;

/// Flat-colour RGBA texture
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl Texture {
    /// 1x1 texture of a single colour
    pub fn flat(color: [f32; 3], opacity: f32) -> Self {
        let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            width: 1,
            height: 1,
            pixels: vec![[
                to_byte(color[0]),
                to_byte(color[1]),
                to_byte(color[2]),
                to_byte(opacity),
            ]],
        }
    }
}

/// Two mirrored grid parts on either side of a fault
#[derive(Debug, Clone)]
pub struct FaultReactivationModel {
    plane_anchor: Point3<f64>,
    plane_normal: Vector3<f64>,
    max_horz_extent: f64,
    min_z: f64,
    max_z: f64,
    fault_top: Point3<f64>,
    fault_bottom: Point3<f64>,
    part_colors: PartColors,

    control_points: [Point3<f64>; NUM_COLUMNS * NUM_LEVELS],
    rects: BTreeMap<ModelPart, [Point3<f64>; 4]>,
    rect_valid: FxHashMap<ModelPart, bool>,
    textures: FxHashMap<GridPart, Texture>,
    grids: BTreeMap<GridPart, GriddedPart3d>,
}

impl Default for FaultReactivationModel {
    fn default() -> Self {
        Self::new()
    }
}

impl FaultReactivationModel {
    pub fn new() -> Self {
        let part_colors = PartColors::default();
        Self {
            plane_anchor: Point3::origin(),
            plane_normal: Vector3::x(),
            max_horz_extent: 0.0,
            min_z: 0.0,
            max_z: 0.0,
            fault_top: Point3::origin(),
            fault_bottom: Point3::origin(),
            control_points: [Point3::origin(); NUM_COLUMNS * NUM_LEVELS],
            rects: ModelPart::ALL
                .iter()
                .map(|p| (*p, [Point3::origin(); 4]))
                .collect(),
            rect_valid: ModelPart::ALL.iter().map(|p| (*p, false)).collect(),
            textures: GridPart::ALL
                .iter()
                .map(|p| (*p, Texture::flat(part_colors.color(*p), part_colors.opacity)))
                .collect(),
            grids: GridPart::ALL
                .iter()
                .map(|p| (*p, GriddedPart3d::new()))
                .collect(),
            part_colors,
        }
    }

    /// Invalidate rectangles and generated grids
    pub fn reset(&mut self) {
        for valid in self.rect_valid.values_mut() {
            *valid = false;
        }
        for grid in self.grids.values_mut() {
            grid.reset();
        }
    }

    pub fn set_plane(&mut self, anchor: Point3<f64>, normal: Vector3<f64>) {
        self.plane_anchor = anchor;
        self.plane_normal = normal;
        self.reset();
    }

    pub fn set_part_colors(&mut self, colors: PartColors) {
        self.part_colors = colors;
        self.reset();
    }

    /// Set the total horizontal extent (centred on the anchor) and z range
    pub fn set_max_extent_from_anchor(&mut self, max_extent_horz: f64, min_z: f64, max_z: f64) {
        self.max_horz_extent = max_extent_horz;
        self.min_z = min_z;
        self.max_z = max_z;
        self.reset();
    }

    /// Set the points where the fault enters and leaves the reservoir
    pub fn set_fault_plane_intersect(&mut self, top: Point3<f64>, bottom: Point3<f64>) {
        self.fault_top = top;
        self.fault_bottom = bottom;
        self.reset();
    }

    /// Build a model from a configuration and generate both grids
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let point = |p: [f64; 3]| Point3::new(p[0], p[1], p[2]);

        let mut model = Self::new();
        model.set_plane(point(config.plane.anchor), Vector3::from(config.plane.normal));
        model.set_part_colors(config.colors.clone());
        model.set_max_extent_from_anchor(
            config.extent.max_horizontal,
            config.extent.min_z,
            config.extent.max_z,
        );
        model.set_fault_plane_intersect(point(config.fault.top), point(config.fault.bottom));
        model.update_rects();
        model.generate_geometry(&config.grid)?;
        Ok(model)
    }

    /// Horizontal direction in the model plane, from PART1 towards PART2
    fn along_plane(&self) -> Option<Vector3<f64>> {
        self.plane_normal
            .cross(&Vector3::z())
            .try_normalize(f64::EPSILON)
    }

    /// min z <= fault bottom <= fault top <= max z
    fn is_fault_inside_z_range(&self) -> bool {
        self.min_z <= self.fault_bottom.z
            && self.fault_bottom.z <= self.fault_top.z
            && self.fault_top.z <= self.max_z
    }

    /// Point on the fault line at a given z
    fn fault_point_at(&self, z: f64) -> Point3<f64> {
        let dir = self.fault_top - self.fault_bottom;
        if dir.z.abs() < f64::EPSILON {
            Point3::new(self.fault_bottom.x, self.fault_bottom.y, z)
        } else {
            self.fault_bottom + dir * ((z - self.fault_bottom.z) / dir.z)
        }
    }

    fn control_point(&self, column: usize, level: usize) -> Point3<f64> {
        self.control_points[column * NUM_LEVELS + level]
    }

    fn outer_column(part: GridPart) -> usize {
        match part {
            GridPart::Part1 => 0,
            GridPart::Part2 => NUM_COLUMNS - 1,
        }
    }

    /// Recompute control points, overlay rectangles and part textures
    ///
    /// Leaves every rectangle invalid when the extent is not positive, the
    /// z range is empty, the fault top and bottom are not ordered inside the
    /// z range or the plane normal is vertical.
    pub fn update_rects(&mut self) {
        for valid in self.rect_valid.values_mut() {
            *valid = false;
        }

        if self.max_horz_extent <= 0.0 || self.min_z >= self.max_z {
            return;
        }
        if !self.is_fault_inside_z_range() {
            warn!(
                "Fault from z = {} to z = {} is not ordered inside z range [{}, {}], model rectangles left invalid",
                self.fault_bottom.z, self.fault_top.z, self.min_z, self.max_z
            );
            return;
        }
        let Some(along) = self.along_plane() else {
            warn!("Fault plane normal is vertical, model rectangles left invalid");
            return;
        };

        let half = along * (self.max_horz_extent / 2.0);
        let left = self.plane_anchor - half;
        let right = self.plane_anchor + half;
        let levels = [self.min_z, self.fault_bottom.z, self.fault_top.z, self.max_z];

        for (level, &z) in levels.iter().enumerate() {
            self.control_points[level] = Point3::new(left.x, left.y, z);
            self.control_points[FAULT_COLUMN * NUM_LEVELS + level] = self.fault_point_at(z);
            self.control_points[(NUM_COLUMNS - 1) * NUM_LEVELS + level] =
                Point3::new(right.x, right.y, z);
        }

        for part in ModelPart::ALL {
            let outer = Self::outer_column(part.grid_part());
            let lower = part.lower_level();
            let rect = [
                self.control_point(outer, lower),
                self.control_point(FAULT_COLUMN, lower),
                self.control_point(FAULT_COLUMN, lower + 1),
                self.control_point(outer, lower + 1),
            ];
            self.rects.insert(part, rect);
            self.rect_valid.insert(part, true);
        }

        for part in GridPart::ALL {
            self.textures.insert(
                part,
                Texture::flat(self.part_colors.color(part), self.part_colors.opacity),
            );
        }
    }

    /// Overlay rectangle of a model part; check [`is_rect_valid`](Self::is_rect_valid) first
    pub fn rect(&self, part: ModelPart) -> &[Point3<f64>; 4] {
        &self.rects[&part]
    }

    pub fn texture(&self, part: GridPart) -> &Texture {
        &self.textures[&part]
    }

    pub fn is_rect_valid(&self, part: ModelPart) -> bool {
        self.rect_valid.get(&part).copied().unwrap_or(false)
    }

    /// True when all rectangles are valid and both grids are generated
    pub fn is_valid(&self) -> bool {
        ModelPart::ALL.iter().all(|p| self.is_rect_valid(*p))
            && self.grids.values().all(|g| !g.is_empty())
    }

    /// Generate both part grids from the current control points
    pub fn generate_geometry(&mut self, grid: &GridConfig) -> Result<()> {
        if !ModelPart::ALL.iter().all(|p| self.is_rect_valid(*p)) {
            return Err(Error::invalid_model(
                "model rectangles are not valid, check extent and z range",
            ));
        }

        let to_local = self.local_transform();
        for part in GridPart::ALL {
            let outer = Self::outer_column(part);
            let mut corners = [Point3::origin(); 8];
            for level in 0..NUM_LEVELS {
                corners[level] = self.control_point(outer, level);
                corners[level + NUM_LEVELS] = self.control_point(FAULT_COLUMN, level);
            }

            let part_grid = self.grids.entry(part).or_default();
            part_grid.generate_geometry(
                &corners,
                grid.horizontal_cells,
                grid.vertical_cells_lower,
                grid.vertical_cells_middle,
                grid.vertical_cells_upper,
                grid.thickness,
            )?;
            if let Some(to_local) = &to_local {
                part_grid.generate_local_nodes(to_local);
            }
            debug!(
                "{}: {} nodes, {} elements",
                part,
                part_grid.node_count(),
                part_grid.element_count()
            );
        }
        Ok(())
    }

    /// In-plane axes of the local coordinate system, (x, y) with z up
    ///
    /// x runs along the model plane from PART1 towards PART2 and y is
    /// `z × x`, so (x, y, z) is right-handed and local node coordinates keep
    /// the element orientation. The same axes are written to the deck
    /// orientation.
    pub fn local_axes(&self) -> Option<(Vector3<f64>, Vector3<f64>)> {
        let x = self.along_plane()?;
        let y = Vector3::z().cross(&x);
        Some((x, y))
    }

    /// Transform from global to local coordinates
    ///
    /// The local origin lies vertically below or above the anchor at z = 0 so
    /// depths are unchanged.
    pub fn local_transform(&self) -> Option<Isometry3<f64>> {
        let (x, y) = self.local_axes()?;
        let rows = Matrix3::from_rows(&[x.transpose(), y.transpose(), Vector3::z().transpose()]);
        let rotation = Rotation3::from_matrix_unchecked(rows);
        let origin = Vector3::new(self.plane_anchor.x, self.plane_anchor.y, 0.0);
        let translation = Translation3::from(-(rotation * origin));
        Some(Isometry3::from_parts(
            translation,
            UnitQuaternion::from_rotation_matrix(&rotation),
        ))
    }

    /// Transform a point into local coordinates when requested
    pub fn transform_point_if_needed(&self, point: Point3<f64>, use_local: bool) -> Point3<f64> {
        match (use_local, self.local_transform()) {
            (true, Some(to_local)) => to_local * point,
            _ => point,
        }
    }

    pub fn all_grid_parts(&self) -> Vec<GridPart> {
        self.grids.keys().copied().collect()
    }

    pub fn grid(&self, part: GridPart) -> &GriddedPart3d {
        &self.grids[&part]
    }

    pub fn plane_anchor(&self) -> Point3<f64> {
        self.plane_anchor
    }

    pub fn model_normal(&self) -> Vector3<f64> {
        self.plane_normal
    }

    pub fn fault_top_bottom(&self) -> (Point3<f64>, Point3<f64>) {
        (self.fault_top, self.fault_bottom)
    }

    pub fn max_horz_extent(&self) -> f64 {
        self.max_horz_extent
    }

    pub fn z_range(&self) -> (f64, f64) {
        (self.min_z, self.max_z)
    }

    pub fn part_colors(&self) -> &PartColors {
        &self.part_colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex8;
    use approx::assert_relative_eq;
    use faultreact_model::{BorderSurface, Boundary};

    fn configured() -> FaultReactivationModel {
        let mut model = FaultReactivationModel::new();
        model.set_plane(Point3::new(0.0, 0.0, -1000.0), Vector3::new(0.0, 1.0, 0.0));
        model.set_max_extent_from_anchor(1000.0, -2000.0, 0.0);
        model.set_fault_plane_intersect(
            Point3::new(0.0, 0.0, -800.0),
            Point3::new(0.0, 0.0, -1200.0),
        );
        model
    }

    fn small_grid() -> GridConfig {
        GridConfig {
            horizontal_cells: 2,
            vertical_cells_lower: 1,
            vertical_cells_middle: 2,
            vertical_cells_upper: 1,
            thickness: 50.0,
        }
    }

    #[test]
    fn test_rects_invalid_before_update() {
        let model = configured();
        assert!(ModelPart::ALL.iter().all(|p| !model.is_rect_valid(*p)));
    }

    #[test]
    fn test_update_rects_valid() {
        let mut model = configured();
        model.update_rects();
        for part in ModelPart::ALL {
            assert!(model.is_rect_valid(part));
            assert_eq!(model.rect(part).len(), 4);
        }
    }

    #[test]
    fn test_update_rects_zero_extent_stays_invalid() {
        let mut model = configured();
        model.set_max_extent_from_anchor(0.0, -2000.0, 0.0);
        model.update_rects();
        assert!(ModelPart::ALL.iter().all(|p| !model.is_rect_valid(*p)));

        model.set_max_extent_from_anchor(-10.0, -2000.0, 0.0);
        model.update_rects();
        assert!(ModelPart::ALL.iter().all(|p| !model.is_rect_valid(*p)));
    }

    #[test]
    fn test_update_rects_flat_z_range_stays_invalid() {
        let mut model = configured();
        model.set_max_extent_from_anchor(1000.0, -500.0, -500.0);
        model.update_rects();
        assert!(ModelPart::ALL.iter().all(|p| !model.is_rect_valid(*p)));
    }

    #[test]
    fn test_update_rects_fault_outside_z_range_stays_invalid() {
        // Fault top at -800 above the model top
        let mut model = configured();
        model.set_max_extent_from_anchor(1000.0, -2000.0, -900.0);
        model.update_rects();
        assert!(ModelPart::ALL.iter().all(|p| !model.is_rect_valid(*p)));
        assert!(matches!(
            model.generate_geometry(&small_grid()),
            Err(Error::InvalidModel(_))
        ));
        assert!(!model.is_valid());

        // Fault bottom at -1200 below the model bottom
        let mut model = configured();
        model.set_max_extent_from_anchor(1000.0, -1000.0, 0.0);
        model.update_rects();
        assert!(ModelPart::ALL.iter().all(|p| !model.is_rect_valid(*p)));
    }

    #[test]
    fn test_update_rects_swapped_fault_ends_stay_invalid() {
        let mut model = configured();
        model.set_fault_plane_intersect(
            Point3::new(0.0, 0.0, -1200.0),
            Point3::new(0.0, 0.0, -800.0),
        );
        model.update_rects();
        assert!(ModelPart::ALL.iter().all(|p| !model.is_rect_valid(*p)));
        assert!(model.generate_geometry(&small_grid()).is_err());
    }

    #[test]
    fn test_update_rects_inverted_z_range_stays_invalid() {
        let mut model = configured();
        model.set_max_extent_from_anchor(1000.0, 0.0, -2000.0);
        model.update_rects();
        assert!(ModelPart::ALL.iter().all(|p| !model.is_rect_valid(*p)));
    }

    #[test]
    fn test_mutator_resets_validity() {
        let mut model = configured();
        model.update_rects();
        assert!(model.is_rect_valid(ModelPart::HiPart1));

        model.set_part_colors(PartColors::default());
        assert!(!model.is_rect_valid(ModelPart::HiPart1));
    }

    #[test]
    fn test_rect_geometry() {
        let mut model = configured();
        model.update_rects();

        // normal +y gives along = y x z = +x
        let low1 = model.rect(ModelPart::LowPart1);
        assert_relative_eq!(low1[0], Point3::new(-500.0, 0.0, -2000.0));
        assert_relative_eq!(low1[1], Point3::new(0.0, 0.0, -2000.0));
        assert_relative_eq!(low1[2], Point3::new(0.0, 0.0, -1200.0));
        assert_relative_eq!(low1[3], Point3::new(-500.0, 0.0, -1200.0));

        let hi2 = model.rect(ModelPart::HiPart2);
        assert_relative_eq!(hi2[0], Point3::new(500.0, 0.0, -800.0));
        assert_relative_eq!(hi2[3], Point3::new(500.0, 0.0, 0.0));
    }

    #[test]
    fn test_inclined_fault_is_extrapolated() {
        let mut model = configured();
        model.set_fault_plane_intersect(
            Point3::new(100.0, 0.0, -800.0),
            Point3::new(-100.0, 0.0, -1200.0),
        );
        model.update_rects();

        let hi1 = model.rect(ModelPart::HiPart1);
        assert_relative_eq!(hi1[2], Point3::new(500.0, 0.0, 0.0), epsilon = 1e-9);
        let low1 = model.rect(ModelPart::LowPart1);
        assert_relative_eq!(low1[1], Point3::new(-500.0, 0.0, -2000.0), epsilon = 1e-9);
    }

    #[test]
    fn test_textures_follow_part_colors() {
        let mut model = configured();
        model.set_part_colors(PartColors {
            part1: [1.0, 0.0, 0.0],
            part2: [0.0, 0.0, 1.0],
            opacity: 1.0,
        });
        model.update_rects();
        assert_eq!(model.texture(GridPart::Part1).pixels, vec![[255, 0, 0, 255]]);
        let part2 = model.texture(GridPart::Part2);
        assert_eq!((part2.width, part2.height), (1, 1));
        assert_eq!(part2.pixels, vec![[0, 0, 255, 255]]);
    }

    #[test]
    fn test_generate_geometry_requires_valid_rects() {
        let mut model = configured();
        assert!(matches!(
            model.generate_geometry(&small_grid()),
            Err(Error::InvalidModel(_))
        ));
    }

    #[test]
    fn test_generate_geometry_builds_both_parts() {
        let mut model = configured();
        model.update_rects();
        model.generate_geometry(&small_grid()).unwrap();
        assert!(model.is_valid());

        for part in model.all_grid_parts() {
            let grid = model.grid(part);
            assert_eq!(grid.element_count(), 2 * 4 * 2);
            assert_eq!(grid.local_nodes().len(), grid.node_count());
            assert_eq!(grid.border_surface_elements()[&BorderSurface::FaultSurface].len(), 4);
            assert!(!grid.boundary_nodes()[&Boundary::FarSide].is_empty());
        }

        // Far side nodes of each part lie on its outer column
        let part2 = model.grid(GridPart::Part2);
        for &n in &part2.boundary_nodes()[&Boundary::FarSide] {
            assert_relative_eq!(part2.nodes()[n].x, 500.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_mutator_clears_grids() {
        let mut model = configured();
        model.update_rects();
        model.generate_geometry(&small_grid()).unwrap();
        model.set_plane(Point3::new(0.0, 0.0, -1000.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(!model.is_valid());
        assert!(model.grid(GridPart::Part1).is_empty());
    }

    #[test]
    fn test_from_config() {
        let mut config = ModelConfig::default();
        config.grid = GridConfig {
            horizontal_cells: 2,
            vertical_cells_lower: 1,
            vertical_cells_middle: 1,
            vertical_cells_upper: 1,
            thickness: 10.0,
        };
        let model = FaultReactivationModel::from_config(&config).unwrap();
        assert!(model.is_valid());
        assert_eq!(model.grid(GridPart::Part1).element_count(), 2 * 3 * 2);
        assert_eq!(model.z_range(), (-2000.0, 0.0));

        config.extent.max_horizontal = 0.0;
        assert!(FaultReactivationModel::from_config(&config).is_err());
    }

    /// Fault dipping from x = 250 at the top to x = -250 at the bottom
    fn inclined() -> FaultReactivationModel {
        let mut model = configured();
        model.set_fault_plane_intersect(
            Point3::new(50.0, 0.0, -800.0),
            Point3::new(-50.0, 0.0, -1200.0),
        );
        model.update_rects();
        model.generate_geometry(&small_grid()).unwrap();
        model
    }

    /// Corner points of the S4 faces of the fault surface elements
    fn fault_face_points(grid: &GriddedPart3d) -> Vec<Point3<f64>> {
        grid.border_surface_elements()[&BorderSurface::FaultSurface]
            .iter()
            .flat_map(|&e| {
                let nodes = grid.element_indices()[e];
                [1, 5, 6, 2].map(|local| grid.nodes()[nodes[local]])
            })
            .collect()
    }

    #[test]
    fn test_both_parts_have_positive_volume() {
        for model in [
            {
                let mut model = configured();
                model.update_rects();
                model.generate_geometry(&small_grid()).unwrap();
                model
            },
            inclined(),
        ] {
            for part in GridPart::ALL {
                let grid = model.grid(part);
                for e in 0..grid.element_count() {
                    let corners = grid.element_corners(e).unwrap();
                    assert!(hex8::volume(&corners) > 0.0, "{} element {}", part, e);
                }
            }
        }
    }

    #[test]
    fn test_fault_faces_of_both_parts_coincide() {
        let model = inclined();
        let part1 = fault_face_points(model.grid(GridPart::Part1));
        let part2 = fault_face_points(model.grid(GridPart::Part2));
        assert!(!part1.is_empty());
        assert_eq!(part1.len(), part2.len());

        // S4 faces lie on the fault line, extended by the part thickness
        for p in part1.iter().chain(&part2) {
            let on_fault = model.fault_point_at(p.z);
            assert_relative_eq!(p.x, on_fault.x, epsilon = 1e-6);
        }
        for p in &part2 {
            assert!(
                part1.iter().any(|q| (p - q).norm() < 1e-6),
                "PART2 fault node {:?} has no PART1 counterpart",
                p
            );
        }
        for p in &part1 {
            assert!(part2.iter().any(|q| (p - q).norm() < 1e-6));
        }
    }

    #[test]
    fn test_local_axes_are_right_handed() {
        let mut model = configured();
        model.set_plane(Point3::new(0.0, 0.0, -1000.0), Vector3::new(1.0, 1.0, 0.0));
        let (x, y) = model.local_axes().unwrap();
        assert_relative_eq!(x.cross(&y), Vector3::z(), epsilon = 1e-12);

        model.update_rects();
        model.generate_geometry(&small_grid()).unwrap();
        for part in GridPart::ALL {
            let grid = model.grid(part);
            for element in grid.element_indices() {
                let corners = element.map(|n| grid.local_nodes()[n]);
                assert!(hex8::volume(&corners) > 0.0);
            }
        }
    }

    #[test]
    fn test_local_transform() {
        let mut model = FaultReactivationModel::new();
        model.set_plane(Point3::new(100.0, 200.0, -1000.0), Vector3::new(0.0, 1.0, 0.0));

        let (x, y) = model.local_axes().unwrap();
        assert_relative_eq!(x, Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(y, Vector3::new(0.0, 1.0, 0.0));

        let local = model.transform_point_if_needed(Point3::new(150.0, 200.0, -700.0), true);
        assert_relative_eq!(local, Point3::new(50.0, 0.0, -700.0), epsilon = 1e-9);

        let global = model.transform_point_if_needed(Point3::new(150.0, 200.0, -700.0), false);
        assert_relative_eq!(global, Point3::new(150.0, 200.0, -700.0));
    }
}

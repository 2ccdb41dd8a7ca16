// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fault reactivation INP deck export
//!
//! Sections are written in a fixed order:
//!
//! ```text
//! Heading -> Parts -> Assembly -> Materials -> Interaction properties
//!   -> Boundary conditions -> Predefined fields -> Interactions -> Steps
//! ```
//!
//! Grid-sampled pore pressure, temperature and initial stress go to include
//! files next to the deck, so they are only available when exporting to a file.

use crate::error::{ExportError, Result};
use crate::inp;
use crate::settings::{
    border_name, boundary_symmetry, ExportSettings, BOUNDARY_NAMES, FAULT_INTERACTION,
    NON_FAULT_INTERACTION, PART_SYMMETRY,
};
use faultreact_data::DataAccess;
use faultreact_geometry::FaultReactivationModel;
use faultreact_model::{BorderSurface, GridPart, Property};
use log::{debug, info};
use nalgebra::Vector3;
use serde::Serialize;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Set holding every node or element of a part
pub const ALL_SET: &str = "ALL";

/// Internal node set carrying the pore pressure boundary condition
pub const PORE_PRESSURE_SET: &str = "PORE_PRESSURE";

pub const ORIENTATION_NAME: &str = "Ori-1";

/// Number of analysis steps written
pub const STEP_COUNT: usize = 2;

/// Pore pressure degree of freedom
const PORE_PRESSURE_DOF: &str = "8, 8";

const STEP_SEPARATOR: &str = "----------------------------------------------------------------";
const STEP_INCREMENTS: [f64; 4] = [1.0, 1.0, 1e-05, 1.0];

/// Fault location written next to the deck
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSettings {
    /// Horizontal direction along the model, perpendicular to the fault normal
    pub fault_normal: [f64; 3],
    pub fault_top: [f64; 3],
    pub fault_bottom: [f64; 3],
}

/// Writes a fault reactivation model as an INP input deck
pub struct FaultReactivationModelExporter {
    settings: ExportSettings,
}

impl FaultReactivationModelExporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Write the deck to a stream
    ///
    /// Fails when grid-sampled data is requested, as its include files need a
    /// location on disk; use [`export_to_file`](Self::export_to_file) then.
    pub fn export_to_stream<W: Write>(
        &self,
        stream: &mut W,
        model: &FaultReactivationModel,
        data: &mut DataAccess<'_>,
    ) -> Result<()> {
        self.write_deck(stream, model, data, None)
    }

    /// Write the deck, its include files and the model settings
    ///
    /// Include files and the settings JSON are named after the deck path
    /// without its extension. A failed export may leave a partial deck behind.
    pub fn export_to_file<P: AsRef<Path>>(
        &self,
        path: P,
        model: &FaultReactivationModel,
        data: &mut DataAccess<'_>,
    ) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ExportError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let mut stream = BufWriter::new(file);
        let base = path.with_extension("");

        self.write_deck(&mut stream, model, data, Some(&base))?;
        stream.flush()?;

        if self.settings.write_settings {
            self.export_model_settings(suffixed(&base, ".settings.json"), model)?;
        }
        info!("Exported fault reactivation model to {}", path.display());
        Ok(())
    }

    /// Fault normal and fault top and bottom, in export coordinates
    pub fn model_settings(&self, model: &FaultReactivationModel) -> Result<ModelSettings> {
        if !model.is_valid() {
            return Err(ExportError::invalid_model("Model geometry has not been generated"));
        }

        let use_local = self.settings.use_local_coordinates;
        let (top, bottom) = model.fault_top_bottom();
        let top = model.transform_point_if_needed(top, use_local);
        let bottom = model.transform_point_if_needed(bottom, use_local);

        let mut normal = model.model_normal();
        normal.z = 0.0;
        let normal = normal
            .try_normalize(f64::EPSILON)
            .ok_or_else(|| ExportError::invalid_model("Model normal is vertical"))?
            .cross(&Vector3::z());

        Ok(ModelSettings {
            fault_normal: [normal.x, normal.y, normal.z],
            fault_top: [top.x, top.y, top.z],
            fault_bottom: [bottom.x, bottom.y, bottom.z],
        })
    }

    /// Write the model settings as JSON
    pub fn export_model_settings<P: AsRef<Path>>(
        &self,
        path: P,
        model: &FaultReactivationModel,
    ) -> Result<()> {
        let settings = self.model_settings(model)?;
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ExportError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &settings)?;
        writer.flush()?;
        debug!("Wrote model settings to {}", path.display());
        Ok(())
    }

    fn validate_model(&self, model: &FaultReactivationModel, base: Option<&Path>) -> Result<()> {
        self.settings.validate()?;
        if !model.is_valid() {
            return Err(ExportError::invalid_model(
                "Model geometry has not been generated",
            ));
        }
        let uses_grid = self.settings.use_grid_pore_pressure
            || self.settings.use_grid_temperature
            || self.settings.use_grid_stress;
        if uses_grid && base.is_none() {
            return Err(ExportError::invalid_model(
                "Grid pore pressure, temperature and stress are written to include files and need an output file",
            ));
        }
        Ok(())
    }

    fn write_deck<W: Write>(
        &self,
        stream: &mut W,
        model: &FaultReactivationModel,
        data: &mut DataAccess<'_>,
        base: Option<&Path>,
    ) -> Result<()> {
        self.validate_model(model, base)?;
        let borders = active_borders(model);

        self.print_heading(stream).map_err(|e| e.in_section("header"))?;
        self.print_parts(stream, model, &borders)
            .map_err(|e| e.in_section("parts"))?;
        self.print_assembly(stream, model)
            .map_err(|e| e.in_section("assembly"))?;
        self.print_materials(stream)
            .map_err(|e| e.in_section("materials"))?;
        self.print_interaction_properties(stream)
            .map_err(|e| e.in_section("interaction properties"))?;
        self.print_boundary_conditions(stream, model)
            .map_err(|e| e.in_section("boundary conditions"))?;
        self.print_predefined_fields(stream, model, data, base)
            .map_err(|e| e.in_section("predefined fields"))?;
        self.print_interactions(stream, &borders)
            .map_err(|e| e.in_section("interactions"))?;
        self.print_steps(stream, model, data, base)
            .map_err(|e| e.in_section("steps"))?;
        Ok(())
    }

    fn print_heading<W: Write>(&self, stream: &mut W) -> Result<()> {
        inp::print_heading(stream, "Heading")?;
        inp::print_comment(
            stream,
            &format!("Generated by: {}", self.settings.application_name_and_version()),
        )?;
        inp::print_heading(stream, "Preprint, echo=NO, model=NO, history=NO, contact=NO")?;
        Ok(())
    }

    fn print_parts<W: Write>(
        &self,
        stream: &mut W,
        model: &FaultReactivationModel,
        borders: &[BorderSurface],
    ) -> Result<()> {
        inp::print_section_comment(stream, "PARTS")?;

        let (axis_x, axis_y) = self.orientation_axes(model);
        let material = &self.settings.material.name;

        for part in model.all_grid_parts() {
            let part_name = self.settings.part_name(part);
            let grid = model.grid(part);
            inp::print_heading(stream, &format!("Part, name={}", part_name))?;

            let nodes = grid.nodes_for_export(self.settings.use_local_coordinates);
            inp::print_nodes(stream, nodes)?;
            inp::print_elements(stream, grid.element_indices())?;

            inp::print_node_set_generate(stream, ALL_SET, 1, nodes.len(), false)?;
            inp::print_element_set_generate(stream, ALL_SET, 1, grid.element_count(), false)?;
            inp::print_node_set_generate(stream, PORE_PRESSURE_SET, 1, nodes.len(), true)?;

            for (boundary, boundary_name) in BOUNDARY_NAMES {
                let nodes = grid
                    .boundary_nodes()
                    .get(&boundary)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                inp::print_node_set(stream, boundary_name, false, nodes)?;

                let elements = grid
                    .boundary_elements()
                    .get(&boundary)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                inp::print_element_set(stream, boundary_name, false, elements)?;
            }

            for border in borders {
                let face = self.settings.face(part, *border).ok_or_else(|| {
                    ExportError::invalid_model(format!(
                        "No element side for {} {}",
                        part_name,
                        border_name(*border)
                    ))
                })?;
                let elements = grid
                    .border_surface_elements()
                    .get(border)
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                let surface_name = border_name(*border);
                let set_name = format!("_{}_S{}", surface_name, face);
                inp::print_element_set(stream, &set_name, true, elements)?;
                inp::print_surface(stream, surface_name, &set_name, face)?;
            }

            inp::print_heading(stream, &format!("Orientation, name={}", ORIENTATION_NAME))?;
            inp::print_numbers(
                stream,
                &[axis_x.x, axis_x.y, axis_x.z, axis_y.x, axis_y.y, axis_y.z],
            )?;
            inp::print_line(stream, "3, 0.")?;

            inp::print_comment(stream, &format!("Section: {}", material))?;
            inp::print_heading(
                stream,
                &format!(
                    "Solid Section, elset={}, orientation={}, material={}",
                    ALL_SET, ORIENTATION_NAME, material
                ),
            )?;
            inp::print_line(stream, ",")?;
            inp::print_heading(stream, "End Part")?;

            debug!(
                "Wrote part {}: {} nodes, {} elements",
                part_name,
                nodes.len(),
                grid.element_count()
            );
        }
        Ok(())
    }

    /// In-plane axes of the part orientation
    fn orientation_axes(&self, model: &FaultReactivationModel) -> (Vector3<f64>, Vector3<f64>) {
        let (x, y) = match (self.settings.use_local_coordinates, model.local_axes()) {
            (false, Some(axes)) => axes,
            _ => (Vector3::x(), Vector3::y()),
        };
        // Adding zero turns -0 into 0
        (x.map(|v| v + 0.0), y.map(|v| v + 0.0))
    }

    fn print_assembly<W: Write>(&self, stream: &mut W, model: &FaultReactivationModel) -> Result<()> {
        inp::print_section_comment(stream, "ASSEMBLY")?;
        inp::print_heading(stream, "Assembly, name=Assembly")?;
        for part in model.all_grid_parts() {
            let part_name = self.settings.part_name(part);
            inp::print_heading(stream, &format!("Instance, name={}, part={}", part_name, part_name))?;
            inp::print_heading(stream, "End Instance")?;
        }
        inp::print_heading(stream, "End Assembly")?;
        Ok(())
    }

    fn print_materials<W: Write>(&self, stream: &mut W) -> Result<()> {
        let material = &self.settings.material;
        inp::print_section_comment(stream, "MATERIALS")?;
        inp::print_heading(stream, &format!("Material, name={}", material.name))?;
        inp::print_heading(stream, "Density")?;
        inp::print_number(stream, material.density)?;
        inp::print_heading(stream, "Elastic")?;
        inp::print_numbers(stream, &[material.youngs_modulus, material.poisson_ratio])?;
        inp::print_heading(stream, "Permeability, specific=1.")?;
        inp::print_numbers(stream, &material.permeability)?;
        Ok(())
    }

    fn print_interaction_properties<W: Write>(&self, stream: &mut W) -> Result<()> {
        inp::print_section_comment(stream, "INTERACTION PROPERTIES")?;

        inp::print_heading(stream, &format!("Surface Interaction, name={}", FAULT_INTERACTION))?;
        inp::print_line(stream, "1,")?;
        inp::print_heading(stream, "Friction, slip tolerance=0.005")?;
        inp::print_number(stream, self.settings.friction_coefficient())?;
        inp::print_heading(stream, "Surface Behavior, no separation, pressure-overclosure=HARD")?;

        inp::print_heading(stream, &format!("Surface Interaction, name={}", NON_FAULT_INTERACTION))?;
        inp::print_line(stream, "1,")?;
        inp::print_heading(stream, "Cohesive Behavior")?;
        Ok(())
    }

    fn print_boundary_conditions<W: Write>(
        &self,
        stream: &mut W,
        model: &FaultReactivationModel,
    ) -> Result<()> {
        inp::print_section_comment(stream, "BOUNDARY CONDITIONS")?;

        let parts = model.all_grid_parts();
        for part in &parts {
            let part_name = self.settings.part_name(*part);
            for (boundary, boundary_name) in BOUNDARY_NAMES {
                inp::print_heading(stream, "Boundary")?;
                inp::print_line(
                    stream,
                    &format!("{}.{}, {}", part_name, boundary_name, boundary_symmetry(boundary)),
                )?;
            }
        }

        for part in &parts {
            inp::print_heading(stream, "Boundary")?;
            inp::print_line(
                stream,
                &format!("{}.{}, {}", self.settings.part_name(*part), ALL_SET, PART_SYMMETRY),
            )?;
        }
        Ok(())
    }

    fn print_predefined_fields<W: Write>(
        &self,
        stream: &mut W,
        model: &FaultReactivationModel,
        data: &mut DataAccess<'_>,
        base: Option<&Path>,
    ) -> Result<()> {
        inp::print_section_comment(stream, "PREDEFINED FIELDS")?;

        let fields = [
            ("RATIO", self.settings.data.initial_void_ratio),
            ("PORE PRESSURE", self.settings.data.initial_pore_pressure),
        ];
        for part in model.all_grid_parts() {
            let part_name = self.settings.part_name(part);
            for (condition, value) in fields {
                inp::print_heading(stream, &format!("Initial Conditions, TYPE={}", condition))?;
                inp::print_line(
                    stream,
                    &format!("{}.{}, {}", part_name, ALL_SET, inp::format_fixed(value)),
                )?;
            }
        }

        if let (true, Some(base)) = (self.settings.use_grid_temperature, base) {
            let path = suffixed(base, "_TEMPERATURE.inp");
            self.write_property_to_file(
                &path,
                model,
                data,
                Property::Temperature,
                self.settings.time_steps[0],
                "",
            )
            .map_err(|_| ExportError::property_file("temperature"))?;
            inp::print_heading(stream, "Initial Conditions, TYPE=TEMPERATURE")?;
            inp::print_heading(stream, &format!("INCLUDE, input={}", file_name(&path)))?;
        }

        if let (true, Some(base)) = (self.settings.use_grid_stress, base) {
            let path = suffixed(base, "_STRESS.inp");
            self.write_properties_to_file(&path, model, data, &Property::STRESS, self.settings.time_steps[0])
                .map_err(|_| ExportError::property_file("stress"))?;
            inp::print_heading(stream, "Initial Conditions, TYPE=STRESS, geostatic")?;
            inp::print_heading(stream, &format!("INCLUDE, input={}", file_name(&path)))?;
        }
        Ok(())
    }

    fn print_interactions<W: Write>(&self, stream: &mut W, borders: &[BorderSurface]) -> Result<()> {
        inp::print_section_comment(stream, "INTERACTIONS")?;

        let part1 = self.settings.part_name(GridPart::Part1);
        let part2 = self.settings.part_name(GridPart::Part2);
        for border in borders {
            let name = border_name(*border);
            inp::print_comment(stream, &format!("Interaction: {}", name))?;

            let (interaction, extra) = if *border == BorderSurface::FaultSurface {
                (FAULT_INTERACTION, ", adjust=0.0")
            } else {
                (NON_FAULT_INTERACTION, "")
            };
            inp::print_heading(
                stream,
                &format!(
                    "Contact Pair, interaction={}, small sliding, type=SURFACE TO SURFACE{}",
                    interaction, extra
                ),
            )?;
            inp::print_line(stream, &format!("{}.{}, {}.{}", part1, name, part2, name))?;
        }
        Ok(())
    }

    fn print_steps<W: Write>(
        &self,
        stream: &mut W,
        model: &FaultReactivationModel,
        data: &mut DataAccess<'_>,
        base: Option<&Path>,
    ) -> Result<()> {
        for step in 0..STEP_COUNT {
            let step_name = format!("Step-{}", step + 1);
            let step_type = if step == 0 { "Geostatic, utol" } else { "Soils, utol=1.0" };

            inp::print_comment(stream, STEP_SEPARATOR)?;
            inp::print_section_comment(stream, &format!("STEP: {}", step_name))?;
            inp::print_heading(stream, &format!("Step, name={}, nlgeom=NO", step_name))?;
            inp::print_heading(stream, step_type)?;
            inp::print_numbers(stream, &STEP_INCREMENTS)?;

            inp::print_section_comment(stream, "BOUNDARY CONDITIONS")?;
            match (self.settings.use_grid_pore_pressure, base) {
                (true, Some(base)) => {
                    let path = suffixed(base, &format!("_PORE_PRESSURE_{}.inp", step_name));
                    self.write_property_to_file(
                        &path,
                        model,
                        data,
                        Property::PorePressure,
                        self.settings.time_steps[step],
                        &format!("{}, ", PORE_PRESSURE_DOF),
                    )
                    .map_err(|_| ExportError::property_file("pore pressure"))?;
                    inp::print_heading(stream, "Boundary, type=displacement")?;
                    inp::print_heading(stream, &format!("INCLUDE, input={}", file_name(&path)))?;
                }
                _ => {
                    inp::print_heading(stream, "Boundary")?;
                    for part in model.all_grid_parts() {
                        let mut value = self.settings.data.step_pore_pressure;
                        if step > 0 && part == GridPart::Part2 {
                            value += self.settings.data.pore_pressure_delta;
                        }
                        inp::print_line(
                            stream,
                            &format!(
                                "{}.{}, {}, {}",
                                self.settings.part_name(part),
                                PORE_PRESSURE_SET,
                                PORE_PRESSURE_DOF,
                                inp::format_fixed(value)
                            ),
                        )?;
                    }
                }
            }

            if let (true, Some(base)) = (self.settings.use_grid_temperature, base) {
                inp::print_section_comment(stream, "TEMPERATURE")?;
                let path = suffixed(base, &format!("_TEMPERATURE_{}.inp", step_name));
                self.write_property_to_file(
                    &path,
                    model,
                    data,
                    Property::Temperature,
                    self.settings.time_steps[step],
                    "",
                )
                .map_err(|_| ExportError::property_file("temperature"))?;
                inp::print_heading(stream, "Temperature")?;
                inp::print_heading(stream, &format!("INCLUDE, input={}", file_name(&path)))?;
            }

            inp::print_section_comment(stream, "OUTPUT REQUESTS")?;
            inp::print_heading(stream, "Restart, write, frequency=0")?;
            inp::print_section_comment(stream, "FIELD OUTPUT: F-Output-1")?;
            inp::print_heading(stream, "Output, field, variable=PRESELECT")?;
            inp::print_section_comment(stream, "HISTORY OUTPUT: H-Output-1")?;
            inp::print_heading(stream, "Output, history, variable=PRESELECT")?;
            inp::print_heading(stream, "End Step")?;
        }
        Ok(())
    }

    /// One line per node: `PART.ALL.n, <prefix>value`
    fn write_property_to_file(
        &self,
        path: &Path,
        model: &FaultReactivationModel,
        data: &mut DataAccess<'_>,
        property: Property,
        time_step: usize,
        prefix: &str,
    ) -> Result<()> {
        let mut stream = BufWriter::new(File::create(path)?);
        for part in model.all_grid_parts() {
            let part_name = self.settings.part_name(part);
            let grid = model.grid(part);
            let values = data
                .property_values(model, part, property, time_step)
                .filter(|v| v.len() == grid.node_count())
                .ok_or_else(|| ExportError::property_file(property.as_str()))?;

            for (i, value) in values.iter().enumerate() {
                inp::print_line(
                    &mut stream,
                    &format!(
                        "{}.{}.{}, {}{}",
                        part_name,
                        ALL_SET,
                        i + 1,
                        prefix,
                        inp::format_fixed(*value)
                    ),
                )?;
            }
        }
        stream.flush()?;
        debug!("Wrote {} to {}", property, path.display());
        Ok(())
    }

    /// One line per element: `PART.ALL.n, v1, v2, ...`
    fn write_properties_to_file(
        &self,
        path: &Path,
        model: &FaultReactivationModel,
        data: &mut DataAccess<'_>,
        properties: &[Property],
        time_step: usize,
    ) -> Result<()> {
        let mut stream = BufWriter::new(File::create(path)?);
        for part in model.all_grid_parts() {
            let part_name = self.settings.part_name(part);
            let element_count = model.grid(part).element_count();

            let columns = properties
                .iter()
                .map(|property| {
                    data.property_values(model, part, *property, time_step)
                        .filter(|v| v.len() == element_count)
                        .ok_or_else(|| ExportError::property_file(property.as_str()))
                })
                .collect::<Result<Vec<_>>>()?;

            for element in 0..element_count {
                let mut line = format!("{}.{}.{}", part_name, ALL_SET, element + 1);
                for column in &columns {
                    line.push_str(", ");
                    line.push_str(&inp::format_fixed(column[element]));
                }
                inp::print_line(&mut stream, &line)?;
            }
        }
        stream.flush()?;
        debug!("Wrote {} properties to {}", properties.len(), path.display());
        Ok(())
    }
}

/// Border surfaces present on both parts, in deck order
fn active_borders(model: &FaultReactivationModel) -> Vec<BorderSurface> {
    BorderSurface::ALL
        .into_iter()
        .filter(|border| {
            let present = GridPart::ALL.iter().all(|part| {
                model
                    .grid(*part)
                    .border_surface_elements()
                    .get(border)
                    .is_some_and(|elements| !elements.is_empty())
            });
            if !present {
                debug!("Skipping empty border surface {}", border_name(*border));
            }
            present
        })
        .collect()
}

fn suffixed(base: &Path, suffix: &str) -> PathBuf {
    let mut path: OsString = base.as_os_str().to_owned();
    path.push(suffix);
    PathBuf::from(path)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use faultreact_data::{DataParameters, RegularGridCase};
    use faultreact_model::{GridConfig, ModelConfig, ResultAddress};
    use std::fs;

    fn small_config() -> ModelConfig {
        let mut config = ModelConfig::default();
        config.plane.normal = [0.0, 1.0, 0.0];
        config.extent.max_horizontal = 400.0;
        config.extent.min_z = -1400.0;
        config.extent.max_z = -600.0;
        config.fault.top = [0.0, 0.0, -900.0];
        config.fault.bottom = [0.0, 0.0, -1100.0];
        config.grid = GridConfig {
            horizontal_cells: 2,
            vertical_cells_lower: 1,
            vertical_cells_middle: 1,
            vertical_cells_upper: 1,
            thickness: 10.0,
        };
        config
    }

    fn export(settings: ExportSettings, model: &FaultReactivationModel) -> String {
        let exporter = FaultReactivationModelExporter::new(settings);
        let mut data = DataAccess::gradient_only(&DataParameters::default());
        let mut buffer = Vec::new();
        exporter.export_to_stream(&mut buffer, model, &mut data).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn position(text: &str, needle: &str) -> usize {
        text.find(needle)
            .unwrap_or_else(|| panic!("missing '{}' in deck", needle))
    }

    fn count(text: &str, line_start: &str) -> usize {
        text.lines().filter(|l| l.starts_with(line_start)).count()
    }

    #[test]
    fn test_end_to_end_deck_structure() {
        let model = FaultReactivationModel::from_config(&small_config()).unwrap();
        let deck = export(ExportSettings::default(), &model);

        // Sections in order
        let order = [
            "*Heading",
            "*Part, name=PART1",
            "*Part, name=PART2",
            "*Assembly, name=Assembly",
            "*Material, name=sand",
            "*Surface Interaction, name=FAULT",
            "** BOUNDARY CONDITIONS",
            "** PREDEFINED FIELDS",
            "** INTERACTIONS",
            "*Step, name=Step-1, nlgeom=NO",
            "*Step, name=Step-2, nlgeom=NO",
        ];
        let positions: Vec<usize> = order.iter().map(|s| position(&deck, s)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);

        assert_eq!(count(&deck, "*Heading"), 1);
        assert_eq!(count(&deck, "*Part, "), 2);
        assert_eq!(count(&deck, "*End Part"), 2);
        assert_eq!(count(&deck, "*Assembly"), 1);
        assert_eq!(count(&deck, "*Instance, "), 2);
        assert_eq!(count(&deck, "*Material, "), 1);
        assert_eq!(count(&deck, "*Surface Interaction, "), 2);
        assert_eq!(count(&deck, "*Contact Pair, "), 3);
        assert_eq!(count(&deck, "*Step, "), 2);
        assert_eq!(count(&deck, "*End Step"), 2);
        assert!(deck.contains("*Surface Interaction, name=NON-FAULT\n1,\n*Cohesive Behavior\n"));
    }

    #[test]
    fn test_boundary_condition_lines() {
        let model = FaultReactivationModel::from_config(&small_config()).unwrap();
        let deck = export(ExportSettings::default(), &model);

        for part in ["PART1", "PART2"] {
            assert!(deck.contains(&format!("*Boundary\n{}.BOTTOM, ZSYMM\n", part)));
            assert!(deck.contains(&format!("*Boundary\n{}.BACK, YSYMM\n", part)));
            assert!(deck.contains(&format!("*Boundary\n{}.FRONT, YSYMM\n", part)));
            assert!(deck.contains(&format!("*Boundary\n{}.FARSIDE, XSYMM\n", part)));
            assert!(deck.contains(&format!("*Boundary\n{}.ALL, XSYMM\n", part)));
        }
        // 4 boundaries per part plus one whole-part line per part
        let symmetry_lines = deck.lines().filter(|l| l.ends_with("SYMM")).count();
        assert_eq!(symmetry_lines, 2 * 4 + 2);
    }

    #[test]
    fn test_heading_and_materials() {
        let model = FaultReactivationModel::from_config(&small_config()).unwrap();
        let deck = export(ExportSettings::default(), &model);

        let heading = format!(
            "*Heading\n** Generated by: FaultReact {}\n*Preprint, echo=NO, model=NO, history=NO, contact=NO\n",
            env!("CARGO_PKG_VERSION")
        );
        assert!(deck.starts_with(&heading));
        assert!(deck.contains(
            "*Material, name=sand\n*Density\n2000,\n*Elastic\n5e+09, 0.2\n*Permeability, specific=1.\n1e-09, 0.3\n"
        ));
        assert!(deck.contains(
            "*Surface Interaction, name=FAULT\n1,\n*Friction, slip tolerance=0.005\n0.36397,\n*Surface Behavior, no separation, pressure-overclosure=HARD\n"
        ));
    }

    #[test]
    fn test_part_block_layout() {
        let model = FaultReactivationModel::from_config(&small_config()).unwrap();
        let deck = export(ExportSettings::default(), &model);

        let grid = model.grid(GridPart::Part1);
        assert!(deck.contains(&format!(
            "*Nset, nset=ALL, generate\n1, {}, 1\n*Elset, elset=ALL, generate\n1, {}, 1\n*Nset, nset=PORE_PRESSURE, internal, generate\n1, {}, 1\n",
            grid.node_count(),
            grid.element_count(),
            grid.node_count()
        )));
        assert!(deck.contains("*Surface, type=ELEMENT, name=TOP\n_TOP_S4, S4\n"));
        assert!(deck.contains("*Surface, type=ELEMENT, name=FAULT\n_FAULT_S4, S4\n"));
        assert!(deck.contains("*Surface, type=ELEMENT, name=BASE\n_BASE_S4, S4\n"));
        assert!(deck.contains("*Elset, elset=_FAULT_S4, internal\n"));
        assert!(deck.contains(
            "** Section: sand\n*Solid Section, elset=ALL, orientation=Ori-1, material=sand\n,\n*End Part\n"
        ));
        assert!(deck.contains("*Orientation, name=Ori-1\n1, 0, 0, 0, 1, 0\n3, 0.\n"));
        assert_eq!(count(&deck, "*Node"), 2);
        assert_eq!(count(&deck, "*Element, type=C3D8P"), 2);
    }

    #[test]
    fn test_assembly_and_interactions() {
        let model = FaultReactivationModel::from_config(&small_config()).unwrap();
        let deck = export(ExportSettings::default(), &model);

        assert!(deck.contains(
            "*Assembly, name=Assembly\n*Instance, name=PART1, part=PART1\n*End Instance\n*Instance, name=PART2, part=PART2\n*End Instance\n*End Assembly\n"
        ));
        assert!(deck.contains(
            "** Interaction: TOP\n*Contact Pair, interaction=NON-FAULT, small sliding, type=SURFACE TO SURFACE\nPART1.TOP, PART2.TOP\n"
        ));
        assert!(deck.contains(
            "** Interaction: FAULT\n*Contact Pair, interaction=FAULT, small sliding, type=SURFACE TO SURFACE, adjust=0.0\nPART1.FAULT, PART2.FAULT\n"
        ));
        assert!(deck.contains("PART1.BASE, PART2.BASE\n"));
    }

    #[test]
    fn test_predefined_fields_and_steps() {
        let model = FaultReactivationModel::from_config(&small_config()).unwrap();
        let deck = export(ExportSettings::default(), &model);

        for part in ["PART1", "PART2"] {
            assert!(deck.contains(&format!(
                "*Initial Conditions, TYPE=RATIO\n{}.ALL, 0.300000\n*Initial Conditions, TYPE=PORE PRESSURE\n{}.ALL, 0.000000\n",
                part, part
            )));
        }

        assert!(deck.contains("*Geostatic, utol\n1, 1, 1e-05, 1\n"));
        assert!(deck.contains("*Soils, utol=1.0\n1, 1, 1e-05, 1\n"));
        assert!(deck.contains(
            "*Boundary\nPART1.PORE_PRESSURE, 8, 8, 0.000000\nPART2.PORE_PRESSURE, 8, 8, 0.000000\n"
        ));
        assert!(deck.contains(
            "*Boundary\nPART1.PORE_PRESSURE, 8, 8, 0.000000\nPART2.PORE_PRESSURE, 8, 8, 10000000.000000\n"
        ));
        assert_eq!(count(&deck, "*Restart, write, frequency=0"), 2);
        assert_eq!(count(&deck, "*Output, field, variable=PRESELECT"), 2);
        assert_eq!(count(&deck, "*Output, history, variable=PRESELECT"), 2);
        assert!(deck.ends_with("*End Step\n"));
    }

    #[test]
    fn test_custom_part_names() {
        let model = FaultReactivationModel::from_config(&small_config()).unwrap();
        let mut settings = ExportSettings::default();
        settings.part_names.insert(GridPart::Part1, "FW".to_string());
        settings.part_names.insert(GridPart::Part2, "HW".to_string());
        let deck = export(settings, &model);

        assert!(deck.contains("*Part, name=FW\n"));
        assert!(deck.contains("*Instance, name=HW, part=HW\n"));
        assert!(deck.contains("FW.FAULT, HW.FAULT\n"));
        assert!(!deck.contains("PART1"));
    }

    #[test]
    fn test_orientation_follows_model_axes() {
        let mut config = small_config();
        config.plane.normal = [1.0, 0.0, 0.0];
        let model = FaultReactivationModel::from_config(&config).unwrap();

        let deck = export(ExportSettings::default(), &model);
        assert!(deck.contains("*Orientation, name=Ori-1\n0, -1, 0, 1, 0, 0\n"));

        let settings = ExportSettings {
            use_local_coordinates: true,
            ..ExportSettings::default()
        };
        let deck = export(settings, &model);
        assert!(deck.contains("*Orientation, name=Ori-1\n1, 0, 0, 0, 1, 0\n"));
    }

    #[test]
    fn test_invalid_model_is_rejected() {
        let model = FaultReactivationModel::new();
        let exporter = FaultReactivationModelExporter::new(ExportSettings::default());
        let mut data = DataAccess::gradient_only(&DataParameters::default());
        let mut buffer = Vec::new();

        let result = exporter.export_to_stream(&mut buffer, &model, &mut data);
        assert!(matches!(result, Err(ExportError::InvalidModel(_))));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_grid_data_needs_file() {
        let model = FaultReactivationModel::from_config(&small_config()).unwrap();
        let settings = ExportSettings {
            use_grid_pore_pressure: true,
            ..ExportSettings::default()
        };
        let exporter = FaultReactivationModelExporter::new(settings);
        let mut data = DataAccess::gradient_only(&DataParameters::default());
        let mut buffer = Vec::new();
        assert!(exporter
            .export_to_stream(&mut buffer, &model, &mut data)
            .is_err());
    }

    #[test]
    fn test_failing_stream_reports_section() {
        struct FailingWriter;
        impl Write for FailingWriter {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let model = FaultReactivationModel::from_config(&small_config()).unwrap();
        let exporter = FaultReactivationModelExporter::new(ExportSettings::default());
        let mut data = DataAccess::gradient_only(&DataParameters::default());
        let err = exporter
            .export_to_stream(&mut FailingWriter, &model, &mut data)
            .unwrap_err();
        assert!(matches!(err, ExportError::Section { ref section, .. } if section == "header"));
        assert!(err.to_string().contains("header"));
    }

    #[test]
    fn test_export_to_file_with_grid_data() {
        let model = FaultReactivationModel::from_config(&small_config()).unwrap();
        let mut grid = RegularGridCase::new(
            nalgebra::Point3::new(-300.0, -50.0, -1500.0),
            Vector3::new(100.0, 100.0, 100.0),
            [6, 1, 10],
        );
        let cells = grid.cell_count();
        grid.set_result(ResultAddress::pressure(), vec![vec![200.0; cells], vec![250.0; cells]]);

        let settings = ExportSettings {
            use_grid_pore_pressure: true,
            use_grid_stress: true,
            ..ExportSettings::default()
        };
        let exporter = FaultReactivationModelExporter::new(settings);
        let sources = faultreact_data::DataSources {
            grid: Some(&grid),
            fem: None,
        };
        let mut data = DataAccess::with_sources(sources, &DataParameters::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fault.inp");
        exporter.export_to_file(&path, &model, &mut data).unwrap();

        let deck = fs::read_to_string(&path).unwrap();
        assert!(deck.contains("*Boundary, type=displacement\n*INCLUDE, input=fault_PORE_PRESSURE_Step-1.inp\n"));
        assert!(deck.contains("*INCLUDE, input=fault_PORE_PRESSURE_Step-2.inp\n"));
        assert!(deck.contains("*Initial Conditions, TYPE=STRESS, geostatic\n*INCLUDE, input=fault_STRESS.inp\n"));

        let pressure = fs::read_to_string(dir.path().join("fault_PORE_PRESSURE_Step-2.inp")).unwrap();
        let nodes = model.grid(GridPart::Part1).node_count() + model.grid(GridPart::Part2).node_count();
        assert_eq!(pressure.lines().count(), nodes);
        assert!(pressure.starts_with("PART1.ALL.1, 8, 8, 25000000.000000\n"));

        let stress = fs::read_to_string(dir.path().join("fault_STRESS.inp")).unwrap();
        let elements =
            model.grid(GridPart::Part1).element_count() + model.grid(GridPart::Part2).element_count();
        assert_eq!(stress.lines().count(), elements);
        assert!(stress.lines().all(|l| l.split(", ").count() == 7));

        let json = fs::read_to_string(dir.path().join("fault.settings.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["faultTop"][2].as_f64(), Some(-900.0));
        assert_eq!(value["faultBottom"][2].as_f64(), Some(-1100.0));
    }

    #[test]
    fn test_export_to_file_with_grid_temperature() {
        let model = FaultReactivationModel::from_config(&small_config()).unwrap();
        let mut grid = RegularGridCase::new(
            nalgebra::Point3::new(-1000.0, -1000.0, -2000.0),
            Vector3::new(500.0, 500.0, 500.0),
            [4, 4, 4],
        );
        let cells = grid.cell_count();
        grid.set_result(ResultAddress::temperature(), vec![vec![60.0; cells], vec![75.5; cells]]);

        let settings = ExportSettings {
            use_grid_temperature: true,
            write_settings: false,
            ..ExportSettings::default()
        };
        let exporter = FaultReactivationModelExporter::new(settings);
        let sources = faultreact_data::DataSources {
            grid: Some(&grid),
            fem: None,
        };
        let mut data = DataAccess::with_sources(sources, &DataParameters::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fault.inp");
        exporter.export_to_file(&path, &model, &mut data).unwrap();

        let deck = fs::read_to_string(&path).unwrap();
        assert!(deck.contains(
            "*Initial Conditions, TYPE=TEMPERATURE\n*INCLUDE, input=fault_TEMPERATURE.inp\n"
        ));
        for step in ["Step-1", "Step-2"] {
            assert!(deck.contains(&format!(
                "** TEMPERATURE\n** \n*Temperature\n*INCLUDE, input=fault_TEMPERATURE_{}.inp\n",
                step
            )));
        }
        assert_eq!(count(&deck, "*Temperature"), 2);
        // Fixed pore pressure lines are still written
        assert_eq!(count(&deck, "PART2.PORE_PRESSURE, 8, 8, "), 2);

        let nodes = model.grid(GridPart::Part1).node_count() + model.grid(GridPart::Part2).node_count();
        let initial = fs::read_to_string(dir.path().join("fault_TEMPERATURE.inp")).unwrap();
        assert_eq!(initial.lines().count(), nodes);
        assert!(initial.starts_with("PART1.ALL.1, 60.000000\n"));
        assert!(initial.lines().all(|l| l.ends_with(", 60.000000")));

        let second = fs::read_to_string(dir.path().join("fault_TEMPERATURE_Step-2.inp")).unwrap();
        assert_eq!(second.lines().count(), nodes);
        assert!(second.lines().all(|l| l.ends_with(", 75.500000")));
        assert!(second.contains("PART2.ALL.1, 75.500000\n"));
        assert!(!dir.path().join("fault.settings.json").exists());
    }

    #[test]
    fn test_grid_temperature_needs_file() {
        let model = FaultReactivationModel::from_config(&small_config()).unwrap();
        let settings = ExportSettings {
            use_grid_temperature: true,
            ..ExportSettings::default()
        };
        let exporter = FaultReactivationModelExporter::new(settings);
        let mut data = DataAccess::gradient_only(&DataParameters::default());
        let mut buffer = Vec::new();
        let result = exporter.export_to_stream(&mut buffer, &model, &mut data);
        assert!(matches!(result, Err(ExportError::InvalidModel(_))));
    }

    #[test]
    fn test_model_settings_normal_is_horizontal() {
        let model = FaultReactivationModel::from_config(&small_config()).unwrap();
        let exporter = FaultReactivationModelExporter::new(ExportSettings::default());
        let settings = exporter.model_settings(&model).unwrap();

        // normal +y crossed with +z
        assert!((settings.fault_normal[0] - 1.0).abs() < 1e-12);
        assert!(settings.fault_normal[1].abs() < 1e-12);
        assert_eq!(settings.fault_normal[2], 0.0);
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export settings and the fixed naming tables of the deck

use crate::error::{ExportError, Result};
use faultreact_model::{BorderSurface, Boundary, DataConfig, GridPart, MaterialConfig, ModelConfig};
use std::collections::BTreeMap;

/// Surface and set names of the border surfaces, in deck order
pub const BORDER_NAMES: [(BorderSurface, &str); 3] = [
    (BorderSurface::UpperSurface, "TOP"),
    (BorderSurface::FaultSurface, "FAULT"),
    (BorderSurface::LowerSurface, "BASE"),
];

/// Set names of the lateral boundaries, in deck order
pub const BOUNDARY_NAMES: [(Boundary, &str); 4] = [
    (Boundary::Bottom, "BOTTOM"),
    (Boundary::Back, "BACK"),
    (Boundary::Front, "FRONT"),
    (Boundary::FarSide, "FARSIDE"),
];

/// Symmetry condition applied on each lateral boundary
pub const BOUNDARY_SYMMETRY: [(Boundary, &str); 4] = [
    (Boundary::Bottom, "ZSYMM"),
    (Boundary::Back, "YSYMM"),
    (Boundary::Front, "YSYMM"),
    (Boundary::FarSide, "XSYMM"),
];

/// Symmetry condition applied on the whole part
pub const PART_SYMMETRY: &str = "XSYMM";

/// Element side of every border surface
///
/// The parts are mirrored, so side 4 of the two parts face each other.
pub const FACES: [((GridPart, BorderSurface), u8); 6] = [
    ((GridPart::Part1, BorderSurface::UpperSurface), 4),
    ((GridPart::Part1, BorderSurface::FaultSurface), 4),
    ((GridPart::Part1, BorderSurface::LowerSurface), 4),
    ((GridPart::Part2, BorderSurface::UpperSurface), 4),
    ((GridPart::Part2, BorderSurface::FaultSurface), 4),
    ((GridPart::Part2, BorderSurface::LowerSurface), 4),
];

/// Name of the border surface carrying the friction interaction
pub const FAULT_INTERACTION: &str = "FAULT";

/// Name of the cohesive interaction of the other border surfaces
pub const NON_FAULT_INTERACTION: &str = "NON-FAULT";

pub fn border_name(border: BorderSurface) -> &'static str {
    BORDER_NAMES
        .iter()
        .find(|(b, _)| *b == border)
        .map(|(_, name)| *name)
        .unwrap_or("UNKNOWN")
}

pub fn boundary_symmetry(boundary: Boundary) -> &'static str {
    BOUNDARY_SYMMETRY
        .iter()
        .find(|(b, _)| *b == boundary)
        .map(|(_, symmetry)| *symmetry)
        .unwrap_or(PART_SYMMETRY)
}

/// Everything the exporter needs besides the model and its data
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub application_name: String,
    pub application_version: String,
    pub part_names: BTreeMap<GridPart, String>,
    /// Element side per (part, border surface)
    pub faces: BTreeMap<(GridPart, BorderSurface), u8>,
    pub material: MaterialConfig,
    pub data: DataConfig,
    /// Data time step sampled for each of the two analysis steps
    pub time_steps: [usize; 2],
    pub use_local_coordinates: bool,
    pub use_grid_pore_pressure: bool,
    pub use_grid_stress: bool,
    pub use_grid_temperature: bool,
    pub write_settings: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            application_name: "FaultReact".to_string(),
            application_version: env!("CARGO_PKG_VERSION").to_string(),
            part_names: GridPart::ALL
                .iter()
                .map(|p| (*p, p.default_name().to_string()))
                .collect(),
            faces: FACES.into_iter().collect(),
            material: MaterialConfig::default(),
            data: DataConfig::default(),
            time_steps: [0, 1],
            use_local_coordinates: false,
            use_grid_pore_pressure: false,
            use_grid_stress: false,
            use_grid_temperature: false,
            write_settings: true,
        }
    }
}

impl ExportSettings {
    /// Settings from a model configuration
    pub fn from_config(config: &ModelConfig) -> Self {
        let mut part_names = BTreeMap::new();
        part_names.insert(GridPart::Part1, config.export.part1_name.clone());
        part_names.insert(GridPart::Part2, config.export.part2_name.clone());

        Self {
            part_names,
            material: config.material.clone(),
            data: config.data.clone(),
            use_local_coordinates: config.export.use_local_coordinates,
            use_grid_pore_pressure: config.export.use_grid_pore_pressure,
            use_grid_stress: config.export.use_grid_stress,
            use_grid_temperature: config.export.use_grid_temperature,
            write_settings: config.export.write_settings,
            ..Self::default()
        }
    }

    /// Name and version written to the heading comment
    pub fn application_name_and_version(&self) -> String {
        format!("{} {}", self.application_name, self.application_version)
    }

    pub fn part_name(&self, part: GridPart) -> &str {
        self.part_names
            .get(&part)
            .map(String::as_str)
            .unwrap_or_else(|| part.default_name())
    }

    pub fn face(&self, part: GridPart, border: BorderSurface) -> Option<u8> {
        self.faces.get(&(part, border)).copied()
    }

    /// Friction coefficient of the fault interaction
    pub fn friction_coefficient(&self) -> f64 {
        self.material.friction_coefficient()
    }

    /// Check names, faces and material values before anything is written
    pub fn validate(&self) -> Result<()> {
        let angle = self.material.friction_angle_deg;
        if !(angle > 0.0 && angle < 90.0) {
            return Err(ExportError::invalid_model(format!(
                "Fault friction angle must be between 0 and 90 degrees, got {}",
                angle
            )));
        }

        let names: Vec<&str> = GridPart::ALL.iter().map(|p| self.part_name(*p)).collect();
        if names.iter().any(|n| n.is_empty()) {
            return Err(ExportError::invalid_model("Part names must not be empty"));
        }
        if names[0] == names[1] {
            return Err(ExportError::invalid_model(format!(
                "Part names must differ, both are '{}'",
                names[0]
            )));
        }
        if self.material.name.is_empty() {
            return Err(ExportError::invalid_model("Material name must not be empty"));
        }

        for part in GridPart::ALL {
            for border in BorderSurface::ALL {
                match self.face(part, border) {
                    Some(1..=6) => {}
                    Some(face) => {
                        return Err(ExportError::invalid_model(format!(
                            "Invalid element side {} for {} {}",
                            face,
                            self.part_name(part),
                            border_name(border)
                        )))
                    }
                    None => {
                        return Err(ExportError::invalid_model(format!(
                            "No element side for {} {}",
                            self.part_name(part),
                            border_name(border)
                        )))
                    }
                }
            }
        }
        Ok(())
    }
}

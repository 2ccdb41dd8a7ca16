// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model configuration
//!
//! A fault reactivation model is described by a TOML file. Every section and
//! field has a default, so a configuration only needs to name what differs:
//!
//! ```toml
//! [plane]
//! anchor = [4500.0, 3200.0, -1500.0]
//! normal = [0.7, 0.7, 0.0]
//!
//! [grid]
//! horizontal_cells = 20
//! ```

use crate::{ConfigError, GridPart, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete description of a fault reactivation model and its export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub plane: PlaneConfig,
    pub extent: ExtentConfig,
    pub fault: FaultConfig,
    pub grid: GridConfig,
    pub material: MaterialConfig,
    pub data: DataConfig,
    pub colors: PartColors,
    pub export: ExportConfig,
}

/// Fault plane anchor and normal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneConfig {
    pub anchor: [f64; 3],
    pub normal: [f64; 3],
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            anchor: [0.0, 0.0, -1000.0],
            normal: [1.0, 0.0, 0.0],
        }
    }
}

/// Horizontal and vertical extent of the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtentConfig {
    /// Total horizontal extent, centred on the anchor
    pub max_horizontal: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Default for ExtentConfig {
    fn default() -> Self {
        Self {
            max_horizontal: 1000.0,
            min_z: -2000.0,
            max_z: 0.0,
        }
    }
}

/// Intersection of the fault with the model plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultConfig {
    pub top: [f64; 3],
    pub bottom: [f64; 3],
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            top: [0.0, 0.0, -800.0],
            bottom: [0.0, 0.0, -1200.0],
        }
    }
}

/// Subdivision of each grid part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub horizontal_cells: usize,
    pub vertical_cells_lower: usize,
    pub vertical_cells_middle: usize,
    pub vertical_cells_upper: usize,
    /// Offset of the front and back node layers from the model plane
    pub thickness: f64,
}

impl GridConfig {
    pub fn total_vertical_cells(&self) -> usize {
        self.vertical_cells_lower + self.vertical_cells_middle + self.vertical_cells_upper
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            horizontal_cells: 20,
            vertical_cells_lower: 10,
            vertical_cells_middle: 20,
            vertical_cells_upper: 10,
            thickness: 100.0,
        }
    }
}

/// Material assigned to the solid section of both parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub name: String,
    /// Density in kg/m3
    pub density: f64,
    /// Young's modulus in Pa
    pub youngs_modulus: f64,
    pub poisson_ratio: f64,
    /// Permeability and void ratio of the permeability table
    pub permeability: [f64; 2],
    /// Fault friction angle in degrees
    pub friction_angle_deg: f64,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            name: "sand".to_string(),
            density: 2000.0,
            youngs_modulus: 5.0e9,
            poisson_ratio: 0.2,
            permeability: [1.0e-9, 0.3],
            friction_angle_deg: 20.0,
        }
    }
}

impl MaterialConfig {
    /// Friction coefficient of the fault interaction
    pub fn friction_coefficient(&self) -> f64 {
        self.friction_angle_deg.to_radians().tan()
    }
}

/// Parameters of the data accessors and initial conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Hydrostatic pore pressure gradient (specific gravity of the pore fluid)
    pub pore_pressure_gradient: f64,
    /// Seabed depth in metres below sea level
    pub seabed_depth: f64,
    /// Sea water density in kg/m3
    pub water_density: f64,
    pub lateral_stress_coefficient: f64,
    pub initial_void_ratio: f64,
    pub initial_pore_pressure: f64,
    /// Pore pressure boundary value of both parts in the first step
    pub step_pore_pressure: f64,
    /// Pore pressure added to PART2 in the second step
    pub pore_pressure_delta: f64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            pore_pressure_gradient: 1.0,
            seabed_depth: 0.0,
            water_density: 1030.0,
            lateral_stress_coefficient: 0.5,
            initial_void_ratio: 0.3,
            initial_pore_pressure: 0.0,
            step_pore_pressure: 0.0,
            pore_pressure_delta: 1.0e7,
        }
    }
}

/// Flat colours of the two parts, RGB in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartColors {
    pub part1: [f32; 3],
    pub part2: [f32; 3],
    pub opacity: f32,
}

impl PartColors {
    pub fn color(&self, part: GridPart) -> [f32; 3] {
        match part {
            GridPart::Part1 => self.part1,
            GridPart::Part2 => self.part2,
        }
    }
}

impl Default for PartColors {
    fn default() -> Self {
        Self {
            part1: [0.0, 1.0, 0.0],
            part2: [0.0, 0.0, 1.0],
            opacity: 0.7,
        }
    }
}

/// Export options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub part1_name: String,
    pub part2_name: String,
    /// Write node coordinates in the model's local coordinate system
    pub use_local_coordinates: bool,
    /// Write per-node pore pressure files sampled from the grid
    pub use_grid_pore_pressure: bool,
    /// Write the per-element initial stress file
    pub use_grid_stress: bool,
    /// Write initial and per-step nodal temperature files sampled from the grid
    pub use_grid_temperature: bool,
    /// Write the fault settings JSON next to the deck
    pub write_settings: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            part1_name: GridPart::Part1.default_name().to_string(),
            part2_name: GridPart::Part2.default_name().to_string(),
            use_local_coordinates: false,
            use_grid_pore_pressure: false,
            use_grid_stress: false,
            use_grid_temperature: false,
            write_settings: true,
        }
    }
}

impl ModelConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Serialize the configuration as pretty-printed TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::invalid_value("config", e.to_string()))
    }

    /// Check value ranges that would make the model or the deck invalid
    pub fn validate(&self) -> Result<()> {
        let [nx, ny, nz] = self.plane.normal;
        if (nx * nx + ny * ny).sqrt() < 1e-9 {
            return Err(ConfigError::invalid_value(
                "plane.normal",
                format!("normal must have a horizontal component, got [{}, {}, {}]", nx, ny, nz),
            ));
        }
        if self.extent.max_horizontal <= 0.0 {
            return Err(ConfigError::invalid_value(
                "extent.max_horizontal",
                "must be positive",
            ));
        }
        if self.extent.min_z >= self.extent.max_z {
            return Err(ConfigError::invalid_value(
                "extent.min_z",
                "must be below extent.max_z",
            ));
        }
        let (bottom, top) = (self.fault.bottom[2], self.fault.top[2]);
        if !(self.extent.min_z <= bottom && bottom <= top && top <= self.extent.max_z) {
            return Err(ConfigError::invalid_value(
                "fault",
                format!(
                    "fault bottom z {} and top z {} must satisfy extent.min_z {} <= bottom <= top <= extent.max_z {}",
                    bottom, top, self.extent.min_z, self.extent.max_z
                ),
            ));
        }
        if self.grid.horizontal_cells == 0 || self.grid.total_vertical_cells() == 0 {
            return Err(ConfigError::invalid_value(
                "grid",
                "horizontal and total vertical cell counts must be positive",
            ));
        }
        if self.grid.thickness <= 0.0 {
            return Err(ConfigError::invalid_value("grid.thickness", "must be positive"));
        }
        let angle = self.material.friction_angle_deg;
        if angle <= 0.0 || angle >= 90.0 {
            return Err(ConfigError::invalid_value(
                "material.friction_angle_deg",
                "fault friction angle must be between 0 and 90 degrees",
            ));
        }
        if self.export.part1_name.is_empty() || self.export.part2_name.is_empty() {
            return Err(ConfigError::invalid_value("export", "part names must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ModelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.material.name, "sand");
        assert_eq!(config.export.part1_name, "PART1");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ModelConfig::from_toml_str(
            r#"
            [grid]
            horizontal_cells = 4

            [material]
            friction_angle_deg = 30.0
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.horizontal_cells, 4);
        assert_eq!(config.grid.vertical_cells_middle, 20);
        assert_eq!(config.material.friction_angle_deg, 30.0);
        assert_eq!(config.data.water_density, 1030.0);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = ModelConfig::default();
        config.plane.anchor = [10.0, 20.0, -500.0];
        config.export.use_local_coordinates = true;

        let text = config.to_toml_string().unwrap();
        let parsed = ModelConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_rejects_friction_angle() {
        let mut config = ModelConfig::default();
        config.material.friction_angle_deg = 90.0;
        assert!(config.validate().is_err());

        config.material.friction_angle_deg = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_degenerate_extent() {
        let mut config = ModelConfig::default();
        config.extent.min_z = config.extent.max_z;
        assert!(config.validate().is_err());

        let mut config = ModelConfig::default();
        config.extent.max_horizontal = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_fault_outside_z_range() {
        // Fault top at -800 above the model top
        let mut config = ModelConfig::default();
        config.extent.max_z = -900.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "fault"));

        let mut config = ModelConfig::default();
        config.extent.min_z = -1100.0;
        assert!(config.validate().is_err());

        let mut config = ModelConfig::default();
        config.fault.top = [0.0, 0.0, -1200.0];
        config.fault.bottom = [0.0, 0.0, -800.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_vertical_normal() {
        let mut config = ModelConfig::default();
        config.plane.normal = [0.0, 0.0, 1.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_friction_coefficient() {
        let material = MaterialConfig {
            friction_angle_deg: 45.0,
            ..Default::default()
        };
        assert!((material.friction_coefficient() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(ModelConfig::from_toml_str("[grid\nhorizontal_cells = ").is_err());
    }
}

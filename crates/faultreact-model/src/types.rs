// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for fault reactivation models
//!
//! The enumerations in this module key every per-part and per-surface table
//! of the model: element sets, overlay rectangles, data queries and the
//! section tables of the exported deck.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two mirrored grids on either side of the fault plane
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum GridPart {
    Part1,
    Part2,
}

impl GridPart {
    /// Both parts in export order
    pub const ALL: [GridPart; 2] = [GridPart::Part1, GridPart::Part2];

    /// Default part name used in the exported deck
    pub fn default_name(&self) -> &'static str {
        match self {
            GridPart::Part1 => "PART1",
            GridPart::Part2 => "PART2",
        }
    }
}

impl fmt::Display for GridPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}

/// Top, fault and base surfaces of a grid part
///
/// Each border surface becomes an element set with a face label and a
/// contact pair between the two parts.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum BorderSurface {
    UpperSurface,
    FaultSurface,
    LowerSurface,
}

impl BorderSurface {
    /// Border surfaces in export order
    pub const ALL: [BorderSurface; 3] = [
        BorderSurface::UpperSurface,
        BorderSurface::FaultSurface,
        BorderSurface::LowerSurface,
    ];
}

/// Lateral faces of a grid part, used for symmetry boundary conditions
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Boundary {
    Bottom,
    Back,
    Front,
    FarSide,
}

impl Boundary {
    /// Boundaries in export order
    pub const ALL: [Boundary; 4] = [
        Boundary::Bottom,
        Boundary::Back,
        Boundary::Front,
        Boundary::FarSide,
    ];
}

/// Overlay rectangles of the model plane, three per grid part
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum ModelPart {
    HiPart1,
    MidPart1,
    LowPart1,
    HiPart2,
    MidPart2,
    LowPart2,
}

impl ModelPart {
    pub const ALL: [ModelPart; 6] = [
        ModelPart::HiPart1,
        ModelPart::MidPart1,
        ModelPart::LowPart1,
        ModelPart::HiPart2,
        ModelPart::MidPart2,
        ModelPart::LowPart2,
    ];

    /// Grid part the rectangle belongs to
    pub fn grid_part(&self) -> GridPart {
        match self {
            ModelPart::HiPart1 | ModelPart::MidPart1 | ModelPart::LowPart1 => GridPart::Part1,
            ModelPart::HiPart2 | ModelPart::MidPart2 | ModelPart::LowPart2 => GridPart::Part2,
        }
    }

    /// Index of the lower of the two z-levels bounding the rectangle
    ///
    /// Levels are, bottom to top: model min z, fault bottom, fault top, model max z.
    pub fn lower_level(&self) -> usize {
        match self {
            ModelPart::LowPart1 | ModelPart::LowPart2 => 0,
            ModelPart::MidPart1 | ModelPart::MidPart2 => 1,
            ModelPart::HiPart1 | ModelPart::HiPart2 => 2,
        }
    }
}

/// Physical property requested from a data accessor
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Property {
    PorePressure,
    Temperature,
    StressTop,
    StressBottom,
    LateralStressComponentX,
    LateralStressComponentY,
    DepthTop,
    DepthBottom,
}

impl Property {
    pub const ALL: [Property; 8] = [
        Property::PorePressure,
        Property::Temperature,
        Property::StressTop,
        Property::StressBottom,
        Property::LateralStressComponentX,
        Property::LateralStressComponentY,
        Property::DepthTop,
        Property::DepthBottom,
    ];

    /// Stress-related properties, all served by the stress accessors
    pub const STRESS: [Property; 6] = [
        Property::StressTop,
        Property::DepthTop,
        Property::StressBottom,
        Property::DepthBottom,
        Property::LateralStressComponentX,
        Property::LateralStressComponentY,
    ];

    /// True for properties sampled at grid nodes, false for per-element values
    pub fn is_nodal(&self) -> bool {
        matches!(self, Property::PorePressure | Property::Temperature)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Property::PorePressure => "PorePressure",
            Property::Temperature => "Temperature",
            Property::StressTop => "StressTop",
            Property::StressBottom => "StressBottom",
            Property::LateralStressComponentX => "LateralStressComponentX",
            Property::LateralStressComponentY => "LateralStressComponentY",
            Property::DepthTop => "DepthTop",
            Property::DepthBottom => "DepthBottom",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Property {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Property::ALL
            .iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown property: {}", s))
    }
}

/// Result category of a structured-grid result
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ResultCategory {
    /// Time-dependent results (one value array per time step)
    Dynamic,
    /// Results constant over time
    Static,
}

/// Address of a scalar cell result in a structured grid case
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ResultAddress {
    pub category: ResultCategory,
    pub name: String,
}

impl ResultAddress {
    pub fn new(category: ResultCategory, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }

    /// Pore pressure in bar
    pub fn pressure() -> Self {
        Self::new(ResultCategory::Dynamic, "PRESSURE")
    }

    /// Temperature in degrees Celsius
    pub fn temperature() -> Self {
        Self::new(ResultCategory::Dynamic, "TEMP")
    }
}

/// Address of a nodal result in a finite-element result case
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FemResultAddress {
    pub field: String,
    pub component: String,
}

impl FemResultAddress {
    pub fn new(field: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            component: component.into(),
        }
    }

    /// Stress tensor component (S11, S22, S33, ...) in bar
    pub fn stress(component: &str) -> Self {
        Self::new("ST", component)
    }

    /// Nodal pore pressure in bar
    pub fn pore_pressure() -> Self {
        Self::new("POR-Bar", "")
    }
}

impl fmt::Display for FemResultAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.component.is_empty() {
            write!(f, "{}", self.field)
        } else {
            write!(f, "{}.{}", self.field, self.component)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_part_grid_part() {
        assert_eq!(ModelPart::HiPart1.grid_part(), GridPart::Part1);
        assert_eq!(ModelPart::LowPart2.grid_part(), GridPart::Part2);
        assert_eq!(ModelPart::MidPart2.lower_level(), 1);
    }

    #[test]
    fn test_property_from_str() {
        assert_eq!(
            Property::from_str("stresstop").unwrap(),
            Property::StressTop
        );
        assert!(Property::from_str("Density").is_err());
    }

    #[test]
    fn test_property_is_nodal() {
        assert!(Property::PorePressure.is_nodal());
        assert!(Property::Temperature.is_nodal());
        assert!(Property::STRESS.iter().all(|p| !p.is_nodal()));
    }

    #[test]
    fn test_fem_address_display() {
        assert_eq!(FemResultAddress::stress("S33").to_string(), "ST.S33");
        assert_eq!(FemResultAddress::pore_pressure().to_string(), "POR-Bar");
    }
}

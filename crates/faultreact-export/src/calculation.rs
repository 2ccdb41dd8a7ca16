// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Calculation expressions in TOML
//!
//! ```toml
//! [[calculation]]
//! description = "Effective stress"
//! expression = "a - b"
//! unit = "Pa"
//!
//! [[calculation.variable]]
//! name = "a"
//! address = "ST.S33"
//! ```
//!
//! Import is all or nothing: a record missing `description`, `expression`,
//! or a variable `name` or `address` rejects the whole file.

use crate::error::CalculationError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

type Result<T> = std::result::Result<T, CalculationError>;

/// Variable bound to a result address
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalculationVariable {
    pub name: String,
    pub address: String,
}

/// User-defined calculation over result variables
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Calculation {
    pub description: String,
    pub expression: String,
    pub unit: String,
    pub variables: Vec<CalculationVariable>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CalculationFile {
    #[serde(default, rename = "calculation")]
    calculations: Vec<CalculationRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CalculationRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expression: Option<String>,
    #[serde(default)]
    unit: String,
    #[serde(default, rename = "variable")]
    variables: Vec<VariableRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct VariableRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

impl CalculationRecord {
    fn into_calculation(self, index: usize) -> Result<Calculation> {
        let missing = |field| CalculationError::MissingField { index, field };

        let description = self.description.ok_or_else(|| missing("description"))?;
        let expression = self.expression.ok_or_else(|| missing("expression"))?;
        let variables = self
            .variables
            .into_iter()
            .map(|v| -> Result<CalculationVariable> {
                Ok(CalculationVariable {
                    name: v.name.ok_or_else(|| missing("name"))?,
                    address: v.address.ok_or_else(|| missing("address"))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Calculation {
            description,
            expression,
            unit: self.unit,
            variables,
        })
    }
}

impl From<&Calculation> for CalculationRecord {
    fn from(calculation: &Calculation) -> Self {
        Self {
            description: Some(calculation.description.clone()),
            expression: Some(calculation.expression.clone()),
            unit: calculation.unit.clone(),
            variables: calculation
                .variables
                .iter()
                .map(|v| VariableRecord {
                    name: Some(v.name.clone()),
                    address: Some(v.address.clone()),
                })
                .collect(),
        }
    }
}

/// Serialize calculations as TOML text
pub fn export_calculations(calculations: &[Calculation]) -> Result<String> {
    let file = CalculationFile {
        calculations: calculations.iter().map(CalculationRecord::from).collect(),
    };
    toml::to_string(&file).map_err(|e| CalculationError::Serialize(e.to_string()))
}

/// Parse calculations from TOML text
///
/// # Returns
/// Every calculation in file order, or an error and no calculations
pub fn import_calculations(contents: &str) -> Result<Vec<Calculation>> {
    let file: CalculationFile =
        toml::from_str(contents).map_err(|e| CalculationError::Parse(e.to_string()))?;
    let calculations = file
        .calculations
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_calculation(index))
        .collect::<Result<Vec<_>>>()?;
    log::debug!("Imported {} calculations", calculations.len());
    Ok(calculations)
}

pub fn read_calculations_file<P: AsRef<Path>>(path: P) -> Result<Vec<Calculation>> {
    import_calculations(&fs::read_to_string(path)?)
}

pub fn write_calculations_file<P: AsRef<Path>>(path: P, calculations: &[Calculation]) -> Result<()> {
    fs::write(path, export_calculations(calculations)?)?;
    Ok(())
}

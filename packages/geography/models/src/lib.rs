#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Commune and administrative boundary types.
//!
//! These types describe the communes shown on the map, independent of their
//! polygon geometry (which lives in `fire_map_geography`).

pub mod departements;

use fire_map_fire_models::CommuneCode;
use serde::{Deserialize, Serialize};

/// A commune of the boundary layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commune {
    /// INSEE commune code (e.g. `"04070"`).
    pub code: CommuneCode,
    /// Official display name (e.g. `"Digne-les-Bains"`).
    pub name: String,
    /// Department code (e.g. `"04"`).
    pub department_code: String,
}

/// Names of the boundary feature properties holding commune attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryFields {
    /// Property holding the INSEE commune code.
    pub code: String,
    /// Property holding the commune display name.
    pub name: String,
    /// Property holding the department code.
    pub department: String,
}

impl Default for BoundaryFields {
    fn default() -> Self {
        Self {
            code: "code_insee".to_string(),
            name: "nom_officiel".to_string(),
            department: "code_insee_du_departement".to_string(),
        }
    }
}

//! Fire log file layout.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the fire log lives and how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireLogConfig {
    /// Path to the delimited text export.
    pub path: PathBuf,
    /// Field delimiter (BDIFF exports use `;`).
    pub delimiter: char,
    /// Abort on the first malformed row instead of skipping it.
    pub strict: bool,
    /// Header names of the columns to read.
    pub columns: FireColumns,
}

impl Default for FireLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/BDIFF_DB.csv"),
            delimiter: ';',
            strict: true,
            columns: FireColumns::default(),
        }
    }
}

/// Header names of the fire log columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireColumns {
    pub year: String,
    pub commune_code: String,
    pub commune_name: String,
    pub burned_area: String,
    pub event_id: String,
}

impl Default for FireColumns {
    fn default() -> Self {
        Self {
            year: "Année".to_string(),
            commune_code: "Code INSEE".to_string(),
            commune_name: "Commune".to_string(),
            burned_area: "surf_ha".to_string(),
            event_id: "Numéro".to_string(),
        }
    }
}

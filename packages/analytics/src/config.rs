//! Dashboard configuration.
//!
//! The configuration is a TOML document. A default configuration is
//! compiled into the binary from `config/default.toml`; a file given on the
//! command line or through the `FIRE_MAP_CONFIG` environment variable
//! replaces it. Missing keys fall back to the defaults.

use std::path::{Path, PathBuf};

use fire_map_geography_models::BoundaryFields;
use fire_map_geography_models::departements::{departement_name, is_departement_code};
use fire_map_source::FireLogConfig;
use serde::{Deserialize, Serialize};

use crate::AnalyticsError;

/// Default configuration, embedded at compile time.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "FIRE_MAP_CONFIG";

/// Configuration file picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "fire_map.toml";

/// Everything needed to build a [`crate::Dashboard`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page title.
    pub title: String,
    /// Department whose communes are mapped (e.g. `"04"`).
    pub departement: String,
    /// Year selected when a request does not name one.
    pub default_year: i32,
    /// Attribution lines printed at the bottom of the page.
    pub credits: Vec<String>,
    /// Commune boundary layer.
    pub boundaries: BoundaryLayerConfig,
    /// BDIFF fire log.
    pub fires: FireLogConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Tableau de bord interactif des Feux de Forêt Alpe-de-Haute-Provence."
                .to_string(),
            departement: "04".to_string(),
            default_year: 2008,
            credits: vec![
                "Tom LAURENZATI, BDIFF, IGN".to_string(),
                "Dans le cadre d'un rendu de MASTER 2 en Géomatique et modélisation spatial a \
                 l'université d'Aix-Marseille"
                    .to_string(),
            ],
            boundaries: BoundaryLayerConfig::default(),
            fires: FireLogConfig::default(),
        }
    }
}

/// Where the boundary layer lives and which properties to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryLayerConfig {
    /// Path to the `GeoJSON` file.
    pub path: PathBuf,
    /// Property names of the commune attributes.
    #[serde(flatten)]
    pub fields: BoundaryFields,
}

impl Default for BoundaryLayerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/communes_04.geojson"),
            fields: BoundaryFields::default(),
        }
    }
}

impl DashboardConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if the document is not valid.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, AnalyticsError> {
        let config: Self = toml::from_str(toml_str)?;
        config.warn_on_suspicious_values();
        Ok(config)
    }

    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, AnalyticsError> {
        log::info!("Reading configuration from {}", path.display());
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// The configuration compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Config`] if the embedded document is
    /// invalid.
    pub fn embedded() -> Result<Self, AnalyticsError> {
        Self::from_toml_str(DEFAULT_CONFIG_TOML)
    }

    /// Picks the configuration to use.
    ///
    /// In order: the explicit `path`, the file named by `FIRE_MAP_CONFIG`,
    /// `fire_map.toml` in the working directory, then the embedded default.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError`] if the selected file cannot be read or
    /// parsed.
    pub fn resolve(path: Option<&Path>) -> Result<Self, AnalyticsError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR)
            && !env_path.trim().is_empty()
        {
            return Self::load(Path::new(&env_path));
        }

        let local = Path::new(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::load(local);
        }

        log::info!("Using embedded default configuration");
        Self::embedded()
    }

    /// Full name of the configured department.
    #[must_use]
    pub fn departement_name(&self) -> &'static str {
        departement_name(&self.departement)
    }

    fn warn_on_suspicious_values(&self) {
        if !is_departement_code(&self.departement) {
            log::warn!(
                "Department code '{}' is not a known French department",
                self.departement
            );
        }
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Rendering of the fire dashboard.
//!
//! Produces self-contained SVG charts (a choropleth of fires per commune
//! and yearly line charts) and assembles them into a single HTML page. The
//! page needs no script bundle or tile server: widgets are a plain `GET`
//! form, so the same markup is served live by `fire_map_server` and written
//! to disk as a static report.

pub mod choropleth;
pub mod color;
pub mod html;
pub mod interactive;
pub mod line_chart;
pub mod report;
pub mod svg;
pub mod table;

use std::path::{Path, PathBuf};

use fire_map_analytics::{Dashboard, DashboardConfig};
use fire_map_cli_utils::{IndicatifProgress, MultiProgress};

/// Errors that can occur while generating outputs.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Loading the dashboard failed.
    #[error("Analytics error: {0}")]
    Analytics(#[from] fire_map_analytics::AnalyticsError),

    /// Writing an output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Drawing a chart failed.
    #[error("Chart error: {0}")]
    Chart(String),

    /// Prompting the user failed.
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Directory generated files are written to by default.
#[must_use]
pub fn output_dir() -> PathBuf {
    PathBuf::from("data/generated")
}

/// Resolves the configuration and loads both datasets, reporting fire log
/// progress on `multi`.
///
/// # Errors
///
/// Returns [`GenerateError::Analytics`] if the configuration or a dataset
/// cannot be loaded.
pub fn load_dashboard(
    config_path: Option<&Path>,
    multi: &MultiProgress,
) -> Result<Dashboard, GenerateError> {
    let config = DashboardConfig::resolve(config_path)?;
    let progress = IndicatifProgress::file_bar(multi, "Reading fire log");
    Ok(Dashboard::load(config, progress.as_ref())?)
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fire aggregation pipeline and dashboard state.
//!
//! [`aggregate`] holds the three group-bys behind the dashboard (fires per
//! commune for a year, per year for the whole department, per year for one
//! commune) and the left join that puts every commune on the map.
//! [`dashboard::Dashboard`] loads both datasets once and answers widget
//! selections from memory.

pub mod aggregate;
pub mod config;
pub mod dashboard;

pub use config::DashboardConfig;
pub use dashboard::{CommuneView, Dashboard, DashboardView, MapFeature};

use thiserror::Error;

/// Errors that can occur while building the dashboard.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Boundary loading failed.
    #[error("Boundary error: {0}")]
    Geo(#[from] fire_map_geography::GeoError),

    /// Fire log loading failed.
    #[error("Fire log error: {0}")]
    Source(#[from] fire_map_source::SourceError),

    /// Reading the configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`DashboardConfig`].
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// No fire event is available, so no year can be selected.
    #[error("No fire data available")]
    NoFireData,
}

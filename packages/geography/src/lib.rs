#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Commune boundary layer loading.
//!
//! Reads commune polygons from a `GeoJSON` `FeatureCollection` (already in
//! WGS84 longitude/latitude), normalizes their INSEE codes, and exposes the
//! communes of one department as a [`BoundaryLayer`] ready to be joined with
//! the fire log.

pub mod boundaries;
pub mod layer;

pub use boundaries::{CommuneBoundary, load_boundaries, parse_boundaries};
pub use layer::BoundaryLayer;

use thiserror::Error;

/// Errors that can occur while loading boundaries.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Reading the boundary file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The document is valid `GeoJSON` but not a `FeatureCollection`.
    #[error("Expected a GeoJSON FeatureCollection")]
    NotFeatureCollection,

    /// A feature lacks a usable commune attribute.
    #[error("Feature {index}: {message}")]
    Feature {
        /// Position of the feature in the collection.
        index: usize,
        /// Description of what went wrong.
        message: String,
    },
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the fire map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the analytics records to allow independent evolution of the API
//! contract.

use fire_map_analytics_models::{MapSummary, MetricSeries, YearFireStats, YearRange};
use fire_map_fire_models::{CommuneCode, FireMetric};
use serde::{Deserialize, Serialize};

/// Widget values of the dashboard page, as found in the query string.
///
/// Values are kept as text so that a malformed value falls back to its
/// default instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQueryParams {
    /// Map year.
    pub year: Option<String>,
    /// Department chart metric (`fire_count` or `burned_area`).
    pub metric: Option<String>,
    /// INSEE code of the commune chart.
    pub commune: Option<String>,
}

impl DashboardQueryParams {
    /// The year, `None` when missing or not a number.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        parse_year(self.year.as_deref())
    }

    /// The metric, `None` when missing or unknown.
    #[must_use]
    pub fn metric(&self) -> Option<FireMetric> {
        parse_metric(self.metric.as_deref())
    }
}

/// Query parameters of the map endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapQueryParams {
    pub year: Option<String>,
}

impl MapQueryParams {
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        parse_year(self.year.as_deref())
    }
}

/// Query parameters of the department evolution endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvolutionQueryParams {
    pub metric: Option<String>,
}

impl EvolutionQueryParams {
    #[must_use]
    pub fn metric(&self) -> Option<FireMetric> {
        parse_metric(self.metric.as_deref())
    }
}

fn parse_year(value: Option<&str>) -> Option<i32> {
    value.and_then(|v| v.trim().parse().ok())
}

fn parse_metric(value: Option<&str>) -> Option<FireMetric> {
    value.and_then(|v| v.trim().parse().ok())
}

/// Server health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
    /// Number of fire events loaded.
    pub fire_events: usize,
    /// Number of communes on the map.
    pub communes: usize,
}

/// Years covered by the fire log.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiYearRange {
    pub min: i32,
    pub max: i32,
    /// Year shown when a request does not name one.
    pub default: i32,
}

impl ApiYearRange {
    #[must_use]
    pub const fn new(range: YearRange, default: i32) -> Self {
        Self {
            min: range.min,
            max: range.max,
            default,
        }
    }
}

/// A commune picker entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCommune {
    pub code: CommuneCode,
    pub name: String,
}

/// Fire totals of one year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiYearStats {
    pub year: i32,
    pub fire_count: u64,
    pub burned_area_ha: f64,
}

impl From<YearFireStats> for ApiYearStats {
    fn from(stats: YearFireStats) -> Self {
        Self {
            year: stats.year,
            fire_count: stats.fire_count,
            burned_area_ha: stats.burned_area_ha,
        }
    }
}

/// Chart series with the table they were derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSeries {
    /// Chart title, when the chart has one.
    pub title: Option<String>,
    /// One entry per plotted line.
    pub series: Vec<MetricSeries>,
    /// Yearly totals.
    pub table: Vec<ApiYearStats>,
}

/// Map headline numbers for one year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMapSummary {
    pub year: i32,
    #[serde(flatten)]
    pub summary: MapSummary,
}

/// Error body returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

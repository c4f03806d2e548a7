#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregated fire statistics and chart series.
//!
//! These records are derived from the fire log on every request and never
//! stored. They are serialized as-is by the JSON API.

use fire_map_fire_models::{CommuneCode, FireMetric};
use serde::{Deserialize, Serialize};

/// Fire count and burned area for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireTotals {
    pub fire_count: u64,
    pub burned_area_ha: f64,
}

impl FireTotals {
    /// Value of `metric` for this group.
    #[must_use]
    pub const fn value(&self, metric: FireMetric) -> f64 {
        metric.value(self.fire_count, self.burned_area_ha)
    }
}

/// Fire totals of one commune for the selected year (a map entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommuneFireStats {
    /// INSEE commune code.
    pub code: CommuneCode,
    /// Commune display name.
    pub name: String,
    /// Number of identified fires, `0` when the commune had none.
    pub fire_count: u64,
    /// Burned area in hectares, `0.0` when the commune had no fire.
    pub burned_area_ha: f64,
}

/// Fire totals of one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearFireStats {
    pub year: i32,
    pub fire_count: u64,
    pub burned_area_ha: f64,
}

/// A point of a line chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
}

/// One line of a chart: the values of a single metric over the years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSeries {
    /// Metric plotted by this line.
    pub metric: FireMetric,
    /// Legend label.
    pub label: String,
    /// Points in ascending year order.
    pub points: Vec<SeriesPoint>,
}

/// Inclusive range of years covered by the fire log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    /// Restricts `year` to the range.
    #[must_use]
    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }

    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }

    /// Every year of the range, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.min..=self.max
    }
}

/// The widget state of one dashboard request, after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Year shown on the map.
    pub year: i32,
    /// Metric plotted on the department chart.
    pub metric: FireMetric,
    /// Commune plotted on the commune chart, `None` for an empty layer.
    pub commune: Option<CommuneCode>,
}

/// Headline numbers of a commune map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSummary {
    /// Number of communes on the map.
    pub commune_count: usize,
    /// Number of communes with at least one fire.
    pub communes_with_fires: usize,
    /// Sum of the commune fire counts.
    pub total_fires: u64,
    /// Sum of the commune burned areas, in hectares.
    pub total_burned_area_ha: f64,
    /// Commune with the most fires (ties go to the largest burned area).
    pub most_affected: Option<CommuneFireStats>,
}

/// An entry of the commune picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommuneOption {
    pub code: CommuneCode,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_years() {
        let range = YearRange { min: 2006, max: 2020 };
        assert_eq!(range.clamp(2008), 2008);
        assert_eq!(range.clamp(1990), 2006);
        assert_eq!(range.clamp(2030), 2020);
        assert!(range.contains(2020));
        assert!(!range.contains(2021));
        assert_eq!(range.years().count(), 15);
    }

    #[test]
    fn totals_value_by_metric() {
        let totals = FireTotals {
            fire_count: 4,
            burned_area_ha: 2.5,
        };
        assert!((totals.value(FireMetric::FireCount) - 4.0).abs() < f64::EPSILON);
        assert!((totals.value(FireMetric::BurnedArea) - 2.5).abs() < f64::EPSILON);
    }
}

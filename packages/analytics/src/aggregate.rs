//! Group-by, join, and reshaping operations over the fire log.
//!
//! All functions are pure and deterministic: groups are collected in
//! `BTreeMap`s, so yearly outputs come out in ascending year order.

use std::collections::BTreeMap;

use fire_map_analytics_models::{
    CommuneFireStats, FireTotals, MapSummary, MetricSeries, SeriesPoint, YearFireStats, YearRange,
};
use fire_map_fire_models::{CommuneCode, FireEvent, FireMetric};
use fire_map_geography_models::Commune;

/// Legend label of the commune fire count line.
pub const COMMUNE_COUNT_LABEL: &str = "Nombre_par_com";

/// Legend label of the commune burned area line.
pub const COMMUNE_AREA_LABEL: &str = "Surface_par_com";

/// Which rows contribute to a fire count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountRule {
    /// Every row is a fire.
    EveryRow,
    /// Only rows carrying an event number are counted.
    Identified,
}

fn accumulate(totals: &mut FireTotals, event: &FireEvent, rule: CountRule) {
    if rule == CountRule::EveryRow || event.is_identified() {
        totals.fire_count += 1;
    }
    if let Some(area) = event.burned_area_ha {
        totals.burned_area_ha += area;
    }
}

fn group_by_year<'a>(
    events: impl IntoIterator<Item = &'a FireEvent>,
    rule: CountRule,
) -> BTreeMap<i32, FireTotals> {
    let mut groups: BTreeMap<i32, FireTotals> = BTreeMap::new();
    for event in events {
        accumulate(groups.entry(event.year).or_default(), event, rule);
    }
    groups
}

/// First and last year present in the fire log, `None` when it is empty.
#[must_use]
pub fn year_range(events: &[FireEvent]) -> Option<YearRange> {
    let min = events.iter().map(|e| e.year).min()?;
    let max = events.iter().map(|e| e.year).max()?;
    Some(YearRange { min, max })
}

/// Fire totals per commune code for one year.
///
/// Only identified events are counted; burned areas are summed over every
/// event of the year with a reported area.
#[must_use]
pub fn aggregate_by_commune(events: &[FireEvent], year: i32) -> BTreeMap<CommuneCode, FireTotals> {
    let mut groups: BTreeMap<CommuneCode, FireTotals> = BTreeMap::new();
    for event in events.iter().filter(|e| e.year == year) {
        let Some(code) = &event.commune_code else {
            continue;
        };
        accumulate(
            groups.entry(code.clone()).or_default(),
            event,
            CountRule::Identified,
        );
    }
    groups
}

/// Left-joins commune totals onto the boundary communes.
///
/// Produces exactly one entry per input commune, in input order. Communes
/// absent from `totals` get a zero count and area.
#[must_use]
pub fn join_communes<'a>(
    communes: impl IntoIterator<Item = &'a Commune>,
    totals: &BTreeMap<CommuneCode, FireTotals>,
) -> Vec<CommuneFireStats> {
    communes
        .into_iter()
        .map(|commune| {
            let t = totals.get(&commune.code).copied().unwrap_or_default();
            CommuneFireStats {
                code: commune.code.clone(),
                name: commune.name.clone(),
                fire_count: t.fire_count,
                burned_area_ha: t.burned_area_ha,
            }
        })
        .collect()
}

/// The choropleth table for one year: [`aggregate_by_commune`] joined onto
/// the communes.
#[must_use]
pub fn commune_map<'a>(
    communes: impl IntoIterator<Item = &'a Commune>,
    events: &[FireEvent],
    year: i32,
) -> Vec<CommuneFireStats> {
    join_communes(communes, &aggregate_by_commune(events, year))
}

/// Fire totals per year over the whole fire log.
///
/// Every row counts as a fire. Burned areas are truncated to whole
/// hectares.
#[must_use]
pub fn evolution_by_year(events: &[FireEvent]) -> Vec<YearFireStats> {
    group_by_year(events, CountRule::EveryRow)
        .into_iter()
        .map(|(year, t)| YearFireStats {
            year,
            fire_count: t.fire_count,
            burned_area_ha: t.burned_area_ha.trunc(),
        })
        .collect()
}

/// Fire totals per year for the commune named `name` in the fire log.
///
/// Only years with at least one recorded fire appear.
#[must_use]
pub fn evolution_for_commune(events: &[FireEvent], name: &str) -> Vec<YearFireStats> {
    group_by_year(
        events.iter().filter(|e| e.commune_name == name),
        CountRule::Identified,
    )
    .into_iter()
    .map(|(year, t)| YearFireStats {
        year,
        fire_count: t.fire_count,
        burned_area_ha: t.burned_area_ha,
    })
    .collect()
}

/// One metric of a yearly evolution as a chart line.
#[must_use]
pub fn metric_series(evolution: &[YearFireStats], metric: FireMetric, label: &str) -> MetricSeries {
    MetricSeries {
        metric,
        label: label.to_string(),
        points: evolution
            .iter()
            .map(|s| SeriesPoint {
                year: s.year,
                value: metric.value(s.fire_count, s.burned_area_ha),
            })
            .collect(),
    }
}

/// Both metrics of a commune evolution, one line each (long form).
#[must_use]
pub fn melt(evolution: &[YearFireStats]) -> [MetricSeries; 2] {
    [
        metric_series(evolution, FireMetric::FireCount, COMMUNE_COUNT_LABEL),
        metric_series(evolution, FireMetric::BurnedArea, COMMUNE_AREA_LABEL),
    ]
}

/// Headline numbers of a commune map.
#[must_use]
pub fn summary(stats: &[CommuneFireStats]) -> MapSummary {
    let most_affected = stats
        .iter()
        .filter(|s| s.fire_count > 0)
        .max_by(|a, b| {
            a.fire_count
                .cmp(&b.fire_count)
                .then(a.burned_area_ha.total_cmp(&b.burned_area_ha))
        })
        .cloned();

    MapSummary {
        commune_count: stats.len(),
        communes_with_fires: stats.iter().filter(|s| s.fire_count > 0).count(),
        total_fires: stats.iter().map(|s| s.fire_count).sum(),
        total_burned_area_ha: stats.iter().map(|s| s.burned_area_ha).sum(),
        most_affected,
    }
}

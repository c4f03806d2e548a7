//! In-memory dashboard state.
//!
//! Both datasets are read once, when the [`Dashboard`] is built, and kept
//! for the lifetime of the process. Every widget selection is answered by
//! recomputing the aggregates from memory.

use fire_map_analytics_models::{
    CommuneFireStats, CommuneOption, MapSummary, MetricSeries, Selection, YearFireStats,
    YearRange,
};
use fire_map_fire_models::{CommuneCode, FireEvent, FireMetric};
use fire_map_geography::{BoundaryLayer, CommuneBoundary, load_boundaries};
use fire_map_source::load_fire_log;
use fire_map_source::progress::ProgressCallback;

use crate::aggregate::{
    commune_map, evolution_by_year, evolution_for_commune, melt, metric_series, summary,
    year_range,
};
use crate::{AnalyticsError, DashboardConfig};

/// A commune polygon with its fire totals for the selected year.
#[derive(Debug, Clone)]
pub struct MapFeature<'a> {
    pub boundary: &'a CommuneBoundary,
    pub stats: CommuneFireStats,
}

/// The commune section of the page.
#[derive(Debug, Clone)]
pub struct CommuneView {
    /// Selected commune.
    pub commune: CommuneOption,
    /// Yearly totals of the commune.
    pub evolution: Vec<YearFireStats>,
    /// Fire count and burned area lines.
    pub series: [MetricSeries; 2],
}

/// Everything derived from one selection.
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub selection: Selection,
    pub years: YearRange,
    /// One feature per commune of the layer, in layer order.
    pub features: Vec<MapFeature<'a>>,
    pub summary: MapSummary,
    /// Department-wide yearly totals (the data table).
    pub department_evolution: Vec<YearFireStats>,
    /// The selected metric of [`Self::department_evolution`].
    pub department_series: MetricSeries,
    /// Commune picker entries.
    pub communes: Vec<CommuneOption>,
    pub commune: Option<CommuneView>,
}

/// Loaded datasets and the configuration they came from.
#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    layer: BoundaryLayer,
    events: Vec<FireEvent>,
    years: YearRange,
}

impl Dashboard {
    /// Loads the boundary layer and the fire log named in `config`.
    ///
    /// The boundary layer is restricted to the configured department.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError`] if either dataset cannot be loaded or the
    /// fire log is empty.
    pub fn load(
        config: DashboardConfig,
        progress: &dyn ProgressCallback,
    ) -> Result<Self, AnalyticsError> {
        let boundaries = load_boundaries(&config.boundaries.path, &config.boundaries.fields)?;
        let layer = BoundaryLayer::new(boundaries).for_departement(&config.departement);

        if layer.is_empty() {
            log::warn!(
                "No commune of department {} ({}) in {}",
                config.departement,
                config.departement_name(),
                config.boundaries.path.display()
            );
        } else {
            log::info!(
                "Mapping {} communes of department {} ({})",
                layer.len(),
                config.departement,
                config.departement_name()
            );
        }

        let fire_log = load_fire_log(&config.fires, progress)?;

        Self::new(config, layer, fire_log.events)
    }

    /// Builds a dashboard from already-loaded datasets.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NoFireData`] if `events` is empty.
    pub fn new(
        config: DashboardConfig,
        layer: BoundaryLayer,
        events: Vec<FireEvent>,
    ) -> Result<Self, AnalyticsError> {
        let years = year_range(&events).ok_or(AnalyticsError::NoFireData)?;

        if !years.contains(config.default_year) {
            log::warn!(
                "Default year {} is outside the fire log ({}-{}), using {}",
                config.default_year,
                years.min,
                years.max,
                years.clamp(config.default_year)
            );
        }

        Ok(Self {
            config,
            layer,
            events,
            years,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub const fn layer(&self) -> &BoundaryLayer {
        &self.layer
    }

    #[must_use]
    pub fn events(&self) -> &[FireEvent] {
        &self.events
    }

    #[must_use]
    pub const fn years(&self) -> YearRange {
        self.years
    }

    /// The configured default year, clamped to the fire log.
    #[must_use]
    pub fn default_year(&self) -> i32 {
        self.years.clamp(self.config.default_year)
    }

    /// Commune picker entries, alphabetical by name.
    ///
    /// Communes sharing a name appear once, under their first code in the
    /// layer.
    #[must_use]
    pub fn commune_options(&self) -> Vec<CommuneOption> {
        self.layer
            .sorted_names()
            .into_iter()
            .filter_map(|name| self.layer.by_name(name))
            .map(|b| CommuneOption {
                code: b.commune.code.clone(),
                name: b.commune.name.clone(),
            })
            .collect()
    }

    /// The commune selected when a request does not name one: the first
    /// in alphabetical order.
    #[must_use]
    pub fn default_commune(&self) -> Option<CommuneCode> {
        self.layer
            .sorted_names()
            .first()
            .and_then(|name| self.layer.by_name(name))
            .map(|b| b.commune.code.clone())
    }

    /// Turns raw widget values into a valid [`Selection`].
    ///
    /// Missing values take their defaults; the year is clamped to the fire
    /// log and an unknown commune falls back to the default commune.
    #[must_use]
    pub fn selection(
        &self,
        year: Option<i32>,
        metric: Option<FireMetric>,
        commune: Option<&str>,
    ) -> Selection {
        let year = year.map_or_else(|| self.default_year(), |y| self.years.clamp(y));

        let commune = commune
            .and_then(|raw| CommuneCode::parse(raw).ok())
            .filter(|code| self.layer.by_code(code).is_some())
            .or_else(|| self.default_commune());

        Selection {
            year,
            metric: metric.unwrap_or_default(),
            commune,
        }
    }

    /// Fire totals of every commune of the layer for `year`.
    #[must_use]
    pub fn commune_map(&self, year: i32) -> Vec<CommuneFireStats> {
        commune_map(self.layer.communes(), &self.events, year)
    }

    /// [`Self::commune_map`] paired with the commune polygons.
    #[must_use]
    pub fn map_features(&self, year: i32) -> Vec<MapFeature<'_>> {
        self.layer
            .iter()
            .zip(self.commune_map(year))
            .map(|(boundary, stats)| MapFeature { boundary, stats })
            .collect()
    }

    /// Department-wide yearly totals.
    #[must_use]
    pub fn department_evolution(&self) -> Vec<YearFireStats> {
        evolution_by_year(&self.events)
    }

    /// Yearly totals of the commune with `code`, `None` when the code is
    /// not in the layer.
    #[must_use]
    pub fn commune_evolution(&self, code: &CommuneCode) -> Option<Vec<YearFireStats>> {
        let boundary = self.layer.by_code(code)?;
        Some(evolution_for_commune(&self.events, &boundary.commune.name))
    }

    /// Computes every table and series shown for `selection`.
    #[must_use]
    pub fn view(&self, selection: &Selection) -> DashboardView<'_> {
        let features = self.map_features(selection.year);
        let stats: Vec<CommuneFireStats> = features.iter().map(|f| f.stats.clone()).collect();

        let department_evolution = self.department_evolution();
        let department_series = metric_series(
            &department_evolution,
            selection.metric,
            selection.metric.axis_title(),
        );

        let commune = selection.commune.as_ref().and_then(|code| {
            let boundary = self.layer.by_code(code)?;
            let evolution = evolution_for_commune(&self.events, &boundary.commune.name);
            let series = melt(&evolution);
            Some(CommuneView {
                commune: CommuneOption {
                    code: boundary.commune.code.clone(),
                    name: boundary.commune.name.clone(),
                },
                evolution,
                series,
            })
        });

        DashboardView {
            selection: selection.clone(),
            years: self.years,
            summary: summary(&stats),
            features,
            department_evolution,
            department_series,
            communes: self.commune_options(),
            commune,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fire_map_geography_models::Commune;
    use geo::{LineString, MultiPolygon, Polygon};

    fn boundary(raw: &str, name: &str, x: f64) -> CommuneBoundary {
        let code = CommuneCode::parse(raw).unwrap();
        CommuneBoundary {
            commune: Commune {
                department_code: code.department_code().to_string(),
                code,
                name: name.to_string(),
            },
            geometry: MultiPolygon(vec![Polygon::new(
                LineString::from(vec![(x, 44.0), (x + 0.1, 44.0), (x + 0.1, 44.1), (x, 44.0)]),
                vec![],
            )]),
        }
    }

    fn event(year: i32, raw: &str, name: &str, area: f64) -> FireEvent {
        FireEvent {
            year,
            commune_code: Some(CommuneCode::parse(raw).unwrap()),
            commune_name: name.to_string(),
            burned_area_ha: Some(area),
            event_id: Some(format!("{year}-{raw}")),
        }
    }

    fn dashboard() -> Dashboard {
        let layer = BoundaryLayer::new(vec![
            boundary("04209", "Sisteron", 5.9),
            boundary("04070", "Digne-les-Bains", 6.2),
            boundary("04112", "Manosque", 5.7),
            boundary("05061", "Gap", 6.0),
        ])
        .for_departement("04");

        Dashboard::new(
            DashboardConfig::default(),
            layer,
            vec![
                event(2005, "04070", "Digne-les-Bains", 1.0),
                event(2008, "04112", "Manosque", 2.0),
                event(2008, "04112", "Manosque", 3.0),
                event(2012, "04209", "Sisteron", 4.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn empty_fire_log_is_rejected() {
        let err = Dashboard::new(DashboardConfig::default(), BoundaryLayer::default(), vec![])
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::NoFireData));
    }

    #[test]
    fn default_selection() {
        let dashboard = dashboard();
        let selection = dashboard.selection(None, None, None);
        assert_eq!(selection.year, 2008);
        assert_eq!(selection.metric, FireMetric::FireCount);
        assert_eq!(selection.commune.unwrap().as_str(), "04070");
    }

    #[test]
    fn selection_clamps_year_and_rejects_unknown_commune() {
        let dashboard = dashboard();
        let selection = dashboard.selection(Some(1990), Some(FireMetric::BurnedArea), Some("05061"));
        assert_eq!(selection.year, 2005);
        assert_eq!(selection.metric, FireMetric::BurnedArea);
        assert_eq!(selection.commune.unwrap().as_str(), "04070");

        let selection = dashboard.selection(Some(2030), None, Some("4112"));
        assert_eq!(selection.year, 2012);
        assert_eq!(selection.commune.unwrap().as_str(), "04112");
    }

    #[test]
    fn default_year_is_clamped() {
        let config = DashboardConfig {
            default_year: 2050,
            ..DashboardConfig::default()
        };
        let dashboard = Dashboard::new(
            config,
            BoundaryLayer::default(),
            vec![event(2010, "04070", "Digne-les-Bains", 1.0)],
        )
        .unwrap();
        assert_eq!(dashboard.default_year(), 2010);
    }

    #[test]
    fn commune_options_are_alphabetical() {
        let names: Vec<String> = dashboard()
            .commune_options()
            .into_iter()
            .map(|o| o.name)
            .collect();
        assert_eq!(names, vec!["Digne-les-Bains", "Manosque", "Sisteron"]);
    }

    #[test]
    fn map_features_follow_layer() {
        let dashboard = dashboard();
        let features = dashboard.map_features(2008);
        assert_eq!(features.len(), 3);
        for feature in &features {
            assert_eq!(feature.boundary.commune.code, feature.stats.code);
        }
        let manosque = features.iter().find(|f| f.stats.name == "Manosque").unwrap();
        assert_eq!(manosque.stats.fire_count, 2);
    }

    #[test]
    fn commune_evolution_by_code() {
        let dashboard = dashboard();
        let evolution = dashboard
            .commune_evolution(&CommuneCode::parse("04112").unwrap())
            .unwrap();
        assert_eq!(evolution.len(), 1);
        assert_eq!(evolution[0].fire_count, 2);
        assert!(
            dashboard
                .commune_evolution(&CommuneCode::parse("05061").unwrap())
                .is_none()
        );
    }

    #[test]
    fn view_contains_every_section() {
        let dashboard = dashboard();
        let selection = dashboard.selection(Some(2008), Some(FireMetric::BurnedArea), Some("04112"));
        let view = dashboard.view(&selection);

        assert_eq!(view.features.len(), 3);
        assert_eq!(view.summary.total_fires, 2);
        assert_eq!(view.department_evolution.len(), 3);
        assert_eq!(view.department_series.metric, FireMetric::BurnedArea);
        assert_eq!(view.department_series.label, "Surface brûlée (Ha)");
        assert_eq!(view.communes.len(), 3);

        let commune = view.commune.unwrap();
        assert_eq!(commune.commune.name, "Manosque");
        assert_eq!(commune.series[0].points.len(), 1);
    }
}

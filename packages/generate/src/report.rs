//! Files written to disk: the static HTML report and the joined map layer.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use fire_map_analytics::Dashboard;
use fire_map_analytics_models::{Selection, YearFireStats};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use serde_json::json;

use crate::GenerateError;
use crate::html::{PageOptions, render_dashboard};
use crate::svg::format_number;

/// Renders the dashboard for `selection` and writes it to `path`.
///
/// The page is static: its widgets show the selection but are disabled.
///
/// # Errors
///
/// Returns [`GenerateError`] if a chart cannot be drawn or the file cannot
/// be written.
pub fn write_report(
    dashboard: &Dashboard,
    selection: &Selection,
    path: &Path,
) -> Result<(), GenerateError> {
    let view = dashboard.view(selection);
    let options = PageOptions::from_config(dashboard.config()).into_static();

    let mut html = render_dashboard(&view, &options)?;
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M");
    let _ = write!(html, "<!-- generated {generated} -->");

    create_parent(path)?;
    std::fs::write(path, html)?;

    log::info!(
        "Wrote report for {} ({}) to {}",
        selection.year,
        selection.metric,
        path.display()
    );
    Ok(())
}

/// The commune layer joined with the fire totals of `year`.
///
/// Each feature keeps the configured code and name properties and gains
/// `Nombre_de_feux` and `surface_brulee`.
#[must_use]
pub fn map_geojson(dashboard: &Dashboard, year: i32) -> FeatureCollection {
    let fields = &dashboard.config().boundaries.fields;

    let features = dashboard
        .map_features(year)
        .into_iter()
        .map(|feature| {
            let mut properties = JsonObject::new();
            properties.insert(fields.code.clone(), json!(feature.stats.code.as_str()));
            properties.insert(fields.name.clone(), json!(feature.stats.name));
            properties.insert("Nombre_de_feux".to_string(), json!(feature.stats.fire_count));
            properties.insert("surface_brulee".to_string(), json!(feature.stats.burned_area_ha));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(
                    &feature.boundary.geometry,
                ))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Writes [`map_geojson`] for `year` to `path`.
///
/// # Errors
///
/// Returns [`GenerateError`] if serialization or writing fails.
pub fn write_map_geojson(dashboard: &Dashboard, year: i32, path: &Path) -> Result<(), GenerateError> {
    let collection = map_geojson(dashboard, year);

    create_parent(path)?;
    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut file, &collection)?;
    file.flush()?;

    log::info!(
        "Exported {} communes for {year} to {}",
        collection.features.len(),
        path.display()
    );
    Ok(())
}

/// Formats yearly totals as a fixed-width text table.
#[must_use]
pub fn summary_table(evolution: &[YearFireStats]) -> String {
    let mut out = format!("{:>6}  {:>8}  {:>12}\n", "Année", "Nombre", "Surface (ha)");
    for row in evolution {
        let _ = writeln!(
            out,
            "{:>6}  {:>8}  {:>12}",
            row.year,
            row.fire_count,
            format_number(row.burned_area_ha)
        );
    }
    out
}

fn create_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fire_map_analytics::DashboardConfig;
    use fire_map_fire_models::{CommuneCode, FireEvent, FireMetric};
    use fire_map_geography::{BoundaryLayer, CommuneBoundary};
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

    fn dashboard() -> Dashboard {
        Dashboard::new(
            DashboardConfig::default(),
            BoundaryLayer::new(vec![
                boundary("04070", "Digne-les-Bains", 6.2),
                boundary("04112", "Manosque", 5.7),
            ]),
            vec![FireEvent {
                year: 2008,
                commune_code: Some(CommuneCode::parse("04112").unwrap()),
                commune_name: "Manosque".to_string(),
                burned_area_ha: Some(3.5),
                event_id: Some("1".to_string()),
            }],
        )
        .unwrap()
    }

    #[test]
    fn geojson_has_one_feature_per_commune() {
        let collection = map_geojson(&dashboard(), 2008);
        assert_eq!(collection.features.len(), 2);

        let manosque = collection
            .features
            .iter()
            .find(|f| f.property("code_insee") == Some(&json!("04112")))
            .unwrap();
        assert_eq!(manosque.property("nom_officiel"), Some(&json!("Manosque")));
        assert_eq!(manosque.property("Nombre_de_feux"), Some(&json!(1)));
        assert_eq!(manosque.property("surface_brulee"), Some(&json!(3.5)));

        let digne = collection
            .features
            .iter()
            .find(|f| f.property("code_insee") == Some(&json!("04070")))
            .unwrap();
        assert_eq!(digne.property("Nombre_de_feux"), Some(&json!(0)));
    }

    #[test]
    fn writes_files() {
        let dir = std::env::temp_dir().join(format!("fire_map_report_{}", std::process::id()));
        let dashboard = dashboard();
        let selection = dashboard.selection(None, Some(FireMetric::BurnedArea), None);

        let html_path = dir.join("report.html");
        write_report(&dashboard, &selection, &html_path).unwrap();
        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Nombre de feux par commune en 2008"));

        let geojson_path = dir.join("map.geojson");
        write_map_geojson(&dashboard, 2008, &geojson_path).unwrap();
        let text = std::fs::read_to_string(&geojson_path).unwrap();
        assert!(text.contains("FeatureCollection"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn summary_table_lists_years() {
        let table = summary_table(&dashboard().department_evolution());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("2008"));
        assert!(lines[1].trim_end().ends_with('3'));
    }
}

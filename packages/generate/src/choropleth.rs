//! Commune choropleth map.
//!
//! Longitude/latitude are drawn with an equirectangular projection whose
//! x axis is shortened by the cosine of the middle latitude, which keeps
//! department-sized areas close to their true shape. The drawing is fitted
//! to the bounding box of the features.

use std::fmt::Write as _;

use fire_map_analytics::MapFeature;
use geo::{Coord, LineString, Rect};

use crate::color::{ColorScale, REDS};
use crate::svg::{escape, format_number};

/// Rendering options of the map.
#[derive(Debug, Clone)]
pub struct ChoroplethOptions {
    pub width: f64,
    pub height: f64,
    /// Fill opacity of the commune polygons.
    pub opacity: f64,
    pub title: String,
}

impl ChoroplethOptions {
    /// Default options for the map of `year`.
    #[must_use]
    pub fn for_year(year: i32) -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            opacity: 0.8,
            title: format!("Nombre de feux par commune en {year}"),
        }
    }
}

const TITLE_HEIGHT: f64 = 40.0;
const LEGEND_WIDTH: f64 = 90.0;
const MARGIN: f64 = 10.0;

/// Screen placement of projected coordinates.
struct Projection {
    cos_lat: f64,
    min_x: f64,
    max_y: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Projection {
    fn fit(bounds: Rect<f64>, width: f64, height: f64) -> Self {
        let mid_lat = f64::midpoint(bounds.min().y, bounds.max().y);
        let cos_lat = mid_lat.to_radians().cos().abs().max(1e-6);

        let min_x = bounds.min().x * cos_lat;
        let span_x = (bounds.max().x * cos_lat - min_x).max(1e-9);
        let span_y = (bounds.max().y - bounds.min().y).max(1e-9);

        let scale = (width / span_x).min(height / span_y);

        Self {
            cos_lat,
            min_x,
            max_y: bounds.max().y,
            scale,
            offset_x: (width - span_x * scale) / 2.0,
            offset_y: (height - span_y * scale) / 2.0,
        }
    }

    fn project(&self, coord: Coord<f64>) -> (f64, f64) {
        (
            (coord.x * self.cos_lat - self.min_x).mul_add(self.scale, self.offset_x),
            (self.max_y - coord.y).mul_add(self.scale, self.offset_y),
        )
    }
}

fn features_bounds(features: &[MapFeature<'_>]) -> Option<Rect<f64>> {
    features
        .iter()
        .filter_map(|f| f.boundary.bounds())
        .reduce(|a, b| {
            Rect::new(
                geo::coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                geo::coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            )
        })
}

fn ring_path(out: &mut String, ring: &LineString<f64>, projection: &Projection, dx: f64, dy: f64) {
    for (i, coord) in ring.coords().enumerate() {
        let (x, y) = projection.project(*coord);
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(out, "{command}{:.1},{:.1}", x + dx, y + dy);
    }
    if !ring.0.is_empty() {
        out.push('Z');
    }
}

/// Renders the map as a standalone SVG document.
///
/// Every feature becomes one `<path>`, filled by its fire count on the
/// "Reds" scale and carrying a `<title>` tooltip.
#[must_use]
pub fn render_choropleth(features: &[MapFeature<'_>], options: &ChoroplethOptions) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="choropleth" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
        w = options.width,
        h = options.height,
    );
    let _ = write!(
        svg,
        r#"<text class="chart-title" x="{x}" y="26" text-anchor="middle" font-size="18">{}</text>"#,
        escape(&options.title),
        x = options.width / 2.0,
    );

    #[allow(clippy::cast_precision_loss)]
    let counts = features.iter().map(|f| f.stats.fire_count as f64);
    let min = counts.clone().fold(f64::INFINITY, f64::min);
    let max = counts.fold(f64::NEG_INFINITY, f64::max);
    let (min, max) = if min.is_finite() { (min, max) } else { (0.0, 0.0) };
    let scale = ColorScale::reds(min, max);

    let plot_width = options.width - LEGEND_WIDTH - 2.0 * MARGIN;
    let plot_height = options.height - TITLE_HEIGHT - 2.0 * MARGIN;

    if let Some(bounds) = features_bounds(features) {
        let projection = Projection::fit(bounds, plot_width, plot_height);
        let (dx, dy) = (MARGIN, TITLE_HEIGHT + MARGIN);

        svg.push_str(r##"<g class="communes" stroke="#444444" stroke-width="0.5">"##);
        for feature in features {
            let stats = &feature.stats;
            #[allow(clippy::cast_precision_loss)]
            let color = scale.color_for(stats.fire_count as f64);

            let mut d = String::new();
            for polygon in feature.boundary.geometry.iter() {
                ring_path(&mut d, polygon.exterior(), &projection, dx, dy);
                for interior in polygon.interiors() {
                    ring_path(&mut d, interior, &projection, dx, dy);
                }
            }

            let _ = write!(
                svg,
                r#"<path d="{d}" fill="{color}" fill-opacity="{opacity}" fill-rule="evenodd" data-code="{code}"><title>{code} {name}&#10;Nombre de feux : {count}&#10;Surface brûlée : {area} ha</title></path>"#,
                opacity = options.opacity,
                code = escape(stats.code.as_str()),
                name = escape(&stats.name),
                count = stats.fire_count,
                area = format_number(stats.burned_area_ha),
            );
        }
        svg.push_str("</g>");
    } else {
        let _ = write!(
            svg,
            r#"<text x="{x}" y="{y}" text-anchor="middle">Aucune commune à afficher</text>"#,
            x = options.width / 2.0,
            y = options.height / 2.0,
        );
    }

    legend(&mut svg, options, min, max);

    svg.push_str("</svg>");
    svg
}

fn legend(svg: &mut String, options: &ChoroplethOptions, min: f64, max: f64) {
    let x = options.width - LEGEND_WIDTH + 20.0;
    let top = TITLE_HEIGHT + MARGIN;
    let height = (options.height - TITLE_HEIGHT - 2.0 * MARGIN).min(300.0);

    svg.push_str(r#"<defs><linearGradient id="reds" x1="0" y1="1" x2="0" y2="0">"#);
    #[allow(clippy::cast_precision_loss)]
    let last = (REDS.len() - 1) as f64;
    for (i, color) in REDS.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let offset = i as f64 / last;
        let _ = write!(
            svg,
            r#"<stop offset="{offset:.3}" stop-color="{color}"/>"#
        );
    }
    svg.push_str("</linearGradient></defs>");

    let _ = write!(
        svg,
        r##"<g class="legend"><rect x="{x}" y="{top}" width="18" height="{height}" fill="url(#reds)" stroke="#888888"/>"##
    );
    let _ = write!(
        svg,
        r#"<text x="{tx}" y="{ty}" font-size="12">{}</text>"#,
        format_number(max),
        tx = x + 24.0,
        ty = top + 10.0,
    );
    let _ = write!(
        svg,
        r#"<text x="{tx}" y="{ty}" font-size="12">{}</text>"#,
        format_number(min),
        tx = x + 24.0,
        ty = top + height,
    );
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{ty}" font-size="12">Nombre_de_feux</text></g>"#,
        ty = top - 4.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use fire_map_analytics_models::CommuneFireStats;
    use fire_map_fire_models::CommuneCode;
    use fire_map_geography::CommuneBoundary;
    use fire_map_geography_models::Commune;
    use geo::{MultiPolygon, Polygon};

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

    fn stats(boundary: &CommuneBoundary, fire_count: u64) -> CommuneFireStats {
        CommuneFireStats {
            code: boundary.commune.code.clone(),
            name: boundary.commune.name.clone(),
            fire_count,
            burned_area_ha: 1.5,
        }
    }

    #[test]
    fn one_path_per_commune() {
        let a = boundary("04070", "Digne-les-Bains", 6.2);
        let b = boundary("04112", "Manosque & <Co>", 5.7);
        let features = vec![
            MapFeature {
                boundary: &a,
                stats: stats(&a, 0),
            },
            MapFeature {
                boundary: &b,
                stats: stats(&b, 4),
            },
        ];

        let svg = render_choropleth(&features, &ChoroplethOptions::for_year(2008));

        assert_eq!(svg.matches("<path ").count(), 2);
        assert!(svg.contains("Nombre de feux par commune en 2008"));
        assert!(svg.contains("Manosque &amp; &lt;Co&gt;"));
        assert!(svg.contains(r##"fill="#fff5f0""##));
        assert!(svg.contains(r##"fill="#67000d""##));
        assert!(svg.contains(r#"fill-opacity="0.8""#));
        assert!(svg.contains(r#"fill-rule="evenodd""#));
    }

    #[test]
    fn legend_names_the_coloured_column() {
        let a = boundary("04070", "Digne-les-Bains", 6.2);
        let features = vec![MapFeature {
            boundary: &a,
            stats: stats(&a, 3),
        }];
        let svg = render_choropleth(&features, &ChoroplethOptions::for_year(2008));
        assert!(svg.contains(">Nombre_de_feux</text>"));
        assert!(!svg.contains("Nombre_par_com"));
    }

    #[test]
    fn projected_paths_stay_inside_the_plot() {
        let a = boundary("04070", "Digne-les-Bains", 6.2);
        let features = vec![MapFeature {
            boundary: &a,
            stats: stats(&a, 1),
        }];
        let bounds = features_bounds(&features).unwrap();
        let projection = Projection::fit(bounds, 100.0, 100.0);

        for coord in a.geometry.0[0].exterior().coords() {
            let (x, y) = projection.project(*coord);
            assert!((-1e-6..=100.0 + 1e-6).contains(&x));
            assert!((-1e-6..=100.0 + 1e-6).contains(&y));
        }
    }

    #[test]
    fn empty_map_has_message() {
        let svg = render_choropleth(&[], &ChoroplethOptions::for_year(2010));
        assert!(svg.contains("Aucune commune"));
        assert!(!svg.contains("<path "));
    }
}

//! Yearly line charts, drawn with `plotters` into an SVG string.

use std::ops::Range;

use fire_map_analytics_models::MetricSeries;
use fire_map_fire_models::FireMetric;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::GenerateError;

/// Default colours of successive series.
pub const SERIES_COLORS: [RGBColor; 2] = [RGBColor(0x63, 0x6e, 0xfa), RGBColor(0xef, 0x55, 0x3b)];

/// Title drawn above the legend entries.
pub const LEGEND_TITLE: &str = "Métrique Analysée";

const FONT: &str = "sans-serif";
const LEGEND_WIDTH: u32 = 170;
const MARKER_SIZE: i32 = 4;
const MAX_X_LABELS: usize = 15;
const MAX_Y_LABELS: usize = 6;

/// Rendering options of a line chart.
#[derive(Debug, Clone)]
pub struct LineChartOptions {
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub x_title: String,
    pub y_title: String,
    /// Colour of each series, cycled when there are more series.
    pub colors: Vec<RGBColor>,
    pub show_legend: bool,
}

impl Default for LineChartOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            title: None,
            x_title: "Année".to_string(),
            y_title: String::new(),
            colors: SERIES_COLORS.to_vec(),
            show_legend: false,
        }
    }
}

impl LineChartOptions {
    /// The department chart: one black line of `metric`.
    #[must_use]
    pub fn department(metric: FireMetric) -> Self {
        Self {
            y_title: metric.axis_title().to_string(),
            colors: vec![BLACK],
            ..Self::default()
        }
    }

    /// The commune chart: both metrics of `commune`.
    #[must_use]
    pub fn commune(commune: &str) -> Self {
        Self {
            title: Some(format!("Évolution des métriques des feux à {commune}")),
            y_title: "Valeur (Nombre de Feux ou Surface Ha)".to_string(),
            show_legend: true,
            ..Self::default()
        }
    }

    fn color(&self, index: usize) -> RGBColor {
        self.colors
            .get(index % self.colors.len().max(1))
            .copied()
            .unwrap_or(BLACK)
    }
}

/// Renders `series` as a standalone SVG document.
///
/// Each series is a line with a circle marker per year. The y axis only
/// carries whole-number labels.
///
/// # Errors
///
/// Returns [`GenerateError::Chart`] if drawing fails.
pub fn render_line_chart(
    series: &[MetricSeries],
    options: &LineChartOptions,
) -> Result<String, GenerateError> {
    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (options.width, options.height)).into_drawing_area();
        draw(&root, series, options).map_err(|e| GenerateError::Chart(e.to_string()))?;
    }
    Ok(svg)
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[MetricSeries],
    options: &LineChartOptions,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let years = || series.iter().flat_map(|s| s.points.iter().map(|p| p.year));
    let (Some(first_year), Some(last_year)) = (years().min(), years().max()) else {
        let (width, height) = root.dim_in_pixel();
        let style =
            TextStyle::from((FONT, 16).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
        root.draw_text("Aucune donnée", &style, (half(width), half(height)))?;
        return root.present();
    };

    let max_value = series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.value))
        .fold(0.0, f64::max);
    let y_top = (max_value * 1.1).max(1.0);
    let x_range = if first_year == last_year {
        first_year - 1..last_year + 1
    } else {
        first_year..last_year
    };

    let legend_width = if options.show_legend { LEGEND_WIDTH } else { 0 };
    let (width, _) = root.dim_in_pixel();
    let (plot_area, legend_area) = root.split_horizontally(width.saturating_sub(legend_width));

    let mut builder = ChartBuilder::on(&plot_area);
    builder.margin(15).x_label_area_size(45).y_label_area_size(70);
    if let Some(title) = &options.title {
        builder.caption(title, (FONT, 20));
    }
    let mut chart = builder.build_cartesian_2d(x_range.clone(), 0.0..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(x_label_count(&x_range))
        .y_labels(y_label_count(y_top))
        .x_label_formatter(&|year| year.to_string())
        .y_label_formatter(&|value| format!("{value:.0}"))
        .x_desc(options.x_title.as_str())
        .y_desc(options.y_title.as_str())
        .axis_desc_style((FONT, 14))
        .draw()?;

    let label_style =
        TextStyle::from((FONT, 14).into_font()).pos(Pos::new(HPos::Left, VPos::Center));
    if options.show_legend {
        legend_area.draw_text(LEGEND_TITLE, &label_style, (10, 60))?;
    }

    for (i, line) in series.iter().enumerate() {
        let color = options.color(i);
        let points: Vec<(i32, f64)> = line.points.iter().map(|p| (p.year, p.value)).collect();

        chart.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?;
        chart.draw_series(PointSeries::of_element(
            points,
            MARKER_SIZE,
            color.filled(),
            &|coord, size, style| Circle::new(coord, size, style),
        ))?;

        if options.show_legend {
            let y = i32::try_from(i).unwrap_or(0) * 22 + 85;
            legend_area.draw(&PathElement::new(
                vec![(10, y), (34, y)],
                color.stroke_width(2),
            ))?;
            legend_area.draw_text(&line.label, &label_style, (40, y))?;
        }
    }

    root.present()
}

fn half(pixels: u32) -> i32 {
    i32::try_from(pixels / 2).unwrap_or(0)
}

fn x_label_count(years: &Range<i32>) -> usize {
    usize::try_from(years.end - years.start + 1)
        .unwrap_or(1)
        .min(MAX_X_LABELS)
}

/// Enough labels for a step of one on short ranges, never more than
/// [`MAX_Y_LABELS`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn y_label_count(y_top: f64) -> usize {
    (y_top.floor() as usize + 1).clamp(2, MAX_Y_LABELS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fire_map_analytics_models::SeriesPoint;

    fn series(label: &str, values: &[(i32, f64)]) -> MetricSeries {
        MetricSeries {
            metric: FireMetric::FireCount,
            label: label.to_string(),
            points: values
                .iter()
                .map(|(year, value)| SeriesPoint {
                    year: *year,
                    value: *value,
                })
                .collect(),
        }
    }

    /// Content of every `<text>` element.
    fn texts(svg: &str) -> Vec<String> {
        svg.split("</text>")
            .filter_map(|chunk| chunk.rsplit_once('>'))
            .map(|(_, text)| text.trim().to_string())
            .collect()
    }

    #[test]
    fn department_chart_is_black_without_legend() {
        let svg = render_line_chart(
            &[series("Nombre de feux", &[(2006, 3.0), (2007, 7.0), (2008, 1.0)])],
            &LineChartOptions::department(FireMetric::BurnedArea),
        )
        .unwrap();
        let texts = texts(&svg);

        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(texts.iter().any(|t| t == "Surface brûlée (Ha)"));
        assert!(texts.iter().any(|t| t == "Année"));
        assert!(!texts.iter().any(|t| t == LEGEND_TITLE));
        assert!(!svg.to_ascii_lowercase().contains("#636efa"));
    }

    #[test]
    fn commune_chart_has_two_series_and_legend() {
        let svg = render_line_chart(
            &[
                series("Nombre_par_com", &[(2010, 2.0), (2012, 1.0)]),
                series("Surface_par_com", &[(2010, 12.5), (2012, 0.4)]),
            ],
            &LineChartOptions::commune("Forcalquier"),
        )
        .unwrap();
        let texts = texts(&svg);
        let lower = svg.to_ascii_lowercase();

        assert!(texts.iter().any(|t| t == "Évolution des métriques des feux à Forcalquier"));
        assert!(texts.iter().any(|t| t == LEGEND_TITLE));
        assert!(texts.iter().any(|t| t == "Nombre_par_com"));
        assert!(texts.iter().any(|t| t == "Surface_par_com"));
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(lower.contains("#636efa"));
        assert!(lower.contains("#ef553b"));
    }

    #[test]
    fn y_labels_are_whole_numbers() {
        let svg = render_line_chart(
            &[series("x", &[(2010, 0.4), (2011, 0.2)])],
            &LineChartOptions::default(),
        )
        .unwrap();
        let texts = texts(&svg);

        assert!(texts.iter().any(|t| t == "1"));
        for text in texts.iter().filter(|t| t.starts_with(|c: char| c.is_ascii_digit())) {
            assert!(text.parse::<i64>().is_ok(), "label {text:?}");
        }
    }

    #[test]
    fn empty_series() {
        let svg = render_line_chart(&[], &LineChartOptions::commune("Gap")).unwrap();
        assert!(texts(&svg).iter().any(|t| t == "Aucune donnée"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn single_year_gets_one_marker() {
        let svg = render_line_chart(&[series("x", &[(2015, 4.0)])], &LineChartOptions::default())
            .unwrap();
        assert_eq!(svg.matches("<circle").count(), 1);
        assert!(texts(&svg).iter().any(|t| t == "2015"));
    }

    #[test]
    fn label_counts() {
        assert_eq!(x_label_count(&(2006..2008)), 3);
        assert_eq!(x_label_count(&(1973..2023)), MAX_X_LABELS);
        assert_eq!(y_label_count(1.0), 2);
        assert_eq!(y_label_count(3.3), 4);
        assert_eq!(y_label_count(440.0), MAX_Y_LABELS);
    }
}

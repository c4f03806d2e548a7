use std::fmt::Write as _;

use fire_map_analytics_models::YearFireStats;

use crate::svg::format_number;

/// HTML table of yearly totals (`Année`, `Nombre`, `Surface`).
#[must_use]
pub fn render_evolution_table(evolution: &[YearFireStats]) -> String {
    let mut html = String::from(
        "<table class=\"evolution\"><thead><tr><th>Année</th><th>Nombre</th><th>Surface</th></tr></thead><tbody>",
    );
    for row in evolution {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            row.year,
            row.fire_count,
            format_number(row.burned_area_ha),
        );
    }
    html.push_str("</tbody></table>");
    html
}

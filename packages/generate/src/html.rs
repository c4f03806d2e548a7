//! The dashboard page.
//!
//! The widgets (year slider, metric radio, commune picker) live in a single
//! `GET` form. Changing any of them submits the form, so the page is
//! recomputed for the new selection; the query string carries `year`,
//! `metric` and `commune`.

use std::fmt::Write as _;

use fire_map_analytics::{DashboardConfig, DashboardView};
use fire_map_fire_models::FireMetric;

use crate::GenerateError;
use crate::choropleth::{ChoroplethOptions, render_choropleth};
use crate::line_chart::{LineChartOptions, render_line_chart};
use crate::svg::{escape, format_number};
use crate::table::render_evolution_table;

/// Page-level text and behaviour.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub title: String,
    pub credits: Vec<String>,
    /// Form target; `None` renders a static page with disabled widgets.
    pub form_action: Option<String>,
}

impl PageOptions {
    /// Options for a page served live at `/`.
    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            title: config.title.clone(),
            credits: config.credits.clone(),
            form_action: Some("/".to_string()),
        }
    }

    /// The same page without a form target, for files written to disk.
    #[must_use]
    pub fn into_static(self) -> Self {
        Self {
            form_action: None,
            ..self
        }
    }
}

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:0 auto;padding:1rem;color:#262730}\
h1{font-size:2rem}hr{margin:2rem 0;border:none;border-top:1px solid #ddd}\
label{display:block;margin:.75rem 0 .25rem}svg{max-width:100%;height:auto}\
table.evolution{border-collapse:collapse}table.evolution td,table.evolution th{border:1px solid #ddd;padding:.25rem .75rem;text-align:right}\
.summary{color:#555}.credits{color:#555;font-size:.9rem}";

/// Renders the whole page for `view`.
///
/// # Errors
///
/// Returns [`GenerateError::Chart`] if a line chart cannot be drawn.
pub fn render_dashboard(
    view: &DashboardView<'_>,
    options: &PageOptions,
) -> Result<String, GenerateError> {
    let selection = &view.selection;
    let disabled = if options.form_action.is_some() { "" } else { " disabled" };

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"fr\"><head><meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"><title>{title}</title><style>{STYLE}</style></head><body>",
        title = escape(&options.title),
    );

    let action = options.form_action.as_deref().unwrap_or("");
    let _ = write!(
        html,
        "<form method=\"get\" action=\"{}\"><h1>{}</h1><h2>Cartographie des incendies par communes.</h2>",
        escape(action),
        escape(&options.title),
    );

    // Map section
    let _ = write!(
        html,
        "<label for=\"year\">Sélectionnez l'année de l'analyse : <output>{year}</output></label>\
         <input type=\"range\" id=\"year\" name=\"year\" min=\"{min}\" max=\"{max}\" step=\"1\" value=\"{year}\" onchange=\"this.form.submit()\"{disabled}>",
        year = selection.year,
        min = view.years.min,
        max = view.years.max,
    );
    html.push_str(&render_choropleth(
        &view.features,
        &ChoroplethOptions::for_year(selection.year),
    ));

    let summary = &view.summary;
    let _ = write!(
        html,
        "<p class=\"summary\">{fires} feux sur {with}/{count} communes, {area} ha brûlés.",
        fires = summary.total_fires,
        with = summary.communes_with_fires,
        count = summary.commune_count,
        area = format_number(summary.total_burned_area_ha),
    );
    if let Some(most) = &summary.most_affected {
        let _ = write!(
            html,
            " Commune la plus touchée : {} ({} feux).",
            escape(&most.name),
            most.fire_count,
        );
    }
    html.push_str("</p><hr>");

    // Department section
    html.push_str(
        "<h1>Analyse de l'évolution des incendies sur l'ensemble du départements.</h1>\
         <fieldset><legend>Sélectionnez la métrique à visualiser :</legend>",
    );
    for metric in FireMetric::ALL {
        let checked = if *metric == selection.metric { " checked" } else { "" };
        let _ = write!(
            html,
            "<label><input type=\"radio\" name=\"metric\" value=\"{value}\" onchange=\"this.form.submit()\"{checked}{disabled}> {label}</label>",
            value = metric.as_ref(),
            label = escape(metric.label()),
        );
    }
    html.push_str("</fieldset>");
    html.push_str(&render_line_chart(
        std::slice::from_ref(&view.department_series),
        &LineChartOptions::department(selection.metric),
    )?);
    html.push_str(&render_evolution_table(&view.department_evolution));
    html.push_str("<hr>");

    // Commune section
    html.push_str(
        "<h2>Analyse d'évolution des incendies par communes spécifique</h2>\
         <label for=\"commune\">Selectionez une commune :</label>",
    );
    let _ = write!(
        html,
        "<select id=\"commune\" name=\"commune\" onchange=\"this.form.submit()\"{disabled}>"
    );
    for option in &view.communes {
        let selected = if selection.commune.as_ref() == Some(&option.code) {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            escape(option.code.as_str()),
            escape(&option.name),
        );
    }
    html.push_str("</select>");

    if let Some(commune) = &view.commune {
        html.push_str(&render_line_chart(
            &commune.series,
            &LineChartOptions::commune(&commune.commune.name),
        )?);
    } else {
        html.push_str("<p>Aucune commune disponible.</p>");
    }

    html.push_str("<noscript><button type=\"submit\">Afficher</button></noscript></form><hr><footer class=\"credits\">");
    for line in &options.credits {
        let _ = write!(html, "<p>{}</p>", escape(line));
    }
    html.push_str("</footer></body></html>");
    Ok(html)
}

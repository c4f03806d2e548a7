//! Interactive menu for the generate tool.
//!
//! Provides a terminal-based UI using `dialoguer` that lets users pick an
//! output and a selection without memorizing CLI flags.

use dialoguer::{Input, Select};
use fire_map_analytics::Dashboard;
use fire_map_fire_models::FireMetric;

use crate::GenerateError;
use crate::output_dir;
use crate::report::{summary_table, write_map_geojson, write_report};

/// Runs the interactive generation menu against a loaded dashboard.
///
/// # Errors
///
/// Returns [`GenerateError`] if user input or writing an output fails.
pub fn run(dashboard: &Dashboard) -> Result<(), GenerateError> {
    let choices = &[
        "Generate HTML report",
        "Export commune map (GeoJSON)",
        "Print yearly summary",
    ];

    let choice = Select::new()
        .with_prompt("What would you like to generate?")
        .items(choices)
        .default(0)
        .interact()?;

    if choice == 2 {
        print!("{}", summary_table(&dashboard.department_evolution()));
        return Ok(());
    }

    let years = dashboard.years();
    let year: i32 = Input::new()
        .with_prompt(format!("Year ({}-{})", years.min, years.max))
        .default(dashboard.default_year())
        .validate_with(|y: &i32| {
            if years.contains(*y) {
                Ok(())
            } else {
                Err(format!("must be between {} and {}", years.min, years.max))
            }
        })
        .interact_text()?;

    let dir = output_dir();

    if choice == 1 {
        return write_map_geojson(dashboard, year, &dir.join(format!("communes_{year}.geojson")));
    }

    let labels: Vec<&str> = FireMetric::ALL.iter().map(|m| m.label()).collect();
    let metric_index = Select::new()
        .with_prompt("Department metric")
        .items(&labels)
        .default(0)
        .interact()?;
    let metric = FireMetric::ALL[metric_index];

    let communes = dashboard.commune_options();
    let commune = if communes.is_empty() {
        None
    } else {
        let names: Vec<&str> = communes.iter().map(|c| c.name.as_str()).collect();
        let index = Select::new()
            .with_prompt("Commune")
            .items(&names)
            .default(0)
            .max_length(15)
            .interact()?;
        Some(communes[index].code.as_str().to_string())
    };

    let selection = dashboard.selection(Some(year), Some(metric), commune.as_deref());
    write_report(dashboard, &selection, &dir.join(format!("dashboard_{year}.html")))
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! CLI tool for writing the fire dashboard to disk.
//!
//! Renders the dashboard for one selection as a static HTML page, exports
//! the commune layer joined with a year's fire totals as `GeoJSON`, or
//! prints the yearly totals. Without a subcommand an interactive menu is
//! shown.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fire_map_fire_models::FireMetric;
use fire_map_generate::report::{summary_table, write_map_geojson, write_report};
use fire_map_generate::{interactive, load_dashboard, output_dir};

#[derive(Parser)]
#[command(name = "fire_map_generate", about = "Fire dashboard export tool")]
struct Cli {
    /// Configuration file (defaults to `FIRE_MAP_CONFIG`, then
    /// `fire_map.toml`, then the built-in configuration)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the dashboard as a static HTML page
    Report {
        /// Year shown on the map (defaults to the configured year)
        #[arg(long)]
        year: Option<i32>,
        /// Department chart metric (`fire_count` or `burned_area`)
        #[arg(long)]
        metric: Option<FireMetric>,
        /// INSEE code of the commune chart
        #[arg(long)]
        commune: Option<String>,
        /// Output file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Export the commune layer joined with a year's fire totals
    Geojson {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print fire count and burned area per year
    Summary,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = fire_map_cli_utils::init_logger();
    let cli = Cli::parse();

    let dashboard = load_dashboard(cli.config.as_deref(), &multi)?;

    match cli.command {
        None => interactive::run(&dashboard)?,
        Some(Commands::Report {
            year,
            metric,
            commune,
            output,
        }) => {
            let selection = dashboard.selection(year, metric, commune.as_deref());
            let path = output
                .unwrap_or_else(|| output_dir().join(format!("dashboard_{}.html", selection.year)));
            write_report(&dashboard, &selection, &path)?;
        }
        Some(Commands::Geojson { year, output }) => {
            let year = year.map_or_else(|| dashboard.default_year(), |y| dashboard.years().clamp(y));
            let path =
                output.unwrap_or_else(|| output_dir().join(format!("communes_{year}.geojson")));
            write_map_geojson(&dashboard, year, &path)?;
        }
        Some(Commands::Summary) => {
            print!("{}", summary_table(&dashboard.department_evolution()));
        }
    }

    Ok(())
}

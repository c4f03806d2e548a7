#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive CLI orchestrator for the fire map tools.
//!
//! Provides a unified entry point that lets users interactively start the
//! dashboard server, write static outputs, or print the yearly totals.
//!
//! Uses `indicatif-log-bridge` (via [`fire_map_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and progress bars never fight for the terminal.

use dialoguer::Select;
use fire_map_analytics::DashboardConfig;
use fire_map_generate::report::summary_table;

/// Top-level tool selection.
enum Tool {
    Server,
    Generate,
    Summary,
}

impl Tool {
    const ALL: &[Self] = &[Self::Server, Self::Generate, Self::Summary];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Server => "Start dashboard server",
            Self::Generate => "Generate report or map export",
            Self::Summary => "Print yearly fire summary",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = fire_map_cli_utils::init_logger();

    println!("Fire Map Toolchain");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Server => {
            let config = DashboardConfig::resolve(None)?;
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new().block_on(fire_map_server::interactive::run(config))
            })
            .await??;
        }
        Tool::Generate => {
            let dashboard = fire_map_generate::load_dashboard(None, &multi)?;
            fire_map_generate::interactive::run(&dashboard)?;
        }
        Tool::Summary => {
            let dashboard = fire_map_generate::load_dashboard(None, &multi)?;
            log::info!(
                "{} fire events, {} communes",
                dashboard.events().len(),
                dashboard.layer().len()
            );
            print!("{}", summary_table(&dashboard.department_evolution()));
        }
    }

    Ok(())
}

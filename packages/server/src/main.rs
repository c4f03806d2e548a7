#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the fire dashboard.

use std::path::PathBuf;

use clap::Parser;
use fire_map_analytics::DashboardConfig;

#[derive(Parser)]
#[command(name = "fire_map_server", about = "Fire dashboard web server")]
struct Cli {
    /// Configuration file (defaults to `FIRE_MAP_CONFIG`, then
    /// `fire_map.toml`, then the built-in configuration)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prompt for the bind address and port
    #[arg(short, long)]
    interactive: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let config = DashboardConfig::resolve(cli.config.as_deref()).map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        std::io::Error::other(e)
    })?;

    if cli.interactive {
        fire_map_server::interactive::run(config).await
    } else {
        fire_map_server::run_server(config).await
    }
}

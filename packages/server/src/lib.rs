#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the fire dashboard.
//!
//! Serves the dashboard page at `/` and a JSON API under `/api`. Both
//! datasets are loaded once at startup and shared read-only by every
//! worker; each request recomputes its aggregates from memory.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use fire_map_analytics::{Dashboard, DashboardConfig};
use fire_map_generate::html::PageOptions;
use fire_map_source::progress::NullProgress;

/// Shared application state.
pub struct AppState {
    /// Loaded boundary layer and fire log.
    pub dashboard: Arc<Dashboard>,
    /// Page title and credits.
    pub page: PageOptions,
}

impl AppState {
    #[must_use]
    pub fn new(dashboard: Dashboard) -> Self {
        let page = PageOptions::from_config(dashboard.config());
        Self {
            dashboard: Arc::new(dashboard),
            page,
        }
    }
}

/// Registers the page and API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::dashboard)).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/years", web::get().to(handlers::years))
            .route("/communes", web::get().to(handlers::communes))
            .route(
                "/communes/{code}/evolution",
                web::get().to(handlers::commune_evolution),
            )
            .route("/map", web::get().to(handlers::map))
            .route("/map/summary", web::get().to(handlers::map_summary))
            .route("/evolution", web::get().to(handlers::evolution)),
    );
}

/// Starts the fire dashboard server.
///
/// Loads the boundary layer and the fire log named in `config`, then
/// starts the Actix-Web HTTP server on `BIND_ADDR`:`PORT` (defaults
/// `127.0.0.1`:`8080`). This is a regular async function; the caller is
/// responsible for providing the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if a dataset cannot be loaded, or if
/// the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: DashboardConfig) -> std::io::Result<()> {
    log::info!("Loading datasets...");
    let dashboard = Dashboard::load(config, &NullProgress).map_err(|e| {
        log::error!("Failed to load datasets: {e}");
        std::io::Error::other(e)
    })?;

    let years = dashboard.years();
    log::info!(
        "Loaded {} fire events ({}-{}) and {} communes",
        dashboard.events().len(),
        years.min,
        years.max,
        dashboard.layer().len()
    );

    let state = web::Data::new(AppState::new(dashboard));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

//! HTTP handler functions for the fire dashboard.

use actix_web::{HttpResponse, web};
use fire_map_analytics::aggregate::{melt, metric_series};
use fire_map_fire_models::CommuneCode;
use fire_map_generate::html::render_dashboard;
use fire_map_generate::report::map_geojson;
use fire_map_server_models::{
    ApiCommune, ApiError, ApiHealth, ApiMapSummary, ApiSeries, ApiYearRange, ApiYearStats,
    DashboardQueryParams, EvolutionQueryParams, MapQueryParams,
};

use crate::AppState;

/// `GET /`
///
/// Renders the dashboard page for the selection in the query string.
pub async fn dashboard(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    let selection =
        state
            .dashboard
            .selection(params.year(), params.metric(), params.commune.as_deref());
    let view = state.dashboard.view(&selection);

    match render_dashboard(&view, &state.page) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(e) => {
            log::error!("Failed to render dashboard: {e}");
            HttpResponse::InternalServerError().json(ApiError::new(e.to_string()))
        }
    }
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        fire_events: state.dashboard.events().len(),
        communes: state.dashboard.layer().len(),
    })
}

/// `GET /api/years`
pub async fn years(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiYearRange::new(
        state.dashboard.years(),
        state.dashboard.default_year(),
    ))
}

/// `GET /api/communes`
///
/// Lists the commune picker entries, alphabetical by name.
pub async fn communes(state: web::Data<AppState>) -> HttpResponse {
    let communes: Vec<ApiCommune> = state
        .dashboard
        .commune_options()
        .into_iter()
        .map(|o| ApiCommune {
            code: o.code,
            name: o.name,
        })
        .collect();

    HttpResponse::Ok().json(communes)
}

/// `GET /api/map`
///
/// Returns the commune layer joined with the fire totals of the year as a
/// `GeoJSON` `FeatureCollection`.
pub async fn map(state: web::Data<AppState>, params: web::Query<MapQueryParams>) -> HttpResponse {
    let year = selected_year(&state, params.year());
    HttpResponse::Ok()
        .content_type("application/geo+json")
        .json(map_geojson(&state.dashboard, year))
}

/// `GET /api/map/summary`
pub async fn map_summary(
    state: web::Data<AppState>,
    params: web::Query<MapQueryParams>,
) -> HttpResponse {
    let year = selected_year(&state, params.year());
    let stats = state.dashboard.commune_map(year);

    HttpResponse::Ok().json(ApiMapSummary {
        year,
        summary: fire_map_analytics::aggregate::summary(&stats),
    })
}

/// `GET /api/evolution`
///
/// Returns the department series of the requested metric together with
/// the yearly table.
pub async fn evolution(
    state: web::Data<AppState>,
    params: web::Query<EvolutionQueryParams>,
) -> HttpResponse {
    let metric = params.metric().unwrap_or_default();
    let evolution = state.dashboard.department_evolution();

    HttpResponse::Ok().json(ApiSeries {
        title: None,
        series: vec![metric_series(&evolution, metric, metric.axis_title())],
        table: evolution.into_iter().map(ApiYearStats::from).collect(),
    })
}

/// `GET /api/communes/{code}/evolution`
///
/// Returns the fire count and burned area series of one commune.
pub async fn commune_evolution(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let raw = path.into_inner();

    let Ok(code) = CommuneCode::parse(&raw) else {
        return HttpResponse::BadRequest().json(ApiError::new(format!(
            "Invalid commune code '{raw}'"
        )));
    };

    let Some(boundary) = state.dashboard.layer().by_code(&code) else {
        return HttpResponse::NotFound().json(ApiError::new(format!("Unknown commune '{code}'")));
    };

    let evolution = state
        .dashboard
        .commune_evolution(&code)
        .unwrap_or_default();

    HttpResponse::Ok().json(ApiSeries {
        title: Some(format!(
            "Évolution des métriques des feux à {}",
            boundary.commune.name
        )),
        series: melt(&evolution).to_vec(),
        table: evolution.into_iter().map(ApiYearStats::from).collect(),
    })
}

fn selected_year(state: &AppState, year: Option<i32>) -> i32 {
    year.map_or_else(
        || state.dashboard.default_year(),
        |y| state.dashboard.years().clamp(y),
    )
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use fire_map_analytics::{Dashboard, DashboardConfig};
    use fire_map_fire_models::FireEvent;
    use fire_map_geography::{BoundaryLayer, CommuneBoundary};
    use fire_map_geography_models::Commune;
    use geo::{LineString, MultiPolygon, Polygon};
    use serde_json::Value;

    use super::*;

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

    fn event(year: i32, raw: &str, name: &str, area: f64) -> FireEvent {
        FireEvent {
            year,
            commune_code: Some(CommuneCode::parse(raw).unwrap()),
            commune_name: name.to_string(),
            burned_area_ha: Some(area),
            event_id: Some(format!("{year}-{raw}")),
        }
    }

    fn state() -> web::Data<AppState> {
        let dashboard = Dashboard::new(
            DashboardConfig::default(),
            BoundaryLayer::new(vec![
                boundary("04070", "Digne-les-Bains", 6.2),
                boundary("04112", "Manosque", 5.7),
            ]),
            vec![
                event(2007, "04070", "Digne-les-Bains", 1.0),
                event(2008, "04112", "Manosque", 2.5),
                event(2008, "04112", "Manosque", 4.0),
            ],
        )
        .unwrap();
        web::Data::new(AppState::new(dashboard))
    }

    async fn get_json(uri: &str) -> (u16, Value) {
        let app = test::init_service(App::new().app_data(state()).configure(crate::configure)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = resp.status().as_u16();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn years_endpoint() {
        let (status, body) = get_json("/api/years").await;
        assert_eq!(status, 200);
        assert_eq!(body["min"], 2007);
        assert_eq!(body["max"], 2008);
        assert_eq!(body["default"], 2008);
    }

    #[actix_web::test]
    async fn communes_are_alphabetical() {
        let (_, body) = get_json("/api/communes").await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Digne-les-Bains", "Manosque"]);
    }

    #[actix_web::test]
    async fn map_is_a_feature_collection() {
        let (status, body) = get_json("/api/map?year=2008").await;
        assert_eq!(status, 200);
        assert_eq!(body["type"], "FeatureCollection");
        assert_eq!(body["features"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn map_summary_clamps_year() {
        let (_, body) = get_json("/api/map/summary?year=1990").await;
        assert_eq!(body["year"], 2007);
        assert_eq!(body["totalFires"], 1);
    }

    #[actix_web::test]
    async fn department_evolution_by_metric() {
        let (_, body) = get_json("/api/evolution?metric=burned_area").await;
        assert_eq!(body["series"][0]["label"], "Surface brûlée (Ha)");
        assert_eq!(body["table"].as_array().unwrap().len(), 2);
        assert_eq!(body["table"][1]["burnedAreaHa"], 6.0);
    }

    #[actix_web::test]
    async fn commune_evolution_endpoint() {
        let (status, body) = get_json("/api/communes/4112/evolution").await;
        assert_eq!(status, 200);
        assert_eq!(body["title"], "Évolution des métriques des feux à Manosque");
        assert_eq!(body["series"][0]["label"], "Nombre_par_com");
        assert_eq!(body["series"][1]["label"], "Surface_par_com");

        let (status, body) = get_json("/api/communes/05061/evolution").await;
        assert_eq!(status, 404);
        assert!(body["error"].as_str().unwrap().contains("05061"));
    }

    #[actix_web::test]
    async fn dashboard_page_tolerates_bad_widget_values() {
        let app = test::init_service(App::new().app_data(state()).configure(crate::configure)).await;
        let req = test::TestRequest::get()
            .uri("/?year=abc&metric=volume&commune=nowhere")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Nombre de feux par commune en 2008"));
        assert!(html.contains(r#"<option value="04070" selected>"#));
    }
}

use std::fmt::Write as _;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use vital_shared::catalogue::Coordinates;
use vital_shared::{
    CategoryTone, CityId, DetailPanel, Metric, RankedBarChart, build_detail_panel,
    build_ranked_bar_chart, category_color,
};

use crate::state::{AppState, ObservabilitySnapshot};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";
const MAX_CITY_ID_LEN: usize = 64;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "cities": state.catalogue.len(),
        "sessions": state.sessions.len(),
        "observability": {
            "sessions_created_total": observability.sessions_created_total,
            "sessions_evicted_total": observability.sessions_evicted_total,
            "transitions_applied_total": observability.transitions_applied_total,
            "transitions_ignored_total": observability.transitions_ignored_total,
        }
    }))
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = render_prometheus_metrics(
        state.catalogue.len(),
        state.sessions.len(),
        state.observability.snapshot(),
    );

    (
        [
            (header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
}

fn render_prometheus_metrics(
    city_count: usize,
    session_count: usize,
    observability: ObservabilitySnapshot,
) -> String {
    let gauges = [
        ("vital_cities", "Number of cities in the catalogue.", city_count as u64),
        ("vital_sessions", "Number of live comparison sessions.", session_count as u64),
    ];
    let counters = [
        (
            "vital_sessions_created_total",
            "Total sessions created.",
            observability.sessions_created_total,
        ),
        (
            "vital_sessions_evicted_total",
            "Total sessions evicted for idleness or capacity.",
            observability.sessions_evicted_total,
        ),
        (
            "vital_transitions_applied_total",
            "Total selection transitions that changed session state.",
            observability.transitions_applied_total,
        ),
        (
            "vital_transitions_ignored_total",
            "Total selection transitions that left session state unchanged.",
            observability.transitions_ignored_total,
        ),
    ];

    let mut body = String::new();
    for (kind, metrics) in [("gauge", &gauges[..]), ("counter", &counters[..])] {
        for (name, help, value) in metrics {
            let _ = writeln!(body, "# HELP {name} {help}");
            let _ = writeln!(body, "# TYPE {name} {kind}");
            let _ = writeln!(body, "{name} {value}");
        }
    }
    body
}

/// Marker-level facts about one city, for list views.
#[derive(Debug, Clone, Serialize)]
pub struct CitySummary {
    pub id: CityId,
    pub coords: Coordinates,
    pub category: String,
    pub category_tone: CategoryTone,
    pub category_color: &'static str,
    pub primary_score: u8,
    pub vital: u8,
}

pub async fn list_cities(State(state): State<AppState>) -> Json<Vec<CitySummary>> {
    let cities = state
        .catalogue
        .iter()
        .map(|(id, record)| {
            let tone = category_color(&record.info.primary_category);
            CitySummary {
                id: id.clone(),
                coords: record.coords,
                category: record.info.primary_category.clone(),
                category_tone: tone,
                category_color: tone.hex(),
                primary_score: record.info.primary_score,
                vital: record.metrics.vital,
            }
        })
        .collect();
    Json(cities)
}

pub async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DetailPanel>, StatusCode> {
    let id = normalize_city_id(&id)?;
    build_detail_panel(id, &state.catalogue)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

#[derive(Debug, Deserialize)]
pub struct BarsQuery {
    pub metric: String,
    #[serde(default)]
    pub cities: String,
}

pub async fn ranked_bars(
    State(state): State<AppState>,
    Query(query): Query<BarsQuery>,
) -> Result<Json<RankedBarChart>, StatusCode> {
    let metric = Metric::from_code(&query.metric).ok_or(StatusCode::BAD_REQUEST)?;
    let cities = parse_city_list(&query.cities);
    Ok(Json(build_ranked_bar_chart(&cities, metric, &state.catalogue)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DarkModeBody {
    pub enabled: bool,
}

pub async fn get_dark_mode(State(state): State<AppState>) -> Json<DarkModeBody> {
    let enabled = state.dark_mode.read().await.is_enabled();
    Json(DarkModeBody { enabled })
}

pub async fn toggle_dark_mode(State(state): State<AppState>) -> Json<DarkModeBody> {
    let enabled = state.dark_mode.write().await.toggle();
    Json(DarkModeBody { enabled })
}

pub(crate) fn normalize_city_id(raw: &str) -> Result<&str, StatusCode> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_CITY_ID_LEN {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(trimmed)
}

/// Comma-separated ids, order kept, blanks dropped. Duplicates are kept as given.
fn parse_city_list(raw: &str) -> Vec<CityId> {
    raw.split(',')
        .filter_map(|part| normalize_city_id(part).ok())
        .map(CityId::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::{normalize_city_id, parse_city_list, render_prometheus_metrics};
    use crate::state::{ObservabilitySnapshot, test_state};

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[test]
    fn metrics_output_contains_prometheus_help_type_and_values() {
        let metrics = render_prometheus_metrics(
            10,
            3,
            ObservabilitySnapshot {
                sessions_created_total: 7,
                sessions_evicted_total: 2,
                transitions_applied_total: 40,
                transitions_ignored_total: 5,
            },
        );

        assert!(metrics.contains("# HELP vital_cities"));
        assert!(metrics.contains("# TYPE vital_sessions gauge"));
        assert!(metrics.contains("# TYPE vital_sessions_created_total counter"));
        assert!(metrics.contains("vital_cities 10"));
        assert!(metrics.contains("vital_sessions 3"));
        assert!(metrics.contains("vital_sessions_created_total 7"));
        assert!(metrics.contains("vital_sessions_evicted_total 2"));
        assert!(metrics.contains("vital_transitions_applied_total 40"));
        assert!(metrics.contains("vital_transitions_ignored_total 5"));
    }

    #[test]
    fn normalize_city_id_rejects_blank_and_oversized() {
        assert_eq!(normalize_city_id("  "), Err(StatusCode::BAD_REQUEST));
        assert_eq!(
            normalize_city_id(&"x".repeat(65)),
            Err(StatusCode::BAD_REQUEST)
        );
        assert_eq!(normalize_city_id(" São Paulo "), Ok("São Paulo"));
    }

    #[test]
    fn parse_city_list_keeps_order_and_drops_blanks() {
        let parsed = parse_city_list("Cairo, ,Athens,");
        let names: Vec<&str> = parsed.iter().map(|id| id.as_str()).collect();
        assert_eq!(names, ["Cairo", "Athens"]);
    }

    #[tokio::test]
    async fn lists_cities_in_catalogue_order() {
        let (state, _dir) = test_state();
        let (status, body) = get_json(crate::app::build_app(state), "/api/cities").await;
        assert_eq!(status, StatusCode::OK);
        let cities = body.as_array().expect("array");
        assert_eq!(cities.len(), 10);
        assert_eq!(cities[0]["id"], "Athens");
        assert_eq!(cities[0]["category_tone"], "green");
        assert_eq!(cities[9]["id"], "São Paulo");
    }

    #[tokio::test]
    async fn city_detail_and_not_found() {
        let (state, _dir) = test_state();
        let app = crate::app::build_app(state);

        let (status, body) = get_json(app.clone(), "/api/cities/New%20York").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["city"], "New York");
        assert_eq!(body["metrics"]["air_quality"], 93);

        let (status, _) = get_json(app, "/api/cities/Atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ranked_bars_endpoint_sorts_ascending() {
        let (state, _dir) = test_state();
        let app = crate::app::build_app(state);

        let (status, body) = get_json(app.clone(), "/api/bars?metric=PDS&cities=Athens,Cairo").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metric"], "PDS");
        assert_eq!(body["bars"][0]["city"], "Cairo");
        assert_eq!(body["bars"][0]["band"], "red");
        assert_eq!(body["bars"][1]["city"], "Athens");
        assert_eq!(body["bars"][1]["score"], 80);

        let (status, _) = get_json(app, "/api/bars?metric=ULS&cities=Athens").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn dark_mode_toggle_persists() {
        let (state, dir) = test_state();
        let app = crate::app::build_app(state);

        let (_, body) = get_json(app.clone(), "/api/settings/dark-mode").await;
        assert_eq!(body["enabled"], false);

        let response = app
            .oneshot(
                Request::post("/api/settings/dark-mode/toggle")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let saved = std::fs::read_to_string(dir.path().join("prefs.json")).expect("prefs file");
        assert!(saved.contains("\"darkMode\": \"1\""));
    }

    #[tokio::test]
    async fn health_reports_counts() {
        let (state, _dir) = test_state();
        state.create_session();
        let (status, body) = get_json(crate::app::build_app(state), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["cities"], 10);
        assert_eq!(body["sessions"], 1);
        assert_eq!(body["observability"]["sessions_created_total"], 1);
    }
}

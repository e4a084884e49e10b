use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::routes::{api, sessions};
use crate::state::AppState;

const IMMUTABLE: &str = "public, max-age=31536000, immutable";
const ONE_DAY: &str = "public, max-age=86400";

pub(crate) fn build_app(state: AppState) -> Router {
    let static_assets = Router::new()
        .fallback_service(ServeDir::new(&state.static_dir).precompressed_gzip())
        .layer(middleware::from_fn(set_static_cache_control));

    let reference = Router::new()
        .route("/api/health", get(api::health))
        .route("/api/metrics", get(api::metrics))
        .route("/api/cities", get(api::list_cities))
        .route("/api/cities/{id}", get(api::get_city))
        .route("/api/bars", get(api::ranked_bars))
        .route("/api/settings/dark-mode", get(api::get_dark_mode))
        .route(
            "/api/settings/dark-mode/toggle",
            post(api::toggle_dark_mode),
        );

    let session_routes = Router::new()
        .route("/api/sessions", post(sessions::create_session))
        .route(
            "/api/sessions/{sid}",
            get(sessions::get_session).delete(sessions::end_session),
        )
        .route(
            "/api/sessions/{sid}/detail",
            axum::routing::delete(sessions::close_detail),
        )
        .route("/api/sessions/{sid}/detail/{city}", put(sessions::view_detail))
        .route(
            "/api/sessions/{sid}/compare/{city}",
            put(sessions::add_to_comparison).delete(sessions::remove_from_comparison),
        )
        .route("/api/sessions/{sid}/clear", post(sessions::clear_all))
        .route(
            "/api/sessions/{sid}/advanced",
            post(sessions::toggle_advanced_mode),
        );

    reference
        .merge(session_routes)
        .layer(CompressionLayer::new())
        .fallback_service(static_assets)
        .with_state(state)
}

async fn set_static_cache_control(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    if response.status().is_success()
        && let Some(cache_control) = cache_control_for_path(&path)
    {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(cache_control),
        );
    }

    response
}

fn cache_control_for_path(path: &str) -> Option<&'static str> {
    let path = Path::new(path);
    let ext = path.extension().and_then(|ext| ext.to_str())?;
    match ext {
        "js" | "css" | "wasm" if has_content_hash(path) => Some(IMMUTABLE),
        "png" | "jpg" | "jpeg" | "svg" | "webp" | "woff2" => Some(ONE_DAY),
        _ => None,
    }
}

/// Bundlers stamp filenames with a hex digest segment, e.g. `index-3f9a1c0b.js`.
fn has_content_hash(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| {
            stem.split(['-', '_', '.'])
                .any(|part| part.len() >= 8 && part.chars().all(|c| c.is_ascii_hexdigit()))
        })
}

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use uuid::Uuid;
use vital_shared::{Action, CityId, Dashboard, SelectionState};

use crate::routes::api::normalize_city_id;
use crate::state::AppState;

/// Session id plus the dashboard rebuilt from its current selection.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session: Uuid,
    pub dashboard: Dashboard,
}

impl SessionView {
    fn build(state: &AppState, session: Uuid, selection: &SelectionState) -> Self {
        Self {
            session,
            dashboard: Dashboard::build(selection, &state.catalogue),
        }
    }
}

type SessionResult = Result<Json<SessionView>, StatusCode>;

pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionView>) {
    let (id, selection) = state.create_session();
    tracing::debug!(session = %id, "session created");
    (
        StatusCode::CREATED,
        Json(SessionView::build(&state, id, &selection)),
    )
}

pub async fn get_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> SessionResult {
    let selection = state.touch_session(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(SessionView::build(&state, id, &selection)))
}

pub async fn end_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    if state.end_session(&id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub async fn view_detail(
    State(state): State<AppState>,
    Path((id, city)): Path<(Uuid, String)>,
) -> SessionResult {
    let city = known_city(&state, &city)?;
    apply(&state, id, Action::ViewDetail(city))
}

pub async fn close_detail(State(state): State<AppState>, Path(id): Path<Uuid>) -> SessionResult {
    apply(&state, id, Action::CloseDetail)
}

/// Unknown cities are rejected here; duplicates and a full set are silently ignored by the core.
pub async fn add_to_comparison(
    State(state): State<AppState>,
    Path((id, city)): Path<(Uuid, String)>,
) -> SessionResult {
    let city = known_city(&state, &city)?;
    apply(&state, id, Action::AddToComparison(city))
}

pub async fn remove_from_comparison(
    State(state): State<AppState>,
    Path((id, city)): Path<(Uuid, String)>,
) -> SessionResult {
    let city = normalize_city_id(&city)?;
    apply(&state, id, Action::RemoveFromComparison(CityId::from(city)))
}

pub async fn clear_all(State(state): State<AppState>, Path(id): Path<Uuid>) -> SessionResult {
    apply(&state, id, Action::ClearAll)
}

pub async fn toggle_advanced_mode(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> SessionResult {
    apply(&state, id, Action::ToggleAdvancedMode)
}

fn known_city(state: &AppState, raw: &str) -> Result<CityId, StatusCode> {
    let city = normalize_city_id(raw)?;
    if state.catalogue.contains(city) {
        Ok(CityId::from(city))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

fn apply(state: &AppState, id: Uuid, action: Action) -> SessionResult {
    let selection = state.apply(&id, &action).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(SessionView::build(state, id, &selection)))
}

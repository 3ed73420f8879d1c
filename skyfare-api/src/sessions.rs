use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use skyfare_core::SearchParams;
use skyfare_offer::gateway::search_flights;
use skyfare_offer::{FilterState, ResultsView, SearchSession};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/sessions", post(create_session))
        .route("/v1/sessions/{id}", get(get_session))
        .route("/v1/sessions/{id}/search", post(search))
        .route("/v1/sessions/{id}/filters", put(set_filters).delete(reset_filters))
}

/// POST /v1/sessions
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = Uuid::new_v4();
    state
        .sessions
        .write()
        .await
        .insert(session_id, SearchSession::new(state.settings));
    info!("Created search session {}", session_id);
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// GET /v1/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResultsView>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get(&id).ok_or_else(AppError::session_not_found)?;
    Ok(Json(session.view()))
}

/// POST /v1/sessions/{id}/search
///
/// The store lock is released while the upstream search runs; a newer search
/// on the same session started meanwhile makes this response stale.
pub async fn search(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(params): Json<SearchParams>,
) -> Result<Json<ResultsView>, AppError> {
    params.validate()?;

    let ticket = {
        let mut sessions = state.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(AppError::session_not_found)?;
        session.begin_search(params.clone())
    };

    if let Some(ticket) = ticket {
        let outcome = search_flights(state.source.as_ref(), &params).await;

        let mut sessions = state.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(AppError::session_not_found)?;
        if !session.complete_search(ticket, outcome) {
            info!("Session {} moved on before search #{} returned", id, ticket.sequence);
        }
        return Ok(Json(session.view()));
    }

    let mut sessions = state.sessions.write().await;
    let session = sessions.get(&id).ok_or_else(AppError::session_not_found)?;
    Ok(Json(session.view()))
}

/// PUT /v1/sessions/{id}/filters
pub async fn set_filters(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(filters): Json<FilterState>,
) -> Result<Json<ResultsView>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(AppError::session_not_found)?;
    session.set_filters(filters)?;
    Ok(Json(session.view()))
}

/// DELETE /v1/sessions/{id}/filters
pub async fn reset_filters(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResultsView>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(AppError::session_not_found)?;
    session.reset_filters();
    Ok(Json(session.view()))
}

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use skyfare_offer::gateway::search_airports;
use skyfare_offer::AirportTypeahead;
use skyfare_shared::Airport;
use tracing::{debug, warn};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AirportQuery {
    #[serde(default)]
    pub q: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/airports", get(list_airports))
        .route("/v1/airports/popular", get(popular_airports))
        .route("/v1/airports/typeahead", get(typeahead))
}

/// GET /v1/airports?q=
/// Too-short queries answer with no suggestions and no upstream call.
pub async fn list_airports(
    State(state): State<AppState>,
    Query(query): Query<AirportQuery>,
) -> Json<Vec<Airport>> {
    let q = query.q.trim();
    if q.chars().count() < state.typeahead.min_chars {
        return Json(Vec::new());
    }
    Json(search_airports(state.source.as_ref(), q).await)
}

/// GET /v1/airports/popular
pub async fn popular_airports() -> Json<Vec<Airport>> {
    Json(skyfare_catalog::popular_airports())
}

/// GET /v1/airports/typeahead
/// WebSocket: each text frame is the current input; the server pushes
/// debounced suggestion snapshots back as JSON.
pub async fn typeahead(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_typeahead(socket, state))
}

async fn run_typeahead(mut socket: WebSocket, state: AppState) {
    let mut typeahead = AirportTypeahead::new(state.source.clone(), state.typeahead);
    let mut suggestions = typeahead.subscribe();

    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(text))) => typeahead.set_query(text.as_str()),
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("Typeahead socket error: {}", e);
                    break;
                }
            },
            changed = suggestions.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = suggestions.borrow_and_update().clone();
                let payload = match serde_json::to_string(&snapshot) {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!("Failed to encode suggestions: {}", e);
                        continue;
                    }
                };
                if socket.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
            }
        }
    }

    debug!("Typeahead socket closed");
}

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use skyfare_offer::gateway::get_offer;
use skyfare_offer::OfferDetail;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/offers/{id}", get(offer_detail))
}

/// GET /v1/offers/{id}
pub async fn offer_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OfferDetail>, AppError> {
    let offer = get_offer(state.source.as_ref(), &id)
        .await
        .ok_or_else(|| AppError::NotFoundError(format!("Offer {} not found", id)))?;
    Ok(Json(OfferDetail::from_offer(offer)))
}

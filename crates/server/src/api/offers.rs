//! Stored offer API handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use pricescout_core::{OfferStats, StoredOffer};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_list_limit")]
    pub limit: u32,
}

fn default_list_limit() -> u32 {
    50
}

#[derive(Debug, Serialize)]
pub struct OffersResponse {
    pub offers: Vec<StoredOffer>,
}

/// `GET /api/v1/offers` - most recently stored offers.
pub async fn list_offers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> axum::response::Response {
    match state.store().list_recent(params.limit.min(500)) {
        Ok(offers) => Json(OffersResponse { offers }).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(super::search::ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// `GET /api/v1/offers/stats` - aggregate store statistics.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> axum::response::Response {
    match state.store().stats() {
        Ok(stats) => Json::<OfferStats>(stats).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(super::search::ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

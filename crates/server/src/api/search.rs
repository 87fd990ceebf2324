//! Discovery API handler.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use pricescout_core::{
    Category, DiscoveryFailure, DiscoveryReport, NormalizedOffer, SearchRequest,
};

use crate::metrics::HTTP_REQUESTS_TOTAL;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    4
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub run_id: String,
    pub query: String,
    pub category: Category,
    /// Ranked cheapest offers. An empty array is a valid success.
    pub products: Vec<NormalizedOffer>,
    pub candidate_count: usize,
    pub parse_failures: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<DiscoveryFailure>,
    pub duration_ms: u64,
}

impl From<DiscoveryReport> for SearchResponse {
    fn from(report: DiscoveryReport) -> Self {
        Self {
            run_id: report.run_id,
            query: report.query,
            category: report.state.category,
            products: report.products,
            candidate_count: report.state.candidate_count,
            parse_failures: report.parse_failures,
            errors: report.state.errors,
            duration_ms: report.duration_ms,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&["/api/v1/search", status.as_str()])
        .inc();
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// `POST /api/v1/search` - find the top-K cheapest offers for a query.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchBody>,
) -> axum::response::Response {
    if body.query.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "query cannot be empty");
    }
    if body.limit == 0 {
        return error_response(StatusCode::BAD_REQUEST, "limit must be positive");
    }

    let Some(engine) = state.engine() else {
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "no candidate source configured",
        );
    };

    let request = SearchRequest {
        query: body.query.trim().to_string(),
        limit: body.limit,
    };
    let report = engine.run(&request).await;

    // Persistence is the one failure that escalates to the caller; the
    // discovery result itself is degraded-but-successful by design.
    if let Err(e) = state.store().save_batch(&report.query, &report.products) {
        error!(query = %report.query, error = %e, "Failed to persist offer batch");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to persist offers: {e}"),
        );
    }

    HTTP_REQUESTS_TOTAL
        .with_label_values(&["/api/v1/search", "200"])
        .inc();
    Json(SearchResponse::from(report)).into_response()
}

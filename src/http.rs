// Review Analyzer - HTTP surface
//
// GET  /        filtered, sentiment-sorted reviews
// POST /        submit a review (form encoded)
// GET  /health  liveness + store size

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{IngestError, QueryError};
use crate::ingest::{IngestionHandler, Submission};
use crate::locations::LocationRegistry;
use crate::query::{QueryEngine, ReviewFilter};
use crate::sentiment::SentimentScorer;
use crate::store::ReviewStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    queries: QueryEngine,
    ingestion: IngestionHandler,
    store: Arc<ReviewStore>,
}

impl AppState {
    pub fn new(
        store: Arc<ReviewStore>,
        registry: Arc<LocationRegistry>,
        scorer: Arc<dyn SentimentScorer>,
    ) -> Self {
        AppState {
            queries: QueryEngine::new(store.clone(), scorer),
            ingestion: IngestionHandler::new(store.clone(), registry),
            store,
        }
    }
}

/// Error body for requests that never reach the store
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        match self {
            IngestError::InvalidSubmission(echo) => {
                (StatusCode::BAD_REQUEST, Json(echo)).into_response()
            }
        }
    }
}

/// Decode a query string or form body, keeping the first non-empty value of
/// each key. Repeated keys are not an error.
fn first_values(raw: &[u8]) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(raw) {
        if value.is_empty() {
            continue;
        }
        values
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    values
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "reviews": state.store.len(),
    }))
}

/// GET / - reviews sorted by compound sentiment, most negative first
async fn list_reviews(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<impl IntoResponse, QueryError> {
    let mut params = first_values(raw.unwrap_or_default().as_bytes());
    let filter = ReviewFilter {
        location: params.remove("location"),
        start_date: params.remove("start_date"),
        end_date: params.remove("end_date"),
    };

    let reviews = state.queries.query(&filter).map_err(|e| {
        tracing::warn!(error = %e, "rejecting review query");
        e
    })?;

    Ok((StatusCode::OK, Json(reviews)))
}

/// POST / - validate and store a review
async fn submit_review(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, IngestError> {
    let mut fields = first_values(&body);
    let submission = Submission {
        location: fields.remove("Location"),
        body: fields.remove("ReviewBody"),
    };

    let review = state.ingestion.submit(submission)?;
    Ok((StatusCode::CREATED, Json(review)))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_reviews).post(submit_review))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

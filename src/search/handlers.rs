use super::engine::QueryEngine;
use super::types::{
    ENDPOINT_HEALTH, ENDPOINT_SEARCH, ENDPOINT_WORD, HealthResponse, SearchRequest,
};
use crate::error::StatsError;
use crate::stats::types::WordStatistics;

use axum::body::Bytes;
use axum::extract::{Extension, Path};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

/// Builds the HTTP router with the engine injected as an `Extension`.
pub fn routes(engine: Arc<QueryEngine>) -> Router {
    Router::new()
        .route(ENDPOINT_SEARCH, post(handle_search))
        .route(ENDPOINT_WORD, get(handle_get_word))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(engine))
}

/// `POST /search`
///
/// The body is decoded by hand rather than through the `Json` extractor so
/// that every malformed payload maps to the same 400 with a readable message.
pub async fn handle_search(
    Extension(engine): Extension<Arc<QueryEngine>>,
    body: Bytes,
) -> Response {
    let request: SearchRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!("Invalid request body: {}", e);
            return error_response(StatsError::Validation(format!(
                "Invalid request body: {}",
                e
            )));
        }
    };

    let result = engine
        .query_words(request.words)
        .await
        .and_then(|stats| serde_json::to_vec(&stats).map_err(StatsError::from));

    match result {
        Ok(json) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            json,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Search request failed: {}", e);
            error_response(e)
        }
    }
}

/// `GET /words/:word`
pub async fn handle_get_word(
    Extension(engine): Extension<Arc<QueryEngine>>,
    Path(word): Path<String>,
) -> Result<Json<WordStatistics>, (StatusCode, String)> {
    match engine.store().snapshot(&word) {
        Some(stats) => Ok(Json(stats)),
        None => {
            tracing::debug!("Word not tracked: {}", word);
            Err((
                StatusCode::NOT_FOUND,
                format!("Word '{}' has not been searched yet", word),
            ))
        }
    }
}

/// `GET /health`
pub async fn handle_health(
    Extension(engine): Extension<Arc<QueryEngine>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        words: engine.store().len(),
    })
}

fn error_response(error: StatsError) -> Response {
    (error.status_code(), error.to_string()).into_response()
}

//! Health check endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::state::AppState;

/// Reports database connectivity and migration progress.
pub async fn health(State(state): State<AppState>) -> Response {
    match state.db.migration_status().await {
        Ok((total, applied)) => Json(json!({
            "status": "OK",
            "message": "Database connected",
            "migrations": { "applied": applied, "total": total },
        }))
        .into_response(),
        Err(e) => {
            error!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Database connection failed" })),
            )
                .into_response()
        }
    }
}

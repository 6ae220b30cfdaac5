//! Error types for the REST API.
//!
//! Every failure leaves the server as `{"error": "<message>"}`.
//!
//! ```text
//! ValidationError / bad JSON / bad path ──► 400  message passed through
//! DbError::NotFound                     ──► 404  message passed through
//! anything else                         ──► 500  generic message, cause logged
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use tally_core::ValidationError;
use tally_db::DbError;

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request body failed validation before any write.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Body or path could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// Persistence failure. The cause is logged, never sent to the client.
    #[error("Database error: {0}")]
    Database(DbError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body.
    pub fn response_message(&self) -> String {
        match self {
            ApiError::Validation(err) => err.to_string(),
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg.clone(),
            ApiError::Database(_) => "Internal server error".to_string(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            err @ DbError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Database(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            let transient = matches!(&self, ApiError::Database(e) if e.is_transient());
            error!(error = %self, transient, "Request failed");
        }

        (status, Json(json!({ "error": self.response_message() }))).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

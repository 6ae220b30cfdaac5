//! Request extractors that reject with [`ApiError`] instead of axum's
//! plain-text rejections.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

/// JSON body extractor. Malformed JSON, a wrong content type or mistyped
/// fields become a 400 with an `{"error": ...}` body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

/// Parses a numeric `:id` path segment.
pub fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid id: {raw}")))
}

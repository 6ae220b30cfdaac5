//! HTTP handlers, one module per resource.
//!
//! ```text
//! GET  /api/health
//! GET  /api/cashiers          POST /api/cashiers
//! GET  /api/products          POST /api/products
//! GET  /api/customers
//! GET  /api/transactions      POST /api/transactions
//! GET  /api/transactions/{id}
//! ```

pub mod cashiers;
pub mod customers;
pub mod health;
pub mod products;
pub mod transactions;

use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::error::ApiError;

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    ApiError::NotFound("Not found".to_string())
}

/// 201 with a JSON body.
pub(crate) fn created<T: serde::Serialize>(body: T) -> impl IntoResponse {
    (StatusCode::CREATED, axum::Json(body))
}

//! Product endpoints: `GET` and `POST /api/products`.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

use tally_core::validation::validate_new_product;
use tally_core::{NewProductRequest, Product};

use super::created;
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.db.products().list().await?))
}

/// Requires `name`, `unit_price` and `code`.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewProductRequest>,
) -> ApiResult<impl IntoResponse> {
    let product = validate_new_product(req)?;
    let product = state.db.products().create(&product).await?;

    info!(product_id = product.id, code = %product.code, "Product created");
    Ok(created(product))
}

//! Cashier endpoints: `GET` and `POST /api/cashiers`.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use tracing::info;

use tally_core::validation::validate_new_cashier;
use tally_core::{Cashier, NewCashierRequest};

use super::created;
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Cashier>>> {
    Ok(Json(state.db.cashiers().list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewCashierRequest>,
) -> ApiResult<impl IntoResponse> {
    let cashier = validate_new_cashier(req)?;
    let cashier = state.db.cashiers().create(&cashier).await?;

    info!(cashier_id = cashier.id, "Cashier created");
    Ok(created(cashier))
}

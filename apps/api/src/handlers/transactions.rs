//! Transaction endpoints.
//!
//! `POST /api/transactions` validates the whole request before touching the
//! database, then hands a [`TransactionDraft`](tally_core::TransactionDraft)
//! to the repository, which writes it atomically.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use tracing::debug;

use tally_core::validation::validate_new_transaction;
use tally_core::{NewTransactionRequest, TransactionDetail, TransactionRecord};

use super::created;
use crate::error::{ApiError, ApiResult};
use crate::extract::{parse_id, ApiJson};
use crate::state::AppState;

/// Lists transactions, newest first.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<TransactionRecord>>> {
    Ok(Json(state.db.transactions().list().await?))
}

/// Returns `{transaction, items}` or 404.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TransactionDetail>> {
    let id = parse_id(&id)?;

    state
        .db
        .transactions()
        .get_detail(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Transaction not found".to_string()))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewTransactionRequest>,
) -> ApiResult<impl IntoResponse> {
    let draft = validate_new_transaction(req)?;
    debug!(
        sales_number = %draft.sales_number,
        lines = draft.lines.len(),
        walk_in = draft.customer_phone.is_none(),
        "Transaction request validated"
    );

    let detail = state.db.transactions().create(&draft).await?;
    Ok(created(detail))
}

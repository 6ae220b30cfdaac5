//! Customer listing.

use axum::extract::State;
use axum::Json;

use tally_core::Customer;

use crate::error::ApiResult;
use crate::state::AppState;

/// Customers are created by transactions, so there is no POST.
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Customer>>> {
    Ok(Json(state.db.customers().list().await?))
}

//! Customer route handlers. Read-only.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use storehaus_core::UserId;

use crate::db::CustomerRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::{CustomerDetail, CustomerSummary};
use crate::state::AppState;

/// Customers, newest first, with order counts.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_): RequireAdminAuth,
) -> Result<Json<Vec<CustomerSummary>>> {
    let customers = CustomerRepository::new(state.pool()).list().await?;
    Ok(Json(customers))
}

/// One customer with orders and addresses.
#[instrument(skip_all, fields(customer_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAdminAuth(_): RequireAdminAuth,
    Path(id): Path<UserId>,
) -> Result<Json<CustomerDetail>> {
    let customer = CustomerRepository::new(state.pool())
        .get_detail(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;
    Ok(Json(customer))
}

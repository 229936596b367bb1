//! Account route handlers.
//!
//! Every handler here is scoped to the logged-in user. Order detail first
//! looks up the order's owner so "no such order" (404) and "someone else's
//! order" (403) stay distinguishable, then loads the order filtered by both id
//! and owner.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use storehaus_core::{OrderId, UserId};

use crate::db::{AddressRepository, OrderRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{AccountStats, Address, Order};
use crate::state::AppState;

/// Decide whether `caller` may read an order whose owner lookup returned `owner`.
pub fn check_order_access(owner: Option<UserId>, caller: UserId) -> Result<()> {
    match owner {
        None => Err(AppError::NotFound("Order not found".to_string())),
        Some(owner) if owner != caller => {
            Err(AppError::Forbidden("You do not have access to this order".to_string()))
        }
        Some(_) => Ok(()),
    }
}

/// The caller's orders, newest first.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(orders))
}

/// One of the caller's orders.
#[instrument(skip_all, fields(user_id = %user.id, order_id = %id))]
pub async fn order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    let repo = OrderRepository::new(state.pool());

    let owner = repo.owner_of(id).await?;
    check_order_access(owner, user.id).inspect_err(|e| {
        if matches!(e, AppError::Forbidden(_)) {
            tracing::warn!("Order access denied");
        }
    })?;

    repo.get_for_owner(id, user.id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
}

/// Dashboard counters for the caller.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn stats(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<AccountStats>> {
    let item_counts = OrderRepository::new(state.pool())
        .item_counts_for_user(user.id)
        .await?;
    let address_count = AddressRepository::new(state.pool())
        .count_for_user(user.id)
        .await?;

    Ok(Json(AccountStats::tally(&item_counts, address_count)))
}

/// The caller's saved addresses.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn addresses(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<Address>>> {
    let addresses = AddressRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;
    Ok(Json(addresses))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::test_helpers::test_app;

    use super::*;

    #[test]
    fn test_missing_order_is_not_found() {
        let result = check_order_access(None, UserId::new(1));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_foreign_order_is_forbidden() {
        let result = check_order_access(Some(UserId::new(2)), UserId::new(1));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_own_order_is_allowed() {
        assert!(check_order_access(Some(UserId::new(1)), UserId::new(1)).is_ok());
    }

    #[tokio::test]
    async fn test_account_routes_require_auth() {
        let (app, _rx) = test_app();
        for uri in [
            "/api/account/orders",
            "/api/account/orders/1",
            "/api/account/stats",
            "/api/account/addresses",
        ] {
            let response = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }
}

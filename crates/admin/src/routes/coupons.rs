//! Coupon route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use storehaus_core::CouponId;

use crate::db::CouponRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::{Coupon, CreateCouponRequest, NewCoupon};
use crate::state::AppState;

/// All coupons, newest first.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_): RequireAdminAuth,
) -> Result<Json<Vec<Coupon>>> {
    let coupons = CouponRepository::new(state.pool()).list().await?;
    Ok(Json(coupons))
}

/// Create a coupon.
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    payload: std::result::Result<Json<CreateCouponRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Coupon>)> {
    let Json(request) = payload?;
    let coupon = NewCoupon::try_from(request)?;

    let created = CouponRepository::new(state.pool()).create(&coupon).await?;
    tracing::info!(coupon_id = %created.id, code = %created.code, "Coupon created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Deactivate a coupon. Coupons are never deleted.
#[instrument(skip_all, fields(admin_id = %admin.id, coupon_id = %id))]
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<CouponId>,
) -> Result<Json<Coupon>> {
    let coupon = CouponRepository::new(state.pool())
        .deactivate(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Coupon not found".to_string()))?;
    tracing::info!("Coupon deactivated");

    Ok(Json(coupon))
}

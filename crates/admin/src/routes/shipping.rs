//! Shipping route handlers.
//!
//! Handlers only see `dyn ShippingProvider`, so swapping the stub for a real
//! carrier client happens in `main.rs`.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use storehaus_core::OrderId;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::shipping::{Package, Shipment, ShippingAddress, ShippingRate};
use crate::state::AppState;

/// `POST /api/shipping/rates` body. `origin` defaults to the warehouse.
#[derive(Debug, Deserialize)]
pub struct RatesRequest {
    pub origin: Option<ShippingAddress>,
    pub destination: ShippingAddress,
    pub package: Package,
}

/// `POST /api/orders/{id}/shipment` body.
#[derive(Debug, Deserialize)]
pub struct ShipmentRequest {
    pub destination: ShippingAddress,
    pub package: Package,
}

/// Quote a parcel.
#[instrument(skip_all)]
pub async fn rates(
    State(state): State<AppState>,
    RequireAdminAuth(_): RequireAdminAuth,
    payload: std::result::Result<Json<RatesRequest>, JsonRejection>,
) -> Result<Json<Vec<ShippingRate>>> {
    let Json(request) = payload?;
    let origin = request
        .origin
        .unwrap_or_else(|| state.config().shipping.origin.clone());

    let rates = state
        .shipping()
        .get_rates(&origin, &request.destination, &request.package)
        .await?;
    Ok(Json(rates))
}

/// Create a shipment for a paid or preparing order and mark it shipped.
///
/// Orders in any other state, or already carrying a tracking number, get `409`
/// before the carrier is called.
#[instrument(skip_all, fields(admin_id = %admin.id, order_id = %id))]
pub async fn create_shipment(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<OrderId>,
    payload: std::result::Result<Json<ShipmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Shipment>)> {
    let Json(request) = payload?;
    request.package.validate()?;
    request.destination.validate()?;

    let orders = OrderRepository::new(state.pool());
    orders
        .shipment_state(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?
        .ensure_shippable()?;

    let shipment = state
        .shipping()
        .create_shipment(id, &request.destination, &request.package)
        .await?;
    orders.record_shipment(id, &shipment.tracking_number).await?;
    tracing::info!(tracking_number = %shipment.tracking_number, "Shipment created");

    Ok((StatusCode::CREATED, Json(shipment)))
}

//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness (main.rs)
//! GET  /health/ready                    - Readiness, checks the database (main.rs)
//!
//! # Auth
//! POST /auth/login                      - Log in (admin role only)
//! POST /auth/logout                     - Log out
//! GET  /auth/me                         - Current admin
//!
//! # Everything below requires an admin session
//! GET  /api/coupons                     - Coupons, newest first
//! POST /api/coupons                     - Create a coupon
//! POST /api/coupons/{id}/deactivate     - Deactivate a coupon
//!
//! GET  /api/campaigns                   - Campaigns with their coupon
//! POST /api/campaigns                   - Create a campaign
//! POST /api/campaigns/{id}/active       - Toggle a campaign
//!
//! GET  /api/customers                   - Customers with order counts
//! GET  /api/customers/{id}              - Customer with orders and addresses
//!
//! POST /api/shipping/rates              - Quote a parcel
//! POST /api/orders/{id}/shipment        - Buy a label for an order
//! ```

pub mod auth;
pub mod campaigns;
pub mod coupons;
pub mod customers;
pub mod shipping;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the marketing routes router (coupons and campaigns).
pub fn marketing_routes() -> Router<AppState> {
    Router::new()
        .route("/coupons", get(coupons::index).post(coupons::create))
        .route("/coupons/{id}/deactivate", post(coupons::deactivate))
        .route("/campaigns", get(campaigns::index).post(campaigns::create))
        .route("/campaigns/{id}/active", post(campaigns::set_active))
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::index))
        .route("/{id}", get(customers::show))
}

/// Create all routes for admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/api", marketing_routes())
        .nest("/api/customers", customer_routes())
        .route("/api/shipping/rates", post(shipping::rates))
        .route("/api/orders/{id}/shipment", post(shipping::create_shipment))
}

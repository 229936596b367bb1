//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness (main.rs)
//! GET  /health/ready             - Readiness, checks the database (main.rs)
//!
//! # Auth (login/register rate limited)
//! POST /api/auth/register        - Create an account and log in
//! POST /api/auth/login           - Log in
//! POST /api/auth/logout          - Log out
//! GET  /api/auth/me              - Current user
//!
//! # Region
//! GET  /api/region               - Current region/currency from the cookie
//! PUT  /api/region               - Switch region, sets the cookie
//!
//! # Catalog
//! GET  /api/products             - Products priced in the region's currency
//! GET  /api/products/{slug}      - Product detail with variants
//!
//! # Account (requires auth)
//! GET  /api/account/orders       - Caller's orders, newest first
//! GET  /api/account/orders/{id}  - One order (404 missing, 403 not the caller's)
//! GET  /api/account/stats        - Order/address/item counters
//! GET  /api/account/addresses    - Caller's addresses
//!
//! # Activity (rate limited)
//! POST /api/activity             - Queue an activity event, 202
//! ```

pub mod account;
pub mod activity;
pub mod auth;
pub mod products;
pub mod region;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{activity_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    let limited = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(auth_rate_limiter());

    Router::new()
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .merge(limited)
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(account::orders))
        .route("/orders/{id}", get(account::order))
        .route("/stats", get(account::stats))
        .route("/addresses", get(account::addresses))
}

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/account", account_routes())
        .nest("/api/products", product_routes())
        .route("/api/region", get(region::show).put(region::update))
        .route(
            "/api/activity",
            post(activity::ingest).layer(activity_rate_limiter()),
        )
}

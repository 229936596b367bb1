//! Shared fixtures for route tests.
//!
//! The pool connects lazily and sessions live in a `MemoryStore`, so only
//! paths that reject before touching the database can run here.

#![allow(clippy::unwrap_used)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
    routing::post,
};
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, Session};

use storehaus_core::{Email, UserId};

use crate::config::{AdminConfig, ShippingConfig};
use crate::middleware::{session::session_layer_with_store, set_current_admin};
use crate::models::CurrentAdmin;
use crate::shipping::{ShippingAddress, StubShippingProvider};
use crate::state::AppState;

/// Configuration with dummy values.
pub fn test_config() -> AdminConfig {
    AdminConfig {
        database_url: SecretString::from("postgres://localhost/storehaus_test"),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3001,
        base_url: "http://localhost:3001".to_string(),
        json_logs: false,
        shipping: ShippingConfig {
            api_key: None,
            origin: ShippingAddress {
                name: "Storehaus Fulfillment".to_string(),
                line1: "1 Warehouse-ro".to_string(),
                line2: None,
                city: "Seoul".to_string(),
                postal_code: "04524".to_string(),
                country_code: "KR".to_string(),
            },
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// State over a lazy pool and the stub carrier.
pub fn test_state() -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/storehaus_test")
        .unwrap();
    AppState::new(test_config(), pool, Arc::new(StubShippingProvider::new(None)))
}

/// Log the session in as a fixed admin (test-only route).
async fn test_login(session: Session) -> StatusCode {
    let admin = CurrentAdmin {
        id: UserId::new(1),
        email: Email::parse("ops@storehaus.test").unwrap(),
        name: Some("Ops".to_string()),
    };
    set_current_admin(&session, &admin).await.unwrap();
    StatusCode::NO_CONTENT
}

/// The full admin router plus a `/test/login` helper route.
pub fn test_app() -> Router {
    let state = test_state();
    let session_layer = session_layer_with_store(MemoryStore::default(), state.config());
    crate::routes::routes()
        .route("/test/login", post(test_login))
        .layer(session_layer)
        .with_state(state)
}

/// Log in through the helper route and return the session cookie pair.
pub async fn login_cookie(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(Request::post("/test/login").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_owned)
        .unwrap()
}

/// Read a JSON response body.
pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

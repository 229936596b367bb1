//! Shared fixtures for unit and route tests.
//!
//! Route tests run without a database: the pool connects lazily and sessions
//! live in a `MemoryStore`. Only handlers that never reach the pool can be
//! driven end to end here.

#![allow(clippy::unwrap_used)]

use std::net::{IpAddr, Ipv4Addr};

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::Path,
    http::{Request, StatusCode, header},
    response::Response,
    routing::post,
};
use secrecy::SecretString;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, Session};

use storehaus_core::{ActivityEvent, Email, UserId};

use crate::config::{SentryConfig, StorefrontConfig};
use crate::middleware::{session::session_layer_with_store, set_current_user};
use crate::models::CurrentUser;
use crate::services::ActivityLogger;
use crate::state::AppState;

/// Configuration with dummy values.
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("postgres://localhost/storehaus_test"),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        activity_queue_capacity: 16,
        json_logs: false,
        sentry: SentryConfig::default(),
    }
}

/// State over a lazy pool, with the activity queue exposed to the test.
pub fn test_state() -> (AppState, mpsc::Receiver<ActivityEvent>) {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/storehaus_test")
        .unwrap();
    let (activity, rx) = ActivityLogger::detached(16);
    (AppState::new(test_config(), pool, activity), rx)
}

/// Log the session in as `user_id` (test-only route).
async fn test_login(session: Session, Path(user_id): Path<i32>) -> StatusCode {
    let user = CurrentUser {
        id: UserId::new(user_id),
        email: Email::parse(&format!("user{user_id}@storehaus.test")).unwrap(),
    };
    set_current_user(&session, &user).await.unwrap();
    StatusCode::NO_CONTENT
}

/// The full storefront router plus a `/test/login/{id}` helper route.
pub fn test_app() -> (Router, mpsc::Receiver<ActivityEvent>) {
    let (state, rx) = test_state();
    let session_layer = session_layer_with_store(MemoryStore::default(), state.config());
    let app = crate::routes::routes()
        .route("/test/login/{user_id}", post(test_login))
        .layer(session_layer)
        .with_state(state);
    (app, rx)
}

/// Log in through the helper route and return the session cookie pair.
pub async fn login_cookie(app: &Router, user_id: i32) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::post(format!("/test/login/{user_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    set_cookie_pair(&response).unwrap()
}

/// `name=value` part of the first `Set-Cookie` header.
pub fn set_cookie_pair(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_owned)
}

/// Read a JSON response body.
pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

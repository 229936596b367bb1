//! Activity ingestion endpoint.
//!
//! Validates the event, attaches identity from the server side, queues it,
//! and answers `202` without waiting for the write.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;

use storehaus_core::{ActivityEvent, ActivityEventType, ProductId, UserId};

use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// Client-submitted activity event.
///
/// A `userId` field, if sent, is ignored: identity only comes from the session.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    pub event_type: Option<String>,
    pub product_id: Option<ProductId>,
    pub utm_source: Option<String>,
    pub metadata: Option<Value>,
    pub session_id: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl ActivityRequest {
    /// Validate and build the event to queue.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if `eventType` is missing or unknown.
    pub fn into_event(
        self,
        user_id: Option<UserId>,
        server_session_id: Option<String>,
    ) -> Result<ActivityEvent> {
        let raw = non_empty(self.event_type)
            .ok_or_else(|| AppError::BadRequest("eventType is required".to_string()))?;
        let event_type = raw
            .parse::<ActivityEventType>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let mut event = ActivityEvent::new(event_type)
            .with_user(user_id)
            .with_session(non_empty(self.session_id).or(server_session_id));
        event.product_id = self.product_id;
        event.utm_source = non_empty(self.utm_source);
        event.metadata = self.metadata.filter(|m| !m.is_null());
        Ok(event)
    }
}

/// Queue an activity event.
pub async fn ingest(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    payload: std::result::Result<Json<ActivityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>)> {
    let Json(request) = payload?;
    let event = request.into_event(
        user.map(|u| u.id),
        session.id().map(|id| id.to_string()),
    )?;

    state.activity().log(event);
    Ok((StatusCode::ACCEPTED, Json(json!({ "accepted": true }))))
}

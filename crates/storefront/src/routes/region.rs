//! Region selection.
//!
//! `GET` reports the region context derived from the cookie; `PUT` switches
//! region and returns the new context together with a fresh cookie.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use storehaus_core::{Region, RegionContext};

use crate::error::{AppError, Result};
use crate::middleware::{CookieRegionPersistence, RegionPreference};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateRegionRequest {
    pub region: String,
}

/// Current region context.
pub async fn show(RegionPreference(ctx): RegionPreference) -> Json<RegionContext> {
    Json(ctx)
}

/// Switch region and persist it in the region cookie.
pub async fn update(
    State(state): State<AppState>,
    RegionPreference(mut ctx): RegionPreference,
    payload: std::result::Result<Json<UpdateRegionRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload?;
    let region = request
        .region
        .parse::<Region>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut jar = CookieRegionPersistence::new(state.config().is_secure());
    ctx.set_region(region, &mut jar);
    tracing::debug!(%region, "Region updated");

    let mut response = Json(ctx).into_response();
    if let Some(cookie) = jar.into_header() {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    Ok(response)
}

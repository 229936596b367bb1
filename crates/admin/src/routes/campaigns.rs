//! Campaign route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use storehaus_core::CampaignId;

use crate::db::CampaignRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::models::{Campaign, CreateCampaignRequest, NewCampaign};
use crate::state::AppState;

/// `POST /api/campaigns/{id}/active` body.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

/// All campaigns, newest first, each with its coupon.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_): RequireAdminAuth,
) -> Result<Json<Vec<Campaign>>> {
    let campaigns = CampaignRepository::new(state.pool()).list().await?;
    Ok(Json(campaigns))
}

/// Create a campaign.
#[instrument(skip_all, fields(admin_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    payload: std::result::Result<Json<CreateCampaignRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Campaign>)> {
    let Json(request) = payload?;
    let campaign = NewCampaign::try_from(request)?;

    let created = CampaignRepository::new(state.pool())
        .create(&campaign)
        .await?;
    tracing::info!(campaign_id = %created.id, slug = %created.slug, "Campaign created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// Switch a campaign on or off. The attached coupon keeps its own flag.
#[instrument(skip_all, fields(admin_id = %admin.id, campaign_id = %id))]
pub async fn set_active(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<CampaignId>,
    payload: std::result::Result<Json<SetActiveRequest>, JsonRejection>,
) -> Result<Json<Campaign>> {
    let Json(SetActiveRequest { active }) = payload?;

    let campaign = CampaignRepository::new(state.pool())
        .set_active(id, active)
        .await?
        .ok_or_else(|| AppError::NotFound("Campaign not found".to_string()))?;
    tracing::info!(active, "Campaign toggled");

    Ok(Json(campaign))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{body::Body, http::Request};
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::test_helpers::{json_body, login_cookie, test_app};

    #[tokio::test]
    async fn test_list_requires_admin() {
        let response = test_app()
            .oneshot(Request::get("/api/campaigns").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_slug_is_rejected() {
        let app = test_app();
        let cookie = login_cookie(&app).await;
        let body = json!({ "title": "Spring Sale", "slug": "spring sale!" });

        let response = app
            .oneshot(
                Request::post("/api/campaigns")
                    .header("content-type", "application/json")
                    .header("cookie", cookie)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "slug must be 1-64 characters of a-z, 0-9 and '-'"
        );
    }

    #[tokio::test]
    async fn test_toggle_needs_active_flag() {
        let app = test_app();
        let cookie = login_cookie(&app).await;

        let response = app
            .oneshot(
                Request::post("/api/campaigns/3/active")
                    .header("content-type", "application/json")
                    .header("cookie", cookie)
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

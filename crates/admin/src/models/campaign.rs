//! Marketing campaigns.
//!
//! A campaign may point at one coupon. Its `is_active` flag is its own: turning
//! a campaign off leaves the coupon usable, and the other way round.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storehaus_core::{CampaignId, CouponId};

use super::Coupon;

const MAX_SLUG_LENGTH: usize = 64;

/// A campaign with its coupon attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: CampaignId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub coupon_id: Option<CouponId>,
    pub coupon: Option<Coupon>,
    pub created_at: DateTime<Utc>,
}

/// Why a campaign payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CampaignError {
    #[error("title is required")]
    EmptyTitle,
    #[error("slug must be 1-64 characters of a-z, 0-9 and '-'")]
    InvalidSlug,
    #[error("startsAt must be before endsAt")]
    InvalidWindow,
}

/// `POST /api/campaigns` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
    pub coupon_id: Option<CouponId>,
}

/// A validated campaign, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCampaign {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub coupon_id: Option<CouponId>,
}

/// Trim, lowercase and check a slug.
fn normalize_slug(raw: &str) -> Result<String, CampaignError> {
    let slug = raw.trim().to_ascii_lowercase();
    let valid = !slug.is_empty()
        && slug.len() <= MAX_SLUG_LENGTH
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(slug)
    } else {
        Err(CampaignError::InvalidSlug)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl TryFrom<CreateCampaignRequest> for NewCampaign {
    type Error = CampaignError;

    fn try_from(req: CreateCampaignRequest) -> Result<Self, Self::Error> {
        let title = req.title.trim().to_owned();
        if title.is_empty() {
            return Err(CampaignError::EmptyTitle);
        }
        let slug = normalize_slug(&req.slug)?;
        if let (Some(starts), Some(ends)) = (req.starts_at, req.ends_at)
            && starts >= ends
        {
            return Err(CampaignError::InvalidWindow);
        }

        Ok(Self {
            title,
            slug,
            description: non_empty(req.description),
            banner_url: non_empty(req.banner_url),
            starts_at: req.starts_at,
            ends_at: req.ends_at,
            is_active: req.is_active.unwrap_or(true),
            coupon_id: req.coupon_id,
        })
    }
}

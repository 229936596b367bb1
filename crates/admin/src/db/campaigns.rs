//! Campaign repository.
//!
//! Campaign rows are loaded first and their coupons fetched in one batch
//! afterwards, so lists never issue a query per campaign.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use storehaus_core::{CampaignId, CouponId};

use super::{CouponRepository, RepositoryError, map_insert_error};
use crate::models::{Campaign, Coupon, NewCampaign};

const CAMPAIGN_COLUMNS: &str = "id, title, slug, description, banner_url, starts_at, ends_at, \
     is_active, coupon_id, created_at";

#[derive(Debug, sqlx::FromRow)]
struct CampaignRow {
    id: CampaignId,
    title: String,
    slug: String,
    description: Option<String>,
    banner_url: Option<String>,
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
    is_active: bool,
    coupon_id: Option<CouponId>,
    created_at: DateTime<Utc>,
}

impl CampaignRow {
    fn with_coupon(self, coupon: Option<Coupon>) -> Campaign {
        Campaign {
            id: self.id,
            title: self.title,
            slug: self.slug,
            description: self.description,
            banner_url: self.banner_url,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            is_active: self.is_active,
            coupon_id: self.coupon_id,
            coupon,
            created_at: self.created_at,
        }
    }
}

/// Repository for campaigns.
pub struct CampaignRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CampaignRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All campaigns, newest first, coupons attached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self) -> Result<Vec<Campaign>, RepositoryError> {
        let rows = sqlx::query_as::<_, CampaignRow>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM shop.campaigns ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        self.attach_coupons(rows).await
    }

    /// Insert a campaign.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is taken and
    /// `RepositoryError::InvalidReference` if `coupon_id` names no coupon.
    pub async fn create(&self, campaign: &NewCampaign) -> Result<Campaign, RepositoryError> {
        let row = sqlx::query_as::<_, CampaignRow>(&format!(
            r"
            INSERT INTO shop.campaigns
                (title, slug, description, banner_url, starts_at, ends_at, is_active, coupon_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CAMPAIGN_COLUMNS}
            "
        ))
        .bind(&campaign.title)
        .bind(&campaign.slug)
        .bind(campaign.description.as_deref())
        .bind(campaign.banner_url.as_deref())
        .bind(campaign.starts_at)
        .bind(campaign.ends_at)
        .bind(campaign.is_active)
        .bind(campaign.coupon_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                &format!("campaign slug {} already exists", campaign.slug),
                "couponId does not match any coupon",
            )
        })?;

        self.single(row).await
    }

    /// Set a campaign's own active flag. Returns `None` if missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn set_active(
        &self,
        id: CampaignId,
        active: bool,
    ) -> Result<Option<Campaign>, RepositoryError> {
        let row = sqlx::query_as::<_, CampaignRow>(&format!(
            "UPDATE shop.campaigns SET is_active = $2 WHERE id = $1 RETURNING {CAMPAIGN_COLUMNS}"
        ))
        .bind(id)
        .bind(active)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.single(row).await?)),
            None => Ok(None),
        }
    }

    async fn single(&self, row: CampaignRow) -> Result<Campaign, RepositoryError> {
        self.attach_coupons(vec![row])
            .await?
            .pop()
            .ok_or(RepositoryError::NotFound)
    }

    async fn attach_coupons(
        &self,
        rows: Vec<CampaignRow>,
    ) -> Result<Vec<Campaign>, RepositoryError> {
        let mut ids: Vec<i32> = rows
            .iter()
            .filter_map(|r| r.coupon_id.map(|id| id.as_i32()))
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let coupons: HashMap<CouponId, Coupon> = CouponRepository::new(self.pool)
            .get_many(&ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let coupon = row.coupon_id.and_then(|id| coupons.get(&id).cloned());
                row.with_coupon(coupon)
            })
            .collect())
    }
}

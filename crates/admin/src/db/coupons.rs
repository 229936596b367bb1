//! Coupon repository.

use sqlx::PgPool;

use storehaus_core::CouponId;

use super::{RepositoryError, map_insert_error};
use crate::models::{Coupon, NewCoupon};

const COUPON_COLUMNS: &str = "id, code, discount_type, discount_value, starts_at, ends_at, \
     usage_limit, usage_count, is_active, user_id, created_at";

/// Repository for coupons.
pub struct CouponRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CouponRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All coupons, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Coupon>, RepositoryError> {
        let coupons = sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {COUPON_COLUMNS} FROM shop.coupons ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(coupons)
    }

    /// Coupons with the given ids, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(&self, ids: &[i32]) -> Result<Vec<Coupon>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let coupons = sqlx::query_as::<_, Coupon>(&format!(
            "SELECT {COUPON_COLUMNS} FROM shop.coupons WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(self.pool)
        .await?;
        Ok(coupons)
    }

    /// Insert a coupon.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code is taken and
    /// `RepositoryError::InvalidReference` if `user_id` names no user.
    pub async fn create(&self, coupon: &NewCoupon) -> Result<Coupon, RepositoryError> {
        sqlx::query_as::<_, Coupon>(&format!(
            r"
            INSERT INTO shop.coupons
                (code, discount_type, discount_value, starts_at, ends_at,
                 usage_limit, is_active, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COUPON_COLUMNS}
            "
        ))
        .bind(coupon.code.as_str())
        .bind(coupon.discount_type)
        .bind(coupon.discount_value)
        .bind(coupon.starts_at)
        .bind(coupon.ends_at)
        .bind(coupon.usage_limit)
        .bind(coupon.is_active)
        .bind(coupon.user_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            map_insert_error(
                e,
                &format!("coupon code {} already exists", coupon.code),
                "userId does not match any user",
            )
        })
    }

    /// Turn a coupon off. Returns the updated coupon, or `None` if missing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn deactivate(&self, id: CouponId) -> Result<Option<Coupon>, RepositoryError> {
        let coupon = sqlx::query_as::<_, Coupon>(&format!(
            "UPDATE shop.coupons SET is_active = false WHERE id = $1 RETURNING {COUPON_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(coupon)
    }
}

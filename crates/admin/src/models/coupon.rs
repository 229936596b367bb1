//! Coupons.
//!
//! Codes are stored uppercase. A coupon with no `user_id` is usable by anyone;
//! one with a `user_id` is reserved for that customer. Coupons are never
//! deleted, only deactivated.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storehaus_core::{CouponCode, CouponCodeError, CouponId, DiscountType, UserId};

/// Largest percentage a percentage coupon may take off.
const MAX_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

/// A stored coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
    pub usage_count: i32,
    pub is_active: bool,
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Why a coupon payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponError {
    #[error(transparent)]
    Code(#[from] CouponCodeError),
    #[error("discountValue must be greater than zero")]
    NonPositiveValue,
    #[error("percentage discounts cannot exceed 100")]
    PercentageTooLarge,
    #[error("startsAt must be before endsAt")]
    InvalidWindow,
    #[error("usageLimit must be greater than zero")]
    NonPositiveUsageLimit,
}

/// `POST /api/coupons` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponRequest {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
    pub is_active: Option<bool>,
    pub user_id: Option<UserId>,
}

/// A validated coupon, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCoupon {
    pub code: CouponCode,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub usage_limit: Option<i32>,
    pub is_active: bool,
    pub user_id: Option<UserId>,
}

impl TryFrom<CreateCouponRequest> for NewCoupon {
    type Error = CouponError;

    fn try_from(req: CreateCouponRequest) -> Result<Self, Self::Error> {
        let code = CouponCode::parse(&req.code)?;

        if req.discount_value <= Decimal::ZERO {
            return Err(CouponError::NonPositiveValue);
        }
        if req.discount_type == DiscountType::Percentage && req.discount_value > MAX_PERCENTAGE {
            return Err(CouponError::PercentageTooLarge);
        }
        if let (Some(starts), Some(ends)) = (req.starts_at, req.ends_at)
            && starts >= ends
        {
            return Err(CouponError::InvalidWindow);
        }
        if req.usage_limit.is_some_and(|limit| limit <= 0) {
            return Err(CouponError::NonPositiveUsageLimit);
        }

        Ok(Self {
            code,
            discount_type: req.discount_type,
            discount_value: req.discount_value,
            starts_at: req.starts_at,
            ends_at: req.ends_at,
            usage_limit: req.usage_limit,
            is_active: req.is_active.unwrap_or(true),
            user_id: req.user_id,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn request() -> CreateCouponRequest {
        CreateCouponRequest {
            code: " save10 ".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::new(10, 0),
            starts_at: None,
            ends_at: None,
            usage_limit: None,
            is_active: None,
            user_id: None,
        }
    }

    #[test]
    fn test_defaults_and_uppercase_code() {
        let coupon = NewCoupon::try_from(request()).unwrap();
        assert_eq!(coupon.code.as_str(), "SAVE10");
        assert!(coupon.is_active);
        assert_eq!(coupon.user_id, None);
    }

    #[test]
    fn test_rejects_bad_values() {
        let zero = CreateCouponRequest {
            discount_value: Decimal::ZERO,
            ..request()
        };
        assert_eq!(
            NewCoupon::try_from(zero).unwrap_err(),
            CouponError::NonPositiveValue
        );

        let too_much = CreateCouponRequest {
            discount_value: Decimal::new(150, 0),
            ..request()
        };
        assert_eq!(
            NewCoupon::try_from(too_much).unwrap_err(),
            CouponError::PercentageTooLarge
        );

        let no_limit = CreateCouponRequest {
            usage_limit: Some(0),
            ..request()
        };
        assert_eq!(
            NewCoupon::try_from(no_limit).unwrap_err(),
            CouponError::NonPositiveUsageLimit
        );
    }

    #[test]
    fn test_fixed_amount_may_exceed_hundred() {
        let fixed = CreateCouponRequest {
            discount_type: DiscountType::FixedAmount,
            discount_value: Decimal::new(5_000, 0),
            ..request()
        };
        assert!(NewCoupon::try_from(fixed).is_ok());
    }

    #[test]
    fn test_window_must_be_ordered() {
        let now = Utc::now();
        let backwards = CreateCouponRequest {
            starts_at: Some(now),
            ends_at: Some(now - Duration::days(1)),
            ..request()
        };
        assert_eq!(
            NewCoupon::try_from(backwards).unwrap_err(),
            CouponError::InvalidWindow
        );

        let open_ended = CreateCouponRequest {
            starts_at: Some(now),
            ..request()
        };
        assert!(NewCoupon::try_from(open_ended).is_ok());
    }

    #[test]
    fn test_invalid_code() {
        let spaced = CreateCouponRequest {
            code: "half off".to_string(),
            ..request()
        };
        assert!(matches!(
            NewCoupon::try_from(spaced).unwrap_err(),
            CouponError::Code(_)
        ));
    }

    #[test]
    fn test_request_json_shape() {
        let req: CreateCouponRequest = serde_json::from_str(
            r#"{"code":"welcome","discountType":"FIXED_AMOUNT","discountValue":"3000","userId":5}"#,
        )
        .unwrap();
        assert_eq!(req.discount_type, DiscountType::FixedAmount);
        assert_eq!(req.user_id, Some(UserId::new(5)));
    }
}

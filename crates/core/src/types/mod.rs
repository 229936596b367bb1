//! Core types for Storehaus.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod coupon_code;
pub mod email;
pub mod id;
pub mod price;
pub mod region;
pub mod status;

pub use coupon_code::{CouponCode, CouponCodeError};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use region::{
    Currency, REGION_COOKIE_MAX_AGE_DAYS, REGION_COOKIE_NAME, Region, RegionContext,
    RegionPersistence, UnknownRegion,
};
pub use status::*;

//! Storehaus Core - Shared domain types.
//!
//! This crate provides the types shared by every Storehaus component:
//! - `storefront` - Public JSON API (catalog, account, activity ingestion)
//! - `admin` - Back-office JSON API (coupons, campaigns, customers, shipping)
//! - `cli` - Migrations and bootstrap tooling
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no network, no database
//! access. The `postgres` feature adds `sqlx` encodings for ids and enums.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, region/currency, prices, statuses, emails, coupon codes
//! - [`wishlist`] - Client-persisted wishlist store
//! - [`activity`] - Activity events recorded by the storefront

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod activity;
pub mod types;
pub mod wishlist;

pub use activity::{ActivityEvent, ActivityEventType};
pub use types::*;
pub use wishlist::{PersistentWishlist, Wishlist, WishlistItem};

//! Domain models for the admin API.
//!
//! Request payloads that need validation turn into `New*` values here, so
//! handlers only ever hand checked data to the repositories.

pub mod admin;
pub mod campaign;
pub mod coupon;
pub mod customer;
pub mod session;

pub use admin::Admin;
pub use campaign::{Campaign, CampaignError, CreateCampaignRequest, NewCampaign};
pub use coupon::{Coupon, CouponError, CreateCouponRequest, NewCoupon};
pub use customer::{CustomerAddress, CustomerDetail, CustomerOrder, CustomerSummary};
pub use session::{CurrentAdmin, keys as session_keys};

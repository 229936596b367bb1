//! Storehaus admin library.
//!
//! Back-office API for coupons, campaigns, customers and shipping.
//!
//! # Security
//!
//! Every `/api` route requires an admin-role session. Deploy behind the
//! private network only; the storefront never links here.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod shipping;
pub mod state;

#[cfg(test)]
mod test_helpers;

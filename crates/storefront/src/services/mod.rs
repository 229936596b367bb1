//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Password registration and login
//! - `activity` - Fire-and-forget activity logging

pub mod activity;
pub mod auth;

pub use activity::{ActivityLogger, ActivitySink};
pub use auth::{AuthError, AuthService};

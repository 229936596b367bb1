//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Password login for users with the `admin` role

pub mod auth;

pub use auth::{AdminAuthError, AdminAuthService};

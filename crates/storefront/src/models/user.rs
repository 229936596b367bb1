//! User domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use storehaus_core::{Email, UserId, UserRole};

/// A storefront account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email, lowercased.
    pub email: Email,
    /// Display name.
    pub name: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

//! Back-office operator.

use chrono::{DateTime, Utc};
use serde::Serialize;

use storehaus_core::{Email, UserId};

/// A user with the `admin` role.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: UserId,
    pub email: Email,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

//! Activity events recorded for analytics and attribution.
//!
//! Only the event type is mandatory. Anonymous visitors are logged too; for
//! them the session id is the correlation key.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{ProductId, UserId};

/// Kind of user/session action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(
        type_name = "shop.activity_event_type",
        rename_all = "SCREAMING_SNAKE_CASE"
    )
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityEventType {
    PageView,
    ProductView,
    AddToCart,
    AddToWishlist,
    RemoveFromWishlist,
    CheckoutStart,
    Purchase,
    Search,
    SignUp,
    Login,
}

impl ActivityEventType {
    /// All event types.
    pub const ALL: [Self; 10] = [
        Self::PageView,
        Self::ProductView,
        Self::AddToCart,
        Self::AddToWishlist,
        Self::RemoveFromWishlist,
        Self::CheckoutStart,
        Self::Purchase,
        Self::Search,
        Self::SignUp,
        Self::Login,
    ];

    /// Wire token, e.g. `CHECKOUT_START`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PageView => "PAGE_VIEW",
            Self::ProductView => "PRODUCT_VIEW",
            Self::AddToCart => "ADD_TO_CART",
            Self::AddToWishlist => "ADD_TO_WISHLIST",
            Self::RemoveFromWishlist => "REMOVE_FROM_WISHLIST",
            Self::CheckoutStart => "CHECKOUT_START",
            Self::Purchase => "PURCHASE",
            Self::Search => "SEARCH",
            Self::SignUp => "SIGN_UP",
            Self::Login => "LOGIN",
        }
    }
}

impl fmt::Display for ActivityEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised event type token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type: {0}")]
pub struct UnknownEventType(pub String);

impl FromStr for ActivityEventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownEventType(s.to_owned()))
    }
}

/// An activity event awaiting persistence.
///
/// The creation timestamp is assigned by the store when the row is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    /// What happened.
    pub event_type: ActivityEventType,
    /// Authenticated user, if any.
    pub user_id: Option<UserId>,
    /// Session correlation key.
    pub session_id: Option<String>,
    /// Product the event concerns.
    pub product_id: Option<ProductId>,
    /// Attribution source (`utm_source`).
    pub utm_source: Option<String>,
    /// Free-form metadata.
    pub metadata: Option<serde_json::Value>,
}

impl ActivityEvent {
    /// Create an event with only its type set.
    #[must_use]
    pub const fn new(event_type: ActivityEventType) -> Self {
        Self {
            event_type,
            user_id: None,
            session_id: None,
            product_id: None,
            utm_source: None,
            metadata: None,
        }
    }

    /// Attach the authenticated user.
    #[must_use]
    pub fn with_user(mut self, user_id: Option<UserId>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Attach the session correlation key.
    #[must_use]
    pub fn with_session(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }

    /// Best available correlation key: the user if known, else the session.
    #[must_use]
    pub fn correlation_key(&self) -> Option<String> {
        self.user_id
            .map(|id| format!("user:{id}"))
            .or_else(|| self.session_id.as_ref().map(|s| format!("session:{s}")))
    }
}

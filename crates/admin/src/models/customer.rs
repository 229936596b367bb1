//! Customer views for the back office.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use storehaus_core::{AddressId, Currency, OrderId, OrderStatus, UserId};

/// A customer row in the list view.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub order_count: i64,
}

/// One of a customer's orders, with its summed item quantity.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrder {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub currency: Currency,
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub item_count: i64,
}

/// A customer's saved address.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAddress {
    pub id: AddressId,
    pub recipient: String,
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub region: Option<String>,
    pub postal_code: String,
    pub country_code: String,
    pub phone: Option<String>,
    pub is_default: bool,
}

/// `GET /api/customers/{id}` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetail {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub orders: Vec<CustomerOrder>,
    pub addresses: Vec<CustomerAddress>,
}

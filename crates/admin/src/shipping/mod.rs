//! Shipping rate quotes and label creation.
//!
//! Handlers only ever see `Arc<dyn ShippingProvider>`, so a real carrier
//! integration replaces [`StubShippingProvider`] in `main.rs` without touching
//! any call site.
//!
//! # Architecture
//!
//! - [`ShippingProvider`] is the capability: quote rates, create a shipment
//! - [`StubShippingProvider`] answers from fixed tables and never calls out

mod stub;

pub use stub::StubShippingProvider;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storehaus_core::{Currency, OrderId};

/// Errors that can occur when talking to a shipping provider.
#[derive(Debug, Error)]
pub enum ShippingError {
    /// The parcel description is unusable.
    #[error("Invalid package: {0}")]
    InvalidPackage(String),

    /// The address cannot be shipped to.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The provider rejected or failed the request.
    #[error("Provider error: {0}")]
    Provider(String),
}

/// A postal address on either end of a shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub name: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
}

impl ShippingAddress {
    /// Whether the address is inside Korea.
    #[must_use]
    pub fn is_domestic(&self) -> bool {
        self.country_code.trim().eq_ignore_ascii_case("KR")
    }

    /// Check the fields a carrier needs.
    ///
    /// # Errors
    ///
    /// Returns `ShippingError::InvalidAddress` naming the first bad field.
    pub fn validate(&self) -> Result<(), ShippingError> {
        let required = [
            ("name", &self.name),
            ("line1", &self.line1),
            ("city", &self.city),
            ("postalCode", &self.postal_code),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(ShippingError::InvalidAddress(format!("{field} is required")));
        }
        let country = self.country_code.trim();
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ShippingError::InvalidAddress(
                "countryCode must be a two-letter ISO code".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parcel dimensions and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub weight_grams: i32,
    pub length_cm: i32,
    pub width_cm: i32,
    pub height_cm: i32,
}

impl Package {
    /// Reject non-positive weight or dimensions.
    ///
    /// # Errors
    ///
    /// Returns `ShippingError::InvalidPackage` describing the bad field.
    pub fn validate(&self) -> Result<(), ShippingError> {
        if self.weight_grams <= 0 {
            return Err(ShippingError::InvalidPackage(
                "weightGrams must be positive".to_string(),
            ));
        }
        if self.length_cm <= 0 || self.width_cm <= 0 || self.height_cm <= 0 {
            return Err(ShippingError::InvalidPackage(
                "dimensions must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One quoted service level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRate {
    pub provider: String,
    pub service: String,
    pub price: Decimal,
    pub currency: Currency,
    pub estimated_days: u32,
}

/// A created shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub tracking_number: String,
    pub tracking_url: String,
    pub label_url: String,
}

/// A carrier integration.
#[async_trait]
pub trait ShippingProvider: Send + Sync {
    /// Quote every service level for a parcel.
    async fn get_rates(
        &self,
        origin: &ShippingAddress,
        destination: &ShippingAddress,
        package: &Package,
    ) -> Result<Vec<ShippingRate>, ShippingError>;

    /// Buy a label for an order's parcel.
    async fn create_shipment(
        &self,
        order_id: OrderId,
        destination: &ShippingAddress,
        package: &Package,
    ) -> Result<Shipment, ShippingError>;
}

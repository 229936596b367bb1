//! Catalog products as served to shoppers.
//!
//! Products carry both list prices; the `displayPrice` a shopper sees is
//! picked from them by the currency of the shopper's region.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use storehaus_core::{Currency, Price, ProductId, VariantId};

/// A catalog product with both list prices.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price_krw: Decimal,
    pub price_usd: Decimal,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// List price in `currency`.
    #[must_use]
    pub const fn price_in(&self, currency: Currency) -> Price {
        let amount = match currency {
            Currency::Krw => self.price_krw,
            Currency::Usd => self.price_usd,
        };
        Price::new(amount, currency)
    }
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: VariantId,
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub stock: i32,
}

/// Price in the shopper's display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPrice {
    pub amount: Decimal,
    pub currency: Currency,
    /// Rendered amount, e.g. `₩19,000`.
    pub formatted: String,
}

impl From<Price> for DisplayPrice {
    fn from(price: Price) -> Self {
        Self {
            amount: price.amount,
            currency: price.currency,
            formatted: price.display(),
        }
    }
}

/// A product with its price resolved for one shopper.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub display_price: DisplayPrice,
}

impl PricedProduct {
    #[must_use]
    pub fn new(product: Product, currency: Currency) -> Self {
        let display_price = product.price_in(currency).into();
        Self {
            product,
            display_price,
        }
    }
}

/// Product detail page payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: PricedProduct,
    pub variants: Vec<ProductVariant>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tee() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Linen Tee".to_string(),
            slug: "linen-tee".to_string(),
            description: None,
            price_krw: Decimal::new(19_000, 0),
            price_usd: Decimal::new(1499, 2),
            image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_price_follows_currency() {
        let product = tee();
        assert_eq!(product.price_in(Currency::Krw).amount, Decimal::new(19_000, 0));
        assert_eq!(product.price_in(Currency::Usd).amount, Decimal::new(1499, 2));
    }

    #[test]
    fn test_priced_product_json() {
        let priced = PricedProduct::new(tee(), Currency::Krw);
        let json = serde_json::to_value(&priced).unwrap();

        assert_eq!(json["slug"], "linen-tee");
        assert_eq!(json["displayPrice"]["currency"], "KRW");
        assert_eq!(json["displayPrice"]["formatted"], "₩19,000");
        assert!(json.get("priceUsd").is_some());
    }
}

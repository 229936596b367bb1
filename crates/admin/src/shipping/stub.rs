//! Simulated carrier.

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::instrument;

use storehaus_core::{Currency, OrderId};

use super::{Package, Shipment, ShippingAddress, ShippingError, ShippingProvider, ShippingRate};

const TRACKING_BASE_URL: &str = "https://shipping.storehaus.dev/track";
const LABEL_BASE_URL: &str = "https://shipping.storehaus.dev/labels";
const TRACKING_DIGITS: usize = 12;

/// Provider that quotes from fixed tables and fabricates tracking numbers.
///
/// Nothing here leaves the process. When no API key is configured shipments
/// are still created, with a warning, so fulfilment can be exercised end to
/// end in development.
pub struct StubShippingProvider {
    api_key: Option<SecretString>,
}

impl StubShippingProvider {
    #[must_use]
    pub const fn new(api_key: Option<SecretString>) -> Self {
        Self { api_key }
    }
}

fn rate(
    provider: &str,
    service: &str,
    price: Decimal,
    currency: Currency,
    days: u32,
) -> ShippingRate {
    ShippingRate {
        provider: provider.to_string(),
        service: service.to_string(),
        price,
        currency,
        estimated_days: days,
    }
}

/// `SH` followed by random digits.
fn tracking_number() -> String {
    let mut rng = rand::rng();
    let digits: String = (0..TRACKING_DIGITS)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect();
    format!("SH{digits}")
}

#[async_trait]
impl ShippingProvider for StubShippingProvider {
    #[instrument(skip_all, fields(destination = %destination.country_code))]
    async fn get_rates(
        &self,
        origin: &ShippingAddress,
        destination: &ShippingAddress,
        package: &Package,
    ) -> Result<Vec<ShippingRate>, ShippingError> {
        package.validate()?;
        origin.validate()?;
        destination.validate()?;

        let rates = if destination.is_domestic() {
            vec![
                rate("CJ Logistics", "Standard", Decimal::new(3_000, 0), Currency::Krw, 2),
                rate("Korea Post", "Registered", Decimal::new(2_500, 0), Currency::Krw, 3),
            ]
        } else {
            vec![
                rate("Korea Post", "EMS", Decimal::new(2_800, 2), Currency::Usd, 7),
                rate("DHL", "Express Worldwide", Decimal::new(4_500, 2), Currency::Usd, 3),
            ]
        };
        Ok(rates)
    }

    #[instrument(skip_all, fields(order_id = %order_id))]
    async fn create_shipment(
        &self,
        order_id: OrderId,
        destination: &ShippingAddress,
        package: &Package,
    ) -> Result<Shipment, ShippingError> {
        package.validate()?;
        destination.validate()?;

        if self.api_key.is_none() {
            tracing::warn!("SHIPPING_API_KEY not set, creating simulated shipment");
        }

        let tracking_number = tracking_number();
        tracing::info!(%tracking_number, "Shipment created");
        Ok(Shipment {
            tracking_url: format!("{TRACKING_BASE_URL}/{tracking_number}"),
            label_url: format!("{LABEL_BASE_URL}/{order_id}/{tracking_number}.pdf"),
            tracking_number,
        })
    }
}

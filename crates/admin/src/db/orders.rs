//! Order writes driven by fulfilment.

use sqlx::PgPool;

use storehaus_core::{OrderId, OrderStatus};

use super::RepositoryError;

/// Fulfilment fields of an order, read before a shipment is created.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShipmentState {
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
}

impl ShipmentState {
    /// Only paid or preparing orders without a tracking number can ship.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order is not awaiting shipment.
    pub fn ensure_shippable(&self) -> Result<(), RepositoryError> {
        if self.tracking_number.is_some() {
            return Err(RepositoryError::Conflict(
                "Order already has a shipment".to_string(),
            ));
        }
        match self.status {
            OrderStatus::Paid | OrderStatus::Preparing => Ok(()),
            _ => Err(RepositoryError::Conflict(
                "Order is not awaiting shipment".to_string(),
            )),
        }
    }
}

/// Repository for back-office order updates.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Status and tracking number of an order, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn shipment_state(
        &self,
        id: OrderId,
    ) -> Result<Option<ShipmentState>, RepositoryError> {
        let state = sqlx::query_as::<_, ShipmentState>(
            "SELECT status, tracking_number FROM shop.orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(state)
    }

    /// Store a tracking number and mark the order shipped.
    ///
    /// The update only applies while the order is still awaiting shipment, so
    /// a concurrent shipment or status change cannot be overwritten.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order is no longer shippable.
    pub async fn record_shipment(
        &self,
        id: OrderId,
        tracking_number: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE shop.orders
            SET tracking_number = $2, status = $3
            WHERE id = $1
              AND status IN ($4, $5)
              AND tracking_number IS NULL
            ",
        )
        .bind(id)
        .bind(tracking_number)
        .bind(OrderStatus::Shipped)
        .bind(OrderStatus::Paid)
        .bind(OrderStatus::Preparing)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Conflict(
                "Order is not awaiting shipment".to_string(),
            ));
        }
        Ok(())
    }
}

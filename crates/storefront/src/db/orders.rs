//! Order repository.
//!
//! Every read is scoped to an owner. `owner_of` is the only query that looks
//! at an order without an owner filter, and it returns nothing but the owner.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use storehaus_core::{Currency, OrderId, OrderItemId, OrderStatus, ProductId, UserId, VariantId};

use super::RepositoryError;
use crate::models::order::attach_items;
use crate::models::{Order, OrderItem, OrderItemProduct, OrderItemVariant};

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    status: OrderStatus,
    total_amount: Decimal,
    currency: Currency,
    tracking_number: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            status: row.status,
            total_amount: row.total_amount,
            currency: row.currency,
            tracking_number: row.tracking_number,
            created_at: row.created_at,
            items: Vec::new(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    order_id: OrderId,
    id: OrderItemId,
    quantity: i32,
    unit_price: Decimal,
    variant_id: VariantId,
    variant_name: String,
    sku: String,
    product_id: ProductId,
    product_name: String,
    slug: String,
    image_url: Option<String>,
}

impl OrderItemRow {
    fn into_item(self) -> (OrderId, OrderItem) {
        let item = OrderItem {
            id: self.id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            variant: OrderItemVariant {
                id: self.variant_id,
                name: self.variant_name,
                sku: self.sku,
                product: OrderItemProduct {
                    id: self.product_id,
                    name: self.product_name,
                    slug: self.slug,
                    image_url: self.image_url,
                },
            },
        };
        (self.order_id, item)
    }
}

/// Repository for ownership-scoped order reads.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Orders owned by `user_id`, newest first, with items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders: Vec<Order> = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, status, total_amount, currency, tracking_number, created_at
            FROM shop.orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

        let ids: Vec<i32> = orders.iter().map(|o| o.id.as_i32()).collect();
        let items = self.items_for(&ids).await?;

        Ok(attach_items(orders, items))
    }

    /// Owner of an order, or `None` if no such order exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn owner_of(&self, id: OrderId) -> Result<Option<UserId>, RepositoryError> {
        let owner =
            sqlx::query_scalar::<_, UserId>("SELECT user_id FROM shop.orders WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(owner)
    }

    /// Order `id` if it belongs to `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_for_owner(
        &self,
        id: OrderId,
        owner: UserId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, status, total_amount, currency, tracking_number, created_at
            FROM shop.orders
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self.items_for(&[id.as_i32()]).await?;
        Ok(attach_items(vec![Order::from(row)], items).into_iter().next())
    }

    /// Units per order for every order owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn item_counts_for_user(&self, user_id: UserId) -> Result<Vec<i64>, RepositoryError> {
        let counts = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COALESCE(SUM(oi.quantity), 0)::BIGINT
            FROM shop.orders o
            LEFT JOIN shop.order_items oi ON oi.order_id = o.id
            WHERE o.user_id = $1
            GROUP BY o.id
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(counts)
    }

    async fn items_for(
        &self,
        order_ids: &[i32],
    ) -> Result<Vec<(OrderId, OrderItem)>, RepositoryError> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT oi.order_id, oi.id, oi.quantity, oi.unit_price,
                   v.id AS variant_id, v.name AS variant_name, v.sku,
                   p.id AS product_id, p.name AS product_name, p.slug, p.image_url
            FROM shop.order_items oi
            JOIN shop.product_variants v ON v.id = oi.variant_id
            JOIN shop.products p ON p.id = v.product_id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.id
            ",
        )
        .bind(order_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderItemRow::into_item).collect())
    }
}

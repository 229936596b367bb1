//! Customer read views.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use storehaus_core::{UserId, UserRole};

use super::RepositoryError;
use crate::models::{CustomerAddress, CustomerDetail, CustomerOrder, CustomerSummary};

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: UserId,
    email: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
}

/// Repository for customer views.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Customers, newest first, each with their order count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<CustomerSummary>, RepositoryError> {
        let customers = sqlx::query_as::<_, CustomerSummary>(
            r"
            SELECT u.id, u.email, u.name, u.created_at, COUNT(o.id) AS order_count
            FROM shop.users u
            LEFT JOIN shop.orders o ON o.user_id = u.id
            WHERE u.role = $1
            GROUP BY u.id
            ORDER BY u.created_at DESC, u.id DESC
            ",
        )
        .bind(UserRole::Customer)
        .fetch_all(self.pool)
        .await?;
        Ok(customers)
    }

    /// One customer with orders (newest first) and addresses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_detail(&self, id: UserId) -> Result<Option<CustomerDetail>, RepositoryError> {
        let customer = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, email, name, created_at
            FROM shop.users
            WHERE id = $1 AND role = $2
            ",
        )
        .bind(id)
        .bind(UserRole::Customer)
        .fetch_optional(self.pool)
        .await?;

        let Some(customer) = customer else {
            return Ok(None);
        };

        let orders = sqlx::query_as::<_, CustomerOrder>(
            r"
            SELECT o.id, o.status, o.total_amount, o.currency, o.tracking_number, o.created_at,
                   COALESCE(SUM(oi.quantity), 0)::BIGINT AS item_count
            FROM shop.orders o
            LEFT JOIN shop.order_items oi ON oi.order_id = o.id
            WHERE o.user_id = $1
            GROUP BY o.id
            ORDER BY o.created_at DESC, o.id DESC
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        let addresses = sqlx::query_as::<_, CustomerAddress>(
            r"
            SELECT id, recipient, line1, line2, city, region, postal_code, country_code,
                   phone, is_default
            FROM shop.addresses
            WHERE user_id = $1
            ORDER BY is_default DESC, created_at DESC
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(CustomerDetail {
            id: customer.id,
            email: customer.email,
            name: customer.name,
            created_at: customer.created_at,
            orders,
            addresses,
        }))
    }
}

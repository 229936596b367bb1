//! Append-only activity log storage.

use sqlx::PgPool;

use storehaus_core::ActivityEvent;

use super::RepositoryError;
use crate::services::ActivitySink;

/// Writes activity events to `shop.activity_log`.
#[derive(Debug, Clone)]
pub struct PgActivitySink {
    pool: PgPool,
}

impl PgActivitySink {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ActivitySink for PgActivitySink {
    async fn record(&self, event: &ActivityEvent) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shop.activity_log
                (user_id, session_id, product_id, event_type, utm_source, metadata)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(event.user_id)
        .bind(event.session_id.as_deref())
        .bind(event.product_id)
        .bind(event.event_type)
        .bind(event.utm_source.as_deref())
        .bind(event.metadata.as_ref().map(sqlx::types::Json))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

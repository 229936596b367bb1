//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::shipping::ShippingProvider;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    shipping: Arc<dyn ShippingProvider>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool, shipping: Arc<dyn ShippingProvider>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                shipping,
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the configured shipping provider.
    #[must_use]
    pub fn shipping(&self) -> &dyn ShippingProvider {
        self.inner.shipping.as_ref()
    }
}

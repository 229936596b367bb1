//! Catalog repository.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{Product, ProductVariant};

/// Read-only access to products and their variants.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, slug, description, price_krw, price_usd, image_url, created_at
            FROM shop.products
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Product by slug with its variants.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<(Product, Vec<ProductVariant>)>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, name, slug, description, price_krw, price_usd, image_url, created_at
            FROM shop.products
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        let Some(product) = product else {
            return Ok(None);
        };

        let variants = sqlx::query_as::<_, ProductVariant>(
            r"
            SELECT id, product_id, name, sku, stock
            FROM shop.product_variants
            WHERE product_id = $1
            ORDER BY id
            ",
        )
        .bind(product.id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some((product, variants)))
    }
}

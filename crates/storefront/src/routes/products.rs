//! Catalog route handlers.
//!
//! Prices are resolved against the shopper's region cookie, so the same
//! product lists in won for `KR` and in dollars everywhere else.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RegionPreference;
use crate::models::{PricedProduct, ProductDetail};
use crate::state::AppState;

/// All products, newest first, priced for the shopper's region.
#[instrument(skip_all, fields(region = %ctx.region()))]
pub async fn index(
    State(state): State<AppState>,
    RegionPreference(ctx): RegionPreference,
) -> Result<Json<Vec<PricedProduct>>> {
    let currency = ctx.currency();
    let products = ProductRepository::new(state.pool())
        .list()
        .await?
        .into_iter()
        .map(|product| PricedProduct::new(product, currency))
        .collect();
    Ok(Json(products))
}

/// One product with its variants.
#[instrument(skip_all, fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    RegionPreference(ctx): RegionPreference,
    Path(slug): Path<String>,
) -> Result<Json<ProductDetail>> {
    let (product, variants) = ProductRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product not found: {slug}")))?;

    Ok(Json(ProductDetail {
        product: PricedProduct::new(product, ctx.currency()),
        variants,
    }))
}

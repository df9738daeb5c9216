//! Product browsing.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use cantina_core::{CategoryId, ProductId};

use crate::error::Result;
use crate::state::AppState;

/// Product list filter.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Category to filter by; absent means all.
    pub category: Option<CategoryId>,
}

/// List products, optionally filtered by category.
///
/// The backend exposes one flat product list; filtering happens here, as it
/// did in the original storefront.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse> {
    let mut products = state.catalog().get_products().await?;

    if let Some(category) = query.category {
        products.retain(|product| product.category_id == category);
    }

    Ok(Json(products))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let product = state.catalog().get_product(product_id).await?;

    Ok(Json(product))
}

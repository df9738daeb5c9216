//! Product management.
//!
//! The active flag travels through the backend's dedicated toggle endpoint,
//! never through the data payload. On update, the toggle is issued only when
//! the submitted flag actually differs from the product's current state.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use cantina_core::{CategoryId, ProductId};

use crate::api::types::ProductPayload;
use crate::error::{AdminError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Product form.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: u32,
    pub category_id: CategoryId,
    #[serde(default)]
    pub image_url: String,
    /// Desired active state; ignored on create (new products are active by
    /// default on the backend).
    pub active: Option<bool>,
}

impl ProductForm {
    fn to_payload(&self) -> Result<ProductPayload> {
        if self.name.trim().is_empty() {
            return Err(AdminError::BadRequest("name is required".to_string()));
        }
        if self.price < Decimal::ZERO {
            return Err(AdminError::BadRequest(
                "price cannot be negative".to_string(),
            ));
        }

        Ok(ProductPayload {
            nombre: self.name.clone(),
            descripcion: self.description.clone(),
            precio: self.price,
            stock: self.stock,
            categoria_id: self.category_id.as_i32(),
            url_imagen: self.image_url.clone(),
        })
    }
}

/// List all products.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse> {
    let products = state.backend().get_products().await?;

    Ok(Json(products))
}

/// Create a product.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(form): Json<ProductForm>,
) -> Result<impl IntoResponse> {
    let payload = form.to_payload()?;
    state.backend().create_product(&payload).await?;

    Ok(StatusCode::CREATED)
}

/// Update a product, toggling its active flag only if it changed.
#[instrument(skip(state, form), fields(product_id = %product_id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(product_id): Path<ProductId>,
    Json(form): Json<ProductForm>,
) -> Result<impl IntoResponse> {
    let payload = form.to_payload()?;

    // Current state first, so the toggle below is a real change, not a blind
    // flip.
    let products = state.backend().get_products().await?;
    let current = products
        .into_iter()
        .find(|product| product.id == product_id)
        .ok_or_else(|| AdminError::NotFound(format!("product {product_id}")))?;

    state.backend().update_product(product_id, &payload).await?;

    if let Some(active) = form.active
        && active != current.active
    {
        state.backend().toggle_product_status(product_id).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a product's active flag.
#[instrument(skip(state), fields(product_id = %product_id))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(product_id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    state.backend().toggle_product_status(product_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product.
#[instrument(skip(state), fields(product_id = %product_id))]
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(product_id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    state.backend().delete_product(product_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

//! Category management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use cantina_core::CategoryId;

use crate::api::types::CategoryPayload;
use crate::error::{AdminError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Category form: all fields required, as in the admin UI.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl CategoryForm {
    fn into_payload(self) -> Result<CategoryPayload> {
        if self.name.trim().is_empty()
            || self.description.trim().is_empty()
            || self.image_url.trim().is_empty()
        {
            return Err(AdminError::BadRequest(
                "name, description, and image URL are required".to_string(),
            ));
        }

        Ok(CategoryPayload {
            nombre: self.name,
            descripcion: self.description,
            url_imagen: self.image_url,
        })
    }
}

/// List all categories.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<impl IntoResponse> {
    let categories = state.backend().get_categories().await?;

    Ok(Json(categories))
}

/// Create a category.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(form): Json<CategoryForm>,
) -> Result<impl IntoResponse> {
    let payload = form.into_payload()?;
    state.backend().create_category(&payload).await?;

    Ok(StatusCode::CREATED)
}

/// Update a category.
#[instrument(skip(state, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(category_id): Path<CategoryId>,
    Json(form): Json<CategoryForm>,
) -> Result<impl IntoResponse> {
    let payload = form.into_payload()?;
    state.backend().update_category(category_id, &payload).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a category.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(category_id): Path<CategoryId>,
) -> Result<impl IntoResponse> {
    state.backend().delete_category(category_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

//! Category browsing.

use axum::{Json, extract::State, response::IntoResponse};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// List all categories (served from the 5-minute cache).
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let categories = state.catalog().get_categories().await?;

    Ok(Json(categories.as_ref().clone()))
}

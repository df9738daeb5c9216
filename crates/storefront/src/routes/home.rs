//! Storefront landing data.

use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use cantina_core::{Category, Product};

use crate::error::Result;
use crate::models::session::take_flash;
use crate::state::AppState;

/// Everything the landing page renders in one request.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    /// One-shot welcome message, if one was recorded.
    pub flash: Option<String>,
}

/// Landing page data: categories, products, and any pending flash.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let categories = state.catalog().get_categories().await?;
    let products = state.catalog().get_products().await?;
    let flash = take_flash(&session).await;

    Ok(Json(HomeResponse {
        categories: categories.as_ref().clone(),
        products,
        flash,
    }))
}

//! Cart route handlers.
//!
//! Every handler re-fetches the product list before touching the cart so
//! stock decisions are made against a live snapshot, then re-renders the
//! reconciled cart. The persisted cart is only rewritten through the
//! explicit add/set-quantity clamp paths; reconciliation itself never
//! mutates it.

use axum::{Json, extract::State, response::IntoResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use cantina_core::cart::{AddOutcome, Cart, SetQuantityOutcome};
use cantina_core::checkout::{order_total, shipping_cost};
use cantina_core::reconcile::{ReconciledLine, reconcile};
use cantina_core::{Product, ProductId};

use crate::cart_session::{clear_cart, load_cart, save_cart};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<ReconciledLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub item_count: u32,
}

impl CartView {
    /// Reconcile `cart` against a fresh product snapshot.
    #[must_use]
    pub fn build(cart: &Cart, products: &[Product]) -> Self {
        let subtotal = cart.subtotal();
        Self {
            items: reconcile(cart, products),
            subtotal,
            shipping: shipping_cost(),
            total: order_total(subtotal),
            item_count: cart.total_quantity(),
        }
    }
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Update quantity request.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove from cart request.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Response to a cart mutation: the outcome plus the re-rendered cart.
#[derive(Debug, Serialize)]
pub struct CartMutationResponse<O: Serialize> {
    #[serde(flatten)]
    pub outcome: O,
    pub cart: CartView,
}

/// Display the reconciled cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let products = state.catalog().get_products().await?;
    let cart = load_cart(&session).await;

    Ok(Json(CartView::build(&cart, &products)))
}

/// Add an item to the cart.
///
/// Quantity defaults to 1. A quantity exceeding the product's live stock is
/// clamped, and the clamp is reported in the outcome so the caller can tell
/// the user (it is not an error).
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<impl IntoResponse> {
    let quantity = request.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest("quantity must be positive".to_string()));
    }

    let products = state.catalog().get_products().await?;
    let product = products
        .iter()
        .find(|product| product.id == request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    if !product.active {
        return Err(AppError::BadRequest(format!(
            "product {} is not available",
            request.product_id
        )));
    }

    let mut cart = load_cart(&session).await;
    let outcome = cart.add(product, quantity);

    if !matches!(outcome, AddOutcome::OutOfStock) {
        save_cart(&session, &cart).await?;
    }

    Ok(Json(CartMutationResponse {
        outcome,
        cart: CartView::build(&cart, &products),
    }))
}

/// Set the quantity of a cart line.
///
/// A quantity of zero or less removes the line; a quantity above live stock
/// is clamped and reported.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> Result<impl IntoResponse> {
    let products = state.catalog().get_products().await?;
    let stock = products
        .iter()
        .find(|product| product.id == request.product_id)
        .map_or(0, |product| product.stock);

    let mut cart = load_cart(&session).await;
    let outcome = cart.set_quantity(request.product_id, request.quantity, stock);

    if !matches!(outcome, SetQuantityOutcome::Missing) {
        save_cart(&session, &cart).await?;
    }

    Ok(Json(CartMutationResponse {
        outcome,
        cart: CartView::build(&cart, &products),
    }))
}

/// Remove a line from the cart, regardless of quantity.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<impl IntoResponse> {
    let mut cart = load_cart(&session).await;

    if cart.remove(request.product_id) {
        save_cart(&session, &cart).await?;
    }

    let products = state.catalog().get_products().await?;
    Ok(Json(CartView::build(&cart, &products)))
}

/// Get the cart badge count.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<impl IntoResponse> {
    let cart = load_cart(&session).await;

    Ok(Json(serde_json::json!({ "count": cart.total_quantity() })))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<impl IntoResponse> {
    clear_cart(&session).await?;

    Ok(Json(serde_json::json!({ "count": 0 })))
}

//! Checkout orchestration.
//!
//! One handler, one submission, no partial commit: the control flow is
//! `idle -> submitting -> (success | failure)`. Validation happens before
//! any backend write; on any failure the cart is left byte-for-byte
//! untouched so the client can re-render the conflict and retry; on success
//! the cart is cleared in a single session write and a one-shot flash is
//! recorded for the page the client lands on next.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use cantina_core::checkout::order_total;
use cantina_core::reconcile::{StockViolation, first_violation};

use crate::api::types::{OrderCreate, OrderLineCreate};
use crate::cart_session::{clear_cart, load_cart};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::session;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// The flash recorded on success, shown once by the next page load.
const ORDER_PLACED_MESSAGE: &str = "Order placed successfully!";

/// Checkout request body.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub phone: String,
    pub address: String,
    pub payment_method: String,
    #[serde(default)]
    pub notes: String,
}

/// Body of the 409 returned when live stock no longer covers the cart.
#[derive(Debug, Serialize)]
struct StockConflictResponse {
    error: &'static str,
    violation: StockViolation,
    /// Re-reconciled cart so the client can show the conflict in place.
    cart: CartView,
}

/// Successful checkout response.
#[derive(Debug, Serialize)]
struct CheckoutResponse {
    order_placed: bool,
    /// Where the client should navigate next.
    redirect_to: &'static str,
}

/// Place the order built from the session cart.
///
/// Fail-fast: the first cart line whose product is missing, inactive, or
/// over live stock aborts the whole submission with 409 and no backend
/// write. Backend failure leaves the cart untouched for a retry.
#[instrument(skip(state, session, request), fields(user_id = %user.id))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CheckoutRequest>,
) -> Result<Response> {
    // Required fields first - nothing is fetched or mutated on a bad form.
    if request.phone.trim().is_empty()
        || request.address.trim().is_empty()
        || request.payment_method.trim().is_empty()
    {
        return Err(AppError::BadRequest(
            "phone, address, and payment method are required".to_string(),
        ));
    }

    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    // Live snapshot - checkout never trusts cached or denormalized stock.
    let products = state.catalog().get_products().await?;

    if let Some(violation) = first_violation(&cart, &products) {
        tracing::info!(?violation, "Checkout rejected by stock validation");
        return Ok((
            StatusCode::CONFLICT,
            Json(StockConflictResponse {
                error: "cart no longer matches available stock",
                violation,
                cart: CartView::build(&cart, &products),
            }),
        )
            .into_response());
    }

    let order = OrderCreate {
        total: order_total(cart.subtotal()),
        detalle_pedidos: cart
            .lines()
            .iter()
            .map(|line| OrderLineCreate {
                cantidad: line.quantity,
                subtotal: line.subtotal(),
                producto_id: line.product_id.as_i32(),
            })
            .collect(),
        telefono: request.phone,
        direccion: request.address,
        metodo_pago: request.payment_method,
        notas: request.notes,
        usuario_id: user.id.as_i32(),
    };

    // Single submission; an error here propagates with the cart intact.
    state.catalog().create_order(&order).await?;

    // Success: one write empties the cart, and the flash survives exactly
    // one more page load.
    clear_cart(&session).await?;
    if let Err(e) = session::set_flash(&session, ORDER_PLACED_MESSAGE).await {
        // The order exists either way; losing the flash is not worth a 500.
        tracing::warn!("Failed to record order-placed flash: {e}");
    }

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order_placed: true,
            redirect_to: "/orders",
        }),
    )
        .into_response())
}

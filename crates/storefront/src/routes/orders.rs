//! Customer order history.
//!
//! Orders are read straight from the backend on every request - nothing is
//! cached or stored locally. The detail view derives the shipping component
//! from the recorded total; an inconsistent total is clamped to the flat
//! charge and logged (the backend data is wrong, not the request).

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use cantina_core::checkout::derive_shipping;
use cantina_core::{Order, OrderId, OrderStatus};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::session::take_flash;
use crate::state::AppState;

/// Order list filter.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    /// Status to filter by; absent means all.
    pub status: Option<OrderStatus>,
}

/// One order in the history list.
#[derive(Debug, Serialize)]
pub struct OrderSummary {
    pub id: OrderId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub item_count: usize,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            total: order.total,
            status: order.status,
            placed_at: order.placed_at,
            item_count: order.lines.len(),
        }
    }
}

/// Order history response.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<OrderSummary>,
    /// One-shot message recorded by checkout, if any.
    pub flash: Option<String>,
}

/// Derived cost breakdown of an order.
#[derive(Debug, Serialize)]
pub struct OrderCosts {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Order detail response.
#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: Order,
    pub costs: OrderCosts,
}

/// Compute the displayed cost breakdown, flagging inconsistent totals.
fn order_costs(order: &Order) -> OrderCosts {
    let subtotal = order.subtotal();
    let breakdown = derive_shipping(order.total, subtotal);

    if breakdown.inconsistent {
        // Data-integrity smell: the stored total is smaller than the sum of
        // its own lines. Preserved display behavior, but never silent.
        tracing::warn!(
            order_id = %order.id,
            total = %order.total,
            subtotal = %subtotal,
            "Order total is less than the sum of its lines; showing flat shipping"
        );
    }

    OrderCosts {
        subtotal,
        shipping: breakdown.shipping,
        total: order.total,
    }
}

/// Fetch the session user's orders, newest first.
async fn fetch_orders(state: &AppState, user_id: cantina_core::UserId) -> Result<Vec<Order>> {
    let mut orders = state.catalog().get_orders_by_user(user_id).await?;
    orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
    Ok(orders)
}

/// List the session user's orders.
#[instrument(skip(state, session), fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Query(query): Query<OrderListQuery>,
) -> Result<impl IntoResponse> {
    let orders = fetch_orders(&state, user.id).await?;

    let orders = orders
        .iter()
        .filter(|order| query.status.is_none_or(|status| order.status == status))
        .map(OrderSummary::from)
        .collect();

    // Consume the checkout flash here: this is where the client lands after
    // placing an order.
    let flash = take_flash(&session).await;

    Ok(Json(OrderListResponse { orders, flash }))
}

/// Show one of the session user's orders with its cost breakdown.
#[instrument(skip(state), fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(order_id): Path<OrderId>,
) -> Result<impl IntoResponse> {
    let orders = fetch_orders(&state, user.id).await?;

    let order = orders
        .into_iter()
        .find(|order| order.id == order_id)
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;

    let costs = order_costs(&order);

    Ok(Json(OrderDetailResponse { order, costs }))
}

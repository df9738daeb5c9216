//! Order management.
//!
//! Status transitions are guarded locally before any backend call: final
//! states (`TERMINADO`, `CANCELADO`) cannot be left, and a transition to the
//! order's current status is rejected as a no-op. Cancellation goes through
//! the backend's dedicated cancel endpoint, not the generic status one.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use cantina_core::checkout::derive_shipping;
use cantina_core::{Order, OrderId, OrderStatus};

use crate::error::{AdminError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Order list filter.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    /// Status to filter by; absent means all.
    pub status: Option<OrderStatus>,
}

/// One order in the admin list.
#[derive(Debug, Serialize)]
pub struct OrderSummary {
    pub id: OrderId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub item_count: usize,
    pub customer_name: Option<String>,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            total: order.total,
            status: order.status,
            placed_at: order.placed_at,
            item_count: order.lines.len(),
            customer_name: order.customer.as_ref().map(|c| c.name.clone()),
        }
    }
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

/// Status transition request.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: OrderStatus,
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

/// Fetch all orders, newest first.
async fn fetch_orders(state: &AppState) -> Result<Vec<Order>> {
    let mut orders = state.backend().get_orders().await?;
    orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
    Ok(orders)
}

/// Find one order by id.
async fn fetch_order(state: &AppState, order_id: OrderId) -> Result<Order> {
    fetch_orders(state)
        .await?
        .into_iter()
        .find(|order| order.id == order_id)
        .ok_or_else(|| AdminError::NotFound(format!("order {order_id}")))
}

/// List every order, optionally filtered by status.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<OrderListQuery>,
) -> Result<impl IntoResponse> {
    let orders = fetch_orders(&state).await?;

    let orders: Vec<OrderSummary> = orders
        .iter()
        .filter(|order| query.status.is_none_or(|status| order.status == status))
        .map(OrderSummary::from)
        .collect();

    Ok(Json(orders))
}

/// Show one order with its cost breakdown.
#[instrument(skip(state), fields(order_id = %order_id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(order_id): Path<OrderId>,
) -> Result<impl IntoResponse> {
    let order = fetch_order(&state, order_id).await?;
    let costs = order_costs(&order);

    Ok(Json(OrderDetailResponse { order, costs }))
}

/// Transition an order to a new status.
///
/// Guards run before any backend I/O:
/// - an order in a final state cannot change again
/// - a transition to the current status is a rejected no-op
///
/// `CANCELADO` is routed through the dedicated cancel endpoint.
#[instrument(skip(state, form), fields(order_id = %order_id))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(order_id): Path<OrderId>,
    Json(form): Json<StatusForm>,
) -> Result<impl IntoResponse> {
    let order = fetch_order(&state, order_id).await?;

    if form.status == order.status {
        return Err(AdminError::Conflict(format!(
            "order {order_id} is already {}",
            order.status
        )));
    }

    if order.status.is_final() {
        return Err(AdminError::Conflict(format!(
            "order {order_id} is {} and cannot change status",
            order.status
        )));
    }

    if form.status == OrderStatus::Cancelled {
        state.backend().cancel_order(order_id).await?;
    } else {
        state
            .backend()
            .update_order_status(order_id, form.status)
            .await?;
    }

    Ok(StatusCode::NO_CONTENT)
}

//! HTTP route handlers for the admin panel.
//!
//! Every route except login requires an admin session.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Auth
//! POST /auth/login                 - Login (admin role required)
//! POST /auth/logout                - Clear the session
//! GET  /auth/me                    - Current admin identity
//!
//! # Categories
//! GET    /categories               - List
//! POST   /categories               - Create
//! PUT    /categories/{id}          - Update
//! DELETE /categories/{id}          - Delete
//!
//! # Products
//! GET    /products                 - List
//! POST   /products                 - Create (active by default)
//! PUT    /products/{id}            - Update (+ toggle if the flag changed)
//! POST   /products/{id}/toggle     - Toggle the active flag
//! DELETE /products/{id}            - Delete
//!
//! # Orders
//! GET  /orders                     - List all, ?status= filter
//! GET  /orders/{id}                - Detail with cost breakdown
//! POST /orders/{id}/status         - Status transition (guarded)
//! ```

pub mod auth;
pub mod categories;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route(
            "/{id}",
            put(categories::update).delete(categories::destroy),
        )
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/{id}", put(products::update).delete(products::destroy))
        .route("/{id}/toggle", post(products::toggle))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/status", post(orders::update_status))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/categories", category_routes())
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
}

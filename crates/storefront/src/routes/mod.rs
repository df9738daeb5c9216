//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing data (categories + products + flash)
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /categories             - Category list (cached)
//! GET  /products               - Product list (live), ?category= filter
//! GET  /products/{id}          - Product detail
//!
//! # Cart
//! GET  /cart                   - Reconciled cart view
//! POST /cart/add               - Add item (clamps to stock, reports outcome)
//! POST /cart/update            - Set line quantity (<= 0 removes)
//! POST /cart/remove            - Remove line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Cart badge count
//!
//! # Checkout
//! POST /checkout               - Validate against live stock and place order
//!
//! # Orders (requires auth)
//! GET  /orders                 - Own order history, ?status= filter
//! GET  /orders/{id}            - Order detail with cost breakdown
//!
//! # Auth
//! POST /auth/login             - Login via backend, store identity in session
//! POST /auth/register          - Signup via backend, log the session in
//! POST /auth/logout            - Clear the session identity
//! GET  /auth/me                - Current session identity
//! ```

pub mod auth;
pub mod cart;
pub mod categories;
pub mod checkout;
pub mod home;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing data
        .route("/", get(home::home))
        // Catalog
        .route("/categories", get(categories::index))
        .nest("/products", product_routes())
        // Cart
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", post(checkout::submit))
        // Order history
        .nest("/orders", order_routes())
        // Auth
        .nest("/auth", auth_routes())
}

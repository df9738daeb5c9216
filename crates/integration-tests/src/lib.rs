//! Integration tests for Cantina.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the upstream backend, then both services
//! cargo run -p cantina-storefront &
//! cargo run -p cantina-admin &
//!
//! # Run integration tests
//! cargo test -p cantina-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart_flow` - Cart mutations, reconciliation, and checkout
//! - `admin_catalog` - Category/product CRUD and order status transitions
//!
//! All tests are `#[ignore]`d by default because they need both services and
//! a reachable backend.

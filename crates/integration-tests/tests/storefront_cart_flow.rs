//! Integration tests for the storefront cart and checkout flow.
//!
//! These tests require:
//! - The upstream ordering backend running with seeded catalog data
//! - The storefront server running (cargo run -p cantina-storefront)
//!
//! Run with: cargo test -p cantina-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL for the storefront (configurable via environment).
fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A client with a cookie store, so the session (and with it the cart)
/// persists across requests like a browser tab.
fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Test helper: the id of some product with stock, from the live catalog.
async fn any_in_stock_product(client: &Client) -> Option<i64> {
    let base_url = storefront_base_url();
    let products: Vec<Value> = client
        .get(format!("{base_url}/products"))
        .send()
        .await
        .ok()?
        .json()
        .await
        .ok()?;

    products
        .iter()
        .find(|p| p["stock"].as_u64().unwrap_or(0) > 0 && p["active"] == json!(true))
        .and_then(|p| p["id"].as_i64())
}

// ============================================================================
// Cart Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and backend"]
async fn test_empty_cart_counts_zero() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/cart/count"))
        .send()
        .await
        .expect("Failed to get cart count");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse count");
    assert_eq!(body["count"], 0);
}

#[tokio::test]
#[ignore = "Requires running storefront server and backend"]
async fn test_add_then_clear_cart() {
    let client = session_client();
    let base_url = storefront_base_url();

    let product_id = any_in_stock_product(&client)
        .await
        .expect("Catalog has no in-stock product to test with");

    // Add one unit
    let resp = client
        .post(format!("{base_url}/cart/add"))
        .json(&json!({ "product_id": product_id, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse add response");
    assert_eq!(body["cart"]["item_count"], 1);

    // Clear and verify the badge is back to zero
    let resp = client
        .post(format!("{base_url}/cart/clear"))
        .send()
        .await
        .expect("Failed to clear cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/cart/count"))
        .send()
        .await
        .expect("Failed to get cart count");
    let body: Value = resp.json().await.expect("Failed to parse count");
    assert_eq!(body["count"], 0);
}

#[tokio::test]
#[ignore = "Requires running storefront server and backend"]
async fn test_add_beyond_stock_reports_clamp() {
    let client = session_client();
    let base_url = storefront_base_url();

    let product_id = any_in_stock_product(&client)
        .await
        .expect("Catalog has no in-stock product to test with");

    // Ask for far more than any seeded stock
    let resp = client
        .post(format!("{base_url}/cart/add"))
        .json(&json!({ "product_id": product_id, "quantity": 1_000_000 }))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse add response");
    assert_eq!(body["outcome"], "clamped");

    // The reconciled view must agree: the line sits exactly at stock.
    let item = &body["cart"]["items"][0];
    assert_eq!(item["quantity"], item["stock"]);
    assert_eq!(item["is_max_quantity"], json!(true));
    assert_eq!(item["over_stock"], json!(false));
}

// ============================================================================
// Checkout Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and backend"]
async fn test_checkout_requires_authentication() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/checkout"))
        .json(&json!({
            "phone": "555-0100",
            "address": "Av. Siempre Viva 742",
            "payment_method": "EFECTIVO"
        }))
        .send()
        .await
        .expect("Failed to post checkout");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running storefront server, backend, and a seeded user"]
async fn test_checkout_rejects_missing_fields() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({
            "email": std::env::var("TEST_USER_EMAIL").unwrap_or_default(),
            "password": std::env::var("TEST_USER_PASSWORD").unwrap_or_default(),
        }))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::OK);

    // Phone missing: rejected before any cart or backend access.
    let resp = client
        .post(format!("{base_url}/checkout"))
        .json(&json!({
            "phone": "",
            "address": "Av. Siempre Viva 742",
            "payment_method": "EFECTIVO"
        }))
        .send()
        .await
        .expect("Failed to post checkout");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

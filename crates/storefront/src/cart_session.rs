//! Session persistence for the cart.
//!
//! The whole cart lives under one session key as a JSON array of lines, and
//! every mutation is a read-modify-write of that one value - there are no
//! partial updates, so a mutation either lands completely or not at all.
//! Checkout success clears the key with a single write.
//!
//! A value that no longer deserializes (e.g. written by an older build) is
//! treated as absent: the key is cleared and the caller gets an empty cart.

use tower_sessions::Session;

use cantina_core::cart::Cart;

use crate::models::session_keys;

/// Load the session cart, treating corrupted data as absent.
pub async fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(Some(cart)) => cart,
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!("Discarding corrupted session cart: {e}");
            let _ = session
                .remove::<serde_json::Value>(session_keys::CART)
                .await;
            Cart::new()
        }
    }
}

/// Persist the whole cart in a single session write.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// Drop the cart entirely (checkout success or explicit clear).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_cart(session: &Session) -> Result<(), tower_sessions::session::Error> {
    // Removed as a raw value so even a corrupted cart can be cleared.
    session
        .remove::<serde_json::Value>(session_keys::CART)
        .await?;
    Ok(())
}

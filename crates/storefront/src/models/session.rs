//! Session-related types.
//!
//! The session is the storefront's only local persistence: it carries the
//! logged-in identity, the serialized cart, and a one-shot flash message.
//! Values that fail to deserialize are treated as absent and the offending
//! key is cleared, so a corrupted session always degrades to logged-out /
//! empty-cart rather than erroring.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use cantina_core::{Email, UserId, UserRole};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's backend ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
    /// Role as reported at login.
    pub role: UserRole,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the serialized cart (a JSON array of cart lines).
    pub const CART: &str = "cart";

    /// Key for the one-shot welcome/flash message.
    pub const WELCOME_MESSAGE: &str = "welcome_message";
}

/// Record a one-shot flash message (e.g. "order placed").
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_flash(
    session: &Session,
    message: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::WELCOME_MESSAGE, message).await
}

/// Consume the flash message: returns it and deletes the key, so it is shown
/// exactly once.
pub async fn take_flash(session: &Session) -> Option<String> {
    match session.remove::<String>(keys::WELCOME_MESSAGE).await {
        Ok(message) => message,
        Err(e) => {
            // Corrupted value: drop it and move on.
            tracing::warn!("Discarding unreadable flash message: {e}");
            let _ = session.remove::<serde_json::Value>(keys::WELCOME_MESSAGE).await;
            None
        }
    }
}

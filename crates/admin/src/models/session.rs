//! Session-related types.
//!
//! Only admins get a session here; the role check happens at login and again
//! on every request via the `RequireAdmin` extractor.

use serde::{Deserialize, Serialize};

use cantina_core::{Email, UserId};

/// Session-stored admin identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Admin's backend user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Admin's email address.
    pub email: Email,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}

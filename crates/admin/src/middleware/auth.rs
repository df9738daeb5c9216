//! Authentication middleware and extractors.
//!
//! Every admin route requires a logged-in admin. The role was checked at
//! login, but the extractor re-reads the session on every request so a
//! cleared or corrupted session immediately locks the panel.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

/// Extractor that requires an authenticated admin.
///
/// Rejects with 401 if the session has no (readable) admin.
pub struct RequireAdmin(pub CurrentAdmin);

/// Error returned when admin authentication is missing.
pub struct AdminRejection;

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

/// Read the current admin from the session.
///
/// A value that fails to deserialize is treated as absent and the key is
/// cleared, leaving the session in the logged-out state.
async fn current_admin(session: &Session) -> Option<CurrentAdmin> {
    match session
        .get::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await
    {
        Ok(admin) => admin,
        Err(e) => {
            tracing::warn!("Discarding corrupted session admin: {e}");
            let _ = session
                .remove::<serde_json::Value>(session_keys::CURRENT_ADMIN)
                .await;
            None
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts.extensions.get::<Session>().ok_or(AdminRejection)?;

        let admin = current_admin(session).await.ok_or(AdminRejection)?;

        Ok(Self(admin))
    }
}

/// Helper to set the current admin in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to clear the current admin from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<serde_json::Value>(session_keys::CURRENT_ADMIN)
        .await?;
    Ok(())
}

//! Admin authentication.
//!
//! Credentials go to the same backend login endpoint the storefront uses;
//! the difference is the role gate: non-admin accounts are rejected with 403
//! and never get a session.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use cantina_core::{Email, UserId};

use crate::api::types::LoginRequest;
use crate::error::{AdminError, Result};
use crate::middleware::{RequireAdmin, clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// The session identity as returned to the client.
#[derive(Debug, Serialize)]
pub struct SessionAdmin {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

impl From<CurrentAdmin> for SessionAdmin {
    fn from(admin: CurrentAdmin) -> Self {
        Self {
            id: admin.id,
            name: admin.name,
            email: admin.email,
        }
    }
}

/// Log in; only accounts with the admin role get a session.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<impl IntoResponse> {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Err(AdminError::BadRequest(
            "email and password are required".to_string(),
        ));
    }

    let user = state
        .backend()
        .login(&LoginRequest {
            email: form.email,
            password: form.password,
        })
        .await?;

    if !user.roles.is_admin() {
        return Err(AdminError::Forbidden(
            "this account has no admin access".to_string(),
        ));
    }

    let email = Email::parse(&user.email)
        .map_err(|e| AdminError::Internal(format!("backend returned invalid email: {e}")))?;

    let admin = CurrentAdmin {
        id: UserId::new(user.id),
        name: user.name,
        email,
    };
    set_current_admin(&session, &admin).await?;

    Ok(Json(SessionAdmin::from(admin)))
}

/// Log out: clear the session identity.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    clear_current_admin(&session).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// The current admin identity.
#[instrument(skip(admin))]
pub async fn me(RequireAdmin(admin): RequireAdmin) -> impl IntoResponse {
    Json(SessionAdmin::from(admin))
}

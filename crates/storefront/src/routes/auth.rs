//! Authentication route handlers.
//!
//! Credentials are verified by the backend's user endpoints; these handlers
//! only proxy them and keep the resulting identity in the session.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use cantina_core::{Email, UserId, UserRole};

use crate::api::types::{ApiUser, LoginRequest, RegisterRequest};
use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup form.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// The session identity as returned to the client.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
}

impl From<CurrentUser> for SessionUser {
    fn from(user: CurrentUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Build the session identity from the backend's user payload.
fn current_user_from_api(user: ApiUser) -> Result<CurrentUser> {
    let email = Email::parse(&user.email)
        .map_err(|e| AppError::Internal(format!("backend returned invalid email: {e}")))?;

    Ok(CurrentUser {
        id: UserId::new(user.id),
        name: user.name,
        email,
        role: user.roles,
    })
}

/// Log in against the backend and store the identity in the session.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<impl IntoResponse> {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Err(AppError::BadRequest(
            "email and password are required".to_string(),
        ));
    }

    let api_user = state
        .catalog()
        .login(&LoginRequest {
            email: form.email,
            password: form.password,
        })
        .await?;

    let user = current_user_from_api(api_user)?;
    set_current_user(&session, &user).await?;

    Ok(Json(SessionUser::from(user)))
}

/// Register a new account and log it in.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterForm>,
) -> Result<impl IntoResponse> {
    if form.name.trim().is_empty()
        || form.lastname.trim().is_empty()
        || form.username.trim().is_empty()
        || form.password.is_empty()
    {
        return Err(AppError::BadRequest("all fields are required".to_string()));
    }

    // Reject obviously malformed emails before the round trip; everything
    // else (uniqueness, password policy) is the backend's call.
    Email::parse(&form.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let api_user = state
        .catalog()
        .register(&RegisterRequest {
            name: form.name,
            lastname: form.lastname,
            username: form.username,
            email: form.email,
            password: form.password,
        })
        .await?;

    let user = current_user_from_api(api_user)?;
    set_current_user(&session, &user).await?;

    Ok((StatusCode::CREATED, Json(SessionUser::from(user))))
}

/// Log out: clear the session identity.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    clear_current_user(&session).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// The current session identity, if any.
///
/// Lets the client render its header without guessing at session state.
#[instrument(skip(auth))]
pub async fn me(auth: OptionalAuth) -> impl IntoResponse {
    let OptionalAuth(user) = auth;

    Json(serde_json::json!({
        "user": user.map(SessionUser::from),
    }))
}

//! # Auth Routes
//!
//! Registration, login, logout.
//!
//! Login failure is deliberately uniform: an unknown email and a wrong
//! password produce byte-identical responses, so the endpoint cannot be
//! used to enumerate accounts.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::{self, Session};
use crate::error::ApiError;
use crate::state::AppState;
use storefront_core::validation::{validate_credentials, validate_registration};
use storefront_core::Role;

/// The one login failure message. Shared by the unknown-email and
/// wrong-password paths - never tell a caller which half was wrong.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// POST /register - Create a user account.
///
/// The password is stored only as an argon2 hash. Role is always
/// `client`; admin accounts are provisioned out of band (see the `seed`
/// binary). Duplicate username/email surfaces as 409 from the storage
/// constraint.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = validate_registration(&payload)?;

    let password_hash = auth::hash_password(&draft.password)?;

    let user = state
        .db
        .users()
        .insert(&draft.username, &draft.email, &password_hash, Role::Client)
        .await?;

    info!(user_id = %user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "user": user,
        })),
    ))
}

/// POST /login - Verify credentials and issue a session token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = validate_credentials(&payload)?;

    let user = state.db.users().get_by_email(&credentials.email).await?;

    let user = match user {
        Some(user) if auth::verify_password(&credentials.password, &user.password_hash) => user,
        _ => {
            warn!("Login failed");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    let session = state.db.sessions().create(user.id).await?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(json!({
        "message": "Logged in successfully",
        "token": session.token,
    })))
}

/// POST /logout - Revoke the current session.
///
/// Requires a live session (anonymous callers get 401); revocation itself
/// is idempotent at the repository level.
async fn logout(
    session: Session,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.sessions().revoke(&session.token).await?;

    info!(user_id = %session.identity.user_id, "User logged out");

    Ok(Json(json!({ "message": "Logged out successfully" })))
}

//! # Authentication & Authorization
//!
//! Password hashing, bearer-token parsing, and the request extractors that
//! gate protected routes.
//!
//! ## Gate Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Request → Handler pipeline                              │
//! │                                                                         │
//! │  Authorization: Bearer <token>                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Session extractor ── no/unknown token ──► 401                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AdminSession extractor ── role != admin ──► 403                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Body deserialization (Json) ── malformed ──► 400                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Handler (existence 404, field validation 400, ...)                    │
//! │                                                                         │
//! │  The extractors run first, so a non-admin with a garbage body          │
//! │  still gets 403 - the ordering is a contract, not an accident.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;
use storefront_core::Identity;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password for storage.
///
/// Argon2 with a per-password random salt; the returned string embeds the
/// salt and parameters, so [`verify_password`] needs nothing else.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify a password against its stored hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Bearer Token
// =============================================================================

/// Extract bearer token from an authorization header value.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

// =============================================================================
// Extractors
// =============================================================================

/// An authenticated session: the resolved identity plus the token it came
/// from (kept so logout can revoke it).
///
/// Rejects with 401 when the request carries no token or the token does
/// not resolve - anonymous requests never reach a protected handler.
#[derive(Debug, Clone)]
pub struct Session {
    pub identity: Identity,
    pub token: String,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_bearer_token)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

        let identity = state
            .db
            .sessions()
            .resolve(token)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid or expired session"))?;

        Ok(Session {
            identity,
            token: token.to_string(),
        })
    }
}

/// An authenticated session whose identity holds the admin role.
///
/// Layered on [`Session`]: anonymous → 401, authenticated non-admin → 403.
/// Applied to product create, update, and delete.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Identity);

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;

        if !session.identity.is_admin() {
            return Err(ApiError::forbidden("Admin privileges required"));
        }

        Ok(AdminSession(session.identity))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Session Repository
//!
//! Server-side session store: issue, resolve, revoke.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Lifecycle                                 │
//! │                                                                         │
//! │  POST /login (credentials verified)                                    │
//! │       └── create(user_id) → token (opaque UUID v4)                     │
//! │                                                                         │
//! │  Any protected request                                                 │
//! │       └── resolve(token) → Identity | None (anonymous)                 │
//! │                                                                         │
//! │  POST /logout                                                          │
//! │       └── revoke(token) → row deleted; idempotent                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the auth routes write session state; everything else resolves
//! read-only. The token is the entire client-side state - there is no
//! ambient "current user".

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use storefront_core::Identity;

/// A stored session row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRecord {
    /// Opaque bearer token.
    pub token: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Repository for session database operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Creates a new SessionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SessionRepository { pool }
    }

    /// Issues a new session for a user.
    pub async fn create(&self, user_id: i64) -> DbResult<SessionRecord> {
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, created_at)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&token)
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(user_id = %user_id, "Session created");

        Ok(SessionRecord {
            token,
            user_id,
            created_at: now,
        })
    }

    /// Resolves a token to the identity it is bound to.
    ///
    /// ## Returns
    /// `None` for unknown or revoked tokens - the caller is anonymous.
    pub async fn resolve(&self, token: &str) -> DbResult<Option<Identity>> {
        let identity = sqlx::query_as::<_, Identity>(
            r#"
            SELECT u.id AS user_id, u.username, u.role
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = ?1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(identity)
    }

    /// Revokes a session.
    ///
    /// Idempotent: revoking an unknown or already-revoked token succeeds.
    pub async fn revoke(&self, token: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        debug!(revoked = result.rows_affected(), "Session revoked");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

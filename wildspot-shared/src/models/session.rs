/// Session model and database operations
///
/// Sessions are the server-side half of the "session" cookie: the cookie
/// carries a random token, the database row carries everything else (signed-in
/// user, one-shot flash queues, and a post-login return path). Only a keyed
/// hash of the token is stored; see [`crate::auth::token`].
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     token_hash TEXT NOT NULL UNIQUE,
///     user_id UUID REFERENCES users(id) ON DELETE CASCADE,
///     flash JSONB NOT NULL DEFAULT '{"success": [], "error": []}',
///     return_to TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     expires_at TIMESTAMPTZ NOT NULL
/// );
/// ```
///
/// # Flash semantics
///
/// [`Session::append_flash`] queues a message; [`Session::take_flash`] reads
/// and clears the queues in one statement. A message queued during one
/// request is therefore visible on exactly the next request that renders.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// One-shot flash message queues stored on the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessages {
    /// Messages rendered as success alerts
    #[serde(default)]
    pub success: Vec<String>,

    /// Messages rendered as error alerts
    #[serde(default)]
    pub error: Vec<String>,
}

impl FlashMessages {
    /// True if there is nothing to render
    pub fn is_empty(&self) -> bool {
        self.success.is_empty() && self.error.is_empty()
    }
}

/// Flash queue selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    /// JSONB key for this queue
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

/// Session model
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    /// Unique session ID
    pub id: Uuid,

    /// Keyed hash of the cookie token (never the token itself)
    pub token_hash: String,

    /// Signed-in user, None for anonymous sessions
    pub user_id: Option<Uuid>,

    /// Pending flash messages
    pub flash: Json<FlashMessages>,

    /// Path to return to after login
    pub return_to: Option<String>,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the session stops being honored
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new anonymous session
    ///
    /// # Arguments
    ///
    /// * `token_hash` - Keyed hash of the cookie token
    /// * `ttl_days` - Session lifetime in days (the cookie gets the same
    ///   Max-Age)
    pub async fn create(
        pool: &PgPool,
        token_hash: &str,
        ttl_days: i64,
    ) -> Result<Self, sqlx::Error> {
        let expires_at = Utc::now() + Duration::days(ttl_days);

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token_hash, expires_at)
            VALUES ($1, $2)
            RETURNING id, token_hash, user_id, flash, return_to, created_at, expires_at
            "#,
        )
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(pool)
        .await?;

        Ok(session)
    }

    /// Finds a live session by its token hash
    ///
    /// Expired sessions are treated as missing; the caller starts a fresh
    /// anonymous session in that case.
    pub async fn find_active_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, token_hash, user_id, flash, return_to, created_at, expires_at
            FROM sessions
            WHERE token_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    /// Binds a user to the session (login)
    pub async fn bind_user(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE sessions SET user_id = $2 WHERE id = $1")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Removes the user binding (logout)
    ///
    /// The session row itself survives so pending flash messages still render
    /// on the post-logout redirect.
    pub async fn unbind_user(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE sessions SET user_id = NULL WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Queues a flash message on the session
    pub async fn append_flash(
        pool: &PgPool,
        id: Uuid,
        kind: FlashKind,
        message: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE sessions
            SET flash = jsonb_set(
                flash,
                ARRAY[$2],
                COALESCE(flash->$2, '[]'::jsonb) || to_jsonb($3::text)
            )
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(kind.as_str())
        .bind(message)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Reads and clears the flash queues in one statement
    ///
    /// Returns empty queues when the session is gone.
    pub async fn take_flash(pool: &PgPool, id: Uuid) -> Result<FlashMessages, sqlx::Error> {
        let taken: Option<(Json<FlashMessages>,)> = sqlx::query_as(
            r#"
            UPDATE sessions s
            SET flash = '{"success": [], "error": []}'::jsonb
            FROM (SELECT id, flash FROM sessions WHERE id = $1 FOR UPDATE) prev
            WHERE s.id = prev.id
            RETURNING prev.flash
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(taken.map(|(flash,)| flash.0).unwrap_or_default())
    }

    /// Records the path to return to after login
    pub async fn set_return_to(pool: &PgPool, id: Uuid, path: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE sessions SET return_to = $2 WHERE id = $1")
            .bind(id)
            .bind(path)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Reads and clears the recorded return path
    pub async fn take_return_to(pool: &PgPool, id: Uuid) -> Result<Option<String>, sqlx::Error> {
        let taken: Option<(Option<String>,)> = sqlx::query_as(
            r#"
            UPDATE sessions s
            SET return_to = NULL
            FROM (SELECT id, return_to FROM sessions WHERE id = $1 FOR UPDATE) prev
            WHERE s.id = prev.id
            RETURNING prev.return_to
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(taken.and_then(|(path,)| path))
    }

    /// Deletes sessions past their expiry
    ///
    /// Called at startup; returns the number of rows removed.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_messages_default_is_empty() {
        let flash = FlashMessages::default();
        assert!(flash.is_empty());
    }

    #[test]
    fn test_flash_messages_deserialize_missing_queues() {
        // Rows written before a queue existed still deserialize
        let flash: FlashMessages = serde_json::from_str(r#"{"success": ["hi"]}"#).unwrap();
        assert_eq!(flash.success, vec!["hi"]);
        assert!(flash.error.is_empty());
    }

    #[test]
    fn test_flash_kind_keys() {
        assert_eq!(FlashKind::Success.as_str(), "success");
        assert_eq!(FlashKind::Error.as_str(), "error");
    }
}

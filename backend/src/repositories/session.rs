//! Repository functions for login sessions.

use sqlx::PgPool;

use crate::models::session::Session;
use crate::types::SessionId;

pub async fn create_session(pool: &PgPool, session: &Session) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO sessions
            (id, user_id, email, username, is_authenticated, created_at, expires_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(session.id)
    .bind(session.user_id)
    .bind(&session.email)
    .bind(&session.username)
    .bind(session.is_authenticated)
    .bind(session.created_at)
    .bind(session.expires_at)
    .execute(pool)
    .await
    .map(|_| ())
}

pub async fn find_session(
    pool: &PgPool,
    session_id: SessionId,
) -> Result<Option<Session>, sqlx::Error> {
    sqlx::query_as::<_, Session>(
        r#"
        SELECT id, user_id, email, username, is_authenticated, created_at, expires_at
        FROM sessions
        WHERE id = $1
        "#,
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await
}

/// Destroys a session entirely. After this call the id resolves to
/// nothing, exactly like an id that was never issued.
pub async fn delete_session(pool: &PgPool, session_id: SessionId) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE id = $1")
        .bind(session_id)
        .execute(pool)
        .await
        .map(|_| ())
}

pub async fn cleanup_expired_sessions(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

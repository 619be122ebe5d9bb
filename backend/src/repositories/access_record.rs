//! Repository functions for per-session rate-limit records.
//!
//! The write path deliberately exposes atomic primitives instead of a
//! plain upsert: `insert_if_absent` for the first request of a session
//! and `update_if_current` as a conditional update keyed on the last
//! observed timestamp. A caller that loses either race knows another
//! request was admitted concurrently.

use sqlx::PgPool;

use crate::models::access_record::AccessRecord;
use crate::types::SessionId;

pub async fn find_access_record(
    pool: &PgPool,
    session_id: SessionId,
) -> Result<Option<AccessRecord>, sqlx::Error> {
    sqlx::query_as::<_, AccessRecord>(
        "SELECT session_id, last_access_ms FROM access_records WHERE session_id = $1",
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await
}

/// Creates the record for a never-seen session. Returns `false` when a
/// concurrent request created it first.
pub async fn insert_if_absent(
    pool: &PgPool,
    session_id: SessionId,
    now_ms: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO access_records (session_id, last_access_ms)
        VALUES ($1, $2)
        ON CONFLICT (session_id) DO NOTHING
        "#,
    )
    .bind(session_id)
    .bind(now_ms)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Advances the timestamp only if it still holds `observed_ms`.
/// Returns `false` when another request updated the row in between.
pub async fn update_if_current(
    pool: &PgPool,
    session_id: SessionId,
    observed_ms: i64,
    now_ms: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE access_records
        SET last_access_ms = $1
        WHERE session_id = $2 AND last_access_ms = $3
        "#,
    )
    .bind(now_ms)
    .bind(session_id)
    .bind(observed_ms)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

//! Per-session admission control backed by the access-record store.
//!
//! One admitted mutating request per window (1000 ms by default) per
//! session. The decision mutates shared state through the store's
//! atomic primitives; the timestamp is committed on admit regardless
//! of whether the guarded handler later fails, because the limiter
//! throttles attempt rate, not success rate.

use sqlx::PgPool;

use crate::repositories::access_record;
use crate::types::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Rejected { retry_after_ms: i64 },
}

/// Admits or rejects one request for `session_id` at `now_ms`.
///
/// Never-seen sessions are admitted and get a fresh record. Seen
/// sessions are admitted only when at least `window_ms` elapsed since
/// the last admitted request, and only if the conditional update wins;
/// losing the update means a concurrent request was admitted inside
/// the window, so this one is rejected. Rejects never touch the
/// stored timestamp. Store failures propagate, they are never treated
/// as an allow.
pub async fn admit(
    pool: &PgPool,
    session_id: SessionId,
    now_ms: i64,
    window_ms: i64,
) -> Result<Decision, sqlx::Error> {
    let Some(record) = access_record::find_access_record(pool, session_id).await? else {
        if access_record::insert_if_absent(pool, session_id, now_ms).await? {
            return Ok(Decision::Allowed);
        }
        // A concurrent first request created the record; it was
        // admitted inside this window, so reject.
        return Ok(Decision::Rejected {
            retry_after_ms: window_ms,
        });
    };

    let elapsed = now_ms.saturating_sub(record.last_access_ms);
    if elapsed < window_ms {
        return Ok(Decision::Rejected {
            retry_after_ms: window_ms - elapsed,
        });
    }

    if access_record::update_if_current(pool, session_id, record.last_access_ms, now_ms).await? {
        Ok(Decision::Allowed)
    } else {
        Ok(Decision::Rejected {
            retry_after_ms: window_ms,
        })
    }
}

/// Converts a reject hint into whole seconds for the Retry-After header.
pub fn retry_after_seconds(retry_after_ms: i64) -> u64 {
    (retry_after_ms.max(0) as u64).div_ceil(1000).max(1)
}

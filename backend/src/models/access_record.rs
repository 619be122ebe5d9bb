//! Model for per-session rate-limit bookkeeping.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::SessionId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// Last admitted access for one session. At most one row per session;
/// rows age out with the session and are never deleted explicitly.
pub struct AccessRecord {
    pub session_id: SessionId,
    /// Unix epoch milliseconds of the last admitted request.
    pub last_access_ms: i64,
}

//! Data models shared across database access and API handlers.

use serde::Deserialize;

pub mod access_record;
pub mod blog;
pub mod follow;
pub mod session;
pub mod user;

/// Query parameters for skip-based feed pagination.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedQuery {
    /// Number of records to skip (default: 0).
    #[serde(default)]
    pub skip: i64,
}

impl FeedQuery {
    /// Returns skip, floored at 0.
    pub fn skip(&self) -> i64 {
        self.skip.max(0)
    }
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self { skip: 0 }
    }
}
